//! Card generation from characters.
//!
//! For every character the store yields, one card is built per configured
//! image, in image order, and inserted immediately. Any store failure aborts
//! the run; nothing tracks partial progress apart from the opt-in resume mode,
//! which looks at the cards a character already has.

use crate::config::{CardsConfig, CodesConfig};
use crate::constants::codes::MAX_INSERT_RETRIES;
use crate::db::{CardStore, StoreError};
use crate::domain::Tier;
use crate::models::{Card, Character};
use crate::services::codes::CodeGenerator;
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Image '{0}' does not match any tier keyword")]
    UnclassifiedImage(String),

    #[error("Card code rejected as taken {attempts} times in a row (last: {code})")]
    CodeRetriesExhausted { code: String, attempts: usize },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MigrationOptions {
    /// Only generate the images a character does not have a card for yet.
    pub resume: bool,

    /// Build and log cards without inserting them.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub characters_seen: usize,
    pub characters_skipped: usize,
    pub cards_inserted: usize,
    pub cards_planned: usize,
    pub code_conflicts: usize,
}

pub struct CardMigration<'a, S: ?Sized, R> {
    store: &'a S,
    cards: &'a CardsConfig,
    codes: CodeGenerator<R>,
}

impl<'a, S, R> CardMigration<'a, S, R>
where
    S: CardStore + ?Sized,
    R: Rng,
{
    #[must_use]
    pub fn new(store: &'a S, cards: &'a CardsConfig, codes: &CodesConfig, rng: R) -> Self {
        Self {
            store,
            cards,
            codes: CodeGenerator::new(rng, codes),
        }
    }

    pub async fn run(
        &mut self,
        options: MigrationOptions,
    ) -> Result<MigrationReport, MigrationError> {
        let variants = self.variants()?;
        let characters = self.store.characters().await?;
        let mut report = MigrationReport::default();

        info!(
            "Generating {} cards for each of {} characters{}",
            variants.len(),
            characters.len(),
            if options.dry_run { " (dry run)" } else { "" }
        );

        for character in &characters {
            report.characters_seen += 1;

            let existing = if options.resume {
                self.store.existing_images(&character.id).await?
            } else {
                Vec::new()
            };

            let pending: Vec<&(String, Tier)> = variants
                .iter()
                .filter(|(image, _)| !existing.contains(image))
                .collect();

            if pending.is_empty() {
                warn!(
                    "Skipping {} ({}): all {} cards already exist",
                    character.name,
                    character.id,
                    variants.len()
                );
                report.characters_skipped += 1;
                continue;
            }

            for (image, tier) in pending {
                let card = self.build_card(character, image, *tier).await?;

                if options.dry_run {
                    info!("would insert {card}");
                    report.cards_planned += 1;
                    continue;
                }

                let card = self.insert(card, &mut report).await?;
                info!("inserted {card}");
                report.cards_inserted += 1;
            }
        }

        info!(
            "Migration finished: {} characters, {} skipped, {} inserted, {} planned, \
             {} code conflicts",
            report.characters_seen,
            report.characters_skipped,
            report.cards_inserted,
            report.cards_planned,
            report.code_conflicts
        );

        Ok(report)
    }

    /// Tier for every configured image, in configured order.
    fn variants(&self) -> Result<Vec<(String, Tier)>, MigrationError> {
        self.cards
            .images
            .iter()
            .map(|image| {
                Tier::classify(image)
                    .map(|tier| (image.clone(), tier))
                    .ok_or_else(|| MigrationError::UnclassifiedImage(image.clone()))
            })
            .collect()
    }

    async fn build_card(
        &mut self,
        character: &Character,
        image: &str,
        tier: Tier,
    ) -> Result<Card, StoreError> {
        let uuid = self.codes.next_code(self.store).await?;
        Ok(Card::for_character(character, uuid, &self.cards.set_id, tier, image))
    }

    /// Inserts `card`, drawing a new code whenever the store reports the
    /// current one as taken, at most [`MAX_INSERT_RETRIES`] times.
    async fn insert(
        &mut self,
        mut card: Card,
        report: &mut MigrationReport,
    ) -> Result<Card, MigrationError> {
        let mut attempts = 0;
        loop {
            match self.store.insert_card(&card).await {
                Ok(()) => return Ok(card),
                Err(StoreError::DuplicateCode(code)) => {
                    attempts += 1;
                    report.code_conflicts += 1;
                    if attempts > MAX_INSERT_RETRIES {
                        return Err(MigrationError::CodeRetriesExhausted { code, attempts });
                    }
                    card.uuid = self.codes.next_code(self.store).await?;
                    warn!("Code {} taken at insert, retrying with {}", code, card.uuid);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
