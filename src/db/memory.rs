use super::{CardStore, StoreError};
use crate::models::{Card, Character};
use async_trait::async_trait;
use mongodb::bson::Bson;
use tokio::sync::RwLock;

/// In-memory stand-in for the two collections.
///
/// Code lookups scan every stored card. Inserts reject taken codes the same
/// way the unique index on `cards.uuid` does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    characters: RwLock<Vec<Character>>,
    cards: RwLock<Vec<Card>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_characters(characters: Vec<Character>) -> Self {
        Self {
            characters: RwLock::new(characters),
            cards: RwLock::new(Vec::new()),
        }
    }

    /// Seeds a card without the uniqueness check, e.g. to model data written
    /// before the index existed.
    pub async fn seed_card(&self, card: Card) {
        self.cards.write().await.push(card);
    }

    pub async fn cards(&self) -> Vec<Card> {
        self.cards.read().await.clone()
    }

    pub async fn card_count(&self) -> usize {
        self.cards.read().await.len()
    }
}

#[async_trait]
impl CardStore for MemoryStore {
    async fn characters(&self) -> Result<Vec<Character>, StoreError> {
        Ok(self.characters.read().await.clone())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let cards = self.cards.read().await;
        for card in cards.iter() {
            if card.uuid == code {
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn insert_card(&self, card: &Card) -> Result<(), StoreError> {
        let mut cards = self.cards.write().await;
        if cards.iter().any(|c| c.uuid == card.uuid) {
            return Err(StoreError::DuplicateCode(card.uuid.clone()));
        }
        cards.push(card.clone());
        Ok(())
    }

    async fn existing_images(&self, character_id: &Bson) -> Result<Vec<String>, StoreError> {
        let cards = self.cards.read().await;
        let mut images: Vec<String> = Vec::new();
        for card in cards.iter().filter(|c| &c.character_id == character_id) {
            if !images.contains(&card.image_url) {
                images.push(card.image_url.clone());
            }
        }
        Ok(images)
    }
}
