use super::{CardStore, StoreError};
use crate::config::DatabaseConfig;
use crate::constants::database::DUPLICATE_KEY_CODE;
use crate::models::{Card, Character};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use std::time::Duration;
use tracing::{debug, info};

const UUID_INDEX_NAME: &str = "uuid_unique";

/// MongoDB-backed store holding one client for the lifetime of the run.
#[derive(Clone)]
pub struct MongoStore {
    characters: Collection<Character>,
    cards: Collection<Card>,
    card_documents: Collection<Document>,
}

impl MongoStore {
    /// Connects, verifies the server answers a ping and, when configured,
    /// ensures the unique index on `cards.uuid`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| StoreError::Connection(format!("invalid URI {}: {e}", config.uri)))?;
        options.app_name = Some("hakari-cards".to_string());
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;
        let database = client.database(&config.name);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let store = Self {
            characters: database.collection(&config.characters_collection),
            cards: database.collection(&config.cards_collection),
            card_documents: database.collection(&config.cards_collection),
        };

        if config.ensure_unique_index {
            store.ensure_uuid_index().await?;
        }

        info!(
            "Connected to {} (database: {}, {} -> {})",
            config.uri, config.name, config.characters_collection, config.cards_collection
        );

        Ok(store)
    }

    async fn ensure_uuid_index(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "uuid": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name(UUID_INDEX_NAME.to_string())
                    .build(),
            )
            .build();

        self.card_documents.create_index(index).await?;
        debug!("Ensured unique index {} on card codes", UUID_INDEX_NAME);
        Ok(())
    }
}

/// Whether `err` is a duplicate-key rejection raised by the card code index.
///
/// Duplicate keys on any other unique index are ordinary write failures.
fn is_code_conflict(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => names_code_index(
            write_error.code,
            &write_error.message,
            write_error.details.as_ref(),
        ),
        _ => false,
    }
}

fn names_code_index(code: i32, message: &str, details: Option<&Document>) -> bool {
    if code != DUPLICATE_KEY_CODE {
        return false;
    }

    let key_pattern_is_uuid = details
        .and_then(|d| d.get_document("keyPattern").ok())
        .is_some_and(|pattern| pattern.len() == 1 && pattern.contains_key("uuid"));

    key_pattern_is_uuid || message.contains(&format!("index: {UUID_INDEX_NAME} "))
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) | ErrorKind::DnsResolve { .. } => {
                Self::Connection(err.to_string())
            }
            ErrorKind::BsonDeserialization(_) => Self::Decode(err.to_string()),
            _ => Self::Query(err.to_string()),
        }
    }
}

#[async_trait]
impl CardStore for MongoStore {
    async fn characters(&self) -> Result<Vec<Character>, StoreError> {
        let cursor = self.characters.find(doc! {}).await?;
        let characters: Vec<Character> = cursor.try_collect().await?;
        Ok(characters)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, StoreError> {
        let found = self
            .card_documents
            .find_one(doc! { "uuid": code })
            .projection(doc! { "_id": 1 })
            .await?;
        Ok(found.is_some())
    }

    async fn insert_card(&self, card: &Card) -> Result<(), StoreError> {
        match self.cards.insert_one(card).await {
            Ok(_) => Ok(()),
            Err(e) if is_code_conflict(&e) => Err(StoreError::DuplicateCode(card.uuid.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn existing_images(&self, character_id: &Bson) -> Result<Vec<String>, StoreError> {
        let values = self
            .card_documents
            .distinct("image_url", doc! { "character_id": character_id.clone() })
            .await?;

        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::String(image) => Some(image),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_index_duplicate_is_conflict() {
        let message = "E11000 duplicate key error collection: hakari.cards index: uuid_unique \
                       dup key: { uuid: \"caABC\" }";
        assert!(names_code_index(DUPLICATE_KEY_CODE, message, None));
    }

    #[test]
    fn test_key_pattern_on_uuid_is_conflict() {
        let details = doc! { "keyPattern": { "uuid": 1 }, "keyValue": { "uuid": "caABC" } };
        let message = "E11000 duplicate key error";
        assert!(names_code_index(DUPLICATE_KEY_CODE, message, Some(&details)));
    }

    #[test]
    fn test_other_unique_index_is_not_conflict() {
        let message = "E11000 duplicate key error collection: hakari.cards index: \
                       character_id_1_image_url_1 dup key: { character_id: \"c1\", \
                       image_url: \"rare.png\" }";
        let details = doc! { "keyPattern": { "character_id": 1, "image_url": 1 } };
        assert!(!names_code_index(DUPLICATE_KEY_CODE, message, None));
        assert!(!names_code_index(DUPLICATE_KEY_CODE, message, Some(&details)));
    }

    #[test]
    fn test_other_write_error_is_not_conflict() {
        let message = "index: uuid_unique document failed validation";
        assert!(!names_code_index(121, message, None));
    }

    #[test]
    fn test_uuid_prefixed_index_name_is_not_conflict() {
        let message = "E11000 duplicate key error collection: hakari.cards index: \
                       uuid_unique_legacy dup key: { legacy: 1 }";
        assert!(!names_code_index(DUPLICATE_KEY_CODE, message, None));
    }
}
