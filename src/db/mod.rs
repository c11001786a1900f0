//! Storage seam for the card migration.
//!
//! [`CardStore`] is the database handle the migration driver is given. The
//! production implementation is [`MongoStore`]; [`MemoryStore`] mirrors its
//! behaviour in memory for tests and local experiments.

use crate::models::{Card, Character};
use mongodb::bson::Bson;
use thiserror::Error;

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database query failed: {0}")]
    Query(String),

    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// Another card already holds this code.
    #[error("Card code already exists: {0}")]
    DuplicateCode(String),
}

/// Access to the `characters` source and the `cards` destination.
#[async_trait::async_trait]
pub trait CardStore: Send + Sync {
    /// Every source character, in the order the store yields them.
    async fn characters(&self) -> Result<Vec<Character>, StoreError>;

    /// Whether any card already carries `code` as its `uuid`.
    async fn code_exists(&self, code: &str) -> Result<bool, StoreError>;

    /// Inserts a single card.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateCode`] when the card's code is taken.
    async fn insert_card(&self, card: &Card) -> Result<(), StoreError>;

    /// Image filenames of the cards already linked to `character_id`.
    async fn existing_images(&self, character_id: &Bson) -> Result<Vec<String>, StoreError>;
}
