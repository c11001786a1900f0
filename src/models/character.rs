use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};

/// Source document a set of cards is generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "_id")]
    pub id: Bson,
    pub name: String,
}

impl Character {
    #[must_use]
    pub fn new(id: impl Into<Bson>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
