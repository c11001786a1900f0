use crate::domain::Tier;
use crate::models::Character;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collectible variant of a character, one per image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub uuid: String,
    pub name: String,
    pub character_id: Bson,
    pub set_id: String,
    pub tier: Tier,
    pub image_url: String,
    pub num_acquired: i32,
}

impl Card {
    /// Builds a fresh card for `character` with a zeroed acquisition counter.
    #[must_use]
    pub fn for_character(
        character: &Character,
        uuid: String,
        set_id: &str,
        tier: Tier,
        image_url: &str,
    ) -> Self {
        Self {
            uuid,
            name: character.name.clone(),
            character_id: character.id.clone(),
            set_id: set_id.to_string(),
            tier,
            image_url: image_url.to_string(),
            num_acquired: 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc, oid::ObjectId};

    #[test]
    fn test_for_character_copies_identity() {
        let character = Character::new("c1", "Aiko");
        let card = Card::for_character(&character, "caABC".into(), "1", Tier::Rare, "rare.png");

        assert_eq!(card.name, "Aiko");
        assert_eq!(card.character_id, Bson::String("c1".into()));
        assert_eq!(card.set_id, "1");
        assert_eq!(card.tier, Tier::Rare);
        assert_eq!(card.image_url, "rare.png");
        assert_eq!(card.num_acquired, 0);
    }

    #[test]
    fn test_document_field_names() {
        let oid = ObjectId::new();
        let character = Character::new(oid, "Aiko");
        let card = Card::for_character(&character, "caX1Z".into(), "1", Tier::Set1, "set_1.gif");

        let document = bson::to_document(&card).unwrap();
        assert_eq!(
            document,
            doc! {
                "uuid": "caX1Z",
                "name": "Aiko",
                "character_id": oid,
                "set_id": "1",
                "tier": 4,
                "image_url": "set_1.gif",
                "num_acquired": 0,
            }
        );
    }

    #[test]
    fn test_display_is_single_line_json() {
        let character = Character::new("c1", "Aiko");
        let card = Card::for_character(&character, "ca7QP".into(), "1", Tier::Common, "common.png");

        let line = card.to_string();
        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["uuid"], "ca7QP");
        assert_eq!(value["tier"], 0);
        assert_eq!(value["character_id"], "c1");
    }
}
