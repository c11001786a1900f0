//! Domain primitives for card generation.
//!
//! A card's [`Tier`] is never stored by the source data. It is derived from
//! the image filename the card was generated for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rarity tier of a card, stored as its integer rank.
///
/// # Examples
///
/// ```rust
/// use hakari_cards::domain::Tier;
///
/// assert_eq!(Tier::classify("epic.png"), Some(Tier::Epic));
/// assert_eq!(Tier::Epic.value(), 2);
/// assert_eq!(Tier::classify("banner.png"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Common,
    Rare,
    Epic,
    Illustration,
    Set1,
}

impl Tier {
    /// Keyword order is match priority: the first keyword contained in a
    /// filename decides its tier.
    pub const KEYWORDS: [(&'static str, Tier); 5] = [
        ("common", Tier::Common),
        ("rare", Tier::Rare),
        ("epic", Tier::Epic),
        ("illustration", Tier::Illustration),
        ("set_1", Tier::Set1),
    ];

    /// Maps an image filename to its tier by substring match.
    ///
    /// Returns `None` when no keyword occurs in `filename`.
    #[must_use]
    pub fn classify(filename: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| filename.contains(keyword))
            .map(|(_, tier)| *tier)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::Common => 0,
            Self::Rare => 1,
            Self::Epic => 2,
            Self::Illustration => 3,
            Self::Set1 => 4,
        }
    }

    #[must_use]
    pub const fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Common),
            1 => Some(Self::Rare),
            2 => Some(Self::Epic),
            3 => Some(Self::Illustration),
            4 => Some(Self::Set1),
            _ => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<Tier> for i32 {
    fn from(tier: Tier) -> Self {
        tier.value()
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.value())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Self::from_value(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid card tier: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IMAGE_LIST;

    #[test]
    fn test_fixed_image_list_tiers_in_order() {
        let tiers: Vec<i32> = IMAGE_LIST
            .iter()
            .map(|image| Tier::classify(image).map(Tier::value))
            .collect::<Option<_>>()
            .unwrap();
        assert_eq!(tiers, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_first_keyword_wins() {
        assert_eq!(Tier::classify("rare_common.png"), Some(Tier::Common));
        assert_eq!(Tier::classify("epic_set_1.gif"), Some(Tier::Epic));
    }

    #[test]
    fn test_substring_anywhere_in_name() {
        assert_eq!(Tier::classify("aiko/illustration_v2.webp"), Some(Tier::Illustration));
    }

    #[test]
    fn test_no_keyword_is_none() {
        assert_eq!(Tier::classify("legendary.png"), None);
        assert_eq!(Tier::classify(""), None);
        // Matching is case sensitive.
        assert_eq!(Tier::classify("COMMON.png"), None);
    }

    #[test]
    fn test_keyword_order_matches_rank() {
        for (rank, (keyword, tier)) in Tier::KEYWORDS.into_iter().enumerate() {
            assert_eq!(Tier::classify(keyword), Some(tier));
            assert_eq!(Tier::from_value(tier.value()), Some(tier));
            assert_eq!(usize::try_from(tier.value()).unwrap(), rank);
        }
        assert_eq!(Tier::from_value(5), None);
    }

    #[test]
    fn test_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Tier::Illustration).unwrap(), "3");
        let tier: Tier = serde_json::from_str("4").unwrap();
        assert_eq!(tier, Tier::Set1);
        assert!(serde_json::from_str::<Tier>("9").is_err());
    }
}
