use std::collections::HashMap;

use crate::error::{EngineError, Result};

/// A comparable item. Identified by a caller-provided string ID; the rest is
/// display metadata the engine never touches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub image_url: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Item {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Item {
            id: id.into(),
            title: title.into(),
            image_url: String::new(),
            description: String::new(),
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// The user's verdict on a displayed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Decision {
    Left,
    Right,
    NoPreference,
}

impl Decision {
    /// True when one side was chosen over the other.
    pub fn is_decisive(self) -> bool {
        !matches!(self, Decision::NoPreference)
    }
}

/// One entry of the session history log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonEvent {
    /// ID of the item shown on the left.
    pub left: String,
    /// ID of the item shown on the right.
    pub right: String,
    pub decision: Decision,
}

/// A leaderboard row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LeaderboardEntry {
    /// 1-based position.
    pub rank: usize,
    pub item: Item,
    pub rating: i64,
}

/// Ratings before and after a decisive comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatingChange {
    pub winner: String,
    pub loser: String,
    pub winner_before: i64,
    pub winner_after: i64,
    pub loser_before: i64,
    pub loser_after: i64,
}

/// Result of `RatingEngine::record_choice()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    /// `None` for a no-preference decision.
    pub rating_change: Option<RatingChange>,
    /// The pair to display next.
    pub next_pair: (Item, Item),
    /// Round number of `next_pair`.
    pub round: usize,
}

/// Internal indexed pair (usize indices into the catalog, not caller IDs).
pub(crate) type IndexedPair = (usize, usize);

/// Maps between caller-provided string IDs and internal 0..N indices.
#[derive(Debug, Clone)]
pub(crate) struct IdMap {
    id_to_idx: HashMap<String, usize>,
}

impl IdMap {
    pub fn from_items(items: &[Item]) -> Result<Self> {
        let mut id_to_idx = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if id_to_idx.insert(item.id.clone(), idx).is_some() {
                return Err(EngineError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(IdMap { id_to_idx })
    }

    pub fn to_idx(&self, id: &str) -> Result<usize> {
        self.id_to_idx
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::UnknownItem(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_map_lookup() {
        let items = vec![Item::new("doge", "Doge"), Item::new("grumpy", "Grumpy Cat")];
        let map = IdMap::from_items(&items).unwrap();
        assert_eq!(map.to_idx("doge").unwrap(), 0);
        assert_eq!(map.to_idx("grumpy").unwrap(), 1);
        assert_eq!(map.to_idx("nyan"), Err(EngineError::UnknownItem("nyan".into())));
    }

    #[test]
    fn test_id_map_rejects_duplicates() {
        let items = vec![Item::new("a", "A"), Item::new("b", "B"), Item::new("a", "A again")];
        let err = IdMap::from_items(&items).unwrap_err();
        assert_eq!(err, EngineError::DuplicateItem("a".into()));
    }

    #[test]
    fn test_item_metadata() {
        let item = Item::new("doge", "Doge")
            .with_image_url("/memes/doge.jpg")
            .with_description("Such wow.");
        assert_eq!(item.image_url, "/memes/doge.jpg");
        assert_eq!(item.description, "Such wow.");
        assert_eq!(item, item.clone());
    }

    #[test]
    fn test_decision_is_decisive() {
        assert!(Decision::Left.is_decisive());
        assert!(Decision::Right.is_decisive());
        assert!(!Decision::NoPreference.is_decisive());
    }
}
