//! Power-up catalog: what can be offered, with display text.

use serde::{Deserialize, Serialize};

use super::power_up::PowerUpKind;
use crate::core::{CatalogError, Emoji};

/// Display data for one power-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpDefinition {
    pub kind: PowerUpKind,
    pub name: String,
    pub description: String,
    pub emoji: Emoji,
}

impl PowerUpDefinition {
    pub fn new(
        kind: PowerUpKind,
        name: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            description: description.into(),
            emoji: Emoji::new(emoji),
        }
    }
}

/// Power-ups that may be offered. Offers pick an entry uniformly, so a
/// catalog without some kind never offers it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PowerUpDefinition>", into = "Vec<PowerUpDefinition>")]
pub struct PowerUpCatalog {
    entries: Vec<PowerUpDefinition>,
}

impl PowerUpCatalog {
    /// Build a catalog. It must have at least one entry.
    pub fn new(entries: Vec<PowerUpDefinition>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries })
    }

    /// The four standard power-ups.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            entries: vec![
                PowerUpDefinition::new(
                    PowerUpKind::ExtraTurn,
                    "Extra Turn",
                    "Take an extra turn after this one",
                    "⏱️",
                ),
                PowerUpDefinition::new(
                    PowerUpKind::SwapEmoji,
                    "Swap Emoji",
                    "Swap positions of two of your opponent's emojis",
                    "🔄",
                ),
                PowerUpDefinition::new(
                    PowerUpKind::BlockCell,
                    "Block Cell",
                    "Block a cell for 2 turns",
                    "🚫",
                ),
                PowerUpDefinition::new(
                    PowerUpKind::PeekNext,
                    "Peek Next",
                    "See your next 3 emojis in advance",
                    "👁️",
                ),
            ],
        }
    }

    /// Definition for a kind, if the catalog has one.
    #[must_use]
    pub fn get(&self, kind: PowerUpKind) -> Option<&PowerUpDefinition> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    /// Entry by position.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&PowerUpDefinition> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerUpDefinition> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PowerUpCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<PowerUpDefinition>> for PowerUpCatalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<PowerUpDefinition>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<PowerUpCatalog> for Vec<PowerUpDefinition> {
    fn from(catalog: PowerUpCatalog) -> Self {
        catalog.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_covers_every_kind() {
        let catalog = PowerUpCatalog::standard();
        assert_eq!(catalog.len(), 4);
        for kind in PowerUpKind::ALL {
            assert_eq!(catalog.get(kind).unwrap().kind, kind);
        }
        assert_eq!(catalog.entry(1).unwrap().kind, PowerUpKind::SwapEmoji);
        assert!(catalog.entry(4).is_none());
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert_eq!(PowerUpCatalog::new(vec![]), Err(CatalogError::Empty));
    }

    #[test]
    fn test_catalog_serde_round_trip_keeps_entries() {
        let only_block = PowerUpCatalog::new(vec![PowerUpDefinition::new(
            PowerUpKind::BlockCell,
            "Block",
            "Block a cell",
            "🚫",
        )])
        .unwrap();
        let json = serde_json::to_string(&only_block).unwrap();
        let restored: PowerUpCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, only_block);
        assert!(restored.get(PowerUpKind::ExtraTurn).is_none());
    }
}
