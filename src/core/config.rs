//! Match configuration.
//!
//! Everything the engine does not compute itself is supplied here at
//! initialization:
//! - `CategoryCatalog`: emoji categories players pick from
//! - `PowerUpCatalog`: power-ups that can be offered
//! - Rule constants: piece cap, offer interval and chance, block duration,
//!   peek depth, and the rejected-use policy
//!
//! `MatchConfig::default()` reproduces the standard game.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::board::Emoji;
use crate::powerups::PowerUpCatalog;

/// Category identifier. Opaque to the engine; the catalog gives it meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub u16);

impl CategoryId {
    /// Create a new category ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Category({})", self.0)
    }
}

/// IDs of the categories in [`CategoryCatalog::standard`].
pub mod standard {
    use super::CategoryId;

    pub const ANIMALS: CategoryId = CategoryId::new(0);
    pub const FOOD: CategoryId = CategoryId::new(1);
    pub const SPORTS: CategoryId = CategoryId::new(2);
    pub const SPACE: CategoryId = CategoryId::new(3);
    pub const FACES: CategoryId = CategoryId::new(4);
    pub const WEATHER: CategoryId = CategoryId::new(5);
}

/// Most upcoming emojis Peek Next can reveal.
pub const MAX_PEEK_COUNT: usize = 16;

/// A named, fixed set of emojis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiCategory {
    pub id: CategoryId,
    pub name: String,
    pub emojis: Vec<Emoji>,
}

impl EmojiCategory {
    /// Create a category from symbol strings.
    pub fn new<S: Into<String>>(
        id: CategoryId,
        name: impl Into<String>,
        emojis: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            emojis: emojis.into_iter().map(Emoji::new).collect(),
        }
    }
}

/// Invalid catalog data.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no entries")]
    Empty,
    #[error("category {0} has no emojis")]
    EmptyCategory(String),
    #[error("category id {0} appears more than once")]
    DuplicateId(CategoryId),
}

/// The categories players may choose from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<EmojiCategory>", into = "Vec<EmojiCategory>")]
pub struct CategoryCatalog {
    categories: Vec<EmojiCategory>,
}

impl CategoryCatalog {
    /// Build a catalog, checking that it is non-empty, every category has
    /// at least one emoji, and IDs are unique.
    pub fn new(categories: Vec<EmojiCategory>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, category) in categories.iter().enumerate() {
            if category.emojis.is_empty() {
                return Err(CatalogError::EmptyCategory(category.name.clone()));
            }
            if categories[..i].iter().any(|c| c.id == category.id) {
                return Err(CatalogError::DuplicateId(category.id));
            }
        }
        Ok(Self { categories })
    }

    /// The six standard categories.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            categories: vec![
                EmojiCategory::new(
                    standard::ANIMALS,
                    "animals",
                    ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨"],
                ),
                EmojiCategory::new(
                    standard::FOOD,
                    "food",
                    ["🍎", "🍕", "🍔", "🍦", "🍩", "🍫", "🍿", "🥑", "🍒"],
                ),
                EmojiCategory::new(
                    standard::SPORTS,
                    "sports",
                    ["⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱", "🏓"],
                ),
                EmojiCategory::new(
                    standard::SPACE,
                    "space",
                    ["🚀", "🛸", "🌟", "🌙", "🪐", "☄️", "🌠", "👽", "🌌"],
                ),
                EmojiCategory::new(
                    standard::FACES,
                    "faces",
                    ["😀", "😎", "🤩", "😍", "🥳", "😜", "🤪", "😇", "🤓"],
                ),
                EmojiCategory::new(
                    standard::WEATHER,
                    "weather",
                    ["☀️", "🌤️", "⛅", "🌦️", "🌧️", "⛈️", "🌩️", "❄️", "🌈"],
                ),
            ],
        }
    }

    /// Look up a category by ID.
    #[must_use]
    pub fn get(&self, id: CategoryId) -> Option<&EmojiCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category ID by name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<CategoryId> {
        self.categories.iter().find(|c| c.name == name).map(|c| c.id)
    }

    /// Iterate over all categories.
    pub fn iter(&self) -> impl Iterator<Item = &EmojiCategory> {
        self.categories.iter()
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false for a constructed catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<Vec<EmojiCategory>> for CategoryCatalog {
    type Error = CatalogError;

    fn try_from(categories: Vec<EmojiCategory>) -> Result<Self, Self::Error> {
        Self::new(categories)
    }
}

impl From<CategoryCatalog> for Vec<EmojiCategory> {
    fn from(catalog: CategoryCatalog) -> Self {
        catalog.categories
    }
}

/// What happens to a pending power-up when using it is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectedUsePolicy {
    /// The offer is spent even though nothing happened.
    #[default]
    Consume,
    /// The offer stays pending so the player can try again.
    Retain,
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Categories players pick from.
    pub categories: CategoryCatalog,

    /// Power-ups that may be offered.
    pub power_ups: PowerUpCatalog,

    /// Pieces a player may have on the board before the oldest vanishes.
    pub max_active_pieces: usize,

    /// An offer is considered every time the turn count reaches a positive
    /// multiple of this value.
    pub power_up_interval: u32,

    /// Probability that a considered offer actually happens.
    pub power_up_chance: f64,

    /// Placements a blocked cell stays blocked for.
    pub block_duration: u32,

    /// Upcoming emojis revealed by Peek Next.
    pub peek_count: usize,

    /// Whether a rejected power-up use spends the offer.
    pub rejected_use: RejectedUsePolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            categories: CategoryCatalog::standard(),
            power_ups: PowerUpCatalog::standard(),
            max_active_pieces: 3,
            power_up_interval: 5,
            power_up_chance: 0.7,
            block_duration: 2,
            peek_count: 3,
            rejected_use: RejectedUsePolicy::Consume,
        }
    }
}

impl MatchConfig {
    /// Standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The piece cap actually enforced. Deserialized configs may carry 0,
    /// which is treated as 1.
    #[must_use]
    pub fn piece_cap(&self) -> usize {
        self.max_active_pieces.max(1)
    }

    /// The peek depth actually used. Deserialized configs may carry any
    /// value, which is clamped to [`MAX_PEEK_COUNT`].
    #[must_use]
    pub fn peek_depth(&self) -> usize {
        self.peek_count.min(MAX_PEEK_COUNT)
    }

    /// Replace the category catalog.
    #[must_use]
    pub fn with_categories(mut self, categories: CategoryCatalog) -> Self {
        self.categories = categories;
        self
    }

    /// Replace the power-up catalog.
    #[must_use]
    pub fn with_power_ups(mut self, power_ups: PowerUpCatalog) -> Self {
        self.power_ups = power_ups;
        self
    }

    /// Set the piece cap.
    #[must_use]
    pub fn with_max_active_pieces(mut self, max: usize) -> Self {
        assert!(max > 0, "Piece cap must be at least 1");
        self.max_active_pieces = max;
        self
    }

    /// Set how often an offer is considered.
    #[must_use]
    pub fn with_power_up_interval(mut self, interval: u32) -> Self {
        assert!(interval > 0, "Power-up interval must be at least 1");
        self.power_up_interval = interval;
        self
    }

    /// Set the offer probability.
    #[must_use]
    pub fn with_power_up_chance(mut self, chance: f64) -> Self {
        assert!((0.0..=1.0).contains(&chance), "Power-up chance must be in 0..=1");
        self.power_up_chance = chance;
        self
    }

    /// Set how many placements a block lasts.
    #[must_use]
    pub fn with_block_duration(mut self, duration: u32) -> Self {
        assert!(duration > 0, "Block duration must be at least 1");
        self.block_duration = duration;
        self
    }

    /// Set how many upcoming emojis Peek Next reveals.
    #[must_use]
    pub fn with_peek_count(mut self, count: usize) -> Self {
        assert!(count <= MAX_PEEK_COUNT, "Peek count must be at most {MAX_PEEK_COUNT}");
        self.peek_count = count;
        self
    }

    /// Set the rejected-use policy.
    #[must_use]
    pub fn with_rejected_use(mut self, policy: RejectedUsePolicy) -> Self {
        self.rejected_use = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = CategoryCatalog::standard();

        assert_eq!(catalog.len(), 6);
        assert!(catalog.iter().all(|c| c.emojis.len() == 9));
        assert_eq!(catalog.find_by_name("space"), Some(standard::SPACE));
        assert_eq!(catalog.get(standard::FOOD).unwrap().name, "food");
        assert!(catalog.get(CategoryId::new(99)).is_none());
    }

    #[test]
    fn test_catalog_validation() {
        assert_eq!(CategoryCatalog::new(vec![]), Err(CatalogError::Empty));

        let empty = EmojiCategory::new(CategoryId::new(0), "void", Vec::<String>::new());
        assert_eq!(
            CategoryCatalog::new(vec![empty]),
            Err(CatalogError::EmptyCategory("void".to_string()))
        );

        let a = EmojiCategory::new(CategoryId::new(1), "a", ["x"]);
        let b = EmojiCategory::new(CategoryId::new(1), "b", ["y"]);
        assert_eq!(
            CategoryCatalog::new(vec![a, b]),
            Err(CatalogError::DuplicateId(CategoryId::new(1)))
        );
    }

    #[test]
    fn test_config_builder() {
        let config = MatchConfig::new()
            .with_max_active_pieces(4)
            .with_power_up_interval(3)
            .with_power_up_chance(1.0)
            .with_block_duration(1)
            .with_peek_count(2)
            .with_rejected_use(RejectedUsePolicy::Retain);

        assert_eq!(config.max_active_pieces, 4);
        assert_eq!(config.power_up_interval, 3);
        assert_eq!(config.power_up_chance, 1.0);
        assert_eq!(config.block_duration, 1);
        assert_eq!(config.peek_count, 2);
        assert_eq!(config.rejected_use, RejectedUsePolicy::Retain);
    }

    #[test]
    #[should_panic(expected = "Power-up chance must be in 0..=1")]
    fn test_config_rejects_bad_chance() {
        let _ = MatchConfig::new().with_power_up_chance(1.5);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: MatchConfig =
            serde_json::from_str(r#"{ "power_up_chance": 0.25, "rejected_use": "Retain" }"#).unwrap();

        assert_eq!(config.power_up_chance, 0.25);
        assert_eq!(config.rejected_use, RejectedUsePolicy::Retain);
        assert_eq!(config.max_active_pieces, 3);
        assert_eq!(config.categories, CategoryCatalog::standard());
    }

    #[test]
    fn test_out_of_range_json_is_clamped() {
        let config: MatchConfig = serde_json::from_str(
            r#"{ "max_active_pieces": 0, "peek_count": 18446744073709551615 }"#,
        )
        .unwrap();

        assert_eq!(config.piece_cap(), 1);
        assert_eq!(config.peek_depth(), MAX_PEEK_COUNT);
        assert_eq!(MatchConfig::default().peek_depth(), 3);
    }

    #[test]
    #[should_panic(expected = "Peek count must be at most")]
    fn test_config_rejects_huge_peek() {
        let _ = MatchConfig::new().with_peek_count(MAX_PEEK_COUNT + 1);
    }

    #[test]
    fn test_catalog_json_is_validated() {
        let json = r#"{ "categories": [ { "id": 0, "name": "void", "emojis": [] } ] }"#;
        assert!(serde_json::from_str::<MatchConfig>(json).is_err());

        let json = r#"{ "categories": [ { "id": 7, "name": "cards", "emojis": ["🂡", "🂱"] } ] }"#;
        let config: MatchConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories.find_by_name("cards"), Some(CategoryId::new(7)));
    }
}
