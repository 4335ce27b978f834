//! Match setup: category selection before the first move.
//!
//! A `MatchSetup` only knows how to record category choices and start the
//! match. It has no board, so there is no way to place a piece before both
//! players have picked distinct categories.

use tracing::debug;

use super::engine::Match;
use crate::core::{
    CategoryId, EmojiCategory, MatchConfig, MatchRng, MatchStats, PlayerId, PlayerMap, RandomSource,
};
use crate::error::Rejection;

/// A match waiting for both players to choose a category.
///
/// ```
/// use blink_tac_toe::core::{standard, MatchConfig, PlayerId};
/// use blink_tac_toe::rules::MatchSetup;
///
/// let mut setup = MatchSetup::seeded(MatchConfig::default(), 7);
/// setup.choose_category(PlayerId::ONE, standard::ANIMALS).unwrap();
/// setup.choose_category(PlayerId::TWO, standard::SPACE).unwrap();
///
/// let game = setup.start().unwrap();
/// assert_eq!(game.current_player(), PlayerId::ONE);
/// ```
#[derive(Clone, Debug)]
pub struct MatchSetup<R: RandomSource = MatchRng> {
    config: MatchConfig,
    rng: R,
    choices: PlayerMap<Option<CategoryId>>,
    stats: MatchStats,
}

impl MatchSetup<MatchRng> {
    /// Setup using the default random source.
    #[must_use]
    pub fn seeded(config: MatchConfig, seed: u64) -> Self {
        Self::new(config, MatchRng::new(seed))
    }
}

impl<R: RandomSource> MatchSetup<R> {
    #[must_use]
    pub fn new(config: MatchConfig, rng: R) -> Self {
        Self::resume(config, rng, MatchStats::default())
    }

    /// Setup for a new match in a session that already has stats.
    pub(crate) fn resume(config: MatchConfig, rng: R, stats: MatchStats) -> Self {
        Self {
            config,
            rng,
            choices: PlayerMap::with_default(),
            stats,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Session stats the next match will start from.
    #[must_use]
    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    /// The category a player has picked so far.
    #[must_use]
    pub fn choice(&self, player: PlayerId) -> Option<CategoryId> {
        self.choices[player]
    }

    /// Categories `player` may still pick: everything except the
    /// opponent's choice.
    pub fn available_categories(&self, player: PlayerId) -> impl Iterator<Item = &EmojiCategory> {
        let taken = self.choices[player.opponent()];
        self.config
            .categories
            .iter()
            .filter(move |c| Some(c.id) != taken)
    }

    /// Record `player`'s category. A player may change their mind until the
    /// match starts.
    pub fn choose_category(&mut self, player: PlayerId, category: CategoryId) -> Result<(), Rejection> {
        if self.config.categories.get(category).is_none() {
            return Err(Rejection::UnknownCategory(category));
        }
        if self.choices[player.opponent()] == Some(category) {
            return Err(Rejection::DuplicateCategory(category));
        }
        self.choices[player] = Some(category);
        debug!(%player, %category, "category chosen");
        Ok(())
    }

    /// True once both players hold distinct categories.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.missing_player().is_none()
    }

    /// Start the match. Consumes the setup; check [`is_ready`](Self::is_ready)
    /// first to keep it on failure.
    pub fn start(self) -> Result<Match<R>, Rejection> {
        let first = self.chosen_category(PlayerId::ONE)?;
        let second = self.chosen_category(PlayerId::TWO)?;
        Ok(Match::begin(
            self.config,
            PlayerMap::from_pair(first, second),
            self.stats,
            self.rng,
        ))
    }

    fn chosen_category(&self, player: PlayerId) -> Result<EmojiCategory, Rejection> {
        let id = self.choices[player].ok_or(Rejection::MissingCategory(player))?;
        self.config
            .categories
            .get(id)
            .cloned()
            .ok_or(Rejection::UnknownCategory(id))
    }

    fn missing_player(&self) -> Option<PlayerId> {
        PlayerId::both().find(|&p| self.choices[p].is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::standard;

    #[test]
    fn test_choose_and_start() {
        let mut setup = MatchSetup::seeded(MatchConfig::default(), 1);
        setup.choose_category(PlayerId::ONE, standard::FOOD).unwrap();
        assert!(!setup.is_ready());
        setup.choose_category(PlayerId::TWO, standard::WEATHER).unwrap();
        assert!(setup.is_ready());

        let game = setup.start().unwrap();
        assert_eq!(game.category(PlayerId::ONE).id, standard::FOOD);
        assert_eq!(game.category(PlayerId::TWO).id, standard::WEATHER);
        assert_eq!(game.turn_count(), 0);
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let mut setup = MatchSetup::seeded(MatchConfig::default(), 1);
        setup.choose_category(PlayerId::ONE, standard::SPORTS).unwrap();

        assert_eq!(
            setup.choose_category(PlayerId::TWO, standard::SPORTS),
            Err(Rejection::DuplicateCategory(standard::SPORTS))
        );
        assert_eq!(setup.choice(PlayerId::TWO), None);
    }

    #[test]
    fn test_player_may_change_choice() {
        let mut setup = MatchSetup::seeded(MatchConfig::default(), 1);
        setup.choose_category(PlayerId::ONE, standard::SPORTS).unwrap();
        setup.choose_category(PlayerId::ONE, standard::SPACE).unwrap();
        assert_eq!(setup.choice(PlayerId::ONE), Some(standard::SPACE));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let mut setup = MatchSetup::seeded(MatchConfig::default(), 1);
        assert_eq!(
            setup.choose_category(PlayerId::ONE, CategoryId::new(99)),
            Err(Rejection::UnknownCategory(CategoryId::new(99)))
        );
    }

    #[test]
    fn test_start_requires_both_choices() {
        let mut setup = MatchSetup::seeded(MatchConfig::default(), 1);
        setup.choose_category(PlayerId::TWO, standard::FACES).unwrap();

        assert_eq!(setup.start().err(), Some(Rejection::MissingCategory(PlayerId::ONE)));
    }

    #[test]
    fn test_available_categories_skip_opponent_choice() {
        let mut setup = MatchSetup::seeded(MatchConfig::default(), 1);
        setup.choose_category(PlayerId::ONE, standard::ANIMALS).unwrap();

        let ids: Vec<_> = setup.available_categories(PlayerId::TWO).map(|c| c.id).collect();
        assert_eq!(ids.len(), 5);
        assert!(!ids.contains(&standard::ANIMALS));
        assert_eq!(setup.available_categories(PlayerId::ONE).count(), 6);
    }
}
