//! Power-up offers and resolution.
//!
//! ## Offers
//!
//! After a placement that does not end the game, the resolver considers an
//! offer when the turn count is a positive multiple of
//! `MatchConfig::power_up_interval`, nothing is pending, and this turn count
//! has not been considered before. The offer happens with probability
//! `power_up_chance`; its kind is drawn uniformly from the catalog.
//!
//! ## Resolution
//!
//! The current player spends the pending power-up. Checks run in order:
//! something is pending, the game is still on, the requested kind matches
//! the offer, the target count fits the kind, then the effect's own
//! targeting rules. Once an offer is confirmed pending, a rejected use is
//! handled by `RejectedUsePolicy`.

use tracing::{debug, info};

use super::power_up::{PowerUp, PowerUpKind, PowerUpOutcome};
use crate::core::{
    CellIndex, EmojiCategory, MatchConfig, MatchEvent, MatchState, PlayerMap, RandomSource,
    RandomStream, RejectedUsePolicy,
};
use crate::error::Rejection;

/// Applies power-up offers and effects to match state.
pub(crate) struct PowerUpResolver;

impl PowerUpResolver {
    /// Roll for an offer at the current turn count.
    ///
    /// Returns the new offer, if one was made.
    pub(crate) fn maybe_offer<R: RandomSource>(
        state: &mut MatchState,
        config: &MatchConfig,
        rng: &mut R,
    ) -> Option<PowerUp> {
        let turn = state.turn_count;
        if turn == 0
            || turn.checked_rem(config.power_up_interval) != Some(0)
            || state.status.is_over()
            || state.pending_power_up.is_some()
            || state.offer_checked_at == Some(turn)
        {
            return None;
        }
        state.offer_checked_at = Some(turn);

        if !rng.chance(config.power_up_chance) {
            debug!(turn, "no power-up this time");
            return None;
        }

        let index = rng.pick(RandomStream::PowerUp, config.power_ups.len());
        let kind = config.power_ups.entry(index)?.kind;
        let offer = PowerUp {
            kind,
            offered_at: turn,
        };
        state.pending_power_up = Some(offer);
        state.record(MatchEvent::PowerUpOffered { kind, turn });
        info!(%kind, turn, "power-up offered");
        Some(offer)
    }

    /// Spend the pending power-up on behalf of the current player.
    pub(crate) fn resolve<R: RandomSource>(
        state: &mut MatchState,
        config: &MatchConfig,
        categories: &PlayerMap<EmojiCategory>,
        rng: &mut R,
        kind: PowerUpKind,
        targets: &[CellIndex],
    ) -> Result<PowerUpOutcome, Rejection> {
        let Some(pending) = state.pending_power_up else {
            return Err(Rejection::NoPendingPowerUp);
        };

        let outcome = Self::validate(state, pending, kind, targets)
            .map(|()| Self::apply(state, config, categories, rng, kind, targets));

        match outcome {
            Ok(outcome) => {
                let player = state.current_player;
                state.pending_power_up = None;
                state.stats.power_ups_used += 1;
                state.record(MatchEvent::PowerUpUsed {
                    player,
                    kind,
                    targets: outcome.targets(),
                });
                info!(%player, %kind, "power-up used");
                Ok(outcome)
            }
            Err(rejection) => {
                Self::forfeit(state, config.rejected_use, pending.kind, &rejection);
                Err(rejection)
            }
        }
    }

    fn validate(
        state: &MatchState,
        pending: PowerUp,
        kind: PowerUpKind,
        targets: &[CellIndex],
    ) -> Result<(), Rejection> {
        if state.status.is_over() {
            return Err(Rejection::GameOver);
        }
        if pending.kind != kind {
            return Err(Rejection::PowerUpMismatch {
                offered: pending.kind,
                requested: kind,
            });
        }
        if targets.len() != kind.target_count() {
            return Err(Rejection::InvalidPowerUpTargetCount {
                kind,
                expected: kind.target_count(),
                actual: targets.len(),
            });
        }

        let opponent = state.current_player.opponent();
        match kind {
            PowerUpKind::SwapEmoji => {
                let (a, b) = (targets[0], targets[1]);
                if a == b {
                    return Err(Rejection::InvalidSwapTarget(b));
                }
                for &cell in &[a, b] {
                    if state.board.owner_at(cell) != Some(opponent) {
                        return Err(Rejection::InvalidSwapTarget(cell));
                    }
                }
            }
            PowerUpKind::BlockCell => {
                let cell = targets[0];
                if !state.board.is_empty_cell(cell) {
                    return Err(Rejection::CellNotEmpty(cell));
                }
                if state.blocked.contains(cell) {
                    return Err(Rejection::CellBlocked(cell));
                }
            }
            PowerUpKind::ExtraTurn | PowerUpKind::PeekNext => {}
        }
        Ok(())
    }

    /// Apply a validated effect.
    fn apply<R: RandomSource>(
        state: &mut MatchState,
        config: &MatchConfig,
        categories: &PlayerMap<EmojiCategory>,
        rng: &mut R,
        kind: PowerUpKind,
        targets: &[CellIndex],
    ) -> PowerUpOutcome {
        let player = state.current_player;
        match kind {
            PowerUpKind::ExtraTurn => {
                state.extra_turn = true;
                PowerUpOutcome::ExtraTurnGranted
            }
            PowerUpKind::SwapEmoji => {
                let (a, b) = (targets[0], targets[1]);
                state.board.swap(a, b);
                // Sequence numbers stay put, so eviction order is unchanged.
                let opponent = player.opponent();
                for placement in state.players[opponent].active.iter_mut() {
                    if placement.position == a {
                        placement.position = b;
                    } else if placement.position == b {
                        placement.position = a;
                    }
                }
                PowerUpOutcome::Swapped { cells: [a, b] }
            }
            PowerUpKind::BlockCell => {
                let cell = targets[0];
                let expires_at = state.turn_count.saturating_add(config.block_duration);
                state.blocked.insert(cell, expires_at);
                PowerUpOutcome::Blocked { cell, expires_at }
            }
            PowerUpKind::PeekNext => {
                state.fill_upcoming(player, &categories[player], config.peek_depth(), rng);
                state.peek = Some(player);
                let emojis = state.upcoming[player]
                    .iter()
                    .take(config.peek_depth())
                    .cloned()
                    .collect();
                PowerUpOutcome::Peeked { emojis }
            }
        }
    }

    fn forfeit(
        state: &mut MatchState,
        policy: RejectedUsePolicy,
        offered: PowerUpKind,
        rejection: &Rejection,
    ) {
        let player = state.current_player;
        match policy {
            RejectedUsePolicy::Consume => {
                state.pending_power_up = None;
                state.stats.power_ups_used += 1;
                state.record(MatchEvent::PowerUpForfeited {
                    player,
                    kind: offered,
                });
                info!(%player, kind = %offered, %rejection, "power-up forfeited");
            }
            RejectedUsePolicy::Retain => {
                debug!(%player, kind = %offered, %rejection, "power-up use rejected, offer kept");
            }
        }
    }
}
