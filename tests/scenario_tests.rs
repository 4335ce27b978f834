//! Full-match scenarios through the public `Match` API.
//!
//! Each test drives a match move by move with scripted randomness and checks
//! the board, turn order and event log.

mod common;

use blink_tac_toe::core::{MatchEvent, MatchStatus, PlayerId, Sequence};
use blink_tac_toe::powerups::{PowerUpKind, PowerUpOutcome};
use blink_tac_toe::rules::PlacementEvent;
use blink_tac_toe::Rejection;

use common::{cell, new_match, play, ScriptedRandom, OPENING};

/// A diagonal completed by player one wins the board.
#[test]
fn test_diagonal_win() {
    let mut game = new_match(ScriptedRandom::new());

    play(&mut game, &[0, 1, 4, 2]);
    let event = game.attempt_place(cell(8)).unwrap();

    assert!(matches!(event, PlacementEvent::PlacedWithWin { .. }));
    assert_eq!(game.winner(), Some(PlayerId::ONE));
    assert_eq!(game.winning_line().unwrap().indices(), [0, 4, 8]);
    assert_eq!(game.scores(), (1, 0));
    assert!(matches!(
        game.status(),
        MatchStatus::Completed { winner: PlayerId::ONE, .. }
    ));
    assert!(matches!(
        game.state().events().last(),
        Some(MatchEvent::Won { winner: PlayerId::ONE, .. })
    ));
}

/// The cell a player's oldest piece sits on cannot be refilled by the move
/// that evicts it, but it is fair game on a later move.
#[test]
fn test_vacated_cell_is_playable_on_a_later_move() {
    let mut game = new_match(ScriptedRandom::new());
    play(&mut game, &[0, 2, 1, 8, 5, 7]);
    assert_eq!(game.current_player(), PlayerId::ONE);

    // Player one is at the cap with their oldest piece on cell 0.
    assert_eq!(
        game.attempt_place(cell(0)),
        Err(Rejection::SelfEvictionConflict(cell(0)))
    );
    assert_eq!(game.turn_count(), 6);

    let event = game.attempt_place(cell(3)).unwrap();
    assert_eq!(event.evicted().unwrap().position, cell(0));
    assert!(game.board().is_empty_cell(cell(0)));

    play(&mut game, &[4]);

    // Now cell 0 is empty and player one's oldest piece sits on cell 1.
    let event = game.attempt_place(cell(0)).unwrap();
    assert_eq!(event.evicted().unwrap().position, cell(1));
    assert_eq!(game.board().owner_at(cell(0)), Some(PlayerId::ONE));
    assert_eq!(game.status(), MatchStatus::InProgress);
}

/// A blocked cell opens again once two placements have elapsed.
#[test]
fn test_block_expires_after_two_placements() {
    let mut game = new_match(ScriptedRandom::new().offering(PowerUpKind::BlockCell));
    play(&mut game, &OPENING);
    assert_eq!(game.current_player(), PlayerId::TWO);

    let outcome = game.use_power_up(PowerUpKind::BlockCell, &[cell(8)]).unwrap();
    assert_eq!(
        outcome,
        PowerUpOutcome::Blocked {
            cell: cell(8),
            expires_at: 7
        }
    );

    play(&mut game, &[6]);
    assert_eq!(game.attempt_place(cell(8)), Err(Rejection::CellBlocked(cell(8))));
    assert!(!game.legal_cells().contains(&cell(8)));

    play(&mut game, &[5]);
    assert!(game.blocked_cells().is_empty());
    assert!(game
        .state()
        .events()
        .iter()
        .any(|e| *e == MatchEvent::CellUnblocked { cell: cell(8) }));

    game.attempt_place(cell(8)).unwrap();
    assert_eq!(game.board().owner_at(cell(8)), Some(PlayerId::TWO));
}

/// Swapping two opponent pieces moves them, but eviction still follows
/// placement order.
#[test]
fn test_swap_keeps_eviction_order() {
    let mut game = new_match(ScriptedRandom::new().offering(PowerUpKind::SwapEmoji));
    play(&mut game, &OPENING);

    // Player one's first piece (sequence 0) sits on cell 0, their newest on cell 3.
    let oldest = game.board().get(cell(0)).unwrap().clone();
    assert_eq!(oldest.sequence, Sequence(0));

    game.use_power_up(PowerUpKind::SwapEmoji, &[cell(0), cell(3)]).unwrap();

    let moved = game.board().get(cell(3)).unwrap();
    assert_eq!(moved.sequence, Sequence(0));
    assert_eq!(moved.emoji, oldest.emoji);
    assert_eq!(game.board().get(cell(0)).unwrap().sequence, Sequence(4));
    assert_eq!(game.state().player(PlayerId::ONE).oldest().unwrap().position, cell(3));

    play(&mut game, &[8]);
    let event = game.attempt_place(cell(5)).unwrap();

    let evicted = event.evicted().unwrap();
    assert_eq!(evicted.sequence, Sequence(0));
    assert_eq!(evicted.position, cell(3));
    assert!(game.board().is_empty_cell(cell(3)));
    assert_eq!(game.board().owner_at(cell(0)), Some(PlayerId::ONE));
}

/// Offers are only considered at positive multiples of the interval.
#[test]
fn test_offer_only_at_interval() {
    let mut game = new_match(ScriptedRandom::new().offering(PowerUpKind::PeekNext));

    assert!(game.pending_power_up().is_none());
    for &i in &OPENING[..4] {
        play(&mut game, &[i]);
        assert!(game.pending_power_up().is_none());
        assert_eq!(game.rng().remaining_rolls(), 1);
    }

    play(&mut game, &[OPENING[4]]);
    let offer = game.pending_power_up().unwrap();
    assert_eq!(offer.kind, PowerUpKind::PeekNext);
    assert_eq!(offer.offered_at, 5);
}

/// An unused offer blocks the next threshold's roll.
#[test]
fn test_no_offer_while_one_is_pending() {
    let rng = ScriptedRandom::new()
        .offering(PowerUpKind::ExtraTurn)
        .offering(PowerUpKind::BlockCell);
    let mut game = new_match(rng);

    play(&mut game, &[0, 1, 2, 4, 3, 6, 5, 8, 7, 0]);

    assert_eq!(game.turn_count(), 10);
    assert_eq!(game.pending_power_up().unwrap().kind, PowerUpKind::ExtraTurn);
    assert_eq!(game.rng().remaining_rolls(), 1);
    let offers = game
        .state()
        .events()
        .iter()
        .filter(|e| matches!(e, MatchEvent::PowerUpOffered { .. }))
        .count();
    assert_eq!(offers, 1);
}

/// A failed roll waits for the next threshold.
#[test]
fn test_declined_roll_then_offer_at_next_threshold() {
    let rng = ScriptedRandom::new()
        .declining()
        .offering(PowerUpKind::BlockCell);
    let mut game = new_match(rng);

    play(&mut game, &OPENING);
    assert!(game.pending_power_up().is_none());
    assert_eq!(game.rng().remaining_rolls(), 1);

    play(&mut game, &[6, 5, 8, 7, 0]);
    let offer = game.pending_power_up().unwrap();
    assert_eq!(offer.kind, PowerUpKind::BlockCell);
    assert_eq!(offer.offered_at, 10);
}

/// A winning placement on a threshold turn does not roll for an offer.
#[test]
fn test_no_offer_on_winning_move() {
    let mut game = new_match(ScriptedRandom::new().offering(PowerUpKind::ExtraTurn));

    play(&mut game, &[0, 1, 4, 2, 8]);

    assert_eq!(game.turn_count(), 5);
    assert_eq!(game.winner(), Some(PlayerId::ONE));
    assert!(game.pending_power_up().is_none());
    assert_eq!(game.rng().remaining_rolls(), 1);
}

/// Scores carry over a board reset. A restart goes back to setup, clearing
/// scores but keeping session stats.
#[test]
fn test_reset_and_restart() {
    let mut game = new_match(ScriptedRandom::new());
    play(&mut game, &[0, 1, 4, 2, 8]);

    game.reset_board();
    assert_eq!(game.scores(), (1, 0));
    assert_eq!(game.turn_count(), 0);
    assert!(game.state().events().is_empty());

    // Player two takes the second board with the middle column.
    play(&mut game, &[0, 1, 3, 4, 8, 7]);
    assert_eq!(game.winner(), Some(PlayerId::TWO));
    assert_eq!(game.scores(), (1, 1));
    assert_eq!(game.stats().games_completed, 2);
    assert_eq!(game.stats().moves_played, 11);

    let mut setup = game.restart();
    assert!(!setup.is_ready());
    setup
        .choose_category(PlayerId::ONE, blink_tac_toe::core::standard::SPACE)
        .unwrap();
    setup
        .choose_category(PlayerId::TWO, blink_tac_toe::core::standard::SPORTS)
        .unwrap();
    let game = setup.start().unwrap();
    assert_eq!(game.scores(), (0, 0));
    assert_eq!(game.stats().games_completed, 2);
    assert_eq!(game.stats().moves_played, 11);
}
