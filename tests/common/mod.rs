//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use blink_tac_toe::core::{standard, CellIndex, MatchConfig, RandomSource, RandomStream};
use blink_tac_toe::powerups::PowerUpKind;
use blink_tac_toe::rules::Match;

/// Five placements that leave no line and hand the move to player two at
/// turn 5: P1 holds 0, 2, 3 and P2 holds 1, 4.
pub const OPENING: [usize; 5] = [0, 1, 2, 4, 3];

/// Initialize test logging. Level comes from `TEST_LOG`, then `RUST_LOG`,
/// then "warn".
pub fn init_logging() {
    let filter = std::env::var("TEST_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(tracing_subscriber::EnvFilter::new)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}

/// Random source driven by scripted answers.
///
/// - `chance` pops the next scripted roll, or returns false when none are left
/// - power-up picks pop the next scripted index, or return 0
/// - emoji picks walk the category in order, wrapping around
#[derive(Clone, Debug, Default)]
pub struct ScriptedRandom {
    rolls: VecDeque<bool>,
    power_ups: VecDeque<usize>,
    emoji_counter: usize,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful offer roll for `kind` from the standard catalog.
    pub fn offering(mut self, kind: PowerUpKind) -> Self {
        let index = PowerUpKind::ALL
            .iter()
            .position(|&k| k == kind)
            .expect("kind is in the standard catalog");
        self.rolls.push_back(true);
        self.power_ups.push_back(index);
        self
    }

    /// Queue a failed offer roll.
    pub fn declining(mut self) -> Self {
        self.rolls.push_back(false);
        self
    }

    /// Rolls not yet consumed.
    pub fn remaining_rolls(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn pick(&mut self, stream: RandomStream, len: usize) -> usize {
        match stream {
            RandomStream::PowerUp => self.power_ups.pop_front().unwrap_or(0) % len,
            RandomStream::Emoji => {
                let index = self.emoji_counter % len;
                self.emoji_counter += 1;
                index
            }
        }
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.rolls.pop_front().unwrap_or(false)
    }
}

pub fn cell(i: usize) -> CellIndex {
    CellIndex::new(i).expect("cell index in range")
}

/// Animals for player one, food for player two.
pub fn new_match(rng: ScriptedRandom) -> Match<ScriptedRandom> {
    init_logging();
    Match::start(MatchConfig::default(), standard::ANIMALS, standard::FOOD, rng)
        .expect("standard categories are valid")
}

pub fn new_match_with(config: MatchConfig, rng: ScriptedRandom) -> Match<ScriptedRandom> {
    init_logging();
    Match::start(config, standard::ANIMALS, standard::FOOD, rng).expect("standard categories are valid")
}

/// Place at each cell in turn, panicking on any rejection.
pub fn play<R: RandomSource>(game: &mut Match<R>, cells: &[usize]) {
    for &i in cells {
        if let Err(rejection) = game.attempt_place(cell(i)) {
            panic!("placing at {i} on turn {} failed: {rejection}", game.turn_count());
        }
    }
}
