//! Game state: the board plus counters and per-game settings.
//!
//! `GameState` is one owned value. The executor, cascade resolver and undo
//! history all take it explicitly; there is no ambient mutable state.

use super::config::DrawMode;
use super::deal::deal;
use super::rng::GameRng;
use crate::core::card::Card;
use crate::zones::Board;

/// Complete state of one deal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) moves: u32,
    pub(crate) score: i32,
    pub(crate) elapsed_secs: u64,
    pub(crate) draw_mode: DrawMode,
    pub(crate) auto_complete: bool,
    /// Seed of the shuffle that produced this deal, if it came from one.
    pub(crate) deal_seed: Option<u64>,
}

impl GameState {
    /// Wrap an existing board with zeroed counters.
    #[must_use]
    pub fn new(board: Board, draw_mode: DrawMode, auto_complete: bool) -> Self {
        Self {
            board,
            moves: 0,
            score: 0,
            elapsed_secs: 0,
            draw_mode,
            auto_complete,
            deal_seed: None,
        }
    }

    /// Shuffle and deal a fresh game.
    #[must_use]
    pub fn dealt(rng: &mut GameRng, draw_mode: DrawMode, auto_complete: bool) -> Self {
        let mut state = Self::new(deal(rng), draw_mode, auto_complete);
        state.deal_seed = Some(rng.seed());
        state
    }

    /// Set move count, score and elapsed time (for restoring saved games).
    #[must_use]
    pub fn with_counters(mut self, moves: u32, score: i32, elapsed_secs: u64) -> Self {
        self.moves = moves;
        self.score = score.max(0);
        self.elapsed_secs = elapsed_secs;
        self
    }

    /// Record the shuffle seed that produced this layout.
    #[must_use]
    pub fn with_deal_seed(mut self, seed: Option<u64>) -> Self {
        self.deal_seed = seed;
        self
    }

    /// Current layout.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Successful moves, draws and recycles so far.
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Current score, never negative.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Seconds on the game clock.
    #[must_use]
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Cards turned per draw.
    #[must_use]
    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Whether foundation moves cascade after each operation.
    #[must_use]
    pub fn auto_complete(&self) -> bool {
        self.auto_complete
    }

    /// Seed of the shuffle, `None` for hand-built layouts.
    #[must_use]
    pub fn deal_seed(&self) -> Option<u64> {
        self.deal_seed
    }

    /// All four foundations are full.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.board.is_complete()
    }

    /// The waste cards a player can see: up to `draw_mode` from the top,
    /// bottom first. Only the last one is movable.
    pub fn visible_waste(&self) -> impl Iterator<Item = &Card> + '_ {
        let waste = self.board.waste();
        let start = waste.len().saturating_sub(self.draw_mode.count());
        waste.tail(start)
    }

    /// Add `delta` to the score, flooring at zero and saturating at the top.
    /// Returns the applied change.
    pub(crate) fn add_score(&mut self, delta: i32) -> i32 {
        let before = self.score;
        self.score = self.score.saturating_add(delta).max(0);
        self.score - before
    }

    /// Restored saves can carry any count, so this saturates.
    pub(crate) fn count_move(&mut self) {
        self.moves = self.moves.saturating_add(1);
    }

    /// Advance the clock. Stops once the game is won.
    pub(crate) fn tick(&mut self, seconds: u64) {
        if !self.is_won() {
            self.elapsed_secs = self.elapsed_secs.saturating_add(seconds);
        }
    }
}
