//! Rules engine trait.
//!
//! Separates "what is legal and what happens" from the session that owns
//! history, selection and hints:
//! - What actions are legal
//! - How actions modify state
//! - When the game is over

use serde::{Deserialize, Serialize};

use crate::core::action::{Action, DrawEffects, Move, MoveEffects};
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::state::GameState;

/// Final figures of a won game, handed to the display/statistics layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub score: i32,
    pub moves: u32,
    pub elapsed_secs: u64,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_move` / `draw` must validate before mutating and leave the state
///   untouched on error
/// - `is_terminal`: return `None` while the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Every action legal in `state`, draw first, then moves by source pile.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply a card or run move.
    fn apply_move(&self, state: &mut GameState, mv: &Move) -> Result<MoveEffects, EngineError>;

    /// Draw from the stock or recycle the waste.
    fn draw(&self, state: &mut GameState) -> Result<DrawEffects, EngineError>;

    /// `Some(result)` once the game has ended.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Legal card/run moves only.
    fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        self.legal_actions(state)
            .into_iter()
            .filter_map(|action| match action {
                Action::Move(mv) => Some(mv),
                Action::Draw => None,
            })
            .collect()
    }

    /// Whether an action is currently legal.
    fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.legal_actions(state).contains(action)
    }
}
