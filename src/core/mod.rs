//! Core engine types: cards, configuration, RNG, state, moves and errors.
//!
//! Everything else in the crate builds on these.

pub mod action;
pub mod card;
pub mod config;
pub mod deal;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{Action, DrawEffects, DrawOutcome, Move, MoveEffects, MoveOutcome, SourceRef};
pub use card::{standard_deck, Card, CardId, Color, Rank, Suit, DECK_SIZE, RANKS_PER_SUIT};
pub use config::{DrawMode, GameConfig, InvalidDrawMode, ScoringTable};
pub use error::{EngineError, LayoutError};
pub use rng::GameRng;
pub use state::GameState;
