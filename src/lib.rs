//! # klondike-engine
//!
//! Rules, state and undo engine for single-player Klondike Solitaire.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: every operation checks legality first. A
//!    rejected move returns an error and leaves the game exactly as it was.
//!
//! 2. **One set of rules**: placement predicates live in `rules::legality`
//!    and are shared by the executor, auto-complete and the hint ranker.
//!
//! 3. **Presentation-free**: the engine knows nothing about rendering,
//!    animation or timers. The UI layer calls in with gestures, reads
//!    `GameState` back, and drives the clock through `tick`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: piles are `im::Vector`s, so undo
//!   snapshots share structure and cost little to take.
//!
//! - **Reproducible deals**: shuffles come from a seeded ChaCha8 RNG and the
//!   seed travels with the saved game.
//!
//! ## Modules
//!
//! - `core`: Cards, configuration, RNG, dealing, game state, moves, errors
//! - `zones`: Piles and the board, with an O(1) card location index
//! - `rules`: Legality predicates, move executor, `RulesEngine`
//! - `cascade`: Auto-complete to the foundations
//! - `hint`: Ranked move suggestions
//! - `history`: Bounded undo snapshots
//! - `persist`: Versioned save format
//! - `games`: The `KlondikeGame` session

pub mod cascade;
pub mod core;
pub mod games;
pub mod hint;
pub mod history;
pub mod persist;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, Card, CardId, Color, DrawMode, DrawOutcome, EngineError, GameConfig, GameRng,
    GameState, LayoutError, Move, MoveOutcome, Rank, ScoringTable, SourceRef, Suit,
};

pub use crate::zones::{Board, Location, Pile, PileId};

pub use crate::rules::{GameResult, KlondikeRules, RulesEngine};

pub use crate::cascade::{CascadeReport, CascadeResolver};

pub use crate::hint::{Hint, HintCategory, RankedMove};

pub use crate::history::{History, Snapshot};

pub use crate::persist::{SaveError, StateBlob, SAVE_VERSION};

pub use crate::games::{KlondikeGame, KlondikeGameBuilder};
