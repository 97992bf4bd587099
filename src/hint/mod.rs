//! Hint ranker.
//!
//! Advisory only: ranking reads the state and never mutates it.

mod ranker;

pub use ranker::{best_hint, rank_moves, Hint, HintCategory, RankedMove};
