//! Piles and the board that holds them.
//!
//! ## Key Types
//!
//! - `PileId`: Stock, waste, `Foundation(i)` or `Tableau(i)`
//! - `Pile`: Ordered cards, bottom first, backed by `im::Vector`
//! - `Board`: All 13 piles plus an O(1) card location index
//! - `Location`: Pile id plus position from the bottom

pub mod board;
pub mod pile;

pub use board::{Board, Location};
pub use pile::{Pile, PileId, FOUNDATIONS, TABLEAU_COLUMNS};
