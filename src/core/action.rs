//! Move descriptors and the results handed back to the caller.
//!
//! A move names its source as a tagged `SourceRef` (which pile, and for the
//! tableau which card the run starts at) and its destination as a `PileId`.
//! Presentation hints such as "just revealed" or "just drawn" are not stored
//! on cards; they come back in the outcome values below.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::card::Card;
use crate::zones::PileId;

/// Where a move takes its card(s) from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceRef {
    Stock,
    Waste,
    Foundation(usize),
    /// The run starting at `position` and ending at the column's top.
    Tableau { column: usize, position: usize },
}

impl SourceRef {
    /// The pile this source refers to.
    #[must_use]
    pub const fn pile(self) -> PileId {
        match self {
            SourceRef::Stock => PileId::Stock,
            SourceRef::Waste => PileId::Waste,
            SourceRef::Foundation(i) => PileId::Foundation(i),
            SourceRef::Tableau { column, .. } => PileId::Tableau(column),
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pile())
    }
}

/// A card or run moving from one pile to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: SourceRef,
    pub to: PileId,
}

impl Move {
    /// Move whatever sits at `from` onto `to`.
    #[must_use]
    pub const fn new(from: SourceRef, to: PileId) -> Self {
        Self { from, to }
    }

    /// Waste top onto a foundation.
    #[must_use]
    pub const fn waste_to_foundation(foundation: usize) -> Self {
        Self::new(SourceRef::Waste, PileId::Foundation(foundation))
    }

    /// Waste top onto a column.
    #[must_use]
    pub const fn waste_to_tableau(column: usize) -> Self {
        Self::new(SourceRef::Waste, PileId::Tableau(column))
    }

    /// Column card onto a foundation.
    #[must_use]
    pub const fn tableau_to_foundation(column: usize, position: usize, foundation: usize) -> Self {
        Self::new(
            SourceRef::Tableau { column, position },
            PileId::Foundation(foundation),
        )
    }

    /// Run starting at `position` onto another column.
    #[must_use]
    pub const fn tableau_to_tableau(column: usize, position: usize, dest: usize) -> Self {
        Self::new(SourceRef::Tableau { column, position }, PileId::Tableau(dest))
    }

    /// Foundation top back onto a column.
    #[must_use]
    pub const fn foundation_to_tableau(foundation: usize, dest: usize) -> Self {
        Self::new(SourceRef::Foundation(foundation), PileId::Tableau(dest))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Anything a player can do to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Draw from the stock, or recycle the waste when the stock is empty.
    Draw,
    Move(Move),
}

/// What one executed move changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEffects {
    pub mv: Move,
    /// Cards that moved, bottom first.
    pub cards: SmallVec<[Card; 4]>,
    /// Tableau card turned face up in the source column.
    pub revealed: Option<Card>,
    /// Score change after clamping at zero.
    pub score_delta: i32,
}

/// What one executed draw changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawEffects {
    /// Cards turned onto the waste, in the order drawn (last is the new top).
    pub drawn: SmallVec<[Card; 3]>,
    /// The waste was turned back into the stock instead.
    pub recycled: bool,
    pub score_delta: i32,
}

/// Result of a successful `try_move`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    /// Cards the requested move carried.
    pub moved: SmallVec<[Card; 4]>,
    /// Every card turned face up, including during the cascade.
    pub reveals: SmallVec<[Card; 2]>,
    /// Foundation moves applied automatically afterwards.
    pub cascaded: Vec<Move>,
    pub score_delta: i32,
    /// This move finished the game.
    pub won: bool,
}

/// Result of a successful draw or recycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOutcome {
    pub drawn: SmallVec<[Card; 3]>,
    pub recycled: bool,
    pub reveals: SmallVec<[Card; 2]>,
    pub cascaded: Vec<Move>,
    pub score_delta: i32,
    pub won: bool,
}
