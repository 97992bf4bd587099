//! Engine error types.
//!
//! Nothing here is fatal. A rejected operation leaves the game untouched and
//! the caller decides whether to show feedback.

use thiserror::Error;

use crate::core::card::{Card, CardId};
use crate::zones::PileId;

/// Why an engine operation was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move breaks a placement rule.
    #[error("illegal move: {reason}")]
    IllegalMove { reason: &'static str },

    /// The source pile (or the requested position in it) holds no card.
    #[error("{0} has no card to move")]
    EmptySource(PileId),

    /// Pile index out of range.
    #[error("no such pile: {0:?}")]
    NoSuchPile(PileId),

    /// History is at the dealt state.
    #[error("nothing to undo")]
    NothingToUndo,

    /// The deal is won; only a new deal is accepted.
    #[error("game is over, deal a new game")]
    GameOver,
}

impl EngineError {
    pub(crate) const fn illegal(reason: &'static str) -> Self {
        EngineError::IllegalMove { reason }
    }
}

/// A board layout that cannot come from legal play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("expected {expected} {kind} piles, found {found}")]
    PileCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("board holds {0} cards, expected 52")]
    CardCount(usize),

    #[error("card {0} appears more than once")]
    DuplicateCard(Card),

    #[error("card {0:?} is missing")]
    MissingCard(CardId),

    #[error("stock card {0} is face up")]
    FaceUpInStock(Card),

    #[error("{pile} card {card} is face down")]
    FaceDownCard { pile: PileId, card: Card },

    #[error("foundation {} is out of sequence at {}", .foundation + 1, .card)]
    FoundationOutOfSequence { foundation: usize, card: Card },

    #[error("tableau column {} has a face-up card under a face-down card", .column + 1)]
    FaceUpUnderFaceDown { column: usize },
}
