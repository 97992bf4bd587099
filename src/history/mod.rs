//! Bounded undo history.
//!
//! The top entry is always the state the player is looking at. The session
//! records a snapshot after the deal and after every successful mutating
//! operation; undo drops the top and hands back the one underneath.
//!
//! Snapshots hold a [`Board`], whose piles are `im::Vector`s, so each one
//! shares structure with its neighbours and costs little beyond the piles
//! that actually changed.

use im::Vector;

use crate::core::state::GameState;
use crate::zones::Board;

/// What undo restores: layout, score and move count. Elapsed time and
/// settings are not rewound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub score: i32,
    pub moves: u32,
}

impl Snapshot {
    /// Capture the undoable parts of `state`.
    #[must_use]
    pub fn of(state: &GameState) -> Self {
        Self {
            board: state.board().clone(),
            score: state.score(),
            moves: state.moves(),
        }
    }

    /// Write this snapshot back into `state`.
    pub fn restore_into(&self, state: &mut GameState) {
        state.board = self.board.clone();
        state.score = self.score;
        state.moves = self.moves;
    }
}

/// Snapshot stack with a depth limit; the oldest entry is evicted first.
#[derive(Clone, Debug)]
pub struct History {
    entries: Vector<Snapshot>,
    limit: usize,
}

impl History {
    /// Empty history keeping at most `limit` entries (at least 1).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vector::new(),
            limit: limit.max(1),
        }
    }

    /// Forget everything and start from `snapshot`.
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.entries = Vector::unit(snapshot);
    }

    /// Push the state just reached.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.entries.push_back(snapshot);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Drop the current state and return the previous one.
    ///
    /// `None` (and no change) when there is nothing before the current
    /// state.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop_back();
        self.entries.back().cloned()
    }

    /// Number of stored snapshots, including the current one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True only before the first `reset`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// There is an earlier snapshot to go back to.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    /// Maximum number of stored snapshots.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}
