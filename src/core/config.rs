//! Game configuration.
//!
//! - `DrawMode`: how many cards a stock click turns over
//! - `ScoringTable`: points per kind of move
//! - `GameConfig`: combines the above with auto-complete and undo depth

use serde::{Deserialize, Serialize};

/// Cards turned from stock to waste per draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DrawMode {
    #[default]
    One,
    Three,
}

impl DrawMode {
    /// Number of cards per draw.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            DrawMode::One => 1,
            DrawMode::Three => 3,
        }
    }
}

/// A draw count other than 1 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("draw mode must be 1 or 3, got {0}")]
pub struct InvalidDrawMode(pub u8);

impl TryFrom<u8> for DrawMode {
    type Error = InvalidDrawMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(DrawMode::One),
            3 => Ok(DrawMode::Three),
            other => Err(InvalidDrawMode(other)),
        }
    }
}

impl From<DrawMode> for u8 {
    fn from(mode: DrawMode) -> u8 {
        mode.count() as u8
    }
}

/// Points awarded (or deducted) per move kind.
///
/// These are policy, not rules. The running score never drops below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    /// Waste top onto a tableau column.
    pub waste_to_tableau: i32,
    /// Any card onto a foundation.
    pub to_foundation: i32,
    /// Tableau card turned face up after a move.
    pub reveal: i32,
    /// Foundation top back onto the tableau.
    pub foundation_to_tableau: i32,
    /// Run moved between tableau columns.
    pub tableau_to_tableau: i32,
    /// Waste turned back into the stock.
    pub recycle: i32,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            waste_to_tableau: 5,
            to_foundation: 10,
            reveal: 5,
            foundation_to_tableau: -15,
            tableau_to_tableau: 0,
            recycle: 0,
        }
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// One- or three-card draw.
    pub draw_mode: DrawMode,

    /// Move foundation-eligible cards automatically after every move.
    pub auto_complete: bool,

    /// Points per move kind.
    pub scoring: ScoringTable,

    /// Maximum undo snapshots kept (oldest dropped first). At least 1.
    pub history_limit: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            draw_mode: DrawMode::One,
            auto_complete: false,
            scoring: ScoringTable::default(),
            history_limit: 200,
        }
    }
}

impl GameConfig {
    /// Set cards turned per draw.
    #[must_use]
    pub fn with_draw_mode(mut self, mode: DrawMode) -> Self {
        self.draw_mode = mode;
        self
    }

    /// Turn the foundation cascade on or off.
    #[must_use]
    pub fn with_auto_complete(mut self, enabled: bool) -> Self {
        self.auto_complete = enabled;
        self
    }

    /// Replace the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the undo depth. Clamped to at least 1 (the current state).
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }
}
