//! Versioned save format.
//!
//! A save is a flat record: every pile as an ordered list of cards (bottom
//! first, each carrying its face-up flag), the counters, the draw mode and
//! the auto-complete flag. It is encoded with `bincode` behind a leading
//! `u32` version so an older engine can refuse a newer file instead of
//! misreading it.
//!
//! Decoding never trusts the blob. Pile counts, draw mode and the full board
//! layout are checked before a `GameState` is handed back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::card::Card;
use crate::core::config::{DrawMode, InvalidDrawMode};
use crate::core::error::LayoutError;
use crate::core::state::GameState;
use crate::zones::{Board, Pile, FOUNDATIONS, TABLEAU_COLUMNS};

/// Format version written by this build.
pub const SAVE_VERSION: u32 = 1;

/// Why a save could not be written or read back.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to encode save: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode save: {0}")]
    Decode(#[source] bincode::Error),

    #[error("unsupported save version {found} (this build reads {})", SAVE_VERSION)]
    UnsupportedVersion { found: u32 },

    #[error(transparent)]
    InvalidDrawMode(#[from] InvalidDrawMode),

    #[error("saved board is not a legal layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Opaque encoded game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlob(Vec<u8>);

impl StateBlob {
    /// Wrap bytes read from storage.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take the encoded bytes for writing out.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

/// Leading field of every save, read on its own first.
#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

/// On-disk record. `version` must stay the first field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct SaveData {
    version: u32,
    stock: Vec<Card>,
    waste: Vec<Card>,
    foundations: Vec<Vec<Card>>,
    tableau: Vec<Vec<Card>>,
    moves: u32,
    score: i32,
    elapsed_secs: u64,
    draw_mode: u8,
    auto_complete: bool,
    deal_seed: Option<u64>,
}

impl SaveData {
    fn capture(state: &GameState) -> Self {
        let board = state.board();
        let cards = |pile: &Pile| pile.iter().copied().collect::<Vec<_>>();
        Self {
            version: SAVE_VERSION,
            stock: cards(board.stock()),
            waste: cards(board.waste()),
            foundations: board.foundations().iter().map(cards).collect(),
            tableau: board.tableau().iter().map(cards).collect(),
            moves: state.moves(),
            score: state.score(),
            elapsed_secs: state.elapsed_secs(),
            draw_mode: state.draw_mode().into(),
            auto_complete: state.auto_complete(),
            deal_seed: state.deal_seed(),
        }
    }

    fn into_state(self) -> Result<GameState, SaveError> {
        let draw_mode = DrawMode::try_from(self.draw_mode)?;
        let foundations = piles::<FOUNDATIONS>("foundation", self.foundations)?;
        let tableau = piles::<TABLEAU_COLUMNS>("tableau", self.tableau)?;

        let board = Board::from_piles(
            self.stock.into_iter().collect(),
            self.waste.into_iter().collect(),
            foundations,
            tableau,
        );
        board.validate()?;

        Ok(GameState::new(board, draw_mode, self.auto_complete)
            .with_counters(self.moves, self.score, self.elapsed_secs)
            .with_deal_seed(self.deal_seed))
    }
}

fn piles<const N: usize>(kind: &'static str, lists: Vec<Vec<Card>>) -> Result<[Pile; N], LayoutError> {
    let found = lists.len();
    let piles: Vec<Pile> = lists.into_iter().map(Pile::from_iter).collect();
    piles.try_into().map_err(|_| LayoutError::PileCount {
        kind,
        expected: N,
        found,
    })
}

/// Encode a game for storage.
pub fn encode(state: &GameState) -> Result<StateBlob, SaveError> {
    bincode::serialize(&SaveData::capture(state))
        .map(StateBlob)
        .map_err(SaveError::Encode)
}

/// Decode and validate a stored game.
pub fn decode(blob: &StateBlob) -> Result<GameState, SaveError> {
    let header: VersionHeader = bincode::deserialize(&blob.0).map_err(SaveError::Decode)?;
    if header.version != SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion {
            found: header.version,
        });
    }
    let data: SaveData = bincode::deserialize(&blob.0).map_err(SaveError::Decode)?;
    data.into_state()
}
