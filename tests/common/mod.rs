//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use klondike_engine::core::standard_deck;
use klondike_engine::persist;
use klondike_engine::{Board, Card, GameConfig, GameState, KlondikeGame, PileId, Rank, Suit};

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level from `TEST_LOG`, then `RUST_LOG`,
/// else `warn`.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn up(rank: u8, suit: Suit) -> Card {
    Card::face_up(Rank::new(rank).unwrap(), suit)
}

pub fn down(rank: u8, suit: Suit) -> Card {
    Card::new(Rank::new(rank).unwrap(), suit)
}

/// Put every card the board doesn't hold yet into the stock, face down.
pub fn fill_stock(mut board: Board) -> Board {
    for card in standard_deck() {
        if board.locate(card.id()).is_none() {
            board.push(PileId::Stock, card.with_face_up(false));
        }
    }
    board
}

/// Start a session on a hand-built layout. Missing cards go to the stock.
///
/// Goes through the save format, the same path a resumed game takes.
pub fn game_with(board: Board, config: GameConfig) -> KlondikeGame {
    let state = GameState::new(fill_stock(board), config.draw_mode, config.auto_complete);
    let blob = persist::encode(&state).unwrap();
    KlondikeGame::deserialize(&blob, config).unwrap()
}

/// Foundations hold A..Q of each suit; the four kings sit face up on
/// tableau columns 0..3. Any king to its foundation is one move from a win
/// once the other three are home.
pub fn near_win_board() -> Board {
    let mut board = Board::new();
    for (f, suit) in Suit::ALL.iter().enumerate() {
        for rank in 1..=12 {
            board.push(PileId::Foundation(f), up(rank, *suit));
        }
        board.push(PileId::Tableau(f), up(13, *suit));
    }
    board
}
