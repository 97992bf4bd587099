//! Klondike session: the API the UI layer talks to.
//!
//! A [`KlondikeGame`] owns the rules, the current state, undo history, the
//! click-to-move selection and the last hint shown. Every operation either
//! succeeds completely or returns an error and leaves all of that untouched.
//!
//! ```
//! use klondike_engine::core::DrawMode;
//! use klondike_engine::games::KlondikeGame;
//!
//! let mut game = KlondikeGame::builder()
//!     .draw_mode(DrawMode::Three)
//!     .seed(7)
//!     .build();
//!
//! game.draw_from_stock().unwrap();
//! assert_eq!(game.state().moves(), 1);
//!
//! game.undo().unwrap();
//! assert_eq!(game.state().moves(), 0);
//! ```

mod game;

pub use game::{KlondikeGame, KlondikeGameBuilder};
