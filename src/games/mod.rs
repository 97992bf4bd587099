//! Playable game sessions built on the engine.

pub mod klondike;

pub use klondike::{KlondikeGame, KlondikeGameBuilder};
