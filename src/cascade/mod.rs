//! Auto-complete: move foundation-eligible cards until none remain.
//!
//! After each successful move (when auto-complete is on) the resolver scans
//! the waste top, then each tableau column top in index order, applies the
//! first foundation move it finds, and scans again. It stops when a full scan
//! finds nothing.
//!
//! ```
//! use klondike_engine::cascade::CascadeResolver;
//! use klondike_engine::core::{DrawMode, GameRng, GameState};
//! use klondike_engine::rules::KlondikeRules;
//!
//! let rules = KlondikeRules::default();
//! let mut state = GameState::dealt(&mut GameRng::new(5), DrawMode::One, true);
//!
//! let first = CascadeResolver::new().resolve(&rules, &mut state);
//! let second = CascadeResolver::new().resolve(&rules, &mut state);
//! assert!(second.is_empty());
//! # let _ = first;
//! ```

mod resolver;

pub use resolver::{CascadeReport, CascadeResolver};
