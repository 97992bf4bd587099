//! Klondike rules.
//!
//! - `legality`: pure placement predicates shared by everything else
//! - `executor`: validate-then-apply for moves and draws
//! - `engine`: the `RulesEngine` trait and `GameResult`
//! - `klondike`: the standard Klondike implementation

pub mod engine;
pub mod executor;
pub mod klondike;
pub mod legality;

pub use engine::{GameResult, RulesEngine};
pub use klondike::KlondikeRules;
pub use legality::{
    can_place_on_foundation, can_place_on_tableau, foundation_for, is_movable_run, is_valid_run,
    run_start,
};
