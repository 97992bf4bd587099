//! Klondike implementation of [`RulesEngine`].

use super::engine::{GameResult, RulesEngine};
use super::executor;
use super::legality::{can_place_on_foundation, can_place_on_tableau, is_movable_run};
use crate::core::action::{Action, DrawEffects, Move, MoveEffects};
use crate::core::config::GameConfig;
use crate::core::error::EngineError;
use crate::core::state::GameState;
use crate::zones::{FOUNDATIONS, TABLEAU_COLUMNS};

/// Standard Klondike rules with a configurable scoring table.
#[derive(Clone, Debug, Default)]
pub struct KlondikeRules {
    config: GameConfig,
}

impl KlondikeRules {
    /// Rules for the given configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub(crate) fn config_mut(&mut self) -> &mut GameConfig {
        &mut self.config
    }
}

impl RulesEngine for KlondikeRules {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        if state.is_won() {
            return vec![];
        }

        let board = state.board();
        let mut actions = Vec::new();

        if !board.stock().is_empty() || !board.waste().is_empty() {
            actions.push(Action::Draw);
        }

        // Waste top
        if let Some(card) = board.waste().top() {
            for (f, foundation) in board.foundations().iter().enumerate() {
                if can_place_on_foundation(card, foundation) {
                    actions.push(Action::Move(Move::waste_to_foundation(f)));
                }
            }
            for (c, column) in board.tableau().iter().enumerate() {
                if can_place_on_tableau(card, column) {
                    actions.push(Action::Move(Move::waste_to_tableau(c)));
                }
            }
        }

        // Foundation tops back to the tableau
        for f in 0..FOUNDATIONS {
            let Some(card) = board.foundations()[f].top() else {
                continue;
            };
            for (c, column) in board.tableau().iter().enumerate() {
                if can_place_on_tableau(card, column) {
                    actions.push(Action::Move(Move::foundation_to_tableau(f, c)));
                }
            }
        }

        // Tableau: top card to foundations, every movable sub-run to columns
        for src in 0..TABLEAU_COLUMNS {
            let column = &board.tableau()[src];
            let Some(top_index) = column.len().checked_sub(1) else {
                continue;
            };
            if let Some(top) = column.top().filter(|c| c.is_face_up()) {
                for (f, foundation) in board.foundations().iter().enumerate() {
                    if can_place_on_foundation(top, foundation) {
                        actions.push(Action::Move(Move::tableau_to_foundation(src, top_index, f)));
                    }
                }
            }
            for position in 0..column.len() {
                if !is_movable_run(column, position) {
                    continue;
                }
                let Some(head) = column.get(position) else {
                    continue;
                };
                for (dst, dest) in board.tableau().iter().enumerate() {
                    if dst != src && can_place_on_tableau(head, dest) {
                        actions.push(Action::Move(Move::tableau_to_tableau(src, position, dst)));
                    }
                }
            }
        }

        actions
    }

    fn apply_move(&self, state: &mut GameState, mv: &Move) -> Result<MoveEffects, EngineError> {
        executor::apply_move(state, mv, &self.config.scoring)
    }

    fn draw(&self, state: &mut GameState) -> Result<DrawEffects, EngineError> {
        executor::draw(state, &self.config.scoring)
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.is_won().then(|| GameResult {
            score: state.score(),
            moves: state.moves(),
            elapsed_secs: state.elapsed_secs(),
        })
    }
}
