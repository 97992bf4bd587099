//! Cascade resolver.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::action::Move;
use crate::core::card::{Card, DECK_SIZE};
use crate::core::state::GameState;
use crate::rules::{foundation_for, RulesEngine};

/// What one cascade run changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeReport {
    /// Foundation moves in the order applied.
    pub steps: Vec<Move>,
    /// Tableau cards turned face up along the way.
    pub reveals: SmallVec<[Card; 2]>,
    pub score_delta: i32,
}

impl CascadeReport {
    /// Nothing moved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Repeatedly applies the first legal foundation move.
///
/// Each step puts one more card on a foundation, so a run is bounded by the
/// deck size. `max_steps` enforces that bound.
#[derive(Clone, Copy, Debug)]
pub struct CascadeResolver {
    max_steps: usize,
}

impl Default for CascadeResolver {
    fn default() -> Self {
        Self {
            max_steps: DECK_SIZE,
        }
    }
}

impl CascadeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The move the next step would make: waste top first, then tableau
    /// tops by column index, each onto the lowest-index foundation that
    /// accepts it.
    #[must_use]
    pub fn next_move(state: &GameState) -> Option<Move> {
        let board = state.board();
        let foundations = board.foundations();

        if let Some(card) = board.waste().top() {
            if let Some(f) = foundation_for(card, foundations) {
                return Some(Move::waste_to_foundation(f));
            }
        }

        board.tableau().iter().enumerate().find_map(|(column, pile)| {
            let card = pile.top().filter(|c| c.is_face_up())?;
            let f = foundation_for(card, foundations)?;
            Some(Move::tableau_to_foundation(column, pile.len() - 1, f))
        })
    }

    /// Apply foundation moves until a scan finds none.
    pub fn resolve<R: RulesEngine>(&self, rules: &R, state: &mut GameState) -> CascadeReport {
        let mut report = CascadeReport::default();

        while report.steps.len() < self.max_steps {
            let Some(mv) = Self::next_move(state) else {
                break;
            };
            // next_move only proposes placements the predicates accept, so a
            // rejection here means the state is already won.
            let Ok(effects) = rules.apply_move(state, &mv) else {
                break;
            };
            report.score_delta = report.score_delta.saturating_add(effects.score_delta);
            report.reveals.extend(effects.revealed);
            report.steps.push(mv);
        }

        if !report.is_empty() {
            debug!(steps = report.steps.len(), "cascade resolved");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::core::config::DrawMode;
    use crate::rules::KlondikeRules;
    use crate::zones::{Board, PileId};

    fn up(rank: u8, suit: Suit) -> Card {
        Card::face_up(Rank::new(rank).unwrap(), suit)
    }

    fn down(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::new(rank).unwrap(), suit)
    }

    #[test]
    fn test_waste_scanned_before_tableau() {
        let mut board = Board::new();
        board.push(PileId::Waste, up(1, Suit::Hearts));
        board.push(PileId::Tableau(0), up(1, Suit::Spades));
        let state = GameState::new(board, DrawMode::One, true);

        assert_eq!(
            CascadeResolver::next_move(&state),
            Some(Move::waste_to_foundation(0))
        );
    }

    #[test]
    fn test_tableau_scanned_in_column_order() {
        let mut board = Board::new();
        board.push(PileId::Tableau(4), up(1, Suit::Spades));
        board.push(PileId::Tableau(2), up(1, Suit::Clubs));
        let state = GameState::new(board, DrawMode::One, true);

        assert_eq!(
            CascadeResolver::next_move(&state),
            Some(Move::tableau_to_foundation(2, 0, 0))
        );
    }

    #[test]
    fn test_chain_with_reveal() {
        // Column 0: 2♠ (down) under A♠. Moving the ace reveals the two, which
        // then follows it up.
        let mut board = Board::new();
        board.push(PileId::Tableau(0), down(2, Suit::Spades));
        board.push(PileId::Tableau(0), up(1, Suit::Spades));
        board.push(PileId::Waste, up(3, Suit::Spades));
        let mut state = GameState::new(board, DrawMode::One, true);

        let report = CascadeResolver::new().resolve(&KlondikeRules::default(), &mut state);

        assert_eq!(report.steps.len(), 3);
        assert_eq!(report.reveals.as_slice(), &[up(2, Suit::Spades)]);
        assert_eq!(state.board().foundations()[0].len(), 3);
        assert!(state.board().waste().is_empty());
        assert!(state.board().tableau()[0].is_empty());
        // Three foundation moves plus one reveal
        assert_eq!(report.score_delta, 35);
        assert_eq!(state.moves(), 3);
    }

    #[test]
    fn test_idempotent() {
        let mut board = Board::new();
        board.push(PileId::Tableau(1), up(1, Suit::Diamonds));
        board.push(PileId::Tableau(3), up(5, Suit::Clubs));
        let mut state = GameState::new(board, DrawMode::One, true);
        let rules = KlondikeRules::default();

        let first = CascadeResolver::new().resolve(&rules, &mut state);
        assert_eq!(first.steps.len(), 1);

        let snapshot = state.clone();
        let second = CascadeResolver::new().resolve(&rules, &mut state);
        assert!(second.is_empty());
        assert_eq!(state, snapshot);
    }
}
