//! Move ranking for hints.
//!
//! Every legal move is sorted into one of five categories, lower first:
//!
//! 1. tableau top to foundation
//! 2. waste top to foundation
//! 3. tableau run move that turns up a face-down card in its column
//! 4. waste top to tableau
//! 5. foundation top to tableau
//!
//! Within a category moves keep the rules engine's enumeration order, which
//! is by source pile index and then destination index. Tableau moves that
//! reveal nothing are never suggested.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::action::{Move, SourceRef};
use crate::core::card::Card;
use crate::core::state::GameState;
use crate::rules::RulesEngine;
use crate::zones::PileId;

/// Hint priority. Declaration order is rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HintCategory {
    TableauToFoundation,
    WasteToFoundation,
    RevealingRun,
    WasteToTableau,
    FoundationToTableau,
}

/// A legal move with its category and the card it leads with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankedMove {
    pub category: HintCategory,
    pub mv: Move,
    /// The moved card, or the head of the moved run.
    pub card: Card,
}

impl fmt::Display for RankedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move {} from {} to {}", self.card, self.mv.from, self.mv.to)
    }
}

/// What the player should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    Move(RankedMove),
    /// No ranked move; the stock still has cards.
    Draw,
    /// No ranked move and the stock is empty; turn the waste over.
    Recycle,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Move(ranked) => write!(f, "{ranked}."),
            Hint::Draw => f.write_str("Draw a card from the stock."),
            Hint::Recycle => f.write_str("Recycle the waste pile back to the stock."),
        }
    }
}

/// Category of a legal move, or `None` if hints never suggest it.
fn categorize(state: &GameState, mv: &Move) -> Option<HintCategory> {
    match (mv.from, mv.to) {
        (SourceRef::Tableau { .. }, PileId::Foundation(_)) => {
            Some(HintCategory::TableauToFoundation)
        }
        (SourceRef::Waste, PileId::Foundation(_)) => Some(HintCategory::WasteToFoundation),
        (SourceRef::Tableau { column, position }, PileId::Tableau(_)) => {
            let below = position.checked_sub(1)?;
            let hidden = state
                .board()
                .tableau()
                .get(column)?
                .get(below)
                .is_some_and(|c| !c.is_face_up());
            hidden.then_some(HintCategory::RevealingRun)
        }
        (SourceRef::Waste, PileId::Tableau(_)) => Some(HintCategory::WasteToTableau),
        (SourceRef::Foundation(_), PileId::Tableau(_)) => Some(HintCategory::FoundationToTableau),
        _ => None,
    }
}

fn lead_card(state: &GameState, from: SourceRef) -> Option<Card> {
    let pile = state.board().pile(from.pile())?;
    match from {
        SourceRef::Tableau { position, .. } => pile.get(position).copied(),
        _ => pile.top().copied(),
    }
}

/// All suggestible moves, best first.
pub fn rank_moves<R: RulesEngine>(rules: &R, state: &GameState) -> Vec<RankedMove> {
    let mut ranked: Vec<RankedMove> = rules
        .legal_moves(state)
        .into_iter()
        .filter_map(|mv| {
            Some(RankedMove {
                category: categorize(state, &mv)?,
                card: lead_card(state, mv.from)?,
                mv,
            })
        })
        .collect();
    // Stable: keeps pile-index order inside each category.
    ranked.sort_by_key(|r| r.category);
    ranked
}

/// The single best suggestion, or `None` when the game is won or stuck.
pub fn best_hint<R: RulesEngine>(rules: &R, state: &GameState) -> Option<Hint> {
    if state.is_won() {
        return None;
    }
    if let Some(best) = rank_moves(rules, state).into_iter().next() {
        return Some(Hint::Move(best));
    }
    let board = state.board();
    if !board.stock().is_empty() {
        Some(Hint::Draw)
    } else if !board.waste().is_empty() {
        Some(Hint::Recycle)
    } else {
        None
    }
}
