//! Shuffling and the opening layout.
//!
//! Column `i` (0-based) receives `i + 1` cards with only the last face up.
//! The 24 cards left over become the face-down stock.

use tracing::debug;

use super::card::{standard_deck, Card};
use super::rng::GameRng;
use crate::zones::{Board, Pile, TABLEAU_COLUMNS};

/// Cards dealt to the tableau (1 + 2 + ... + 7).
pub const TABLEAU_DEAL: usize = TABLEAU_COLUMNS * (TABLEAU_COLUMNS + 1) / 2;

/// Shuffle a fresh deck with `rng` and lay out the opening board.
#[must_use]
pub fn deal(rng: &mut GameRng) -> Board {
    let mut deck = standard_deck();
    rng.shuffle(&mut deck);
    let board = layout(deck);
    debug!(seed = rng.seed(), stock = board.stock().len(), "dealt board");
    board
}

/// Lay out an already-ordered deck. Cards are taken from the end.
pub(crate) fn layout(mut deck: Vec<Card>) -> Board {
    let mut tableau: [Pile; TABLEAU_COLUMNS] = Default::default();
    for (column, pile) in tableau.iter_mut().enumerate() {
        for row in 0..=column {
            let Some(card) = deck.pop() else {
                break;
            };
            pile.push(card.with_face_up(row == column));
        }
    }

    let stock: Pile = deck.into_iter().map(|c| c.with_face_up(false)).collect();
    Board::from_piles(stock, Pile::new(), Default::default(), tableau)
}
