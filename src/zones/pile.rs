//! Pile identifiers and the ordered card container.

use std::fmt;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::card::Card;

/// Number of tableau columns.
pub const TABLEAU_COLUMNS: usize = 7;

/// Number of foundation piles.
pub const FOUNDATIONS: usize = 4;

/// Identifies one of the 13 piles on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileId {
    Stock,
    Waste,
    Foundation(usize),
    Tableau(usize),
}

impl PileId {
    /// Every valid pile: stock, waste, foundations, then tableau columns.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..FOUNDATIONS).map(PileId::Foundation))
            .chain((0..TABLEAU_COLUMNS).map(PileId::Tableau))
    }

    /// Whether the index (if any) is in range.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        match self {
            PileId::Stock | PileId::Waste => true,
            PileId::Foundation(i) => i < FOUNDATIONS,
            PileId::Tableau(i) => i < TABLEAU_COLUMNS,
        }
    }

    /// True for the seven tableau columns.
    #[must_use]
    pub const fn is_tableau(self) -> bool {
        matches!(self, PileId::Tableau(_))
    }

    /// True for the four foundations.
    #[must_use]
    pub const fn is_foundation(self) -> bool {
        matches!(self, PileId::Foundation(_))
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => write!(f, "stock"),
            PileId::Waste => write!(f, "waste"),
            PileId::Foundation(i) => write!(f, "foundation {}", i + 1),
            PileId::Tableau(i) => write!(f, "tableau column {}", i + 1),
        }
    }
}

/// An ordered sequence of cards. Index 0 is the bottom, the last card is the top.
///
/// Backed by `im::Vector`, so cloning a pile (for undo snapshots) shares
/// structure with the original instead of copying every card.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards in the pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// The pile holds no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Card at `position`, counting from the bottom.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Card> + ExactSizeIterator + '_ {
        self.cards.iter()
    }

    /// Cards from `position` to the top.
    pub fn tail(&self, position: usize) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().skip(position)
    }

    /// Index of the lowest face-up card, if any card is face up.
    #[must_use]
    pub fn first_face_up(&self) -> Option<usize> {
        self.cards.iter().position(Card::is_face_up)
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    pub(crate) fn pop(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Remove and return everything from `position` to the top.
    pub(crate) fn split_off(&mut self, position: usize) -> Vector<Card> {
        self.cards.split_off(position)
    }

    pub(crate) fn append(&mut self, cards: Vector<Card>) {
        self.cards.append(cards);
    }

    /// Turn the top card face up. Returns it if it was face down.
    pub(crate) fn reveal_top(&mut self) -> Option<Card> {
        let last = self.cards.len().checked_sub(1)?;
        let card = self.cards.get_mut(last)?;
        if card.is_face_up() {
            return None;
        }
        card.turn_face_up();
        Some(*card)
    }

    pub(crate) fn take_all(&mut self) -> Vector<Card> {
        std::mem::take(&mut self.cards)
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pile {
    type Item = &'a Card;
    type IntoIter = im::vector::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}
