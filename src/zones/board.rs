//! The board: all 13 piles plus a card location index.
//!
//! The `Board` owns every pile and keeps `locations` in sync with them so
//! "which pile holds card X" is a single hash lookup instead of a scan. All
//! mutation goes through methods here; callers never touch the index.
//!
//! ## Usage
//!
//! ```
//! use klondike_engine::core::{Card, Rank, Suit};
//! use klondike_engine::zones::{Board, Location, PileId};
//!
//! let mut board = Board::new();
//! let ace = Card::face_up(Rank::ACE, Suit::Spades);
//! board.push(PileId::Tableau(2), ace);
//!
//! assert_eq!(
//!     board.locate(ace.id()),
//!     Some(Location { pile: PileId::Tableau(2), position: 0 })
//! );
//! ```

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::pile::{Pile, PileId, FOUNDATIONS, TABLEAU_COLUMNS};
use crate::core::card::{Card, CardId, DECK_SIZE};
use crate::core::error::LayoutError;

/// Where a card sits: pile plus index from the bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub pile: PileId,
    pub position: usize,
}

/// Stock, waste, four foundations and seven tableau columns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    stock: Pile,
    waste: Pile,
    foundations: [Pile; FOUNDATIONS],
    tableau: [Pile; TABLEAU_COLUMNS],

    /// Card id -> current location. Rebuilt per pile on bulk changes.
    locations: FxHashMap<CardId, Location>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit piles.
    ///
    /// No rule checking happens here; call [`Board::validate`] for that.
    #[must_use]
    pub fn from_piles(
        stock: Pile,
        waste: Pile,
        foundations: [Pile; FOUNDATIONS],
        tableau: [Pile; TABLEAU_COLUMNS],
    ) -> Self {
        let mut board = Self {
            stock,
            waste,
            foundations,
            tableau,
            locations: FxHashMap::default(),
        };
        for id in PileId::all() {
            board.reindex(id);
        }
        board
    }

    // === Access ===

    /// Get a pile by id. `None` for an out-of-range index.
    #[must_use]
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        match id {
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
            PileId::Foundation(i) => self.foundations.get(i),
            PileId::Tableau(i) => self.tableau.get(i),
        }
    }

    fn pile_mut(&mut self, id: PileId) -> Option<&mut Pile> {
        match id {
            PileId::Stock => Some(&mut self.stock),
            PileId::Waste => Some(&mut self.waste),
            PileId::Foundation(i) => self.foundations.get_mut(i),
            PileId::Tableau(i) => self.tableau.get_mut(i),
        }
    }

    /// Face-down draw pile.
    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    /// Face-up pile the stock is drawn onto.
    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    /// The four foundations, by index.
    #[must_use]
    pub fn foundations(&self) -> &[Pile; FOUNDATIONS] {
        &self.foundations
    }

    /// The seven tableau columns, left to right.
    #[must_use]
    pub fn tableau(&self) -> &[Pile; TABLEAU_COLUMNS] {
        &self.tableau
    }

    /// Find a card in O(1).
    #[must_use]
    pub fn locate(&self, card: CardId) -> Option<Location> {
        self.locations.get(&card).copied()
    }

    /// Look up the card at a location.
    #[must_use]
    pub fn card_at(&self, location: Location) -> Option<&Card> {
        self.pile(location.pile)?.get(location.position)
    }

    /// Total number of cards on the board.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        PileId::all()
            .filter_map(|id| self.pile(id))
            .map(Pile::len)
            .sum()
    }

    /// Every card on the board, pile by pile.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        PileId::all()
            .filter_map(move |id| self.pile(id))
            .flat_map(Pile::iter)
    }

    /// All four foundations hold 13 cards.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.foundations.iter().all(|f| f.len() == crate::core::card::RANKS_PER_SUIT)
    }

    // === Mutation ===

    /// Put a card on top of a pile.
    ///
    /// Panics on an out-of-range pile id; callers validate ids first.
    pub fn push(&mut self, id: PileId, card: Card) {
        let pile = self
            .pile_mut(id)
            .unwrap_or_else(|| panic!("pile {id:?} does not exist"));
        let position = pile.len();
        pile.push(card);
        self.locations.insert(card.id(), Location { pile: id, position });
    }

    /// Remove the top card of a pile.
    pub fn pop(&mut self, id: PileId) -> Option<Card> {
        let card = self.pile_mut(id)?.pop()?;
        self.locations.remove(&card.id());
        Some(card)
    }

    /// Remove every card from `position` to the top of a pile.
    ///
    /// Returns `None` if the pile doesn't exist or `position` is past the top.
    pub fn take_from(&mut self, id: PileId, position: usize) -> Option<Vector<Card>> {
        let pile = self.pile_mut(id)?;
        if position >= pile.len() {
            return None;
        }
        let cards = pile.split_off(position);
        for card in &cards {
            self.locations.remove(&card.id());
        }
        Some(cards)
    }

    /// Put a run of cards on top of a pile, preserving their order.
    ///
    /// Panics on an out-of-range pile id; callers validate ids first.
    pub fn extend(&mut self, id: PileId, cards: Vector<Card>) {
        let start = self
            .pile(id)
            .map(Pile::len)
            .unwrap_or_else(|| panic!("pile {id:?} does not exist"));
        for (offset, card) in cards.iter().enumerate() {
            let location = Location {
                pile: id,
                position: start + offset,
            };
            self.locations.insert(card.id(), location);
        }
        if let Some(pile) = self.pile_mut(id) {
            pile.append(cards);
        }
    }

    /// Flip the top card of a pile face up. Returns it if it was face down.
    pub fn reveal_top(&mut self, id: PileId) -> Option<Card> {
        self.pile_mut(id)?.reveal_top()
    }

    /// Turn the waste over into the stock: stock becomes reverse(waste),
    /// all face down, and the waste is emptied.
    ///
    /// Returns how many cards moved. Does nothing while the stock still
    /// holds cards.
    pub fn recycle_waste(&mut self) -> usize {
        if !self.stock.is_empty() {
            return 0;
        }
        let waste = self.waste.take_all();
        let count = waste.len();
        self.stock = waste
            .iter()
            .rev()
            .map(|c| c.with_face_up(false))
            .collect();
        self.reindex(PileId::Stock);
        count
    }

    fn reindex(&mut self, id: PileId) {
        let Some(pile) = self.pile(id) else {
            return;
        };
        let entries: Vec<_> = pile
            .iter()
            .enumerate()
            .map(|(position, card)| (card.id(), Location { pile: id, position }))
            .collect();
        self.locations.extend(entries);
    }

    // === Validation ===

    /// Check that the board could have come from legal play.
    ///
    /// - exactly one 52-card deck, no duplicates
    /// - stock face down; waste and foundations face up
    /// - each foundation is a same-suit run starting at Ace
    /// - no face-up tableau card sits under a face-down one
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = [false; DECK_SIZE];
        let mut count = 0usize;
        for card in self.cards() {
            count += 1;
            let slot = &mut seen[card.id().index()];
            if *slot {
                return Err(LayoutError::DuplicateCard(*card));
            }
            *slot = true;
        }
        if count != DECK_SIZE {
            return Err(LayoutError::CardCount(count));
        }
        if let Some(missing) = CardId::all().find(|id| !seen[id.index()]) {
            return Err(LayoutError::MissingCard(missing));
        }

        if let Some(card) = self.stock.iter().find(|c| c.is_face_up()) {
            return Err(LayoutError::FaceUpInStock(*card));
        }
        if let Some(card) = self.waste.iter().find(|c| !c.is_face_up()) {
            return Err(LayoutError::FaceDownCard {
                pile: PileId::Waste,
                card: *card,
            });
        }

        for (index, foundation) in self.foundations.iter().enumerate() {
            let mut previous: Option<&Card> = None;
            for card in foundation {
                if !card.is_face_up() {
                    return Err(LayoutError::FaceDownCard {
                        pile: PileId::Foundation(index),
                        card: *card,
                    });
                }
                let in_sequence = match previous {
                    None => card.rank().is_ace(),
                    Some(below) => {
                        below.suit() == card.suit() && below.rank().is_one_below(card.rank())
                    }
                };
                if !in_sequence {
                    return Err(LayoutError::FoundationOutOfSequence {
                        foundation: index,
                        card: *card,
                    });
                }
                previous = Some(card);
            }
        }

        for (column, pile) in self.tableau.iter().enumerate() {
            if let Some(first_up) = pile.first_face_up() {
                if pile.tail(first_up).any(|c| !c.is_face_up()) {
                    return Err(LayoutError::FaceUpUnderFaceDown { column });
                }
            }
        }

        Ok(())
    }
}
