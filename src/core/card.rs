//! Cards: rank, suit, color and orientation.
//!
//! A `Card` is a plain `Copy` value. Its identity (`CardId`) is derived from
//! rank and suit, so two copies of the same card compare equal by id even when
//! their orientation differs.
//!
//! ```
//! use klondike_engine::core::{Card, Rank, Suit};
//!
//! let queen = Card::face_up(Rank::QUEEN, Suit::Spades);
//! assert_eq!(queen.to_string(), "Q♠");
//! assert!(queen.is_face_up());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cards in one deck.
pub const DECK_SIZE: usize = 52;

/// Number of ranks per suit.
pub const RANKS_PER_SUIT: usize = 13;

/// Card suit, in the order the deck is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Suit {
    /// All suits in deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    /// The suit's color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }

    /// Position in [`Suit::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unicode suit glyph used in card names.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Spades => '♠',
            Suit::Clubs => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Suit color. Tableau runs alternate colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card rank, Ace = 1 through King = 13.
///
/// Serialized as its numeric value; deserializing anything outside `1..=13`
/// fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Create a rank from its value (1..=13).
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= 1 && value <= RANKS_PER_SUIT as u8 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the numeric value (Ace = 1, King = 13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Only aces start a foundation.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.0 == 1
    }

    /// Only kings go on an empty column.
    #[must_use]
    pub const fn is_king(self) -> bool {
        self.0 == 13
    }

    /// Iterate Ace through King.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=RANKS_PER_SUIT as u8).map(Rank)
    }

    /// True when `self` is exactly one rank below `other`.
    #[must_use]
    pub const fn is_one_below(self, other: Rank) -> bool {
        self.0 + 1 == other.0
    }
}

/// Rejected rank value during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rank {0} is outside 1..=13")]
pub struct InvalidRank(pub u8);

impl TryFrom<u8> for Rank {
    type Error = InvalidRank;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or(InvalidRank(value))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> u8 {
        rank.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{n}"),
        }
    }
}

/// Stable identity of a card within one deck (0..52).
///
/// Layout: `suit.index() * 13 + (rank - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Build the id for a rank and suit.
    #[must_use]
    pub const fn of(rank: Rank, suit: Suit) -> Self {
        Self((suit.index() * RANKS_PER_SUIT) as u8 + rank.0 - 1)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over every id in a deck.
    pub fn all() -> impl Iterator<Item = CardId> {
        (0..DECK_SIZE as u8).map(CardId)
    }
}

/// A playing card.
///
/// Orientation is the only mutable part; rank and suit never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: false,
        }
    }

    /// Create a face-up card.
    #[must_use]
    pub const fn face_up(rank: Rank, suit: Suit) -> Self {
        Self {
            rank,
            suit,
            face_up: true,
        }
    }

    /// Get the rank.
    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// Get the suit.
    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.suit
    }

    /// Color of the card's suit.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.suit.color()
    }

    /// Stable identity, independent of orientation.
    #[must_use]
    pub const fn id(&self) -> CardId {
        CardId::of(self.rank, self.suit)
    }

    /// Whether the card is showing.
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    /// Flip face up.
    pub fn turn_face_up(&mut self) {
        self.face_up = true;
    }

    /// Flip face down.
    pub fn turn_face_down(&mut self) {
        self.face_up = false;
    }

    /// Copy of this card with the given orientation.
    #[must_use]
    pub const fn with_face_up(mut self, face_up: bool) -> Self {
        self.face_up = face_up;
        self
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// A fresh face-down deck, suits in [`Suit::ALL`] order, Ace to King.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::all().map(move |rank| Card::new(rank, suit)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suit_colors() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Clubs.color(), Color::Black);
    }

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::new(0).is_none());
        assert!(Rank::new(14).is_none());
        assert_eq!(Rank::new(1), Some(Rank::ACE));
        assert_eq!(Rank::new(13), Some(Rank::KING));
        assert!(Rank::QUEEN.is_one_below(Rank::KING));
        assert!(!Rank::KING.is_one_below(Rank::QUEEN));
    }

    #[test]
    fn test_rank_display() {
        let names: Vec<String> = Rank::all().map(|r| r.to_string()).collect();
        assert_eq!(
            names,
            vec!["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"]
        );
    }

    #[test]
    fn test_card_ids_are_unique() {
        let deck = standard_deck();
        assert_eq!(deck.len(), DECK_SIZE);

        let mut ids: Vec<_> = deck.iter().map(Card::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DECK_SIZE);
        assert_eq!(ids.first(), Some(&CardId(0)));
        assert_eq!(ids.last(), Some(&CardId(51)));
    }

    #[test]
    fn test_deck_starts_face_down() {
        assert!(standard_deck().iter().all(|c| !c.is_face_up()));
    }

    #[test]
    fn test_orientation() {
        let mut card = Card::new(Rank::KING, Suit::Hearts);
        assert!(!card.is_face_up());
        card.turn_face_up();
        assert!(card.is_face_up());
        assert_eq!(card.id(), Card::new(Rank::KING, Suit::Hearts).id());
        card.turn_face_down();
        assert!(!card.is_face_up());
    }

    #[test]
    fn test_rank_serde_rejects_out_of_range() {
        let json = serde_json::to_string(&Rank::QUEEN).unwrap();
        assert_eq!(json, "12");
        assert!(serde_json::from_str::<Rank>("0").is_err());
        assert!(serde_json::from_str::<Rank>("14").is_err());
    }
}
