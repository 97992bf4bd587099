//! Placement predicates.
//!
//! Pure functions over cards and piles. The executor, cascade resolver and
//! hint ranker all call these; none of them re-implement a rule.

use crate::core::card::Card;
use crate::zones::Pile;

/// Can `card` be placed on a tableau column?
///
/// Empty column: Kings only. Otherwise the column's top must be face up, of
/// the opposite color, and exactly one rank higher.
#[must_use]
pub fn can_place_on_tableau(card: &Card, column: &Pile) -> bool {
    match column.top() {
        None => card.rank().is_king(),
        Some(top) => {
            top.is_face_up()
                && top.color() != card.color()
                && card.rank().is_one_below(top.rank())
        }
    }
}

/// Can `card` be placed on a foundation?
///
/// Empty foundation: Aces only. Otherwise same suit, exactly one rank higher.
#[must_use]
pub fn can_place_on_foundation(card: &Card, foundation: &Pile) -> bool {
    match foundation.top() {
        None => card.rank().is_ace(),
        Some(top) => top.suit() == card.suit() && top.rank().is_one_below(card.rank()),
    }
}

/// `lower` may sit directly on `upper` inside a tableau run.
#[must_use]
pub fn continues_run(upper: &Card, lower: &Card) -> bool {
    upper.is_face_up()
        && lower.is_face_up()
        && upper.color() != lower.color()
        && lower.rank().is_one_below(upper.rank())
}

/// Every card is face up and each follows the previous in alternating color,
/// descending rank. An empty sequence is not a run.
#[must_use]
pub fn is_valid_run<'a>(cards: impl IntoIterator<Item = &'a Card>) -> bool {
    let mut iter = cards.into_iter();
    let Some(mut previous) = iter.next() else {
        return false;
    };
    if !previous.is_face_up() {
        return false;
    }
    for card in iter {
        if !continues_run(previous, card) {
            return false;
        }
        previous = card;
    }
    true
}

/// Start index of the longest movable run ending at the column's top.
///
/// `None` for an empty column or one whose top card is face down.
#[must_use]
pub fn run_start(column: &Pile) -> Option<usize> {
    let top_index = column.len().checked_sub(1)?;
    if !column.get(top_index)?.is_face_up() {
        return None;
    }
    let mut start = top_index;
    while start > 0 {
        match (column.get(start - 1), column.get(start)) {
            (Some(upper), Some(lower)) if continues_run(upper, lower) => start -= 1,
            _ => break,
        }
    }
    Some(start)
}

/// Can the run starting at `position` be picked up as a unit?
#[must_use]
pub fn is_movable_run(column: &Pile, position: usize) -> bool {
    position < column.len() && is_valid_run(column.tail(position))
}

/// First foundation (by index) that accepts `card`.
#[must_use]
pub fn foundation_for(card: &Card, foundations: &[Pile]) -> Option<usize> {
    foundations
        .iter()
        .position(|f| can_place_on_foundation(card, f))
}
