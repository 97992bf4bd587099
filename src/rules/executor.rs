//! Move executor: validate, then mutate.
//!
//! Each operation checks the move against the placement predicates first and
//! only then touches the board, so a rejected move never leaves partial
//! state behind. Snapshotting for undo is the caller's job.

use smallvec::SmallVec;
use tracing::debug;

use super::legality::{can_place_on_foundation, can_place_on_tableau, is_movable_run};
use crate::core::action::{DrawEffects, Move, MoveEffects, SourceRef};
use crate::core::config::ScoringTable;
use crate::core::error::EngineError;
use crate::core::state::GameState;
use crate::zones::PileId;

/// Check a move without applying it.
///
/// Returns the number of cards the move would carry.
pub fn validate_move(state: &GameState, mv: &Move) -> Result<usize, EngineError> {
    if state.is_won() {
        return Err(EngineError::GameOver);
    }
    if !mv.to.is_valid() {
        return Err(EngineError::NoSuchPile(mv.to));
    }
    let source = mv.from.pile();
    if !source.is_valid() {
        return Err(EngineError::NoSuchPile(source));
    }
    if source == mv.to {
        return Err(EngineError::illegal("source and destination are the same pile"));
    }

    let board = state.board();
    let (head, count) = match mv.from {
        SourceRef::Stock => return Err(EngineError::illegal("draw from the stock instead")),
        SourceRef::Waste => (board.waste().top().ok_or(EngineError::EmptySource(source))?, 1),
        SourceRef::Foundation(_) => {
            let pile = board.pile(source).ok_or(EngineError::NoSuchPile(source))?;
            (pile.top().ok_or(EngineError::EmptySource(source))?, 1)
        }
        SourceRef::Tableau { position, .. } => {
            let column = board.pile(source).ok_or(EngineError::NoSuchPile(source))?;
            let head = column
                .get(position)
                .ok_or(EngineError::EmptySource(source))?;
            if !is_movable_run(column, position) {
                return Err(EngineError::illegal("cards are not a face-up run"));
            }
            (head, column.len() - position)
        }
    };

    let dest = board.pile(mv.to).ok_or(EngineError::NoSuchPile(mv.to))?;
    match mv.to {
        PileId::Foundation(_) => {
            if matches!(mv.from, SourceRef::Foundation(_)) {
                return Err(EngineError::illegal("cards do not move between foundations"));
            }
            if count != 1 {
                return Err(EngineError::illegal("foundations take one card at a time"));
            }
            if !can_place_on_foundation(head, dest) {
                return Err(EngineError::illegal("card does not fit on that foundation"));
            }
        }
        PileId::Tableau(_) => {
            if !can_place_on_tableau(head, dest) {
                return Err(EngineError::illegal("card does not fit on that column"));
            }
        }
        PileId::Stock | PileId::Waste => {
            return Err(EngineError::illegal("cards cannot be placed on the stock or waste"));
        }
    }

    Ok(count)
}

/// Apply a card or run move.
///
/// Removes the cards from the source, flips a newly exposed face-down
/// tableau card, appends to the destination, then counts and scores.
pub fn apply_move(
    state: &mut GameState,
    mv: &Move,
    scoring: &ScoringTable,
) -> Result<MoveEffects, EngineError> {
    validate_move(state, mv)?;

    let source = mv.from.pile();
    let position = match mv.from {
        SourceRef::Tableau { position, .. } => position,
        _ => state
            .board
            .pile(source)
            .map_or(0, |p| p.len().saturating_sub(1)),
    };
    let cards = state
        .board
        .take_from(source, position)
        .ok_or(EngineError::EmptySource(source))?;

    let revealed = if source.is_tableau() {
        state.board.reveal_top(source)
    } else {
        None
    };

    let moved: SmallVec<[_; 4]> = cards.iter().copied().collect();
    state.board.extend(mv.to, cards);

    let mut delta = base_score(mv, scoring);
    if revealed.is_some() {
        delta = delta.saturating_add(scoring.reveal);
    }
    let score_delta = state.add_score(delta);
    state.count_move();

    debug!(
        from = %mv.from,
        to = %mv.to,
        cards = moved.len(),
        revealed = ?revealed.map(|c| c.to_string()),
        score = state.score(),
        "applied move"
    );

    Ok(MoveEffects {
        mv: *mv,
        cards: moved,
        revealed,
        score_delta,
    })
}

fn base_score(mv: &Move, scoring: &ScoringTable) -> i32 {
    match (mv.from, mv.to) {
        (_, PileId::Foundation(_)) => scoring.to_foundation,
        (SourceRef::Waste, PileId::Tableau(_)) => scoring.waste_to_tableau,
        (SourceRef::Foundation(_), PileId::Tableau(_)) => scoring.foundation_to_tableau,
        (SourceRef::Tableau { .. }, PileId::Tableau(_)) => scoring.tableau_to_tableau,
        _ => 0,
    }
}

/// Draw from the stock, or recycle the waste if the stock is empty.
///
/// A draw turns up to `draw_mode` cards from the stock top onto the waste,
/// face up. A recycle sets stock = reverse(waste), all face down. Both count
/// as one move.
pub fn draw(state: &mut GameState, scoring: &ScoringTable) -> Result<DrawEffects, EngineError> {
    if state.is_won() {
        return Err(EngineError::GameOver);
    }

    if state.board.stock().is_empty() {
        if state.board.waste().is_empty() {
            return Err(EngineError::EmptySource(PileId::Stock));
        }
        let count = state.board.recycle_waste();
        let score_delta = state.add_score(scoring.recycle);
        state.count_move();
        debug!(cards = count, "recycled waste into stock");
        return Ok(DrawEffects {
            drawn: SmallVec::new(),
            recycled: true,
            score_delta,
        });
    }

    let mut drawn = SmallVec::new();
    for _ in 0..state.draw_mode.count() {
        let Some(card) = state.board.pop(PileId::Stock) else {
            break;
        };
        let card = card.with_face_up(true);
        state.board.push(PileId::Waste, card);
        drawn.push(card);
    }
    state.count_move();
    debug!(cards = drawn.len(), stock = state.board.stock().len(), "drew from stock");

    Ok(DrawEffects {
        drawn,
        recycled: false,
        score_delta: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Rank, Suit};
    use crate::core::config::DrawMode;
    use crate::zones::{Board, Pile};

    fn up(rank: u8, suit: Suit) -> Card {
        Card::face_up(Rank::new(rank).unwrap(), suit)
    }

    fn down(rank: u8, suit: Suit) -> Card {
        Card::new(Rank::new(rank).unwrap(), suit)
    }

    fn state_with(build: impl FnOnce(&mut Board)) -> GameState {
        let mut board = Board::new();
        build(&mut board);
        GameState::new(board, DrawMode::One, false)
    }

    #[test]
    fn test_waste_to_foundation_scores() {
        let mut state = state_with(|b| b.push(PileId::Waste, up(1, Suit::Spades)));
        let scoring = ScoringTable::default();

        let fx = apply_move(&mut state, &Move::waste_to_foundation(2), &scoring).unwrap();

        assert_eq!(fx.cards.len(), 1);
        assert_eq!(fx.score_delta, 10);
        assert_eq!(state.score(), 10);
        assert_eq!(state.moves(), 1);
        assert!(state.board().waste().is_empty());
        assert_eq!(state.board().foundations()[2].len(), 1);
    }

    #[test]
    fn test_tableau_move_reveals() {
        let mut state = state_with(|b| {
            b.push(PileId::Tableau(0), down(4, Suit::Clubs));
            b.push(PileId::Tableau(0), up(12, Suit::Spades));
            b.push(PileId::Tableau(1), up(13, Suit::Hearts));
        });

        let fx = apply_move(
            &mut state,
            &Move::tableau_to_tableau(0, 1, 1),
            &ScoringTable::default(),
        )
        .unwrap();

        assert_eq!(fx.revealed, Some(up(4, Suit::Clubs)));
        assert!(state.board().tableau()[0].top().unwrap().is_face_up());
        assert_eq!(state.board().tableau()[1].len(), 2);
        // tableau->tableau 0 + reveal 5
        assert_eq!(fx.score_delta, 5);
    }

    #[test]
    fn test_run_moves_as_unit() {
        let mut state = state_with(|b| {
            b.push(PileId::Tableau(2), up(10, Suit::Hearts));
            b.push(PileId::Tableau(2), up(9, Suit::Spades));
            b.push(PileId::Tableau(2), up(8, Suit::Diamonds));
            b.push(PileId::Tableau(5), up(11, Suit::Clubs));
        });

        let fx = apply_move(
            &mut state,
            &Move::tableau_to_tableau(2, 0, 5),
            &ScoringTable::default(),
        )
        .unwrap();

        assert_eq!(fx.cards.len(), 3);
        assert!(state.board().tableau()[2].is_empty());
        let ranks: Vec<_> = state.board().tableau()[5]
            .iter()
            .map(|c| c.rank().value())
            .collect();
        assert_eq!(ranks, vec![11, 10, 9, 8]);
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut state = state_with(|b| {
            b.push(PileId::Tableau(0), down(4, Suit::Clubs));
            b.push(PileId::Tableau(0), up(12, Suit::Hearts));
            b.push(PileId::Tableau(1), up(13, Suit::Hearts));
            b.push(PileId::Tableau(3), up(9, Suit::Spades));
            b.push(PileId::Tableau(3), up(8, Suit::Spades));
        });
        let before = state.clone();
        let scoring = ScoringTable::default();

        let cases = [
            // Same color
            (Move::tableau_to_tableau(0, 1, 1), "illegal"),
            // Face-down card can't lead a run
            (Move::tableau_to_tableau(0, 0, 2), "illegal"),
            // Not a valid run (same color)
            (Move::tableau_to_tableau(3, 0, 2), "illegal"),
            // Empty waste
            (Move::waste_to_tableau(2), "empty"),
            // Empty foundation source
            (Move::foundation_to_tableau(0, 2), "empty"),
            // Run onto foundation
            (Move::tableau_to_foundation(3, 0, 0), "illegal"),
            // Out-of-range column
            (Move::tableau_to_tableau(0, 1, 7), "pile"),
            // Position past the top
            (Move::tableau_to_tableau(1, 5, 2), "empty"),
        ];

        for (mv, kind) in cases {
            let err = apply_move(&mut state, &mv, &scoring).unwrap_err();
            let matched = match kind {
                "illegal" => matches!(err, EngineError::IllegalMove { .. }),
                "empty" => matches!(err, EngineError::EmptySource(_)),
                "pile" => matches!(err, EngineError::NoSuchPile(_)),
                _ => false,
            };
            assert!(matched, "{mv}: unexpected {err:?}");
            assert_eq!(state, before, "{mv} mutated state");
        }
    }

    #[test]
    fn test_stock_is_not_a_move_source() {
        let mut state = state_with(|b| b.push(PileId::Stock, down(13, Suit::Clubs)));
        let mv = Move::new(SourceRef::Stock, PileId::Tableau(0));
        assert!(matches!(
            apply_move(&mut state, &mv, &ScoringTable::default()),
            Err(EngineError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_foundation_to_tableau_penalty() {
        let mut state = state_with(|b| {
            b.push(PileId::Foundation(0), up(1, Suit::Hearts));
            b.push(PileId::Foundation(0), up(2, Suit::Hearts));
            b.push(PileId::Tableau(4), up(3, Suit::Clubs));
        });
        state.add_score(50);

        let fx = apply_move(
            &mut state,
            &Move::foundation_to_tableau(0, 4),
            &ScoringTable::default(),
        )
        .unwrap();
        assert_eq!(fx.score_delta, -15);
        assert_eq!(state.score(), 35);
    }

    #[test]
    fn test_draw_one_and_three() {
        let fill = |b: &mut Board| {
            for rank in 1..=5 {
                b.push(PileId::Stock, down(rank, Suit::Diamonds));
            }
        };

        let mut one = state_with(fill);
        let fx = draw(&mut one, &ScoringTable::default()).unwrap();
        assert_eq!(fx.drawn.len(), 1);
        assert_eq!(fx.drawn[0].rank().value(), 5);
        assert!(one.board().waste().top().unwrap().is_face_up());

        let mut three = state_with(fill);
        three.draw_mode = DrawMode::Three;
        let fx = draw(&mut three, &ScoringTable::default()).unwrap();
        let ranks: Vec<_> = fx.drawn.iter().map(|c| c.rank().value()).collect();
        assert_eq!(ranks, vec![5, 4, 3]);
        assert_eq!(three.board().waste().top().unwrap().rank().value(), 3);
        assert_eq!(three.moves(), 1);

        // Only two left: draws what's there.
        let fx = draw(&mut three, &ScoringTable::default()).unwrap();
        assert_eq!(fx.drawn.len(), 2);
        assert!(three.board().stock().is_empty());
    }

    #[test]
    fn test_recycle() {
        let mut state = state_with(|b| {
            b.push(PileId::Waste, up(1, Suit::Clubs));
            b.push(PileId::Waste, up(2, Suit::Clubs));
        });

        let fx = draw(&mut state, &ScoringTable::default()).unwrap();
        assert!(fx.recycled);
        assert!(fx.drawn.is_empty());
        assert!(state.board().waste().is_empty());
        let ranks: Vec<_> = state.board().stock().iter().map(|c| c.rank().value()).collect();
        assert_eq!(ranks, vec![2, 1]);
        assert!(state.board().stock().iter().all(|c| !c.is_face_up()));
        assert_eq!(state.moves(), 1);
    }

    #[test]
    fn test_draw_with_nothing_left() {
        let mut state = GameState::new(Board::new(), DrawMode::One, false);
        assert_eq!(
            draw(&mut state, &ScoringTable::default()),
            Err(EngineError::EmptySource(PileId::Stock))
        );
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn test_won_state_rejects_everything() {
        let mut foundations: [Pile; 4] = Default::default();
        for (i, suit) in Suit::ALL.iter().enumerate() {
            foundations[i] = Rank::all().map(|r| Card::face_up(r, *suit)).collect();
        }
        let board = Board::from_piles(Pile::new(), Pile::new(), foundations, Default::default());
        let mut state = GameState::new(board, DrawMode::One, false);

        assert_eq!(
            draw(&mut state, &ScoringTable::default()),
            Err(EngineError::GameOver)
        );
        assert_eq!(
            apply_move(
                &mut state,
                &Move::foundation_to_tableau(0, 0),
                &ScoringTable::default()
            ),
            Err(EngineError::GameOver)
        );
    }
}
