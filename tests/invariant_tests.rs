//! Property-based tests over random playouts.
//!
//! Each case deals a seeded game and plays a sequence of legal actions
//! picked by the generated indices, checking the board after every step.

mod common;

use proptest::prelude::*;

use klondike_engine::{Action, DrawMode, GameConfig, Hint, KlondikeGame, RulesEngine};

fn draw_mode() -> impl Strategy<Value = DrawMode> {
    prop_oneof![Just(DrawMode::One), Just(DrawMode::Three)]
}

/// Play up to `picks.len()` legal actions. Returns the number applied.
fn play(game: &mut KlondikeGame, picks: &[usize]) -> Result<usize, TestCaseError> {
    let mut applied = 0;
    for pick in picks {
        if game.is_won() {
            break;
        }
        let actions = game.rules().legal_actions(game.state());
        if actions.is_empty() {
            break;
        }
        let outcome = match actions[pick % actions.len()] {
            Action::Draw => game.draw_from_stock().map(|_| ()),
            Action::Move(mv) => game.try_move(mv.from, mv.to).map(|_| ()),
        };
        prop_assert!(outcome.is_ok(), "listed action rejected: {:?}", outcome);
        applied += 1;

        // Full deck, no duplicates, orientation rules
        let layout = game.state().board().validate();
        prop_assert!(layout.is_ok(), "invalid layout: {:?}", layout);
        prop_assert_eq!(game.state().board().total_cards(), 52);
    }
    Ok(applied)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Property: every reachable board holds one full deck and never shows a
    /// face-up tableau card under a face-down one.
    #[test]
    fn prop_playout_keeps_invariants(
        seed in any::<u64>(),
        mode in draw_mode(),
        auto in any::<bool>(),
        picks in prop::collection::vec(any::<usize>(), 0..150),
    ) {
        common::init_logging();
        let mut game = KlondikeGame::builder()
            .draw_mode(mode)
            .auto_complete(auto)
            .seed(seed)
            .build();
        play(&mut game, &picks)?;
        prop_assert!(game.state().score() >= 0);
    }

    /// Property: serialize then deserialize gives back the same state.
    #[test]
    fn prop_save_round_trip(
        seed in any::<u64>(),
        mode in draw_mode(),
        picks in prop::collection::vec(any::<usize>(), 0..100),
        seconds in 0u64..10_000,
    ) {
        let mut game = KlondikeGame::builder().draw_mode(mode).seed(seed).build();
        play(&mut game, &picks)?;
        game.tick(seconds);

        let blob = game.serialize().unwrap();
        let restored = KlondikeGame::deserialize(&blob, GameConfig::default()).unwrap();
        prop_assert_eq!(restored.state(), game.state());
    }

    /// Property: a second cascade run straight after the first changes nothing.
    #[test]
    fn prop_cascade_idempotent(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..100),
    ) {
        let mut game = KlondikeGame::builder().seed(seed).build();
        play(&mut game, &picks)?;
        prop_assume!(!game.is_won());

        let _ = game.run_cascade().unwrap();
        if game.is_won() {
            return Ok(());
        }
        let settled = game.state().clone();
        let second = game.run_cascade().unwrap();
        prop_assert!(second.is_empty());
        prop_assert_eq!(game.state(), &settled);
    }

    /// Property: a move hint is always a legal move, and asking for it
    /// changes nothing.
    #[test]
    fn prop_hint_is_legal(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..80),
    ) {
        let mut game = KlondikeGame::builder().seed(seed).build();
        play(&mut game, &picks)?;

        let before = game.state().clone();
        if let Some(Hint::Move(ranked)) = game.hint() {
            prop_assert!(game.rules().is_legal(game.state(), &Action::Move(ranked.mv)));
        }
        prop_assert_eq!(game.state(), &before);
    }

    /// Property: undoing every applied action returns to the deal.
    #[test]
    fn prop_undo_to_deal(
        seed in any::<u64>(),
        picks in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let mut game = KlondikeGame::builder().history_limit(100).seed(seed).build();
        let dealt = game.state().clone();
        let applied = play(&mut game, &picks)?;
        prop_assume!(!game.is_won());

        for _ in 0..applied {
            prop_assert!(game.undo().is_ok());
        }
        prop_assert_eq!(game.state(), &dealt);
    }
}
