//! Klondike game session.

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::cascade::{CascadeReport, CascadeResolver};
use crate::core::{
    CardId, DrawMode, DrawOutcome, EngineError, GameConfig, GameRng, GameState, Move, MoveOutcome,
    ScoringTable, SourceRef,
};
use crate::hint::{best_hint, Hint};
use crate::history::{History, Snapshot};
use crate::persist::{self, SaveError, StateBlob};
use crate::rules::{is_movable_run, GameResult, KlondikeRules, RulesEngine};
use crate::zones::PileId;

/// One Klondike session.
#[derive(Clone, Debug)]
pub struct KlondikeGame {
    rules: KlondikeRules,
    state: GameState,
    history: History,
    /// Source picked by a first click, waiting for a destination.
    selection: Option<SourceRef>,
    active_hint: Option<Hint>,
}

/// Builder for creating a KlondikeGame.
#[derive(Clone, Debug, Default)]
pub struct KlondikeGameBuilder {
    config: GameConfig,
    seed: Option<u64>,
}

impl KlondikeGameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Cards turned per draw.
    #[must_use]
    pub fn draw_mode(mut self, mode: DrawMode) -> Self {
        self.config = self.config.with_draw_mode(mode);
        self
    }

    /// Cascade to the foundations after each operation.
    #[must_use]
    pub fn auto_complete(mut self, enabled: bool) -> Self {
        self.config = self.config.with_auto_complete(enabled);
        self
    }

    /// Points awarded per kind of move.
    #[must_use]
    pub fn scoring(mut self, scoring: ScoringTable) -> Self {
        self.config = self.config.with_scoring(scoring);
        self
    }

    /// Number of undo snapshots kept.
    #[must_use]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config = self.config.with_history_limit(limit);
        self
    }

    /// Fix the shuffle seed. Without one the seed is random.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Deal the first game.
    #[must_use]
    pub fn build(self) -> KlondikeGame {
        let rng = match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        KlondikeGame::dealt(self.config, rng)
    }
}

impl KlondikeGame {
    /// Deal a game with a random seed.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::dealt(config, GameRng::from_entropy())
    }

    /// Start configuring a new session.
    #[must_use]
    pub fn builder() -> KlondikeGameBuilder {
        KlondikeGameBuilder::new()
    }

    fn dealt(config: GameConfig, mut rng: GameRng) -> Self {
        let history = History::new(config.history_limit);
        let state = GameState::dealt(&mut rng, config.draw_mode, config.auto_complete);
        let mut game = Self {
            rules: KlondikeRules::new(config),
            state,
            history,
            selection: None,
            active_hint: None,
        };
        game.start();
        game.log_deal();
        game
    }

    /// Reset history and transient UI state around a freshly installed state.
    fn start(&mut self) {
        self.history.reset(Snapshot::of(&self.state));
        self.clear_transient();
    }

    fn log_deal(&self) {
        info!(
            seed = ?self.state.deal_seed(),
            draw_mode = self.state.draw_mode().count(),
            "new game"
        );
    }

    // === Deal ===

    /// Shuffle and deal a new game, discarding the current one.
    pub fn new_game(&mut self, draw_mode: DrawMode) {
        self.new_game_with_rng(draw_mode, GameRng::from_entropy());
    }

    /// Deal a reproducible game.
    pub fn new_game_seeded(&mut self, draw_mode: DrawMode, seed: u64) {
        self.new_game_with_rng(draw_mode, GameRng::new(seed));
    }

    fn new_game_with_rng(&mut self, draw_mode: DrawMode, mut rng: GameRng) {
        let config = self.rules.config_mut();
        config.draw_mode = draw_mode;
        let auto_complete = config.auto_complete;
        self.state = GameState::dealt(&mut rng, draw_mode, auto_complete);
        self.start();
        self.log_deal();
    }

    // === Accessors ===

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.rules.config()
    }

    #[must_use]
    pub fn rules(&self) -> &KlondikeRules {
        &self.rules
    }

    /// All 52 cards are on the foundations.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    /// Final figures once the game is won.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.rules.is_terminal(&self.state)
    }

    /// An undo would succeed right now.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.is_won() && self.history.can_undo()
    }

    // === Play ===

    /// Turn cards from the stock onto the waste, or recycle the waste when
    /// the stock is empty.
    pub fn draw_from_stock(&mut self) -> Result<DrawOutcome, EngineError> {
        let effects = self.rules.draw(&mut self.state).inspect_err(log_rejection)?;
        let cascade = self.cascade_if_enabled();
        let won = self.finish();

        Ok(DrawOutcome {
            drawn: effects.drawn,
            recycled: effects.recycled,
            reveals: cascade.reveals,
            cascaded: cascade.steps,
            score_delta: effects.score_delta.saturating_add(cascade.score_delta),
            won,
        })
    }

    /// Move the card (or run starting at a tableau position) at `from` onto
    /// `to`.
    pub fn try_move(&mut self, from: SourceRef, to: PileId) -> Result<MoveOutcome, EngineError> {
        let mv = Move::new(from, to);
        let effects = self
            .rules
            .apply_move(&mut self.state, &mv)
            .inspect_err(log_rejection)?;
        let cascade = self.cascade_if_enabled();
        let won = self.finish();

        let mut reveals: SmallVec<[_; 2]> = effects.revealed.into_iter().collect();
        reveals.extend(cascade.reveals);
        Ok(MoveOutcome {
            mv,
            moved: effects.cards,
            reveals,
            cascaded: cascade.steps,
            score_delta: effects.score_delta.saturating_add(cascade.score_delta),
            won,
        })
    }

    /// Move a card by identity (drag and drop). Tableau cards carry the run
    /// above them; elsewhere only the top card can move.
    pub fn try_move_card(&mut self, card: CardId, to: PileId) -> Result<MoveOutcome, EngineError> {
        let from = self.source_of(card).inspect_err(log_rejection)?;
        self.try_move(from, to)
    }

    fn source_of(&self, card: CardId) -> Result<SourceRef, EngineError> {
        let location = self
            .state
            .board()
            .locate(card)
            .ok_or(EngineError::illegal("card is not on the board"))?;
        let board = self.state.board();
        let is_top = board
            .pile(location.pile)
            .is_some_and(|p| p.len() == location.position + 1);
        let face_up = board.card_at(location).is_some_and(|c| c.is_face_up());

        match location.pile {
            PileId::Stock => Err(EngineError::illegal("draw from the stock instead")),
            _ if !face_up => Err(EngineError::illegal("card is face down")),
            PileId::Waste if is_top => Ok(SourceRef::Waste),
            PileId::Foundation(f) if is_top => Ok(SourceRef::Foundation(f)),
            PileId::Waste | PileId::Foundation(_) => {
                Err(EngineError::illegal("only the top card can move"))
            }
            PileId::Tableau(column) => Ok(SourceRef::Tableau {
                column,
                position: location.position,
            }),
        }
    }

    /// Run auto-complete now, regardless of the setting. One undo step.
    pub fn run_cascade(&mut self) -> Result<CascadeReport, EngineError> {
        if self.is_won() {
            return Err(EngineError::GameOver);
        }
        let report = CascadeResolver::new().resolve(&self.rules, &mut self.state);
        if !report.is_empty() {
            self.finish();
        }
        Ok(report)
    }

    /// Toggle the cascade for the rest of this game.
    pub fn set_auto_complete(&mut self, enabled: bool) {
        self.rules.config_mut().auto_complete = enabled;
        self.state.auto_complete = enabled;
    }

    /// Advance the elapsed-time clock. Ignored once the game is won.
    pub fn tick(&mut self, seconds: u64) {
        self.state.tick(seconds);
    }

    fn cascade_if_enabled(&mut self) -> CascadeReport {
        if self.state.auto_complete() {
            CascadeResolver::new().resolve(&self.rules, &mut self.state)
        } else {
            CascadeReport::default()
        }
    }

    /// Record the new state and report whether it is a win.
    fn finish(&mut self) -> bool {
        self.history.record(Snapshot::of(&self.state));
        self.clear_transient();

        let won = self.state.is_won();
        if won {
            info!(
                score = self.state.score(),
                moves = self.state.moves(),
                elapsed_secs = self.state.elapsed_secs(),
                "game won"
            );
        }
        won
    }

    fn clear_transient(&mut self) {
        self.selection = None;
        self.active_hint = None;
    }

    // === Undo ===

    /// Return to the state before the last operation.
    pub fn undo(&mut self) -> Result<(), EngineError> {
        if self.is_won() {
            return Err(EngineError::GameOver);
        }
        let snapshot = self.history.undo().ok_or(EngineError::NothingToUndo)?;
        snapshot.restore_into(&mut self.state);
        self.clear_transient();
        debug!(moves = self.state.moves(), depth = self.history.len(), "undo");
        Ok(())
    }

    // === Hints ===

    /// Best suggestion for the current position. Also kept as the active
    /// hint until the next change.
    pub fn hint(&mut self) -> Option<Hint> {
        self.active_hint = best_hint(&self.rules, &self.state);
        self.active_hint
    }

    /// Hint shown since the last `hint` call, until the next operation.
    #[must_use]
    pub fn active_hint(&self) -> Option<Hint> {
        self.active_hint
    }

    // === Selection ===

    /// Pick up a card (or run) as the first half of a click-to-move.
    pub fn select(&mut self, source: SourceRef) -> Result<(), EngineError> {
        if self.is_won() {
            return Err(EngineError::GameOver);
        }
        let pile_id = source.pile();
        let pile = self
            .state
            .board()
            .pile(pile_id)
            .ok_or(EngineError::NoSuchPile(pile_id))?;

        match source {
            SourceRef::Stock => return Err(EngineError::illegal("draw from the stock instead")),
            SourceRef::Waste | SourceRef::Foundation(_) if pile.is_empty() => {
                return Err(EngineError::EmptySource(pile_id));
            }
            SourceRef::Tableau { position, .. } => {
                if position >= pile.len() {
                    return Err(EngineError::EmptySource(pile_id));
                }
                if !is_movable_run(pile, position) {
                    return Err(EngineError::illegal("cards are not a face-up run"));
                }
            }
            SourceRef::Waste | SourceRef::Foundation(_) => {}
        }

        self.selection = Some(source);
        Ok(())
    }

    /// Source picked by `select`, if any.
    #[must_use]
    pub fn selection(&self) -> Option<SourceRef> {
        self.selection
    }

    /// Drop the pending selection.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Second click: move the selection to `to`. The selection is dropped
    /// whether or not the move succeeds.
    pub fn move_selection_to(&mut self, to: PileId) -> Result<MoveOutcome, EngineError> {
        let from = self
            .selection
            .take()
            .ok_or(EngineError::illegal("nothing is selected"))?;
        self.try_move(from, to)
    }

    // === Persistence ===

    /// Encode the current state for storage.
    pub fn serialize(&self) -> Result<StateBlob, SaveError> {
        persist::encode(&self.state)
    }

    /// Restore a saved game. The save's draw mode and auto-complete flag
    /// override `config`. Undo history starts at the restored state.
    pub fn deserialize(blob: &StateBlob, config: GameConfig) -> Result<Self, SaveError> {
        let state = persist::decode(blob)?;
        let config = config
            .with_draw_mode(state.draw_mode())
            .with_auto_complete(state.auto_complete());
        let mut game = Self {
            history: History::new(config.history_limit),
            rules: KlondikeRules::new(config),
            state,
            selection: None,
            active_hint: None,
        };
        game.start();
        info!(
            moves = game.state.moves(),
            score = game.state.score(),
            "restored saved game"
        );
        Ok(game)
    }

    /// Restore a saved game if there is a usable one, otherwise deal fresh.
    #[must_use]
    pub fn restore_or_new(blob: Option<&StateBlob>, config: GameConfig) -> Self {
        let Some(blob) = blob else {
            return Self::new(config);
        };
        match Self::deserialize(blob, config.clone()) {
            Ok(game) => game,
            Err(e) => {
                warn!(error = %e, "discarding unreadable save");
                Self::new(config)
            }
        }
    }
}

fn log_rejection(e: &EngineError) {
    debug!(reason = %e, "rejected");
}
