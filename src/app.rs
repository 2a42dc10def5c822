//! Session controller: the turn state machine, the single move-commit path,
//! and the undo/restart/quit interrupt handlers.
//!
//! Every resolved move, whether it came from a two-click gesture or from the
//! background search, funnels through [`App::commit`]; that is the only way
//! the shared game state changes during play, which keeps commits serialized
//! and exactly one per turn.

use std::time::Duration;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::chess::{GameState, Move, Outcome, Side, Square};
use crate::selection::Selection;
use crate::supervisor::SearchSupervisor;

/// Who controls a side. Fixed for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Search,
}

/// What the orchestrator does on the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// A human side is to move; waiting for a completed click gesture.
    AwaitingHumanInput,
    /// A search side is to move; the task has not been launched yet.
    SearchPending,
    /// The task is running; polled once per tick.
    SearchRunning,
    /// The task reported done; its result is collected next tick.
    SearchReady,
    /// A resolved move is being applied.
    MoveCommitting,
    /// Terminal. No further moves are issued; the frozen state keeps
    /// rendering until a restart.
    GameOver,
}

/// The most recently applied move, handed to the renderer exactly once.
#[derive(Debug, Clone, Copy)]
pub struct CommitRecord {
    pub mv: Move,
    pub animate: bool,
}

/// Session configuration, fixed at startup.
pub struct SessionConfig {
    pub white: PlayerKind,
    pub black: PlayerKind,
    pub depth: u32,
    pub num_threads: usize,
    /// Bounded wait when collecting a finished search result.
    pub result_wait: Duration,
    /// Seed for the fallback move picker; random when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            white: PlayerKind::Human,
            black: PlayerKind::Search,
            depth: 3,
            num_threads: 0,
            result_wait: Duration::from_secs(1),
            seed: None,
        }
    }
}

/// The main session state.
pub struct App {
    pub should_quit: bool,
    game_state: GameState,
    legal_moves: Vec<Move>,
    outcome: Option<Outcome>,
    phase: TurnPhase,
    white: PlayerKind,
    black: PlayerKind,
    selection: Selection,
    supervisor: SearchSupervisor,
    commit_record: Option<CommitRecord>,
    result_wait: Duration,
    fallback_rng: Xoshiro256PlusPlus,
}

impl App {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_state(GameState::new(), config)
    }

    fn with_state(game_state: GameState, config: SessionConfig) -> Self {
        let fallback_rng = match config.seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_entropy(),
        };
        let mut app = App {
            should_quit: false,
            game_state,
            legal_moves: Vec::new(),
            outcome: None,
            phase: TurnPhase::AwaitingHumanInput,
            white: config.white,
            black: config.black,
            selection: Selection::new(),
            supervisor: SearchSupervisor::new(config.depth, config.num_threads),
            commit_record: None,
            result_wait: config.result_wait,
            fallback_rng,
        };
        app.refresh_position();
        app.phase = app.derive_phase();
        app
    }

    pub fn player_kind(&self, side: Side) -> PlayerKind {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    /// Recomputes the state that depends on the position: the legal-move set
    /// and, once it is empty, the terminal outcome.
    fn refresh_position(&mut self) {
        self.legal_moves = self.game_state.legal_moves();
        self.outcome = if self.legal_moves.is_empty() {
            self.game_state.outcome()
        } else {
            None
        };
    }

    /// The phase a fresh turn starts in: terminal once the game is decided,
    /// otherwise determined by who controls the side to move.
    fn derive_phase(&self) -> TurnPhase {
        if self.outcome.is_some() {
            TurnPhase::GameOver
        } else {
            match self.player_kind(self.game_state.side_to_move()) {
                PlayerKind::Human => TurnPhase::AwaitingHumanInput,
                PlayerKind::Search => TurnPhase::SearchPending,
            }
        }
    }

    /// Drives the turn state machine one tick. Never blocks, except for the
    /// bounded result wait, which happens only after the task has already
    /// reported done.
    pub fn update(&mut self) {
        match self.phase {
            TurnPhase::SearchPending => {
                // Re-entering with a live task is a no-op guard, not a relaunch.
                if !self.supervisor.is_searching() {
                    self.supervisor.start(self.game_state.clone(), self.legal_moves.clone());
                }
                self.phase = TurnPhase::SearchRunning;
            }
            TurnPhase::SearchRunning => {
                if self.supervisor.poll() {
                    self.phase = TurnPhase::SearchReady;
                }
            }
            TurnPhase::SearchReady => {
                let mv = self
                    .supervisor
                    .retrieve(self.result_wait, &self.legal_moves, &mut self.fallback_rng);
                self.commit(mv);
            }
            TurnPhase::AwaitingHumanInput | TurnPhase::MoveCommitting | TurnPhase::GameOver => {}
        }
    }

    /// Feeds a board click into the selection accumulator. A completed
    /// candidate is committed only when it is a human's turn and the rules
    /// engine knows a legal move between those squares; otherwise it is
    /// silently discarded (the accumulator has already cleared itself).
    pub fn on_square_clicked(&mut self, square: Square) {
        if self.phase == TurnPhase::GameOver {
            return;
        }
        let (from, to) = match self.selection.on_square_clicked(square) {
            Some(candidate) => candidate,
            None => return,
        };
        if self.phase != TurnPhase::AwaitingHumanInput {
            return;
        }
        match self.legal_moves.iter().find(|m| m.matches(from, to)).copied() {
            Some(mv) => self.commit(mv),
            None => log::debug!("candidate {from:?}->{to:?} is not legal, discarded"),
        }
    }

    /// The single write path into the game state during play: applies the
    /// move, refreshes dependent state, requests the visual effect and moves
    /// on to the next turn.
    fn commit(&mut self, mv: Move) {
        self.phase = TurnPhase::MoveCommitting;
        debug_assert!(
            self.legal_moves.contains(&mv),
            "commit of a move outside the current legal set"
        );
        self.game_state.apply_move(&mv);
        self.refresh_position();
        self.commit_record = Some(CommitRecord { mv, animate: true });
        self.selection.clear();
        log::debug!("committed {mv}, {} to move", self.game_state.side_to_move());
        self.phase = self.derive_phase();
    }

    /// Takes back one ply. Any in-flight search is cancelled first so its
    /// result can never reach a board it no longer belongs to. The phase is
    /// re-derived from the side now to move.
    pub fn on_undo(&mut self) {
        self.supervisor.cancel();
        if self.game_state.undo_last_move().is_some() {
            self.refresh_position();
        }
        self.selection.clear();
        // An undone move is never animated.
        self.commit_record = None;
        self.phase = self.derive_phase();
        log::debug!("undo, {} to move", self.game_state.side_to_move());
    }

    /// Starts the session over from the initial position.
    pub fn on_restart(&mut self) {
        self.supervisor.cancel();
        self.game_state.reset();
        self.refresh_position();
        self.selection.clear();
        self.commit_record = None;
        self.phase = self.derive_phase();
        log::debug!("session restarted");
    }

    /// Ends the session: cancels any live search, no further commits happen.
    pub fn on_quit(&mut self) {
        self.supervisor.cancel();
        self.should_quit = true;
    }

    /// One-shot handoff of the latest commit to the renderer.
    pub fn take_commit_record(&mut self) -> Option<CommitRecord> {
        self.commit_record.take()
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn side_to_move(&self) -> Side {
        self.game_state.side_to_move()
    }

    pub fn selection(&self) -> Option<Square> {
        self.selection.selected()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_thinking(&self) -> bool {
        matches!(
            self.phase,
            TurnPhase::SearchPending | TurnPhase::SearchRunning | TurnPhase::SearchReady
        )
    }

    /// The move log as numbered White/Black pairs, plus the result line.
    pub fn format_move_log(&self) -> String {
        let log = self.game_state.move_log();
        if log.is_empty() {
            return String::from("No moves were made.\n");
        }
        let mut out = String::new();
        for (i, pair) in log.chunks(2).enumerate() {
            out.push_str(&format!("{}. {}", i + 1, pair[0]));
            if let Some(reply) = pair.get(1) {
                out.push_str(&format!(" {reply}"));
            }
            out.push('\n');
        }
        match self.outcome {
            Some(outcome) => out.push_str(&format!("\nResult: {outcome}\n")),
            None => out.push_str(&format!(
                "\n(Game unfinished - {} to move)\n",
                self.side_to_move()
            )),
        }
        out
    }
}
