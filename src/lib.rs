use rand::Rng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The state of a two-player, zero-sum game. Must be cloneable so the search
/// can explore lines on private copies. `Send` and `Sync` are required for
/// parallel processing.
pub trait GameState: Clone + Send + Sync {
    /// The type of a move in the game.
    type Move: Clone + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync;

    /// Returns a vector of all legal moves from the current state.
    fn get_possible_moves(&self) -> Vec<Self::Move>;
    /// Applies a move to the state, modifying it.
    fn make_move(&mut self, mv: &Self::Move);
    /// Returns true if the game is over.
    fn is_terminal(&self) -> bool;
    /// Returns the winner of the game, if any.
    /// Should return `Some(player_id)` if a player has won, `None` for a draw or if the game is not over.
    fn get_winner(&self) -> Option<i32>;
    /// Returns the player whose turn it is to move.
    fn get_current_player(&self) -> i32;
    /// Heuristic score of the position from the perspective of the player to
    /// move. Positive means the side to move is better off.
    fn evaluate(&self) -> i32;
}

/// Upper bound on any reachable score.
pub const INF: i32 = 1_000_000;
/// Base score for a decided game. The remaining search depth is added on top
/// so that a nearer win outranks a distant one.
pub const WIN_SCORE: i32 = 100_000;

/// The main negamax search engine.
///
/// The root move set is split across a dedicated thread pool; below each root
/// move the search runs sequential alpha-beta. A shared stop flag is checked
/// at every node so the caller can abort a search that is no longer wanted.
pub struct Searcher {
    /// Search depth in plies.
    depth: u32,
    /// The rayon thread pool for the root split.
    pool: ThreadPool,
}

impl Searcher {
    /// Creates a new search engine.
    ///
    /// # Arguments
    /// * `depth` - Search depth in plies (clamped to at least 1).
    /// * `num_threads` - Worker threads for the root split. If 0, one per CPU.
    pub fn new(depth: u32, num_threads: usize) -> Self {
        let threads = if num_threads > 0 {
            num_threads
        } else {
            num_cpus::get()
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build search thread pool");
        Searcher {
            depth: depth.max(1),
            pool,
        }
    }

    /// Searches the given root moves in parallel and returns the best one.
    ///
    /// Returns `None` when `root_moves` is empty or when the stop flag was
    /// raised before the search completed; a stopped search never reports a
    /// half-explored move.
    pub fn search_with_stop<S: GameState>(
        &self,
        state: &S,
        root_moves: &[S::Move],
        stop: Option<Arc<AtomicBool>>,
    ) -> Option<S::Move> {
        if root_moves.is_empty() {
            return None;
        }
        let stop = stop.unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
        let depth = self.depth;

        let scored: Vec<(S::Move, i32)> = self.pool.install(|| {
            root_moves
                .par_iter()
                .filter_map(|mv| {
                    if stop.load(Ordering::Relaxed) {
                        return None;
                    }
                    let mut child = state.clone();
                    child.make_move(mv);
                    let score = -negamax(&child, depth - 1, -INF, INF, &stop);
                    Some((mv.clone(), score))
                })
                .collect()
        });

        if stop.load(Ordering::Relaxed) {
            return None;
        }
        scored.into_iter().max_by_key(|entry| entry.1).map(|(mv, _)| mv)
    }
}

/// Sequential alpha-beta negamax below one root move.
fn negamax<S: GameState>(state: &S, depth: u32, mut alpha: i32, beta: i32, stop: &AtomicBool) -> i32 {
    // The caller discards the whole search result once stopped, so any value
    // works here; bail out as cheaply as possible.
    if stop.load(Ordering::Relaxed) {
        return 0;
    }

    if state.is_terminal() {
        return match state.get_winner() {
            Some(w) if w == state.get_current_player() => WIN_SCORE + depth as i32,
            Some(_) => -(WIN_SCORE + depth as i32),
            None => 0,
        };
    }
    if depth == 0 {
        return state.evaluate();
    }

    let moves = state.get_possible_moves();
    if moves.is_empty() {
        return state.evaluate();
    }

    let mut best = -INF;
    for mv in &moves {
        let mut child = state.clone();
        child.make_move(mv);
        let score = -negamax(&child, depth - 1, -beta, -alpha, stop);
        if score > best {
            best = score;
        }
        if score > alpha {
            alpha = score;
        }
        if alpha >= beta {
            break;
        }
    }
    best
}

/// Picks a uniformly random move from a non-empty set.
///
/// An empty set is a caller bug: positions with no legal moves are terminal
/// and must never reach a move picker.
pub fn pick_random_move<M: Clone, R: Rng>(moves: &[M], rng: &mut R) -> M {
    assert!(!moves.is_empty(), "pick_random_move called with no moves");
    moves[rng.gen_range(0..moves.len())].clone()
}
