//! Lifecycle of the background move search.
//!
//! At most one search task exists at a time. The task runs on its own thread
//! and hands its result back through a one-slot channel; the supervisor polls
//! it without blocking, collects the result with a short bounded wait once
//! the task reports done, and can abandon it at any moment. An abandoned
//! task's late result has nowhere to land because the channel receiver is
//! dropped together with the handle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rand_xoshiro::Xoshiro256PlusPlus;

use crate::chess::{GameState, Move};

/// Handle to the single in-flight search task.
struct SearchTask {
    handle: JoinHandle<()>,
    rx: Receiver<Option<Move>>,
    stop_flag: Arc<AtomicBool>,
}

/// Owns the searcher configuration and the task handle.
pub struct SearchSupervisor {
    searcher: Arc<negamax::Searcher>,
    task: Option<SearchTask>,
}

impl SearchSupervisor {
    pub fn new(depth: u32, num_threads: usize) -> Self {
        SearchSupervisor {
            searcher: Arc::new(negamax::Searcher::new(depth, num_threads)),
            task: None,
        }
    }

    /// Launches the one background task for this AI turn.
    ///
    /// The task writes its recommendation to the result channel and then
    /// terminates on its own, whether or not anyone collects it. Starting
    /// while a task is alive is a bug in the turn state machine.
    pub fn start(&mut self, position: GameState, legal_moves: Vec<Move>) {
        let searcher = self.searcher.clone();
        self.spawn(move |stop| searcher.search_with_stop(&position, &legal_moves, Some(stop)));
    }

    fn spawn<F>(&mut self, search: F)
    where
        F: FnOnce(Arc<AtomicBool>) -> Option<Move> + Send + 'static,
    {
        assert!(self.task.is_none(), "a search task is already running");
        let stop_flag = Arc::new(AtomicBool::new(false));
        let flag = stop_flag.clone();
        let (tx, rx) = mpsc::sync_channel(1);
        let handle = thread::spawn(move || {
            let result = search(flag.clone());
            if !flag.load(Ordering::Relaxed) {
                // The receiver may already be gone after a cancel.
                tx.send(result).ok();
            }
        });
        self.task = Some(SearchTask { handle, rx, stop_flag });
    }

    pub fn is_searching(&self) -> bool {
        self.task.is_some()
    }

    /// Non-blocking liveness check; true once the task thread has finished.
    pub fn poll(&self) -> bool {
        self.task.as_ref().map_or(false, |t| t.handle.is_finished())
    }

    /// Collects the finished task's result, waiting at most `bounded_wait`.
    ///
    /// Resolution order: a reported move that is in `legal_moves` wins; an
    /// explicit no-move report, an illegal report, an expired wait and any
    /// channel error all converge on a uniformly random legal move, so the
    /// turn always resolves. Callers gate on [`SearchSupervisor::poll`]
    /// first; calling with no task is a bug in the turn state machine.
    pub fn retrieve(
        &mut self,
        bounded_wait: Duration,
        legal_moves: &[Move],
        rng: &mut Xoshiro256PlusPlus,
    ) -> Move {
        let task = self.task.take().expect("retrieve called without a search task");
        let found = match task.rx.recv_timeout(bounded_wait) {
            Ok(Some(mv)) if legal_moves.contains(&mv) => Some(mv),
            Ok(Some(mv)) => {
                log::warn!("search reported illegal move {mv}, substituting a random one");
                None
            }
            Ok(None) => {
                log::info!("search reported no move, substituting a random one");
                None
            }
            Err(err) => {
                log::warn!("search result unavailable ({err}), substituting a random one");
                None
            }
        };
        // Discarding the handle stops the task if it is somehow still alive.
        task.stop_flag.store(true, Ordering::Relaxed);
        drop(task);
        found.unwrap_or_else(|| negamax::pick_random_move(legal_moves, rng))
    }

    /// Abandons any in-flight task. Idempotent; safe to call with no task.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.stop_flag.store(true, Ordering::Relaxed);
            log::debug!("search task cancelled");
        }
    }
}

impl Drop for SearchSupervisor {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const WAIT: Duration = Duration::from_millis(200);

    fn rng() -> Xoshiro256PlusPlus {
        Xoshiro256PlusPlus::seed_from_u64(7)
    }

    fn wait_for_poll(sup: &SearchSupervisor) {
        for _ in 0..200 {
            if sup.poll() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("search task never finished");
    }

    #[test]
    fn search_resolves_to_a_legal_move() {
        let position = GameState::new();
        let legal = position.legal_moves();
        let mut sup = SearchSupervisor::new(1, 1);

        sup.start(position, legal.clone());
        assert!(sup.is_searching());
        wait_for_poll(&sup);

        let mv = sup.retrieve(WAIT, &legal, &mut rng());
        assert!(legal.contains(&mv));
        assert!(!sup.is_searching());
    }

    #[test]
    fn no_move_report_falls_back_to_a_random_legal_move() {
        let legal = GameState::new().legal_moves();
        let mut sup = SearchSupervisor::new(1, 1);

        sup.spawn(|_| None);
        wait_for_poll(&sup);
        let mv = sup.retrieve(WAIT, &legal, &mut rng());
        assert!(legal.contains(&mv));
    }

    #[test]
    fn crashed_task_falls_back_to_a_random_legal_move() {
        let legal = GameState::new().legal_moves();
        let mut sup = SearchSupervisor::new(1, 1);

        sup.spawn(|_| panic!("search blew up"));
        wait_for_poll(&sup);
        // The sender was dropped without a result; retrieval errors resolve
        // like any other failure.
        let mv = sup.retrieve(WAIT, &legal, &mut rng());
        assert!(legal.contains(&mv));
    }

    #[test]
    fn illegal_report_is_never_returned() {
        let position = GameState::new();
        let legal = position.legal_moves();
        // A move from a different position: pretend the task raced an undo.
        let mut later = position.clone();
        later.apply_move(&legal[0]);
        let foreign = later.legal_moves()[0];
        assert!(!legal.contains(&foreign));

        let mut sup = SearchSupervisor::new(1, 1);
        sup.spawn(move |_| Some(foreign));
        wait_for_poll(&sup);
        let mv = sup.retrieve(WAIT, &legal, &mut rng());
        assert!(legal.contains(&mv));
        assert_ne!(mv, foreign);
    }

    #[test]
    fn cancel_discards_the_task_and_its_late_result() {
        let legal = GameState::new().legal_moves();
        let picked = legal[0];
        let mut sup = SearchSupervisor::new(1, 1);

        sup.spawn(move |_| {
            thread::sleep(Duration::from_millis(100));
            Some(picked)
        });
        assert!(sup.is_searching());
        sup.cancel();
        assert!(!sup.is_searching());
        assert!(!sup.poll(), "a cancelled task is gone, not merely finished");

        // The late send lands in a dropped channel; a fresh task is
        // unaffected by it.
        thread::sleep(Duration::from_millis(200));
        let position = GameState::new();
        sup.start(position, legal.clone());
        wait_for_poll(&sup);
        assert!(legal.contains(&sup.retrieve(WAIT, &legal, &mut rng())));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut sup = SearchSupervisor::new(1, 1);
        sup.cancel();
        sup.cancel();
        assert!(!sup.is_searching());
    }

    #[test]
    #[should_panic(expected = "already running")]
    fn starting_twice_is_a_bug() {
        let position = GameState::new();
        let legal = position.legal_moves();
        let mut sup = SearchSupervisor::new(1, 1);
        sup.start(position.clone(), legal.clone());
        sup.start(position, legal);
    }
}
