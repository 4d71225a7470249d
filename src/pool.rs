use std::sync::Arc;
use std::thread;

use crate::console::Console;
use crate::control::ControlState;
use crate::worker::run_worker;

/// Fixed pool of worker threads
///
/// Spawns one long-lived thread per worker at construction and retains
/// every join handle; no thread is created afterwards. The pool owns the
/// worker lifetimes — [`WorkerPool::shutdown_and_join`] must run before
/// process exit so no worker is left dangling.
pub struct WorkerPool {
    state: Arc<ControlState>,
    handles: Vec<thread::JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns `state.worker_count()` workers, ids 1..=N, all inactive
    pub fn spawn(state: Arc<ControlState>, console: Arc<Console>) -> Self {
        let mut handles = Vec::with_capacity(state.worker_count());
        for id in 1..=state.worker_count() {
            let state = Arc::clone(&state);
            let console = Arc::clone(&console);
            handles.push(thread::spawn(move || run_worker(id, state, console)));
        }

        WorkerPool { state, handles }
    }

    pub fn worker_count(&self) -> usize {
        self.state.worker_count()
    }

    /// Flips one worker's active flag
    ///
    /// # Arguments
    /// * `id` - Worker number as the operator sees it, 1..=N
    ///
    /// # Returns
    /// * `Some(new_state)` on success
    /// * `None` when the id is outside the pool — a no-op; the caller
    ///   reports the invalid target
    pub fn toggle(&self, id: usize) -> Option<bool> {
        if id < 1 || id > self.state.worker_count() {
            return None;
        }
        Some(self.state.toggle_worker(id - 1))
    }

    /// Activates every worker
    pub fn start_all(&self) {
        self.state.set_all_workers(true);
    }

    /// Deactivates every worker
    pub fn stop_all(&self) {
        self.state.set_all_workers(false);
    }

    /// Instantaneous per-worker active flags, index 0 = worker 1
    pub fn status_snapshot(&self) -> Vec<bool> {
        self.state.snapshot()
    }

    /// Deactivates all workers and joins every thread
    ///
    /// The controller must have cleared the run flag already; with both
    /// flags down no worker can re-enter a work cycle, and each thread
    /// reaches its termination notice within one poll sub-interval.
    /// Blocks until all of them have.
    pub fn shutdown_and_join(self) {
        self.state.set_all_workers(false);
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}
