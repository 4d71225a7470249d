use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::config::Settings;

/// Shared coordination state for the controller and all worker threads
///
/// One instance lives for the whole process and is passed around as
/// `Arc<ControlState>`. Every mutable field is an independent atomic;
/// there is no lock over combinations of flags. Workers poll, so a
/// momentarily inconsistent pair of reads is harmless — every transition
/// is idempotent and re-observed on the next poll.
///
/// The tunables captured from [`Settings`] at construction (worker count,
/// interval floor, poll periods) are immutable for the process lifetime.
pub struct ControlState {
    /// True while the whole system should keep operating. Cleared once,
    /// never set back.
    run: AtomicBool,
    /// True while the controller owns the console (menu printed or input
    /// pending). Workers keep their timing but stay silent.
    menu_pause: AtomicBool,
    /// Reporting period shared by all workers, milliseconds.
    interval_ms: AtomicU64,
    /// Per-worker active flags, 0-based. Index validity is the caller's
    /// responsibility.
    active: Vec<AtomicBool>,
    floor_ms: u64,
    idle_poll: Duration,
    pause_poll: Duration,
}

impl ControlState {
    /// Builds the shared state from startup settings
    ///
    /// All workers start inactive; the run flag starts set. An interval
    /// below the floor is clamped up here so the state never holds a
    /// sub-floor value.
    pub fn new(settings: &Settings) -> Self {
        let mut active = Vec::with_capacity(settings.workers);
        for _ in 0..settings.workers {
            active.push(AtomicBool::new(false));
        }

        ControlState {
            run: AtomicBool::new(true),
            menu_pause: AtomicBool::new(false),
            interval_ms: AtomicU64::new(settings.interval_ms.max(settings.min_interval_ms)),
            active,
            floor_ms: settings.min_interval_ms,
            idle_poll: Duration::from_millis(settings.idle_poll_ms),
            pause_poll: Duration::from_millis(settings.pause_poll_ms),
        }
    }

    /// Number of workers in the pool (fixed at startup)
    pub fn worker_count(&self) -> usize {
        self.active.len()
    }

    /// Checks whether the system should keep operating
    ///
    /// Workers and the controller loop call this at every decision point.
    pub fn is_running(&self) -> bool {
        self.run.load(Ordering::SeqCst)
    }

    /// Signals all threads to wind down
    ///
    /// Cooperative: workers notice within one poll sub-interval. The flag
    /// is monotonic — nothing ever sets it back.
    pub fn request_shutdown(&self) {
        self.run.store(false, Ordering::SeqCst);
    }

    /// Checks whether worker output is currently suppressed
    pub fn menu_paused(&self) -> bool {
        self.menu_pause.load(Ordering::SeqCst)
    }

    /// Sets or clears the menu-pause flag. Controller only.
    pub fn set_menu_pause(&self, paused: bool) {
        self.menu_pause.store(paused, Ordering::SeqCst);
    }

    /// Current reporting interval in milliseconds
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms.load(Ordering::SeqCst)
    }

    /// Stores a new reporting interval, clamped up to the floor
    ///
    /// # Returns
    /// The effective value actually stored. Workers pick it up at the
    /// start of their next work cycle.
    pub fn set_interval_ms(&self, requested: u64) -> u64 {
        let effective = requested.max(self.floor_ms);
        self.interval_ms.store(effective, Ordering::SeqCst);
        effective
    }

    /// Minimum permitted reporting interval in milliseconds
    pub fn floor_ms(&self) -> u64 {
        self.floor_ms
    }

    /// Poll period for idle workers and for sub-interval sleep steps
    pub fn idle_poll(&self) -> Duration {
        self.idle_poll
    }

    /// Poll period while the menu owns the console
    pub fn pause_poll(&self) -> Duration {
        self.pause_poll
    }

    /// Whether worker `idx` (0-based) should currently be working
    pub fn worker_active(&self, idx: usize) -> bool {
        self.active[idx].load(Ordering::SeqCst)
    }

    /// Sets one worker's active flag. 0-based index, caller-validated.
    pub fn set_worker_active(&self, idx: usize, active: bool) {
        self.active[idx].store(active, Ordering::SeqCst);
    }

    /// Atomically flips one worker's active flag
    ///
    /// # Returns
    /// The new state of the flag.
    pub fn toggle_worker(&self, idx: usize) -> bool {
        !self.active[idx].fetch_xor(true, Ordering::SeqCst)
    }

    /// Sets every worker's active flag to the same value
    pub fn set_all_workers(&self, active: bool) {
        for flag in &self.active {
            flag.store(active, Ordering::SeqCst);
        }
    }

    /// Instantaneous copy of all active flags
    ///
    /// Advisory only: a worker may transition between the snapshot and
    /// whatever the caller does with it.
    pub fn snapshot(&self) -> Vec<bool> {
        self.active
            .iter()
            .map(|flag| flag.load(Ordering::SeqCst))
            .collect()
    }
}
