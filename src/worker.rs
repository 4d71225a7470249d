use std::cmp;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::console::Console;
use crate::control::ControlState;

/// Body of one worker thread, id in 1..=N
///
/// Loops until the run flag clears, then announces termination and
/// returns. While the menu owns the console the worker stays quiet but
/// keeps polling; while inactive it idles at the idle-poll period. An
/// active worker announces one work cycle, then sleeps off the reporting
/// interval in sub-interval steps so a cleared flag interrupts the wait
/// within one step rather than one full interval.
pub fn run_worker(id: usize, state: Arc<ControlState>, console: Arc<Console>) {
    let idx = id - 1;

    // Workers start paused and wait for a command from the operator.
    while state.is_running() {
        if state.menu_paused() {
            thread::sleep(state.pause_poll());
            continue;
        }

        if !state.worker_active(idx) {
            thread::sleep(state.idle_poll());
            continue;
        }

        console.line(&format!("Worker {} doing work.", id));

        // Interval read once per cycle; a change applies from the next cycle.
        let interval = state.interval_ms();
        let step_ms = state.idle_poll().as_millis() as u64;
        let mut elapsed = 0;
        while elapsed < interval
            && state.is_running()
            && state.worker_active(idx)
            && !state.menu_paused()
        {
            let step = cmp::min(step_ms, interval - elapsed);
            thread::sleep(Duration::from_millis(step));
            elapsed += step;
        }
    }

    console.line(&format!("Worker {} terminated.", id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::console::{reset_log_file_for_tests, set_log_file};
    use serial_test::serial;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn fast_settings() -> Settings {
        Settings {
            workers: 1,
            interval_ms: 30,
            min_interval_ms: 10,
            idle_poll_ms: 5,
            pause_poll_ms: 5,
        }
    }

    fn read_log(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    #[test]
    #[serial]
    fn test_inactive_worker_emits_no_work_lines() {
        reset_log_file_for_tests();
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("worker.log");
        set_log_file(&log_path);

        let state = Arc::new(ControlState::new(&fast_settings()));
        let console = Arc::new(Console::new());
        let handle = {
            let state = Arc::clone(&state);
            let console = Arc::clone(&console);
            thread::spawn(move || run_worker(1, state, console))
        };

        thread::sleep(Duration::from_millis(50));
        state.request_shutdown();
        handle.join().unwrap();

        let log = read_log(&log_path);
        assert!(!log.contains("doing work"));
        assert_eq!(log.matches("Worker 1 terminated.").count(), 1);

        reset_log_file_for_tests();
    }

    #[test]
    #[serial]
    fn test_active_worker_announces_and_stops_after_deactivation() {
        reset_log_file_for_tests();
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("worker.log");
        set_log_file(&log_path);

        let state = Arc::new(ControlState::new(&fast_settings()));
        let console = Arc::new(Console::new());
        let handle = {
            let state = Arc::clone(&state);
            let console = Arc::clone(&console);
            thread::spawn(move || run_worker(1, state, console))
        };

        state.set_worker_active(0, true);
        thread::sleep(Duration::from_millis(80));
        assert!(read_log(&log_path).contains("Worker 1 doing work."));

        state.set_worker_active(0, false);
        // One sub-interval for the worker to notice, plus slack for an
        // announcement already in flight.
        thread::sleep(Duration::from_millis(20));
        let len_after_stop = read_log(&log_path).len();
        thread::sleep(Duration::from_millis(80));
        let tail = read_log(&log_path)[len_after_stop..].to_string();
        assert!(
            !tail.contains("doing work"),
            "worker kept announcing after deactivation: {}",
            tail
        );

        state.request_shutdown();
        handle.join().unwrap();
        reset_log_file_for_tests();
    }

    #[test]
    #[serial]
    fn test_menu_pause_suppresses_output() {
        reset_log_file_for_tests();
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("worker.log");
        set_log_file(&log_path);

        let state = Arc::new(ControlState::new(&fast_settings()));
        state.set_menu_pause(true);
        state.set_worker_active(0, true);
        let console = Arc::new(Console::new());
        let handle = {
            let state = Arc::clone(&state);
            let console = Arc::clone(&console);
            thread::spawn(move || run_worker(1, state, console))
        };

        thread::sleep(Duration::from_millis(60));
        assert!(!read_log(&log_path).contains("doing work"));

        // Lifting the pause lets the active worker through.
        state.set_menu_pause(false);
        thread::sleep(Duration::from_millis(60));
        assert!(read_log(&log_path).contains("Worker 1 doing work."));

        state.request_shutdown();
        handle.join().unwrap();
        reset_log_file_for_tests();
    }
}
