use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::console::Console;
use crate::control::ControlState;
use crate::pool::WorkerPool;

/// Source of operator commands
///
/// The menu loop only ever needs whitespace-delimited tokens, a way to
/// recover the stream after a malformed one, and a plain "wait for Enter".
/// Abstracting the source lets tests drive the controller with a script.
pub trait CommandInput {
    /// Next token, blocking until one is available. `None` means the
    /// input is exhausted.
    fn read_token(&mut self) -> Option<String>;

    /// Drops whatever remains of the current line, so a malformed token
    /// does not corrupt the next read.
    fn discard_line(&mut self);

    /// Blocks until the operator presses Enter.
    fn read_enter(&mut self);

    /// Whether the source is an interactive terminal.
    fn is_interactive(&self) -> bool;
}

/// Token-oriented reader over stdin
///
/// Keeps the unread tokens of the current line in a queue, so several
/// tokens typed on one line feed successive prompts, as with a
/// whitespace-delimited scanner.
pub struct StdinInput {
    pending: VecDeque<String>,
    interactive: bool,
}

impl StdinInput {
    pub fn new() -> Self {
        StdinInput {
            pending: VecDeque::new(),
            interactive: unsafe { libc::isatty(libc::STDIN_FILENO) == 1 },
        }
    }

    /// Reads lines until one contains a token. Returns false on end of
    /// input.
    fn fill(&mut self) -> bool {
        let mut line = String::new();
        loop {
            line.clear();
            match io::stdin().lock().read_line(&mut line) {
                Ok(0) | Err(_) => return false,
                Ok(_) => {
                    self.pending
                        .extend(line.split_whitespace().map(str::to_string));
                    if !self.pending.is_empty() {
                        return true;
                    }
                }
            }
        }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        StdinInput::new()
    }
}

impl CommandInput for StdinInput {
    fn read_token(&mut self) -> Option<String> {
        if self.pending.is_empty() && !self.fill() {
            return None;
        }
        self.pending.pop_front()
    }

    fn discard_line(&mut self) {
        self.pending.clear();
    }

    fn read_enter(&mut self) {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Outcome of reading one integer token
enum Parsed {
    Value(i64),
    Malformed,
    Eof,
}

const MENU: &str = "\nControl menu:\n\
                    1 - Show worker status\n\
                    2 - Start/pause one worker\n\
                    3 - Set reporting interval (ms)\n\
                    4 - Start all workers\n\
                    5 - Pause all workers\n\
                    0 - Exit\n\
                    > ";

/// The interactive menu loop
///
/// Owns the console while a menu or prompt is on screen (menu-pause flag
/// set), hands it back to the workers while blocked waiting for the
/// operator, and drives the cooperative shutdown on exit.
pub struct Controller<I: CommandInput> {
    state: Arc<ControlState>,
    console: Arc<Console>,
    input: I,
}

impl<I: CommandInput> Controller<I> {
    pub fn new(state: Arc<ControlState>, console: Arc<Console>, input: I) -> Self {
        Controller {
            state,
            console,
            input,
        }
    }

    /// Runs the menu loop until the operator exits, then shuts the pool
    /// down and joins every worker
    ///
    /// Consumes the pool: after this returns no worker thread is running
    /// and the final notice has been printed.
    pub fn run(mut self, pool: WorkerPool) {
        while self.state.is_running() {
            self.state.set_menu_pause(true);
            self.console.prompt(MENU);

            let choice = match self.read_int() {
                Parsed::Value(choice) => choice,
                Parsed::Malformed => {
                    self.console.line("Invalid input. Try again.");
                    // Reprint the menu immediately; waiting here would
                    // double-block on already-bad input.
                    self.state.set_menu_pause(false);
                    continue;
                }
                Parsed::Eof => {
                    // Exhausted redirected input: treat as an exit request
                    // rather than re-prompting forever.
                    self.state.request_shutdown();
                    break;
                }
            };

            let mut wait_after_action = true;

            match choice {
                1 => self.show_status(&pool),
                2 => wait_after_action = self.toggle_one(&pool),
                3 => wait_after_action = self.set_interval(),
                4 => {
                    pool.start_all();
                    self.console.line("All workers started.");
                }
                5 => {
                    pool.stop_all();
                    self.console.line("All workers paused.");
                }
                0 => {
                    self.state.request_shutdown();
                    wait_after_action = false;
                }
                _ => self.console.line("No such menu item."),
            }

            if !self.state.is_running() {
                break;
            }

            if wait_after_action {
                self.wait_for_enter();
            }
        }

        self.state.set_menu_pause(false);
        pool.shutdown_and_join();
        self.console.line("Program finished.");
    }

    /// Reads one integer token; on a malformed token the rest of the
    /// line is discarded so the next read starts clean.
    fn read_int(&mut self) -> Parsed {
        match self.input.read_token() {
            None => Parsed::Eof,
            Some(token) => match token.parse::<i64>() {
                Ok(value) => Parsed::Value(value),
                Err(_) => {
                    self.input.discard_line();
                    Parsed::Malformed
                }
            },
        }
    }

    fn show_status(&self, pool: &WorkerPool) {
        let mut report = String::from("\nWorker status:");
        for (idx, active) in pool.status_snapshot().iter().enumerate() {
            report.push_str(&format!(
                "\n  Worker {}: {}",
                idx + 1,
                if *active { "running" } else { "paused" }
            ));
        }
        self.console.line(&report);
    }

    /// Menu command 2. Returns whether to go through the confirmation
    /// wait: a malformed index skips it, an out-of-range one does not.
    fn toggle_one(&mut self, pool: &WorkerPool) -> bool {
        self.console.prompt(&format!(
            "Enter worker number (1-{}): ",
            pool.worker_count()
        ));

        let id = match self.read_int() {
            Parsed::Value(id) => id,
            Parsed::Malformed => {
                self.console.line("Invalid worker number.");
                return false;
            }
            Parsed::Eof => {
                self.state.request_shutdown();
                return false;
            }
        };

        match usize::try_from(id).ok().and_then(|id| pool.toggle(id)) {
            Some(true) => self.console.line(&format!("Worker {} started.", id)),
            Some(false) => self.console.line(&format!("Worker {} paused.", id)),
            None => self.console.line("No such worker."),
        }
        true
    }

    /// Menu command 3. Sub-floor requests are clamped, not rejected; the
    /// operator is shown the value actually applied.
    fn set_interval(&mut self) -> bool {
        self.console.prompt(&format!(
            "Enter interval in milliseconds (at least {}): ",
            self.state.floor_ms()
        ));

        let requested = match self.read_int() {
            Parsed::Value(requested) => requested,
            Parsed::Malformed => {
                self.console.line("Invalid interval.");
                return false;
            }
            Parsed::Eof => {
                self.state.request_shutdown();
                return false;
            }
        };

        let effective = self
            .state
            .set_interval_ms(u64::try_from(requested).unwrap_or(0));
        self.console
            .line(&format!("New reporting interval: {} ms.", effective));
        true
    }

    /// The pause/resume-for-confirmation protocol: workers may write
    /// while the controller genuinely waits, but not once input has
    /// arrived and the next menu is about to print.
    fn wait_for_enter(&mut self) {
        if !self.input.is_interactive() {
            // Batch input has no Enter to wait for; pause for one
            // reporting interval with worker output permitted so the
            // system stays observable.
            self.state.set_menu_pause(false);
            thread::sleep(Duration::from_millis(self.state.interval_ms()));
            self.state.set_menu_pause(true);
            return;
        }

        self.input.discard_line();
        self.console.line("Press Enter to return to the menu...");
        self.state.set_menu_pause(false);
        self.input.read_enter();
        self.state.set_menu_pause(true);
    }
}
