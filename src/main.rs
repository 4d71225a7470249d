use std::process;
use std::sync::Arc;

use workerctl::{
    install_signal_handler, parse_args, parse_settings, set_log_file, Console, ControlState,
    Controller, Settings, StdinInput, WorkerPool,
};

fn main() {
    // Parse arguments and set up the log mirror
    let (log_file, config_file, workers, interval_ms) = parse_args();
    if let Some(log_file) = log_file {
        set_log_file(log_file);
    }

    // Load settings, then apply command-line overrides
    let mut settings = match config_file {
        Some(path) => match parse_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error reading settings file {}: {}", path, e);
                process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(workers) = workers {
        settings.workers = workers;
    }
    if let Some(interval_ms) = interval_ms {
        settings.interval_ms = interval_ms.max(settings.min_interval_ms);
    }

    let state = Arc::new(ControlState::new(&settings));
    let console = Arc::new(Console::new());

    install_signal_handler(Arc::clone(&state), Arc::clone(&console));

    // All workers start idle; nothing is announced until the operator
    // activates one.
    let pool = WorkerPool::spawn(Arc::clone(&state), Arc::clone(&console));

    // The controller joins the pool on exit and prints the final notice.
    Controller::new(state, console, StdinInput::new()).run(pool);
}
