use std::sync::Arc;
use std::thread;

use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

use crate::console::Console;
use crate::control::ControlState;

/// Installs the termination signal listener
///
/// SIGINT and SIGTERM request the same cooperative shutdown as menu
/// option 0: workers stop within one poll sub-interval, and the menu
/// loop exits on its next pass. The listener runs on its own detached
/// thread; the process exits once the workers are joined, so the thread
/// is cleaned up by the OS.
pub fn install_signal_handler(state: Arc<ControlState>, console: Arc<Console>) {
    let mut signals = Signals::new([SIGINT, SIGTERM]).expect("Error setting signal handler");

    thread::spawn(move || {
        if let Some(sig) = signals.forever().next() {
            let name = match sig {
                SIGTERM => "SIGTERM",
                _ => "SIGINT",
            };
            console.line(&format!("Received {}, shutting down...", name));
            state.request_shutdown();
        }
    });
}
