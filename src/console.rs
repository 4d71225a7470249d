use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Global log file path protected by Mutex
///
/// When set, every console line is mirrored there with a timestamp.
/// Console output itself always goes to stdout.
pub static LOG_FILE: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

/// Sets the path for the log file mirror
///
/// Subsequent console writes are appended to this file in addition to
/// being printed.
///
/// # Arguments
///
/// * `path` - A path-like object representing the location of the log file
pub fn set_log_file<P: AsRef<Path>>(path: P) {
    let path_str = path.as_ref().to_str().expect("Path is not valid UTF-8");
    *LOG_FILE.lock().unwrap() = Some(path_str.to_string());
}

#[cfg(test)]
pub fn reset_log_file_for_tests() {
    *LOG_FILE.lock().unwrap() = None;
}

/// Appends one entry to the log file mirror, if one is configured.
/// Mirror failures are not worth interrupting the console for.
fn mirror(text: &str) {
    if let Some(log_file) = &*LOG_FILE.lock().unwrap() {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let entry = format!("{} {}\n", timestamp, text);
        let _ = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .and_then(|mut file| file.write_all(entry.as_bytes()));
    }
}

/// Serialized console output stream
///
/// All operator-visible text — menus, prompts, worker announcements —
/// goes through one `Console`, shared as `Arc<Console>`. A single mutex
/// guards the stream so concurrent writers never interleave within a
/// line; it provides no ordering between writers beyond that.
pub struct Console {
    stream: Mutex<()>,
}

impl Console {
    pub fn new() -> Self {
        Console {
            stream: Mutex::new(()),
        }
    }

    /// Prints one line to the console
    ///
    /// The text may span multiple lines; it is written as a single
    /// serialized unit either way.
    pub fn line(&self, text: &str) {
        let _stream = self.stream.lock().unwrap();
        println!("{}", text);
        mirror(text);
    }

    /// Prints without a trailing newline and flushes
    ///
    /// Used for the menu prompt and submenu prompts where input follows
    /// on the same line.
    pub fn prompt(&self, text: &str) {
        let _stream = self.stream.lock().unwrap();
        print!("{}", text);
        let _ = io::stdout().flush();
        mirror(text);
    }
}

impl Default for Console {
    fn default() -> Self {
        Console::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    #[serial]
    fn test_line_mirrors_to_file() {
        reset_log_file_for_tests();

        let dir = tempdir().unwrap();
        let log_file_path = dir.path().join("console.log");
        set_log_file(&log_file_path);

        let console = Console::new();
        console.line("worker status line");
        console.prompt("> ");

        let log_contents = fs::read_to_string(&log_file_path).unwrap();
        assert!(log_contents.contains("worker status line"));
        assert!(log_contents.contains("> "));

        reset_log_file_for_tests();
    }

    #[test]
    #[serial]
    fn test_line_without_log_file() {
        reset_log_file_for_tests();

        // Nothing to assert on stdout here; this just must not panic.
        let console = Console::new();
        console.line("stdout only");
    }

    #[test]
    #[serial]
    fn test_mirror_entries_are_timestamped() {
        reset_log_file_for_tests();

        let dir = tempdir().unwrap();
        let log_file_path = dir.path().join("console.log");
        set_log_file(&log_file_path);

        Console::new().line("stamped");

        let log_contents = fs::read_to_string(&log_file_path).unwrap();
        let entry = log_contents
            .lines()
            .find(|l| l.contains("stamped"))
            .expect("entry should be mirrored");
        // "YYYY-MM-DD HH:MM:SS stamped"
        assert!(entry.len() > "stamped".len() + 19);
        assert_eq!(&entry[4..5], "-");
        assert_eq!(&entry[13..14], ":");

        reset_log_file_for_tests();
    }
}
