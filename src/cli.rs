use std::env;
use std::process;

/// Prints usage instructions for the program.
///
/// Uses `PROGRAM_NAME` constant from `crate` for the executable name.
pub fn print_usage() {
    println!(
        "Usage: {} [-h] [-v] [-l logfile] [-w workers] [-i interval_ms] [config_file]",
        crate::PROGRAM_NAME
    );
}

/// Parses command line arguments and returns configuration options
///
/// # Returns
/// A tuple containing:
/// - `Option<String>`: Path to log file mirror (None for console only).
/// - `Option<String>`: Path to settings file (None for built-in defaults).
/// - `Option<usize>`: Worker count override.
/// - `Option<u64>`: Default reporting interval override, milliseconds.
///
/// # Exits
/// - With 0 after printing usage (`-h`) or version (`-v`)
/// - With 1 on missing or unparseable argument values
pub fn parse_args() -> (Option<String>, Option<String>, Option<usize>, Option<u64>) {
    let mut log_file = None;
    let mut config_file = None;
    let mut workers = None;
    let mut interval_ms = None;

    let mut args = env::args();
    args.next(); // Skip program name

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" => {
                print_usage();
                process::exit(0);
            }
            "-v" => {
                println!("{} version {}", crate::PROGRAM_NAME, crate::PROGRAM_VERSION);
                process::exit(0);
            }
            "-l" => {
                log_file = Some(args.next().unwrap_or_else(|| {
                    eprintln!("Error: Missing log file argument");
                    print_usage();
                    process::exit(1);
                }))
            }
            "-w" => {
                workers = match args.next() {
                    Some(arg) => match arg.parse::<usize>() {
                        Ok(n) if n > 0 => Some(n),
                        _ => {
                            eprintln!("Error: Worker count must be a positive number");
                            print_usage();
                            process::exit(1);
                        }
                    },
                    None => {
                        eprintln!("Error: Missing worker count argument");
                        print_usage();
                        process::exit(1);
                    }
                }
            }
            "-i" => {
                interval_ms = match args.next() {
                    Some(arg) => match arg.parse::<u64>() {
                        Ok(n) if n > 0 => Some(n),
                        _ => {
                            eprintln!("Error: Interval must be a positive number");
                            print_usage();
                            process::exit(1);
                        }
                    },
                    None => {
                        eprintln!("Error: Missing interval argument");
                        print_usage();
                        process::exit(1);
                    }
                }
            }
            _ => {
                if config_file.is_none() {
                    config_file = Some(arg);
                } else {
                    eprintln!("Unexpected argument: {}", arg);
                    print_usage();
                    process::exit(1);
                }
            }
        }
    }

    (log_file, config_file, workers, interval_ms)
}
