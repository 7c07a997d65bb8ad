//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a
//! clean interface for the main application logic. It supports the standard
//! help and version flags while gracefully handling unknown options.

use std::path::PathBuf;

use crate::constants::DEFAULT_REFRESH_INTERVAL;
use crate::logger::Log;

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the resolver with these settings
    Run {
        /// Resolve once and exit instead of refreshing periodically
        once: bool,
        /// Seconds between refreshes in daemon mode
        interval: u64,
        /// Override the settings store root directory
        config_dir: Option<PathBuf>,
        /// Suppress all log output
        quiet: bool,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    ///
    /// # Returns
    /// ParsedArgs containing the determined action
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut once = false;
        let mut quiet = false;
        let mut interval = DEFAULT_REFRESH_INTERVAL;
        let mut config_dir: Option<PathBuf> = None;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut i = 0;
        while i < args_vec.len() {
            match args_vec[i].as_str() {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--once" | "-o" => once = true,
                "--quiet" | "-q" => quiet = true,
                "--interval" | "-i" => {
                    if i + 1 < args_vec.len() {
                        match args_vec[i + 1].parse::<u64>() {
                            Ok(secs) if secs > 0 => interval = secs,
                            _ => {
                                Log::log_warning(&format!(
                                    "Invalid interval value: {}",
                                    args_vec[i + 1]
                                ));
                                unknown_arg_found = true;
                            }
                        }
                        i += 1;
                    } else {
                        Log::log_warning("--interval requires a value in seconds");
                        unknown_arg_found = true;
                    }
                }
                "--config-dir" | "-c" => {
                    if i + 1 < args_vec.len() {
                        config_dir = Some(PathBuf::from(&args_vec[i + 1]));
                        i += 1;
                    } else {
                        Log::log_warning("--config-dir requires a path");
                        unknown_arg_found = true;
                    }
                }
                unknown => {
                    Log::log_warning(&format!("Unknown argument: {}", unknown));
                    unknown_arg_found = true;
                }
            }
            i += 1;
        }

        let action = if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if display_help {
            CliAction::ShowHelp
        } else if display_version {
            CliAction::ShowVersion
        } else {
            CliAction::Run {
                once,
                interval,
                config_dir,
                quiet,
            }
        };

        ParsedArgs { action }
    }

    /// Display help information for the application.
    pub fn display_help() {
        println!("sundial v{}", env!("CARGO_PKG_VERSION"));
        println!("Dual-source sunrise/sunset resolver for lighting automation");
        println!();
        println!("Usage: sundial [OPTIONS]");
        println!();
        println!("Options:");
        println!("  -o, --once              Resolve once and exit");
        println!(
            "  -i, --interval <SECS>   Seconds between refreshes (default: {})",
            DEFAULT_REFRESH_INTERVAL
        );
        println!("  -c, --config-dir <DIR>  Settings store root directory");
        println!("  -q, --quiet             Suppress log output");
        println!("  -h, --help              Print help information");
        println!("  -V, --version           Print version information");
    }

    /// Display version information.
    pub fn display_version() {
        println!("sundial v{}", env!("CARGO_PKG_VERSION"));
    }
}
