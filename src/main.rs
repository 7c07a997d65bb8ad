use anyhow::Result;
use std::{path::PathBuf, thread, time::Duration};

use sundial::args::{CliAction, ParsedArgs};
use sundial::constants::EXIT_FAILURE;
use sundial::{
    AstroCalculator, ConsoleSink, FileStore, HttpTimeSource, Log, SolarTimeResolver, SystemClock,
};

fn main() {
    let parsed = ParsedArgs::parse(std::env::args());

    match parsed.action {
        CliAction::ShowHelp => ParsedArgs::display_help(),
        CliAction::ShowVersion => ParsedArgs::display_version(),
        CliAction::ShowHelpDueToError => {
            ParsedArgs::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Run {
            once,
            interval,
            config_dir,
            quiet,
        } => {
            if quiet {
                Log::set_enabled(false);
            }
            if let Err(e) = run(once, interval, config_dir) {
                Log::log_error(&format!("{e:#}"));
                std::process::exit(EXIT_FAILURE);
            }
        }
    }
}

/// Build the production resolver and refresh times once or periodically.
fn run(once: bool, interval: u64, config_dir: Option<PathBuf>) -> Result<()> {
    Log::log_version();

    let store = match config_dir {
        Some(root) => FileStore::new(root),
        None => FileStore::default_location()?,
    };

    let mut resolver = SolarTimeResolver::new(
        Box::new(store),
        Box::new(HttpTimeSource::default()),
        Box::new(AstroCalculator),
        Box::new(SystemClock),
        Box::new(ConsoleSink),
    );

    if !resolver.initialize() {
        Log::log_pipe();
        anyhow::bail!("could not load or initialize location settings");
    }

    let config = resolver.config();
    Log::log_decorated(&format!(
        "Location: {:.4}, {:.4} ({})",
        config.lat,
        config.lng,
        if config.timezone_string.is_empty() {
            "local calculation only"
        } else {
            &config.timezone_string
        }
    ));
    if !once {
        Log::log_indented(&format!("Refreshing every {} seconds", interval));
    }

    loop {
        Log::log_block_start("Refreshing sunrise/sunset times");
        if resolver.resolve_times() {
            let times = resolver.times();
            Log::log_decorated(&format!(
                "Sunrise {:02}:{:02}, sunset {:02}:{:02}",
                times.sunrise_hour, times.sunrise_minute, times.sunset_hour, times.sunset_minute
            ));
            Log::log_indented(&format!("Updated {}", times.last_updated));
        } else {
            Log::log_warning(&format!(
                "Refresh failed; keeping previous times ({} consecutive failures)",
                resolver.failure_count()
            ));
        }

        if once {
            break;
        }
        thread::sleep(Duration::from_secs(interval));
    }

    Log::log_end();
    Ok(())
}
