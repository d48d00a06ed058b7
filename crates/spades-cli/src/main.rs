use std::path::PathBuf;

use clap::Parser;

use spades_cli::app;
use spades_cli::config::TableConfig;
use spades_cli::logging::init_logging;

/// Cutthroat spades for one human and three bots in the terminal.
#[derive(Debug, Parser)]
#[command(name = "spades", author, version, about = "Cutthroat spades in the terminal")]
struct Cli {
    /// Seat index for the human player (0-3).
    #[arg(value_name = "SEAT")]
    seat: Option<usize>,

    /// Path to a YAML table configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the score that ends the game.
    #[arg(long, value_name = "POINTS")]
    target: Option<i32>,

    /// Allow nil bids.
    #[arg(long)]
    nil: bool,

    /// Allow blind nil bids (accepted, currently has no effect).
    #[arg(long)]
    blind_nil: bool,

    /// Override the RNG seed for dealing.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Seat a bot in every chair and watch the game.
    #[arg(long)]
    spectate: bool,

    /// Exit after validating the configuration (no game is played).
    #[arg(long)]
    validate_only: bool,

    /// Tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Write JSON logs to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => TableConfig::from_path(path)?,
        None => TableConfig::default(),
    };

    if let Some(seat) = cli.seat {
        config.human_seat = seat;
    }

    if let Some(target) = cli.target {
        config.rules.target_score = target;
    }

    if cli.nil {
        config.rules.allow_nil = true;
    }

    if cli.blind_nil {
        config.rules.allow_blind_nil = true;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if cli.spectate {
        config.spectate = true;
    }

    if let Some(level) = cli.log_level {
        config.logging.level = Some(level);
    }

    if let Some(path) = cli.log_file {
        config.logging.file = Some(path);
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;

    if cli.validate_only {
        let seat = config
            .human_seat()
            .map_or_else(|| "none (spectating)".to_string(), |seat| seat.to_string());
        println!(
            "Configuration OK: target {}, nil {}, human seat {seat}",
            config.rules.target_score,
            if config.rules.allow_nil { "on" } else { "off" },
        );
        return Ok(());
    }

    app::run(&config)?;
    Ok(())
}
