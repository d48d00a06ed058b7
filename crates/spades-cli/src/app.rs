use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use spades_bot::{HeuristicPolicy, SeatAgent, Table};
use spades_core::game::match_state::{GameResult, MatchState};
use tracing::info;

use crate::config::TableConfig;
use crate::terminal::{TerminalObserver, TerminalPlayer};

/// Plays a full game on stdin/stdout.
pub fn run(config: &TableConfig) -> Result<GameResult> {
    run_with(config, io::stdin().lock(), io::stdout(), io::stdout())
}

/// Plays a full game with the human seat reading `input` and writing prompts to
/// `prompts`; table progress goes to `output`.
pub fn run_with<R, P, O>(
    config: &TableConfig,
    input: R,
    prompts: P,
    output: O,
) -> Result<GameResult>
where
    R: BufRead + 'static,
    P: Write + 'static,
    O: Write,
{
    let state = match config.seed {
        Some(seed) => MatchState::with_seed(config.rules, seed),
        None => MatchState::new(config.rules),
    }
    .context("setting up the match")?;

    let names = config.names();
    let mut observer = TerminalObserver::new(output, names.clone());
    observer.banner(config.rules.target_score, state.seed());

    let mut human = Some(TerminalPlayer::new(input, prompts));
    let agents = config.profiles().map(|profile| {
        if profile.is_human() {
            if let Some(player) = human.take() {
                return SeatAgent::new(profile, player);
            }
        }
        SeatAgent::new(profile, HeuristicPolicy::new())
    });

    info!(
        seed = state.seed(),
        human = ?config.human_seat(),
        names = ?names,
        "starting table"
    );
    let mut table = Table::new(state, agents);
    let result = table.run(&mut observer).context("game aborted")?;
    Ok(result)
}
