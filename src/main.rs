//! Hand Pong entry point
//!
//! Headless native driver: hand-tracking frames arrive on stdin, one line per
//! frame (see `platform::script` for the format). Set `RUST_LOG=trace` to see
//! every snapshot.
//!
//! Usage: `hand-pong [--live] [CONFIG.json]`
//!
//! Without `--live` each tick blocks for exactly one line, so a piped script
//! replays frame by frame. With `--live` a background worker reads stdin and
//! each tick takes the newest position per hand, for a tracker that writes
//! lines at its own rate.

use std::env;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use hand_pong::app::Runner;
use hand_pong::config::{CONFIG_ENV_VAR, GameConfig};
use hand_pong::platform::{InputMode, open_input};
use hand_pong::{GameError, JsonFileStore};

const LIVE_FLAG: &str = "--live";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Hand Pong starting...");

    let mut live = false;
    let mut config_path = None;
    for arg in env::args_os().skip(1) {
        if arg == LIVE_FLAG {
            live = true;
        } else if config_path.is_none() {
            config_path = Some(PathBuf::from(arg));
        } else {
            log::warn!("Ignoring extra argument {arg:?}");
        }
    }
    let config_path = config_path.or_else(|| env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));
    let config = GameConfig::load_or_default(config_path.as_deref());

    let store = JsonFileStore::new(config.score_file.clone());
    log::info!("Top score file: {}", store.path().display());

    let mut runner = match Runner::new(config, store, rand::random()) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut input = match open_input(InputMode::from_flag(live), BufReader::new(io::stdin())) {
        Ok(input) => input,
        Err(e) => {
            log::error!("Could not start input: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runner.run(input.as_mut()) {
        Ok(summary) => {
            log::info!(
                "Final score {} | top: {} - {}",
                summary.last.score,
                summary.top_score.name,
                summary.top_score.score
            );
            ExitCode::SUCCESS
        }
        Err(GameError::InputSourceLost(reason)) => {
            log::error!("Input source lost: {reason}");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
