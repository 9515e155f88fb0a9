use log::{error, info};
use std::env;
use std::process;

use isolation_agent::agent::{AlphaBetaAgent, RandomAgent};
use isolation_agent::arena::play_match;
use isolation_agent::config::Config;
use isolation_agent::debug_logger::DebugLogger;
use isolation_agent::driver::{share, SharedAgent, TurnDriver};
use isolation_agent::isolation::Isolation;
use isolation_agent::types::Player;

#[tokio::main]
async fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Isolation match...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    let driver = TurnDriver::new(config.timing.clone());

    let agents: [SharedAgent<Isolation>; 2] = [
        share(AlphaBetaAgent::new(Player::One, &config)),
        share(RandomAgent::new(Player::Two, config.search.seed)),
    ];

    let outcome = play_match(&agents, Isolation::new(), &driver, &logger).await;

    // Drain queued match log lines before the runtime goes away
    logger.shutdown().await;

    match outcome {
        Ok(result) => {
            let name = agents[result.winner.index()].lock().name().to_string();
            info!(
                "Winner: {} ({}) by {:?} in {} plies",
                result.winner.as_str(),
                name,
                result.reason,
                result.history.len()
            );
        }
        Err(e) => {
            error!("Match aborted: {}", e);
            process::exit(1);
        }
    }
}
