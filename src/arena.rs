// Match runner: alternates turns between two agents until one of them loses

use log::{info, warn};

use crate::debug_logger::{DebugLogger, TurnRecord};
use crate::driver::{SharedAgent, TurnDriver};
use crate::error::DriverError;
use crate::types::{GameState, Player};

/// Why the loser lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The player to move had no legal action
    NoLegalMoves,
    /// The player published nothing before its budget ran out
    NoActionPublished,
    /// The player published an action the state rejected
    IllegalAction,
}

#[derive(Debug, Clone)]
pub struct MatchResult<S: GameState> {
    pub winner: Player,
    pub reason: EndReason,
    /// Every action applied, in play order
    pub history: Vec<S::Action>,
    pub final_state: S,
}

/// Plays `initial` to the end. `agents[0]` plays [`Player::One`], `agents[1]` plays [`Player::Two`].
pub async fn play_match<S: GameState>(
    agents: &[SharedAgent<S>; 2],
    initial: S,
    driver: &TurnDriver,
    logger: &DebugLogger,
) -> Result<MatchResult<S>, DriverError> {
    let mut state = initial;
    let mut history = Vec::new();

    let (winner, reason) = loop {
        let player = state.active_player();

        if state.terminal_test() {
            break (player.opponent(), EndReason::NoLegalMoves);
        }

        let outcome = driver
            .request_action(&agents[player.index()], &state)
            .await?;

        let action = match outcome.action {
            Some(action) => action,
            None => {
                warn!("{} forfeits: no action published", player.as_str());
                break (player.opponent(), EndReason::NoActionPublished);
            }
        };

        match state.result(action) {
            Ok(next) => {
                logger.log_turn(TurnRecord {
                    ply: history.len(),
                    player,
                    action: action.to_string(),
                    location: next.location(player),
                    depth: outcome.depth,
                    score: outcome.score,
                    elapsed_ms: outcome.elapsed_ms,
                });
                history.push(action);
                state = next;
            }
            Err(e) => {
                warn!("{} forfeits: {}", player.as_str(), e);
                break (player.opponent(), EndReason::IllegalAction);
            }
        }
    };

    info!(
        "Match over: {} wins ({:?}) after {} plies",
        winner.as_str(),
        reason,
        history.len()
    );

    Ok(MatchResult {
        winner,
        reason,
        history,
        final_state: state,
    })
}
