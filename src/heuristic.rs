// Static evaluation used at depth cutoffs
//
// The composite score rewards mobility first, then central placement:
//   score    = baseline + distance_weight * distance
//   distance = center + boundary_weight * boundary

use crate::config::HeuristicConfig;
use crate::types::{Coord, GameState, Geometry, Player};

/// Scores a non-terminal state from `player`'s point of view. Higher is better for `player`.
pub trait Evaluator<S: GameState>: Send + Sync {
    fn evaluate(&self, state: &S, player: Player) -> f64;
}

/// Mobility plus center/boundary positional heuristic
#[derive(Debug, Clone)]
pub struct PositionalHeuristic {
    geometry: Geometry,
    distance_weight: f64,
    boundary_weight: f64,
}

impl PositionalHeuristic {
    pub fn new(geometry: Geometry, config: &HeuristicConfig) -> Self {
        PositionalHeuristic {
            geometry,
            distance_weight: config.distance_weight,
            boundary_weight: config.boundary_weight,
        }
    }

    /// Own liberties minus the opponent's liberties
    pub fn baseline<S: GameState>(&self, state: &S, player: Player) -> f64 {
        let own = state.liberties(state.location(player)).len() as f64;
        let theirs = state.liberties(state.location(player.opponent())).len() as f64;
        own - theirs
    }

    /// Center term plus weighted boundary term
    pub fn distance<S: GameState>(&self, state: &S, player: Player) -> f64 {
        let own = self.coord_or_center(state, player);
        let theirs = self.coord_or_center(state, player.opponent());
        self.center_score(own, theirs) + self.boundary_weight * self.boundary_score(own, theirs)
    }

    /// Positive when `own` is closer to the center cell than `theirs`
    pub fn center_score(&self, own: Coord, theirs: Coord) -> f64 {
        (self.geometry.center_distance(theirs) - self.geometry.center_distance(own)) as f64
    }

    /// Positive when `own` is farther from its nearest edge than `theirs`
    pub fn boundary_score(&self, own: Coord, theirs: Coord) -> f64 {
        (self.geometry.boundary_distance(own) - self.geometry.boundary_distance(theirs)) as f64
    }

    // Unplaced players stand in at the center cell
    fn coord_or_center<S: GameState>(&self, state: &S, player: Player) -> Coord {
        state
            .location(player)
            .map(|loc| self.geometry.coord(loc))
            .unwrap_or_else(|| self.geometry.center())
    }
}

impl<S: GameState> Evaluator<S> for PositionalHeuristic {
    fn evaluate(&self, state: &S, player: Player) -> f64 {
        self.baseline(state, player) + self.distance_weight * self.distance(state, player)
    }
}
