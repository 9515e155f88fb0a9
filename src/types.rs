// Core game types shared by the board, the heuristic and the search

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

use crate::error::GameError;

/// One of the two players. `One` always moves first.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Returns both players in turn order
    pub fn all() -> [Player; 2] {
        [Player::One, Player::Two]
    }

    /// Index of the player in per-player arrays
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::One => "player-one",
            Player::Two => "player-two",
        }
    }
}

/// Linear cell index on a padded board (see [`Geometry`])
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Location(pub usize);

/// 2D cell coordinate in (column, row) order
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

/// Board dimensions together with the padded row stride used by linear locations.
///
/// Each row carries two sentinel columns so that knight jumps can never wrap
/// from one edge of the board to the other; a location decomposes as
/// `col = loc % (width + 2)`, `row = loc / (width + 2)`.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,
}

impl Geometry {
    pub const fn new(width: i32, height: i32) -> Self {
        Geometry { width, height }
    }

    pub const fn stride(&self) -> i32 {
        self.width + 2
    }

    /// Decomposes a linear location into a coordinate
    pub fn coord(&self, location: Location) -> Coord {
        let loc = location.0 as i32;
        Coord {
            col: loc % self.stride(),
            row: loc / self.stride(),
        }
    }

    /// Linear location of a coordinate
    pub fn location(&self, coord: Coord) -> Location {
        Location((coord.row * self.stride() + coord.col) as usize)
    }

    /// The fixed center cell
    pub fn center(&self) -> Coord {
        Coord {
            col: self.width / 2,
            row: self.height / 2,
        }
    }

    /// Manhattan distance from `coord` to the center cell
    pub fn center_distance(&self, coord: Coord) -> i32 {
        let center = self.center();
        (coord.col - center.col).abs() + (coord.row - center.row).abs()
    }

    /// Distance to the nearest of the four board edges
    pub fn boundary_distance(&self, coord: Coord) -> i32 {
        (self.width - coord.col)
            .min(coord.col)
            .min(coord.row)
            .min(self.height - coord.row)
    }
}

/// Capability set the search needs from a position.
///
/// Implementations are immutable values: `result` returns a fresh successor and
/// never modifies `self`.
pub trait GameState: Clone + Send + Sync + 'static {
    type Action: Copy + Debug + Display + PartialEq + Send + Sync + 'static;

    /// Legal actions for the active player, in a stable order
    fn actions(&self) -> Vec<Self::Action>;

    /// Successor state after the active player takes `action`
    fn result(&self, action: Self::Action) -> Result<Self, GameError>;

    /// True when the active player has no legal action
    fn terminal_test(&self) -> bool;

    /// Game value for `player`: +inf for a win, -inf for a loss, 0 otherwise
    fn utility(&self, player: Player) -> f64;

    /// Player to move
    fn active_player(&self) -> Player;

    /// Current location of `player`, or `None` before it has been placed
    fn location(&self, player: Player) -> Option<Location>;

    /// Cells reachable in one move from `location`.
    /// An absent location can reach every open cell.
    fn liberties(&self, location: Option<Location>) -> Vec<Location>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_uses_padded_stride() {
        let geometry = Geometry::new(11, 9);
        assert_eq!(geometry.stride(), 13);
        assert_eq!(geometry.coord(Location(0)), Coord { col: 0, row: 0 });
        assert_eq!(geometry.coord(Location(14)), Coord { col: 1, row: 1 });
        assert_eq!(geometry.coord(Location(114)), Coord { col: 10, row: 8 });
    }

    #[test]
    fn test_location_round_trips_through_coord() {
        let geometry = Geometry::new(4, 4);
        let coord = Coord { col: 2, row: 3 };
        assert_eq!(geometry.location(coord), Location(20));
        assert_eq!(geometry.coord(Location(20)), coord);
    }

    #[test]
    fn test_boundary_distance_uses_full_width_and_height() {
        let geometry = Geometry::new(11, 9);
        assert_eq!(geometry.boundary_distance(Coord { col: 0, row: 4 }), 0);
        assert_eq!(geometry.boundary_distance(Coord { col: 10, row: 4 }), 1);
        assert_eq!(geometry.boundary_distance(Coord { col: 5, row: 4 }), 4);
        assert_eq!(geometry.boundary_distance(Coord { col: 5, row: 8 }), 1);
        assert_eq!(geometry.boundary_distance(Coord { col: 3, row: 0 }), 0);
        assert_eq!(geometry.boundary_distance(Coord { col: 8, row: 6 }), 3);
    }

    #[test]
    fn test_center_distance() {
        let geometry = Geometry::new(11, 9);
        assert_eq!(geometry.center(), Coord { col: 5, row: 4 });
        assert_eq!(geometry.center_distance(Coord { col: 0, row: 0 }), 9);
        assert_eq!(geometry.center_distance(Coord { col: 5, row: 4 }), 0);
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::Two.index(), 1);
    }
}
