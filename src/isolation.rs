// Knight's Isolation board
//
// Two players share an 11x9 board. On their first turn each player places
// their piece on any open cell; afterwards they move like a chess knight onto
// open cells. Every cell a player occupies is closed for the rest of the game.
// The player to move with no open knight jump loses.
//
// Cells are bits of a u128. Each row is padded with two always-closed sentinel
// columns, so a jump that would leave the board lands on a closed bit instead
// of wrapping to the other edge.

use std::fmt;

use crate::error::GameError;
use crate::types::{Coord, GameState, Geometry, Location, Player};

pub const WIDTH: i32 = 11;
pub const HEIGHT: i32 = 9;
pub const GEOMETRY: Geometry = Geometry::new(WIDTH, HEIGHT);

const STRIDE: i32 = WIDTH + 2;
const SIZE: i32 = STRIDE * HEIGHT - 2;
const BLANK_BOARD: u128 = blank_board();

const fn blank_board() -> u128 {
    let mut board = 0u128;
    let mut i = 0;
    while i < SIZE {
        if i % STRIDE < WIDTH {
            board |= 1u128 << i;
        }
        i += 1;
    }
    board
}

/// The eight knight jumps, named by compass heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnightMove {
    NNE,
    ENE,
    ESE,
    SSE,
    SSW,
    WSW,
    WNW,
    NNW,
}

impl KnightMove {
    /// Returns all jumps in the order actions are generated
    pub fn all() -> [KnightMove; 8] {
        [
            KnightMove::NNE,
            KnightMove::ENE,
            KnightMove::ESE,
            KnightMove::SSE,
            KnightMove::SSW,
            KnightMove::WSW,
            KnightMove::WNW,
            KnightMove::NNW,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnightMove::NNE => "NNE",
            KnightMove::ENE => "ENE",
            KnightMove::ESE => "ESE",
            KnightMove::SSE => "SSE",
            KnightMove::SSW => "SSW",
            KnightMove::WSW => "WSW",
            KnightMove::WNW => "WNW",
            KnightMove::NNW => "NNW",
        }
    }

    /// Offset of this jump in padded linear locations
    pub fn offset(&self) -> i32 {
        match self {
            KnightMove::NNE => 2 * STRIDE + 1,
            KnightMove::ENE => STRIDE + 2,
            KnightMove::ESE => -STRIDE + 2,
            KnightMove::SSE => -2 * STRIDE + 1,
            KnightMove::SSW => -2 * STRIDE - 1,
            KnightMove::WSW => -STRIDE - 2,
            KnightMove::WNW => STRIDE - 2,
            KnightMove::NNW => 2 * STRIDE - 1,
        }
    }

    /// Target of this jump from `from`, or `None` if it falls outside the bit range.
    /// Padding cells are in range; callers still have to test the target is open.
    pub fn apply(&self, from: Location) -> Option<Location> {
        let target = from.0 as i32 + self.offset();
        if (0..SIZE).contains(&target) {
            Some(Location(target as usize))
        } else {
            None
        }
    }
}

/// An Isolation action: an opening placement or a knight jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Place(Location),
    Jump(KnightMove),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Place(location) => {
                let Coord { col, row } = GEOMETRY.coord(*location);
                write!(f, "place({}, {})", col, row)
            }
            Action::Jump(jump) => f.write_str(jump.as_str()),
        }
    }
}

/// Immutable Isolation position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Isolation {
    board: u128,
    ply_count: u32,
    locs: [Option<Location>; 2],
}

impl Default for Isolation {
    fn default() -> Self {
        Isolation::new()
    }
}

impl Isolation {
    /// Empty board with player one to move
    pub fn new() -> Self {
        Isolation {
            board: BLANK_BOARD,
            ply_count: 0,
            locs: [None, None],
        }
    }

    pub fn ply_count(&self) -> u32 {
        self.ply_count
    }

    /// True if `location` is an open cell
    pub fn is_open(&self, location: Location) -> bool {
        location.0 < SIZE as usize && self.board & (1u128 << location.0) != 0
    }

    /// All open cells in ascending location order
    pub fn open_cells(&self) -> Vec<Location> {
        (0..SIZE as usize)
            .map(Location)
            .filter(|&loc| self.is_open(loc))
            .collect()
    }

    pub fn open_cell_count(&self) -> u32 {
        self.board.count_ones()
    }

    fn jump_target(&self, from: Location, jump: KnightMove) -> Option<Location> {
        jump.apply(from).filter(|&target| self.is_open(target))
    }

    fn illegal(&self, action: Action) -> GameError {
        GameError::IllegalAction {
            action: action.to_string(),
            player: self.active_player().index(),
        }
    }
}

impl GameState for Isolation {
    type Action = Action;

    fn actions(&self) -> Vec<Action> {
        match self.locs[self.active_player().index()] {
            None => self.open_cells().into_iter().map(Action::Place).collect(),
            Some(from) => KnightMove::all()
                .iter()
                .filter(|&&jump| self.jump_target(from, jump).is_some())
                .map(|&jump| Action::Jump(jump))
                .collect(),
        }
    }

    fn result(&self, action: Action) -> Result<Self, GameError> {
        let player = self.active_player();
        let target = match (action, self.locs[player.index()]) {
            (Action::Place(location), None) if self.is_open(location) => location,
            (Action::Jump(jump), Some(from)) => self
                .jump_target(from, jump)
                .ok_or_else(|| self.illegal(action))?,
            _ => return Err(self.illegal(action)),
        };

        let mut locs = self.locs;
        locs[player.index()] = Some(target);

        Ok(Isolation {
            board: self.board ^ (1u128 << target.0),
            ply_count: self.ply_count + 1,
            locs,
        })
    }

    fn terminal_test(&self) -> bool {
        self.liberties(self.locs[self.active_player().index()])
            .is_empty()
    }

    fn utility(&self, player: Player) -> f64 {
        if !self.terminal_test() {
            return 0.0;
        }
        // The active player is the one without liberties
        if player == self.active_player() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    }

    fn active_player(&self) -> Player {
        if self.ply_count % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    fn location(&self, player: Player) -> Option<Location> {
        self.locs[player.index()]
    }

    fn liberties(&self, location: Option<Location>) -> Vec<Location> {
        match location {
            None => self.open_cells(),
            Some(from) => KnightMove::all()
                .iter()
                .filter_map(|&jump| self.jump_target(from, jump))
                .collect(),
        }
    }
}
