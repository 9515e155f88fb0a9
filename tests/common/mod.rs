// Shared fixtures for integration tests
#![allow(dead_code)]

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::Arc;

use isolation_agent::error::GameError;
use isolation_agent::heuristic::Evaluator;
use isolation_agent::isolation::Isolation;
use isolation_agent::output::{ActionSink, Publication};
use isolation_agent::types::{GameState, Location, Player};

/// Shape of a hand-built game tree. Values are from player one's point of view.
pub enum Spec {
    /// Game over with this utility for player one
    Terminal(f64),
    /// Position with a static evaluation and children reached by action index
    Inner(f64, Vec<Spec>),
    /// Position that offers action 0 but rejects it when applied
    Broken,
}

#[derive(Debug)]
struct Node {
    value: f64,
    terminal: bool,
    broken: bool,
    children: Vec<usize>,
}

/// Position inside a hand-built tree. Player one moves at even plies.
#[derive(Debug, Clone)]
pub struct TreeState {
    nodes: Arc<Vec<Node>>,
    node: usize,
    ply: u32,
}

impl TreeState {
    pub fn new(spec: Spec) -> Self {
        let mut nodes = Vec::new();
        Self::flatten(spec, &mut nodes);
        TreeState {
            nodes: Arc::new(nodes),
            node: 0,
            ply: 0,
        }
    }

    fn flatten(spec: Spec, nodes: &mut Vec<Node>) -> usize {
        let index = nodes.len();
        match spec {
            Spec::Terminal(value) => nodes.push(Node {
                value,
                terminal: true,
                broken: false,
                children: vec![],
            }),
            Spec::Broken => nodes.push(Node {
                value: 0.0,
                terminal: false,
                broken: true,
                children: vec![],
            }),
            Spec::Inner(value, children) => {
                nodes.push(Node {
                    value,
                    terminal: false,
                    broken: false,
                    children: vec![],
                });
                let child_indices: Vec<usize> = children
                    .into_iter()
                    .map(|child| Self::flatten(child, nodes))
                    .collect();
                nodes[index].children = child_indices;
            }
        }
        index
    }

    fn current(&self) -> &Node {
        &self.nodes[self.node]
    }

    /// Number of actions taken from the root
    pub fn ply(&self) -> u32 {
        self.ply
    }

    /// Static value of this node for `player`
    pub fn value_for(&self, player: Player) -> f64 {
        match player {
            Player::One => self.current().value,
            Player::Two => -self.current().value,
        }
    }
}

impl GameState for TreeState {
    type Action = usize;

    fn actions(&self) -> Vec<usize> {
        if self.current().broken {
            return vec![0];
        }
        (0..self.current().children.len()).collect()
    }

    fn result(&self, action: usize) -> Result<Self, GameError> {
        let illegal = || GameError::IllegalAction {
            action: action.to_string(),
            player: self.active_player().index(),
        };
        if self.current().broken {
            return Err(illegal());
        }
        let child = *self.current().children.get(action).ok_or_else(illegal)?;
        Ok(TreeState {
            nodes: self.nodes.clone(),
            node: child,
            ply: self.ply + 1,
        })
    }

    fn terminal_test(&self) -> bool {
        self.current().terminal
    }

    fn utility(&self, player: Player) -> f64 {
        if self.current().terminal {
            self.value_for(player)
        } else {
            0.0
        }
    }

    fn active_player(&self) -> Player {
        if self.ply % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }

    fn location(&self, _player: Player) -> Option<Location> {
        None
    }

    fn liberties(&self, _location: Option<Location>) -> Vec<Location> {
        vec![]
    }
}

/// Evaluator that reads the static value stored in a tree node
pub struct NodeValue;

impl Evaluator<TreeState> for NodeValue {
    fn evaluate(&self, state: &TreeState, player: Player) -> f64 {
        state.value_for(player)
    }
}

/// The classic three-by-three example: MAX picks the left branch worth 3
pub fn textbook_tree() -> TreeState {
    use Spec::{Inner, Terminal};
    TreeState::new(Inner(
        0.0,
        vec![
            Inner(0.0, vec![Terminal(3.0), Terminal(12.0), Terminal(8.0)]),
            Inner(0.0, vec![Terminal(2.0), Terminal(4.0), Terminal(6.0)]),
            Inner(0.0, vec![Terminal(14.0), Terminal(5.0), Terminal(2.0)]),
        ],
    ))
}

/// Complete binary tree with terminal leaves at `depth` and varied values everywhere
pub fn binary_tree(depth: u32) -> TreeState {
    fn build(depth: u32, counter: &mut i32) -> Spec {
        *counter += 1;
        let value = ((*counter * 37) % 23 - 11) as f64;
        if depth == 0 {
            Spec::Terminal(value)
        } else {
            Spec::Inner(value, vec![build(depth - 1, counter), build(depth - 1, counter)])
        }
    }
    let mut counter = 0;
    TreeState::new(build(depth, &mut counter))
}

/// Isolation position reached by `plies` seeded random actions (fewer if the game ends)
pub fn random_position(seed: u64, plies: usize) -> Isolation {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut state = Isolation::new();
    for _ in 0..plies {
        let actions = state.actions();
        match actions.choose(&mut rng) {
            Some(&action) => state = state.result(action).expect("random action is legal"),
            None => break,
        }
    }
    state
}

/// Sink that keeps every publication
pub struct RecordingSink<A> {
    pub publications: Mutex<Vec<Publication<A>>>,
}

impl<A: Copy> RecordingSink<A> {
    pub fn new() -> Self {
        RecordingSink {
            publications: Mutex::new(Vec::new()),
        }
    }

    pub fn depths(&self) -> Vec<u32> {
        self.publications.lock().iter().map(|p| p.depth).collect()
    }

    pub fn last(&self) -> Option<Publication<A>> {
        self.publications.lock().last().copied()
    }
}

impl<A: Copy + Send> ActionSink<A> for RecordingSink<A> {
    fn publish(&self, publication: Publication<A>) {
        self.publications.lock().push(publication);
    }
}
