// Library exports for the Isolation agent
// This allows the match binary and the integration tests to use the core search logic

pub mod agent;
pub mod arena;
pub mod config;
pub mod debug_logger;
pub mod driver;
pub mod error;
pub mod heuristic;
pub mod isolation;
pub mod output;
pub mod search;
pub mod types;
