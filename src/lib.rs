pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod game;
pub mod level;
pub mod logging;
pub mod pieces;
pub mod rng;
pub mod terminal;
pub mod types;
