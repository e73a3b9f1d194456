pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod snake;
pub mod surface;
pub mod terminal_runtime;
