//! Line protocol handling.
//!
//! `notation` encodes and decodes the game server's move and score lines;
//! `parser` turns session input into commands for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{
    format_game_over, format_move, parse_game_over, parse_move, GameOver, NotationError,
    WireAction, WireMove,
};
pub use parser::{parse_command, Command};
