//! Islander rules engine library.
//!
//! Exposes the board representation, tile placement, the settlement
//! engine, the player economy, planning queries and the line protocol for
//! use by integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod movegen;
pub mod placement;
pub mod player;
pub mod protocol;
pub mod settlement;
