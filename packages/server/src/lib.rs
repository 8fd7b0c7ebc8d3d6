//! Shared playback room server library.
//!
//! Peers join named rooms over WebSocket and jointly control one player and
//! one ordered queue per room. Every change is applied to the server-side
//! room and broadcast to all of its members.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
