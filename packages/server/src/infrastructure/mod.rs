//! Infrastructure layer
//!
//! Concrete implementations of the domain interfaces and the wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
