//! Utilities shared by the Tandem packages.

pub mod logger;
pub mod time;
