//! Platform abstraction layer
//!
//! Translates terminal key events into game actions and session commands.

pub mod input;

pub use input::{Command, map_key};
