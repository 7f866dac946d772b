//! Terminal input module.
//!
//! Maps `crossterm` key-down events into [`types::GameAction`]s. Only presses
//! matter: there is no key-release or auto-repeat handling, so each press is
//! exactly one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
