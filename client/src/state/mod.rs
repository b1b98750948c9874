//! Plain state structs driven by the reactive layer.
//!
//! Everything here is synchronous and free of browser types, so the
//! auth transitions, gate logic, and fetch lifecycles are testable
//! with plain `cargo test`.

pub mod auth;
pub mod gate;
pub mod players;
pub mod teams;
