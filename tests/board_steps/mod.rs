//! Step definitions for board behaviour scenarios.

mod given;
mod when;
pub mod world;
