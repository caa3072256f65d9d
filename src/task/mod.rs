//! Kanban task tree and the board built on top of it.
//!
//! Tasks sit in three status columns and may nest subtasks to any depth.
//! The module edits the tree copy-on-write, tracks which nested sub-board
//! the user is looking at, and sequences every change with the store that
//! holds the tasks. It follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
