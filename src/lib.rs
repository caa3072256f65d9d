//! Taskboard: a kanban board over nested task trees.
//!
//! Tasks live in three status columns (backlog, active, finished) and may
//! contain subtasks, each of which is a full task with its own sub-board.
//! The crate provides the copy-on-write tree edits, breadcrumb navigation
//! into sub-boards, drag-and-drop reordering with rollback, and the
//! persistence adapters the board talks to.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure tree and navigation logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for task and blob storage
//! - **Adapters**: In-memory, file and HTTP implementations of the ports
//!
//! # Modules
//!
//! - [`task`]: Task tree, board service and persistence
//! - [`config`]: Backend selection from the environment
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
