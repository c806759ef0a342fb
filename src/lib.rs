//! kb - Personal Kanban Library
//!
//! This library provides the core functionality for the kb CLI tool,
//! a keyboard-first kanban board for personal task management.
//!
//! # Core Concepts
//!
//! - **Board Engine**: Pure filter, group, and assemble pipeline over tasks
//! - **Smart Views**: Named date-aware predicates like `today` and `overdue`
//! - **Project Hierarchy**: Nested projects with descendant-closure scoping
//! - **Operation Log**: Journaled mutations with undo/redo support
//!
//! # Module Organization
//!
//! - `board`: Filtering, grouping, visibility, and swimlane assembly
//! - `cli`: Command-line interface using clap
//! - `error`: Error types and result aliases
//! - `events`: Change notifications (JSONL sink and in-process bus)
//! - `oplog`: Operation log and undo snapshots
//! - `settings`: Persisted board presentation settings
//! - `storage`: File storage and directory management
//! - `store`: Task and project mutations over JSONL files
//! - `lock`: File locking and atomic operations for concurrency safety

pub mod board;
pub mod cli;
pub mod error;
pub mod events;
pub mod lock;
pub mod oplog;
pub mod output;
pub mod project;
pub mod settings;
pub mod storage;
pub mod store;
pub mod task;
pub mod undo;

pub use error::{Error, Result};
