//! # linedb
//!
//! A line-oriented record store backed by a plain text file:
//! - One file, one database
//! - One line, one record, addressed by 1-based line number
//! - A zero-byte file holds zero records; otherwise an empty line is a
//!   valid record
//! - Every mutation rewrites the whole file atomically
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        LineDb                                │
//! │     len / record / all / select      (served from memory)    │
//! │     insert / update / delete         (write, then commit)    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │     Codec     │
//!               │ decode/encode │
//!               │  load / save  │
//!               └───────┬───────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │ backing file  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use linedb::LineDb;
//!
//! let mut db = LineDb::open("todo.txt")?;
//! db.insert(0, "buy milk")?;
//! let first = db.record(1)?.to_string();
//! db.update(1, format!("{first} (done)"))?;
//! # Ok::<(), linedb::LineDbError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod codec;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LineDbError, Result};
pub use config::{Config, SyncStrategy};
pub use store::{LineDb, Rec};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of linedb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
