//! Codec Module
//!
//! Maps between the backing file and an ordered sequence of records.
//!
//! ## Responsibilities
//! - Split file contents into records on the separator
//! - Join records back into file contents
//! - Load the backing file in one read
//! - Replace the backing file in one atomic write
//!
//! ## File Format
//! ```text
//! ┌──────────┬───┬──────────┬───┬─────┬───┬──────────┐
//! │ Record 1 │ ␤ │ Record 2 │ ␤ │ ... │ ␤ │ Record n │
//! └──────────┴───┴──────────┴───┴─────┴───┴──────────┘
//! ```
//!
//! A zero-byte file holds zero records. Any other content holds
//! `count(separator) + 1` records, so leading, trailing and doubled
//! separators each produce an empty record.

mod text;
mod file;

pub use text::{decode, encode};
pub use file::{load, save, temp_path};
