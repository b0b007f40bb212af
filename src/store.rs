//! Store Module
//!
//! The record store: one backing file, one in-memory sequence of records.
//!
//! ## Responsibilities
//! - Load the backing file on open
//! - Serve reads from memory
//! - Bounds-check record numbers (1-indexed, 0 = append for inserts)
//! - Persist every mutation as a whole-file replace before applying it

use std::iter;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::codec;
use crate::config::Config;
use crate::error::{LineDbError, Result};

/// A record paired with its line number in the backing file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rec {
    pub number: i64,
    pub text: String,
}

impl Rec {
    pub fn new(number: i64, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// Handle to a line-record database
///
/// ## Consistency Model
///
/// - **Reads** (len/record/all/select): served from `records`, no I/O
/// - **Writes** (insert/update/delete): the prospective sequence is encoded
///   and written to disk first; `records` changes only once the write
///   succeeds, so a failed write leaves memory and file as they were
///
/// Mutations take `&mut self`; the handle does no locking of its own and
/// holds no file descriptor between calls.
#[derive(Debug)]
pub struct LineDb {
    /// Backing file
    path: PathBuf,

    /// Store options
    config: Config,

    /// Record texts; index 0 is record 1
    records: Vec<String>,
}

impl LineDb {
    /// Open a handle to the given backing file with default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, Config::default())
    }

    /// Open a handle to the given backing file
    ///
    /// Fails with `LineDbError::Load` if the file is missing, unreadable
    /// or not valid UTF-8.
    pub fn open_with(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = codec::load(&path, config.separator)?;

        debug!(path = %path.display(), records = records.len(), "opened linedb");

        Ok(Self {
            path,
            config,
            records,
        })
    }

    /// Re-read the backing file, discarding the in-memory records
    ///
    /// On failure the in-memory records are kept.
    pub fn reload(&mut self) -> Result<()> {
        let records = codec::load(&self.path, self.config.separator)?;

        debug!(
            path = %self.path.display(),
            before = self.records.len(),
            after = records.len(),
            "reloaded linedb"
        );

        self.records = records;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Return the number-th record. Like lines in files, records are
    /// 1-indexed.
    pub fn record(&self, number: i64) -> Result<&str> {
        let index = self.index_of(number)?;
        Ok(&self.records[index])
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records with their numbers, in ascending order
    pub fn all(&self) -> Vec<Rec> {
        self.iter().map(|(number, text)| Rec::new(number, text)).collect()
    }

    /// Records for which `filter` returns true, in ascending order
    pub fn select<F>(&self, mut filter: F) -> Vec<Rec>
    where
        F: FnMut(&Rec) -> bool,
    {
        self.iter()
            .map(|(number, text)| Rec::new(number, text))
            .filter(|rec| filter(rec))
            .collect()
    }

    /// Borrowing iterator over `(number, text)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(i, text)| (i as i64 + 1, text.as_str()))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a new record at position `number`, pushing the record there
    /// and every later one forward; `insert(1, ..)` prepends.
    ///
    /// Special cases:
    /// - `number == 0` appends after the last record
    /// - inserting empty text into an empty database is a no-op
    pub fn insert(&mut self, number: i64, text: impl Into<String>) -> Result<()> {
        self.check_bounds(0, number)?;
        let text = text.into();

        if self.records.is_empty() && text.is_empty() {
            debug!(path = %self.path.display(), "empty insert into empty linedb ignored");
            return Ok(());
        }

        let index = if number == 0 {
            self.records.len()
        } else {
            (number - 1) as usize
        };

        let (head, tail) = self.records.split_at(index);
        let contents = self.encode(
            head.iter()
                .map(String::as_str)
                .chain(iter::once(text.as_str()))
                .chain(tail.iter().map(String::as_str)),
        );
        self.persist(&contents)?;

        self.records.insert(index, text);

        debug!(path = %self.path.display(), number = index + 1, "inserted record");
        Ok(())
    }

    /// Replace the text of the number-th record, returning the old text
    pub fn update(&mut self, number: i64, text: impl Into<String>) -> Result<String> {
        let index = self.index_of(number)?;
        let text = text.into();
        let replacement = text.as_str();

        let contents = self.encode(self.records.iter().enumerate().map(|(i, old)| {
            if i == index {
                replacement
            } else {
                old.as_str()
            }
        }));
        self.persist(&contents)?;

        let old = std::mem::replace(&mut self.records[index], text);

        debug!(path = %self.path.display(), number, "updated record");
        Ok(old)
    }

    /// Remove the number-th record, returning its text
    pub fn delete(&mut self, number: i64) -> Result<String> {
        let index = self.index_of(number)?;

        let contents = self.encode(
            self.records
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, text)| text.as_str()),
        );
        self.persist(&contents)?;

        let old = self.records.remove(index);

        debug!(path = %self.path.display(), number, "deleted record");
        Ok(old)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Validate a 1-indexed record number and convert it to a vec index
    ///
    /// Emptiness is checked before bounds.
    fn index_of(&self, number: i64) -> Result<usize> {
        if self.records.is_empty() {
            return Err(LineDbError::EmptyStore);
        }

        self.check_bounds(1, number)?;

        Ok((number - 1) as usize)
    }

    fn check_bounds(&self, lower: i64, number: i64) -> Result<()> {
        let upper = self.records.len() as i64;

        if number < lower || number > upper {
            return Err(LineDbError::OutOfBounds {
                number,
                lower,
                upper,
            });
        }

        Ok(())
    }

    fn encode<'a, I>(&self, records: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        codec::encode(records, self.config.separator)
    }

    fn persist(&self, contents: &str) -> Result<()> {
        codec::save(&self.path, contents.as_bytes(), self.config.sync_strategy).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "linedb write failed, state unchanged");
            e
        })
    }
}
