//! Error types for store persistence.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations that can fail.
pub type DataAccessResult<T> = Result<T, DataAccessError>;

/// Errors surfaced by [`flush`](crate::DataAccess::flush).
///
/// Load failures never appear here: `load_existing` reports them as `false`.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// Writing the store file failed. The file contents are unspecified.
    #[error("couldn't store integers to {}", location.display())]
    Store {
        /// The backing file that was being written.
        location: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Flush was called before any buffer was allocated.
    #[error("no integers allocated for {}", location.display())]
    Unallocated {
        /// The backing file that would have been written.
        location: PathBuf,
    },
}
