//! The integer store trait.

use crate::error::DataAccessResult;

/// A flat, growable array of 32-bit integer slots that can be persisted to
/// and restored from a single file.
///
/// This is the whole surface higher-level structures (graph adjacency
/// arrays and the like) are expected to use. Stores assume a single owner;
/// nothing here synchronizes.
///
/// # Lifecycle
///
/// ```text
/// new ──ensure_capacity──> allocated ──set_int/get_int──> ... ──flush──> persisted
///  │                           ▲                                            │
///  └──load_existing (ok)───────┘                         close <────────────┘
/// ```
///
/// # Implementors
///
/// - [`super::RamDataAccess`] - buffer held entirely in memory
pub trait DataAccess {
    /// Makes room for at least `bytes / 4` integers.
    ///
    /// Allocates exactly that many zeroed slots on first use. Later calls
    /// never shrink; when growth is needed the buffer is resized to
    /// `floor(requested * growth_factor)` slots, keeping existing values at
    /// their indices and zero-filling the rest.
    fn ensure_capacity(&mut self, bytes: u64);

    /// Writes `value` at `index`.
    ///
    /// # Panics
    ///
    /// The store must be allocated and `index < capacity()`. Anything else is
    /// a caller bug and panics; it is never clamped.
    fn set_int(&mut self, index: usize, value: i32);

    /// Reads the value at `index`.
    ///
    /// # Panics
    ///
    /// Same precondition as [`set_int`](DataAccess::set_int).
    fn get_int(&self, index: usize) -> i32;

    /// Tries to replace the (still unset) buffer with the persisted one.
    ///
    /// Returns `false` without touching the filesystem when the store is
    /// already allocated or closed. Returns `false` when the file is missing,
    /// unreadable, truncated, or carries a foreign marker; in that case the
    /// store is left exactly as it was.
    fn load_existing(&mut self) -> bool;

    /// Writes the whole buffer to the backing file, replacing its contents.
    ///
    /// Not atomic: after an error the file contents are unspecified.
    ///
    /// # Errors
    ///
    /// Returns [`DataAccessError::Store`](crate::DataAccessError::Store) on
    /// any I/O failure, and
    /// [`DataAccessError::Unallocated`](crate::DataAccessError::Unallocated)
    /// if there is no buffer to write.
    fn flush(&mut self) -> DataAccessResult<&mut Self>
    where
        Self: Sized;

    /// Releases the buffer and marks the store closed. Idempotent.
    fn close(&mut self) -> &mut Self
    where
        Self: Sized;

    /// Number of integer slots currently allocated (0 when unset).
    fn capacity(&self) -> usize;

    /// Returns `true` once [`close`](DataAccess::close) has been called.
    fn is_closed(&self) -> bool;
}
