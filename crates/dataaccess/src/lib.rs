//! # DataAccess - persistable integer store
//!
//! A flat, randomly indexable array of 32-bit integer slots that lives in
//! memory, grows on demand, and can be written to and restored from a single
//! file. Higher-level structures (graph adjacency arrays, edge lists) build
//! on top of it and decide what the integers mean.
//!
//! ## File layout
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ HEADER (fixed HEADER_BYTES = 100 bytes)                       │
//! │                                                               │
//! │ marker_len (u16) | marker "dataaccess.version.0.1"            │
//! │ len (i64)                                                     │
//! │ ... zero padding up to byte 100 ...                           │
//! ├───────────────────────────────────────────────────────────────┤
//! │ PAYLOAD                                                       │
//! │                                                               │
//! │ value (i32) x len, index 0 first                              │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are big-endian. The payload always starts at
//! [`HEADER_BYTES`], however many bytes the marker actually takes; markers
//! longer than [`MAX_MARKER_BYTES`] are rejected at compile time.
//!
//! ## Failure policy
//!
//! | Operation       | On failure                                         |
//! |-----------------|----------------------------------------------------|
//! | `load_existing` | returns `false`, store unchanged, cause logged      |
//! | `flush`         | returns [`DataAccessError`] with cause + location   |
//! | `set_int`/`get_int` out of range | panics (caller bug)               |
//!
//! ## Example
//!
//! ```rust,no_run
//! use dataaccess::{DataAccess, RamDataAccess};
//!
//! let mut da = RamDataAccess::load("graph.edges", 4096);
//! da.set_int(0, 7);
//! da.flush().unwrap().close();
//! ```

mod access;
mod error;
mod format;
mod ram;

pub use access::DataAccess;
pub use error::{DataAccessError, DataAccessResult};
pub use format::{
    payload_end, read_header, write_header, Header, HEADER_BYTES, INT_BYTES, MARKER,
    MAX_MARKER_BYTES,
};
pub use ram::RamDataAccess;
