//! Store file format constants and header/payload read/write helpers.
//!
//! ```text
//! offset 0             [marker_len: u16 BE][marker: UTF-8 bytes]
//! after marker         [len: i64 BE]
//! ...                  unused padding up to HEADER_BYTES
//! HEADER_BYTES         [value: i32 BE] x len, index 0 first
//! ```
//!
//! The marker is encoded the way `java.io.DataOutput::writeUTF` encodes ASCII
//! text, so files stay byte-compatible with stores written by JVM tooling.
//!
//! The payload offset is a hard constant, not derived from the encoded marker
//! length. Reader and writer must agree on it.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Result as IoResult, Write};

/// Sentinel string written at offset 0 of every store file.
pub const MARKER: &str = "dataaccess.version.0.1";

/// Byte offset at which the integer payload begins.
///
/// Reserved regardless of how many bytes the marker and length actually
/// occupy; the gap is unused padding.
pub const HEADER_BYTES: u64 = 100;

/// Size of one stored element in bytes.
pub const INT_BYTES: u64 = 4;

/// Longest marker (in encoded bytes) that still leaves room for the 2-byte
/// marker length prefix and the 8-byte element count before [`HEADER_BYTES`].
pub const MAX_MARKER_BYTES: usize = HEADER_BYTES as usize - 2 - 8;

const _: () = assert!(
    MARKER.len() <= MAX_MARKER_BYTES,
    "marker would overlap the payload"
);

/// Parsed store header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Number of stored 32-bit elements.
    pub len: u64,
}

/// Returns the exact file size of a store holding `len` elements.
///
/// Saturates instead of overflowing so a corrupt count compares as "too big".
#[must_use]
pub fn payload_end(len: u64) -> u64 {
    len.saturating_mul(INT_BYTES).saturating_add(HEADER_BYTES)
}

/// Writes a length-prefixed marker string (`u16` BE length, then bytes).
pub fn write_marker<W: Write>(w: &mut W, marker: &str) -> IoResult<()> {
    let bytes = marker.as_bytes();
    if bytes.len() > MAX_MARKER_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "marker is {} bytes, at most {} fit in the header",
                bytes.len(),
                MAX_MARKER_BYTES
            ),
        ));
    }
    w.write_u16::<BigEndian>(bytes.len() as u16)?;
    w.write_all(bytes)
}

/// Reads a length-prefixed marker string and returns its raw bytes.
pub fn read_marker<R: Read>(r: &mut R) -> IoResult<Vec<u8>> {
    let len = r.read_u16::<BigEndian>()? as usize;
    if len > MAX_MARKER_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("marker length {} exceeds header space", len),
        ));
    }
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}

/// Writes the marker and element count. The caller must already be
/// positioned at offset 0.
pub fn write_header<W: Write>(w: &mut W, len: u64) -> IoResult<()> {
    write_marker(w, MARKER)?;
    w.write_i64::<BigEndian>(len as i64)
}

/// Reads and validates the header. The caller must already be positioned at
/// offset 0.
///
/// Fails with [`io::ErrorKind::InvalidData`] when the marker does not match
/// [`MARKER`] or the stored count is negative.
pub fn read_header<R: Read>(r: &mut R) -> IoResult<Header> {
    let marker = read_marker(r)?;
    if marker != MARKER.as_bytes() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "marker mismatch: expected {:?}, found {:?}",
                MARKER,
                String::from_utf8_lossy(&marker)
            ),
        ));
    }
    let len = r.read_i64::<BigEndian>()?;
    if len < 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("negative element count {}", len),
        ));
    }
    Ok(Header { len: len as u64 })
}

/// Writes every value as a 4-byte big-endian integer, in index order.
pub fn write_ints<W: Write>(w: &mut W, values: &[i32]) -> IoResult<()> {
    for &v in values {
        w.write_i32::<BigEndian>(v)?;
    }
    Ok(())
}

/// Reads exactly `len` 4-byte big-endian integers.
///
/// A short read surfaces as [`io::ErrorKind::UnexpectedEof`]; nothing is
/// returned in that case.
pub fn read_ints<R: Read>(r: &mut R, len: usize) -> IoResult<Vec<i32>> {
    let mut values = vec![0i32; len];
    r.read_i32_into::<BigEndian>(&mut values)?;
    Ok(values)
}
