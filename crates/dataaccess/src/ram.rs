//! In-memory integer store with whole-file persistence.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use config::{StoreConfig, MAX_GROWTH_FACTOR};
use tracing::{debug, info};

use crate::access::DataAccess;
use crate::error::{DataAccessError, DataAccessResult};
use crate::format::{self, HEADER_BYTES, INT_BYTES};

/// An integer store whose buffer lives entirely in memory.
///
/// Nothing touches the disk until [`load_existing`](DataAccess::load_existing)
/// or [`flush`](DataAccess::flush) is called, and each of those opens the
/// backing file, does its work, and closes it again before returning.
///
/// # Example
///
/// ```rust,no_run
/// use dataaccess::{DataAccess, RamDataAccess};
///
/// let mut da = RamDataAccess::new("edges.bin");
/// da.ensure_capacity(40); // 10 ints
/// da.set_int(9, 42);
/// da.flush().unwrap();
///
/// let da = RamDataAccess::load("edges.bin", 0);
/// assert_eq!(da.get_int(9), 42);
/// ```
pub struct RamDataAccess {
    location: PathBuf,
    /// `None` until the first capacity request or successful load, and again
    /// after `close`.
    area: Option<Vec<i32>>,
    growth_factor: f64,
    sync_on_flush: bool,
    closed: bool,
}

impl RamDataAccess {
    /// Creates an unallocated store bound to `location` with default settings.
    pub fn new<P: AsRef<Path>>(location: P) -> Self {
        Self::with_config(location, &StoreConfig::default())
    }

    /// Creates an unallocated store bound to `location`, taking the growth
    /// factor and fsync policy from `config`. `config.path` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `config.growth_factor` is not within
    /// `1.0..=MAX_GROWTH_FACTOR` (growth could shrink or overflow).
    pub fn with_config<P: AsRef<Path>>(location: P, config: &StoreConfig) -> Self {
        assert!(
            (1.0..=MAX_GROWTH_FACTOR).contains(&config.growth_factor),
            "growth_factor must be within 1.0..={}",
            MAX_GROWTH_FACTOR
        );
        Self {
            location: location.as_ref().to_path_buf(),
            area: None,
            growth_factor: config.growth_factor,
            sync_on_flush: config.sync_on_flush,
            closed: false,
        }
    }

    /// Opens the store at `location`, or creates a fresh one.
    ///
    /// Tries [`load_existing`](DataAccess::load_existing); if that fails the
    /// store is allocated with `ensure_capacity(byte_hint)` instead.
    pub fn load<P: AsRef<Path>>(location: P, byte_hint: u64) -> Self {
        Self::load_with(location, byte_hint, &StoreConfig::default())
    }

    /// Like [`load`](RamDataAccess::load), with explicit settings.
    pub fn load_with<P: AsRef<Path>>(location: P, byte_hint: u64, config: &StoreConfig) -> Self {
        let mut da = Self::with_config(location, config);
        if da.load_existing() {
            return da;
        }
        da.ensure_capacity(byte_hint);
        da
    }

    /// Path of the backing file.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Ratio applied when the buffer has to grow.
    #[must_use]
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Allocated size in bytes (`capacity() * 4`).
    #[must_use]
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity() as u64 * INT_BYTES
    }

    /// Returns `true` if a buffer is currently held.
    #[must_use]
    pub fn is_allocated(&self) -> bool {
        self.area.is_some()
    }

    /// Read-only view of all slots. Empty when unallocated.
    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        self.area.as_deref().unwrap_or(&[])
    }

    fn area(&self) -> &[i32] {
        match self.area.as_deref() {
            Some(area) => area,
            None => panic!(
                "integer store {} is not allocated",
                self.location.display()
            ),
        }
    }

    fn area_mut(&mut self) -> &mut [i32] {
        match self.area.as_deref_mut() {
            Some(area) => area,
            None => panic!(
                "integer store {} is not allocated",
                self.location.display()
            ),
        }
    }
}

impl DataAccess for RamDataAccess {
    fn ensure_capacity(&mut self, bytes: u64) {
        let int_size = (bytes >> 2) as usize;
        match self.area {
            None => self.area = Some(vec![0; int_size]),
            Some(ref mut area) => {
                if int_size <= area.len() {
                    return;
                }
                // growth_factor >= 1.0, so this never drops below int_size
                let new_len = (int_size as f64 * self.growth_factor) as usize;
                debug!(
                    location = %self.location.display(),
                    from = area.len(),
                    to = new_len,
                    "growing integer store"
                );
                area.resize(new_len.max(int_size), 0);
            }
        }
    }

    #[inline]
    fn set_int(&mut self, index: usize, value: i32) {
        self.area_mut()[index] = value;
    }

    #[inline]
    fn get_int(&self, index: usize) -> i32 {
        self.area()[index]
    }

    fn load_existing(&mut self) -> bool {
        if self.area.is_some() || self.closed {
            debug!(
                location = %self.location.display(),
                allocated = self.area.is_some(),
                closed = self.closed,
                "refusing to load over a live or closed store"
            );
            return false;
        }

        match read_store(&self.location) {
            Ok(area) => {
                info!(
                    location = %self.location.display(),
                    len = area.len(),
                    "loaded integer store"
                );
                self.area = Some(area);
                true
            }
            Err(e) => {
                debug!(
                    location = %self.location.display(),
                    error = %e,
                    "no existing integer store loaded"
                );
                false
            }
        }
    }

    fn flush(&mut self) -> DataAccessResult<&mut Self> {
        let area = match self.area.as_deref() {
            Some(area) => area,
            None => {
                return Err(DataAccessError::Unallocated {
                    location: self.location.clone(),
                })
            }
        };

        write_store(&self.location, area, self.sync_on_flush).map_err(|source| {
            DataAccessError::Store {
                location: self.location.clone(),
                source,
            }
        })?;

        info!(
            location = %self.location.display(),
            len = area.len(),
            "flushed integer store"
        );
        Ok(self)
    }

    fn close(&mut self) -> &mut Self {
        self.area = None;
        self.closed = true;
        self
    }

    fn capacity(&self) -> usize {
        self.area.as_ref().map_or(0, Vec::len)
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl fmt::Debug for RamDataAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RamDataAccess")
            .field("location", &self.location)
            .field("capacity", &self.capacity())
            .field("allocated", &self.is_allocated())
            .field("closed", &self.closed)
            .field("growth_factor", &self.growth_factor)
            .field("sync_on_flush", &self.sync_on_flush)
            .finish()
    }
}

/// Reads a whole store file. The buffer is only returned once every value
/// has been read, so callers never observe a partial load.
fn read_store(location: &Path) -> io::Result<Vec<i32>> {
    let file = File::open(location)?;
    let file_len = file.metadata()?.len();
    let mut rdr = BufReader::new(file);

    rdr.seek(SeekFrom::Start(0))?;
    let header = format::read_header(&mut rdr)?;

    // Checked before allocating so a corrupt count cannot exhaust memory.
    let needed = format::payload_end(header.len);
    if needed > file_len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "store truncated: {} elements need {} bytes, file has {}",
                header.len, needed, file_len
            ),
        ));
    }
    let len = usize::try_from(header.len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "element count too large"))?;

    rdr.seek(SeekFrom::Start(HEADER_BYTES))?;
    format::read_ints(&mut rdr, len)
}

/// Writes `area` to `location`, truncating whatever was there.
fn write_store(location: &Path, area: &[i32], sync: bool) -> io::Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(location)?;
    let mut out = BufWriter::new(file);

    out.seek(SeekFrom::Start(0))?;
    format::write_header(&mut out, area.len() as u64)?;
    // Seeking past EOF does not extend the file; set_len below fills the gap.
    out.seek(SeekFrom::Start(HEADER_BYTES))?;
    format::write_ints(&mut out, area)?;

    out.flush()?;
    let file = out.into_inner()?;
    // An empty payload would otherwise leave the file shorter than the header.
    file.set_len(format::payload_end(area.len() as u64))?;
    if sync {
        file.sync_all()?;
    }
    Ok(())
}
