//! Local-file storage driver.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::addr::Addr;
use crate::capability::{DriverKind, FeatureFlags};
use crate::driver::{Driver, ExtentQuery};
use crate::error::{DriverError, DriverResult};
use crate::kind::MemKind;

/// A local-file storage driver.
///
/// This driver maps the whole absolute address space onto one file opened
/// through OS file APIs. Data survives process restarts. All [`MemKind`]
/// categories share the file; the allocation extent is still tracked per
/// kind, in memory.
///
/// # Thread Safety
///
/// Reads take the file lock because positional I/O is implemented with
/// seek-then-read. The extent table has its own lock.
///
/// # Example
///
/// ```no_run
/// use strata_driver::{Addr, Driver, FileDriver, MemKind};
/// use std::path::Path;
///
/// let mut driver = FileDriver::open(Path::new("store.strata")).unwrap();
/// driver.write(MemKind::Raw, Addr::ZERO, b"persistent data").unwrap();
/// ```
#[derive(Debug)]
pub struct FileDriver {
    path: PathBuf,
    file: RwLock<File>,
    size: RwLock<u64>,
    eoa: RwLock<HashMap<MemKind, u64>>,
}

impl FileDriver {
    /// Feature flags advertised by the file driver family.
    pub const FEATURES: FeatureFlags = FeatureFlags::AGGREGATE_METADATA
        .union(FeatureFlags::ACCUMULATE_METADATA)
        .union(FeatureFlags::DATA_SIEVE)
        .union(FeatureFlags::AGGREGATE_SMALL_DATA)
        .union(FeatureFlags::RELAXED_CONSISTENCY);

    /// Opens or creates a file driver at the given path.
    ///
    /// If the file exists, it is opened for reading and writing without
    /// truncation. If it doesn't exist, a new file is created.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: &Path) -> DriverResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let size = file.metadata()?.len();

        Ok(Self {
            path: path.to_path_buf(),
            file: RwLock::new(file),
            size: RwLock::new(size),
            eoa: RwLock::new(HashMap::new()),
        })
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Driver for FileDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::File
    }

    fn read(&self, _kind: MemKind, addr: Addr, out: &mut [u8]) -> DriverResult<()> {
        let offset = addr.as_u64();
        offset
            .checked_add(out.len() as u64)
            .ok_or(DriverError::RangeOverflow {
                offset,
                len: out.len(),
            })?;

        let size = *self.size.read();
        let avail = if offset < size {
            (size - offset).min(out.len() as u64) as usize
        } else {
            0
        };

        if avail > 0 {
            let mut file = self.file.write();
            file.seek(SeekFrom::Start(offset))?;
            file.read_exact(&mut out[..avail])?;
        }
        // Bytes past the physical extent read back as zeros.
        out[avail..].fill(0);

        Ok(())
    }

    fn write(&mut self, _kind: MemKind, addr: Addr, data: &[u8]) -> DriverResult<()> {
        let offset = addr.as_u64();
        let end = offset
            .checked_add(data.len() as u64)
            .ok_or(DriverError::RangeOverflow {
                offset,
                len: data.len(),
            })?;

        if data.is_empty() {
            return Ok(());
        }

        let mut file = self.file.write();
        let mut size = self.size.write();

        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;
        if end > *size {
            *size = end;
        }

        Ok(())
    }

    fn eoa(&self, kind: MemKind) -> Option<Addr> {
        Some(Addr::new(self.eoa.read().get(&kind).copied().unwrap_or(0)))
    }

    fn set_eoa(&mut self, kind: MemKind, addr: Addr) -> DriverResult<()> {
        self.eoa.write().insert(kind, addr.as_u64());
        Ok(())
    }

    fn eof(&self, _kind: MemKind) -> ExtentQuery {
        ExtentQuery::Known(Addr::new(*self.size.read()))
    }

    fn query(&self) -> Option<FeatureFlags> {
        Some(Self::FEATURES)
    }
}
