//! In-memory storage driver for testing.

use std::collections::HashMap;

use crate::addr::Addr;
use crate::capability::DriverKind;
use crate::driver::{Driver, ExtentQuery};
use crate::error::{DriverError, DriverResult};
use crate::kind::MemKind;

/// An in-memory storage driver.
///
/// This driver keeps the whole store in one byte buffer and is suitable
/// for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral stores that don't need persistence
///
/// All [`MemKind`] categories share the buffer; the allocation extent is
/// still tracked per kind. The physical extent reported by
/// [`Driver::eof`] is the buffer length.
///
/// # Example
///
/// ```rust
/// use strata_driver::{Addr, Driver, MemKind, MemoryDriver};
///
/// let mut driver = MemoryDriver::new();
/// driver.write(MemKind::Raw, Addr::ZERO, b"test data").unwrap();
/// assert_eq!(driver.data().len(), 9);
/// ```
#[derive(Debug, Default)]
pub struct MemoryDriver {
    data: Vec<u8>,
    eoa: HashMap<MemKind, u64>,
}

impl MemoryDriver {
    /// Creates a new empty in-memory driver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an in-memory driver over pre-existing bytes.
    ///
    /// Useful for testing open paths against a prepared store image.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data,
            eoa: HashMap::new(),
        }
    }

    /// Returns the store image.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl Driver for MemoryDriver {
    fn kind(&self) -> DriverKind {
        DriverKind::Memory
    }

    fn read(&self, _kind: MemKind, addr: Addr, out: &mut [u8]) -> DriverResult<()> {
        let offset = addr.as_u64();
        offset
            .checked_add(out.len() as u64)
            .ok_or(DriverError::RangeOverflow {
                offset,
                len: out.len(),
            })?;

        let size = self.data.len();
        let offset = offset as usize;
        let avail = if offset < size {
            (size - offset).min(out.len())
        } else {
            0
        };

        if avail > 0 {
            out[..avail].copy_from_slice(&self.data[offset..offset + avail]);
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

        // Gaps between the old extent and the write target read back as zeros.
        if end as usize > self.data.len() {
            self.data.resize(end as usize, 0);
        }
        self.data[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }

    fn eoa(&self, kind: MemKind) -> Option<Addr> {
        Some(Addr::new(self.eoa.get(&kind).copied().unwrap_or(0)))
    }

    fn set_eoa(&mut self, kind: MemKind, addr: Addr) -> DriverResult<()> {
        self.eoa.insert(kind, addr.as_u64());
        Ok(())
    }

    fn eof(&self, _kind: MemKind) -> ExtentQuery {
        ExtentQuery::Known(Addr::new(self.data.len() as u64))
    }
}
