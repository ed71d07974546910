//! Open store handle and driver dispatch.

use strata_driver::{Addr, Driver, DriverKind, ExtentQuery, MemKind};
use tracing::{debug, trace};

use crate::addr::{to_absolute, to_relative};
use crate::config::{AccessFlags, StoreOptions};
use crate::error::{StoreError, StoreResult};
use crate::tick::{NoopTickHooks, TickHooks};

/// An open store bound to a driver instance.
///
/// All object I/O goes through this handle: it enforces bounds against
/// the driver's authoritative allocation extent, translates the engine's
/// relative addresses to the driver's absolute ones, and dispatches to
/// the driver's capability set.
///
/// A store has exactly one logical owner; extent-mutating operations must
/// not be called concurrently. See the crate docs for the consistency
/// model.
pub struct Store {
    driver: Box<dyn Driver>,
    base_addr: Addr,
    max_addr: Addr,
    flags: AccessFlags,
    hooks: Box<dyn TickHooks>,
}

impl Store {
    /// Attaches a store handle to a driver.
    ///
    /// Called by the open routine after it has selected the driver
    /// variant and determined the base offset and address ceiling.
    #[must_use]
    pub fn new(driver: Box<dyn Driver>, options: StoreOptions) -> Self {
        Self {
            driver,
            base_addr: options.base_addr,
            max_addr: options.max_addr,
            flags: options.flags,
            hooks: Box::new(NoopTickHooks),
        }
    }

    /// Replaces the consistency-tick hooks.
    ///
    /// The default hooks are no-ops; a coordination protocol substitutes
    /// its own strategy here without changing any dispatch call site.
    #[must_use]
    pub fn with_tick_hooks(mut self, hooks: Box<dyn TickHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Returns the driver family this store is bound to.
    #[must_use]
    pub fn driver_kind(&self) -> DriverKind {
        self.driver.kind()
    }

    /// Returns the absolute offset at which the logical address space
    /// begins.
    #[must_use]
    pub fn base_addr(&self) -> Addr {
        self.base_addr
    }

    /// Returns the upper bound on relative addresses for this store.
    #[must_use]
    pub fn max_addr(&self) -> Addr {
        self.max_addr
    }

    /// Returns the access-mode flags this store was opened with.
    #[must_use]
    pub fn access_flags(&self) -> AccessFlags {
        self.flags
    }

    /// Reads `out.len()` bytes at the relative address `addr`.
    ///
    /// Unless the store was opened for relaxed-consistency reading, the
    /// range is checked against the driver's current allocation extent
    /// before dispatch. Under relaxed reading the locally known extent
    /// may lag a concurrent writer's growth, so the check is skipped and
    /// the driver's physical bounds are trusted instead.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Overflow`] if the range extends past the
    /// extent, [`StoreError::ExtentUnavailable`] if the driver cannot
    /// report the extent, or [`StoreError::Read`] if the driver's read
    /// fails.
    pub fn read(&self, kind: MemKind, addr: Addr, out: &mut [u8]) -> StoreResult<()> {
        // A zero-length transfer may still be one participant's share of
        // a collective operation, so it is only elided locally when
        // collective I/O is compiled out.
        #[cfg(not(feature = "collective"))]
        if out.is_empty() {
            return Ok(());
        }

        if !self.flags.contains(AccessFlags::RELAXED_READ) {
            self.check_extent(kind, addr, out.len() as u64)?;
        }

        let abs = to_absolute(self.base_addr, addr)?;
        trace!(kind = %kind, addr = addr.as_u64(), len = out.len(), "dispatch read");
        self.driver.read(kind, abs, out).map_err(StoreError::Read)
    }

    /// Writes `data` at the relative address `addr`.
    ///
    /// The range is always checked against the driver's current
    /// allocation extent; there is no relaxed-consistency bypass for
    /// writes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Overflow`] if the range extends past the
    /// extent, [`StoreError::ExtentUnavailable`] if the driver cannot
    /// report the extent, or [`StoreError::Write`] if the driver's write
    /// fails.
    pub fn write(&mut self, kind: MemKind, addr: Addr, data: &[u8]) -> StoreResult<()> {
        #[cfg(not(feature = "collective"))]
        if data.is_empty() {
            return Ok(());
        }

        self.check_extent(kind, addr, data.len() as u64)?;

        let abs = to_absolute(self.base_addr, addr)?;
        trace!(kind = %kind, addr = addr.as_u64(), len = data.len(), "dispatch write");
        self.driver.write(kind, abs, data).map_err(StoreError::Write)
    }

    /// Returns the allocation extent for `kind` as a relative address.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ExtentUnavailable`] if the driver has no
    /// defined extent for this kind.
    pub fn eoa(&self, kind: MemKind) -> StoreResult<Addr> {
        let abs = self
            .driver
            .eoa(kind)
            .ok_or(StoreError::ExtentUnavailable { kind })?;
        Ok(to_relative(self.base_addr, abs))
    }

    /// Sets the allocation extent for `kind` from a relative address.
    ///
    /// Supplying an extent above the store's address ceiling is a
    /// programming error, checked by assertion. On failure the driver's
    /// extent bookkeeping is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ExtentUnavailable`] if the driver rejects
    /// the new extent.
    pub fn set_eoa(&mut self, kind: MemKind, addr: Addr) -> StoreResult<()> {
        debug_assert!(
            addr <= self.max_addr,
            "eoa {addr} above the store's address ceiling {}",
            self.max_addr
        );

        let abs = to_absolute(self.base_addr, addr)?;
        if let Err(err) = self.driver.set_eoa(kind, abs) {
            debug!(kind = %kind, addr = addr.as_u64(), %err, "driver rejected eoa");
            return Err(StoreError::ExtentUnavailable { kind });
        }
        Ok(())
    }

    /// Returns the physical extent for `kind` as a relative address.
    ///
    /// Drivers that do not implement the physical-extent query fall back
    /// to the store's configured address ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PhysicalExtent`] if the driver implements
    /// the query but it fails.
    pub fn eof(&self, kind: MemKind) -> StoreResult<Addr> {
        let abs = match self.driver.eof(kind) {
            ExtentQuery::Known(addr) => addr,
            ExtentQuery::Unavailable => return Err(StoreError::PhysicalExtent { kind }),
            ExtentQuery::Unsupported => self.max_addr,
        };
        Ok(to_relative(self.base_addr, abs))
    }

    /// Signals that a writer's coordination tick has elapsed.
    ///
    /// Currently delegates to the configured [`TickHooks`], whose default
    /// is a successful no-op.
    pub fn writer_end_of_tick(&mut self) -> StoreResult<()> {
        self.hooks.writer_end_of_tick()
    }

    /// Signals that a reader's coordination tick has elapsed.
    ///
    /// Currently delegates to the configured [`TickHooks`], whose default
    /// is a successful no-op.
    pub fn reader_end_of_tick(&mut self) -> StoreResult<()> {
        self.hooks.reader_end_of_tick()
    }

    /// Checks `addr..addr + size` against the driver's current extent.
    ///
    /// The check is synchronous, not a cached snapshot: it always sees
    /// the most recent extent set by this process.
    fn check_extent(&self, kind: MemKind, addr: Addr, size: u64) -> StoreResult<()> {
        let eoa = self
            .driver
            .eoa(kind)
            .ok_or(StoreError::ExtentUnavailable { kind })?;

        let abs = to_absolute(self.base_addr, addr)?;
        let end = abs.checked_add(size).ok_or(StoreError::Overflow {
            addr: abs.as_u64(),
            size,
            eoa: eoa.as_u64(),
        })?;

        if end > eoa {
            return Err(StoreError::Overflow {
                addr: abs.as_u64(),
                size,
                eoa: eoa.as_u64(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_driver::{DriverResult, MemoryDriver};

    fn open_memory(data: &[u8], options: StoreOptions) -> Store {
        Store::new(Box::new(MemoryDriver::with_data(data.to_vec())), options)
    }

    /// A driver with no defined allocation extent and a failing physical
    /// extent, for exercising the dispatch failure paths.
    struct UndefinedExtents;

    impl Driver for UndefinedExtents {
        fn kind(&self) -> DriverKind {
            DriverKind::Memory
        }

        fn read(&self, _kind: MemKind, _addr: Addr, _out: &mut [u8]) -> DriverResult<()> {
            Ok(())
        }

        fn write(&mut self, _kind: MemKind, _addr: Addr, _data: &[u8]) -> DriverResult<()> {
            Ok(())
        }

        fn eoa(&self, _kind: MemKind) -> Option<Addr> {
            None
        }

        fn set_eoa(&mut self, _kind: MemKind, _addr: Addr) -> DriverResult<()> {
            Ok(())
        }

        fn eof(&self, _kind: MemKind) -> ExtentQuery {
            ExtentQuery::Unavailable
        }
    }

    /// A driver that leaves `eof` unimplemented, so the dispatch layer
    /// falls back to the configured address ceiling.
    struct NoEofQuery;

    impl Driver for NoEofQuery {
        fn kind(&self) -> DriverKind {
            DriverKind::Memory
        }

        fn read(&self, _kind: MemKind, _addr: Addr, _out: &mut [u8]) -> DriverResult<()> {
            Ok(())
        }

        fn write(&mut self, _kind: MemKind, _addr: Addr, _data: &[u8]) -> DriverResult<()> {
            Ok(())
        }

        fn eoa(&self, _kind: MemKind) -> Option<Addr> {
            Some(Addr::ZERO)
        }

        fn set_eoa(&mut self, _kind: MemKind, _addr: Addr) -> DriverResult<()> {
            Ok(())
        }
    }

    #[test]
    fn read_at_exact_extent_boundary() {
        let mut store = open_memory(b"0123456789abcdef", StoreOptions::default());
        store.set_eoa(MemKind::Raw, Addr::new(16)).unwrap();

        // addr + size exactly equal to the extent succeeds.
        let mut buf = [0u8; 8];
        store.read(MemKind::Raw, Addr::new(8), &mut buf).unwrap();
        assert_eq!(&buf, b"89abcdef");

        // One byte beyond fails.
        let mut buf = [0u8; 9];
        let result = store.read(MemKind::Raw, Addr::new(8), &mut buf);
        assert!(matches!(result, Err(StoreError::Overflow { .. })));
    }

    #[test]
    fn write_at_exact_extent_boundary() {
        let mut store = open_memory(b"", StoreOptions::default());
        store.set_eoa(MemKind::Raw, Addr::new(8)).unwrap();

        store.write(MemKind::Raw, Addr::new(4), b"data").unwrap();

        let result = store.write(MemKind::Raw, Addr::new(5), b"data");
        assert!(matches!(result, Err(StoreError::Overflow { .. })));
    }

    #[test]
    fn write_has_no_relaxed_bypass() {
        let options = StoreOptions::new().flags(AccessFlags::RELAXED_READ);
        let mut store = open_memory(b"", options);
        store.set_eoa(MemKind::Raw, Addr::new(2)).unwrap();

        // Reads past the extent are allowed in relaxed mode...
        let mut buf = [0u8; 4];
        store.read(MemKind::Raw, Addr::ZERO, &mut buf).unwrap();

        // ...but writes are still bound-checked.
        let result = store.write(MemKind::Raw, Addr::ZERO, b"data");
        assert!(matches!(result, Err(StoreError::Overflow { .. })));
    }

    #[test]
    fn relaxed_read_trusts_physical_growth() {
        // The physical store has grown past the locally known extent, as
        // a concurrent writer would cause.
        let options = StoreOptions::new().flags(AccessFlags::RELAXED_READ);
        let mut store = open_memory(b"fresh bytes appended", options);
        store.set_eoa(MemKind::Raw, Addr::new(5)).unwrap();

        let mut buf = [0u8; 14];
        store.read(MemKind::Raw, Addr::new(6), &mut buf).unwrap();
        assert_eq!(&buf, b"bytes appended");
    }

    #[test]
    fn strict_read_rejects_range_past_stale_extent() {
        let mut store = open_memory(b"fresh bytes appended", StoreOptions::default());
        store.set_eoa(MemKind::Raw, Addr::new(5)).unwrap();

        let mut buf = [0u8; 14];
        let result = store.read(MemKind::Raw, Addr::new(6), &mut buf);
        assert!(matches!(result, Err(StoreError::Overflow { .. })));
    }

    #[cfg(not(feature = "collective"))]
    #[test]
    fn zero_length_transfers_are_local_noops() {
        let mut store = open_memory(b"", StoreOptions::default());

        // Extent is zero and the address is far past it; the transfers
        // still succeed because they never reach the bounds check.
        let mut buf = [0u8; 0];
        store.read(MemKind::Raw, Addr::new(1 << 40), &mut buf).unwrap();
        store.write(MemKind::Raw, Addr::new(1 << 40), &[]).unwrap();
    }

    #[cfg(feature = "collective")]
    #[test]
    fn zero_length_transfers_are_forwarded() {
        let mut store = open_memory(b"", StoreOptions::default());

        // With collective I/O enabled the transfers are not elided, so the
        // bounds check sees the out-of-extent address and rejects both.
        let mut buf = [0u8; 0];
        let result = store.read(MemKind::Raw, Addr::new(1 << 40), &mut buf);
        assert!(matches!(result, Err(StoreError::Overflow { .. })));

        let result = store.write(MemKind::Raw, Addr::new(1 << 40), &[]);
        assert!(matches!(result, Err(StoreError::Overflow { .. })));

        // An in-extent zero-length write reaches the driver and must not
        // move the physical extent.
        store.set_eoa(MemKind::Raw, Addr::new(64)).unwrap();
        store.write(MemKind::Raw, Addr::new(64), &[]).unwrap();
        assert_eq!(store.eof(MemKind::Raw).unwrap(), Addr::ZERO);
    }

    #[test]
    fn base_addr_offsets_every_dispatch() {
        let driver = MemoryDriver::with_data(b"userblockpayload".to_vec());
        let options = StoreOptions::new().base_addr(Addr::new(9));
        let mut store = Store::new(Box::new(driver), options);

        // Relative extent 7 = absolute 16.
        store.set_eoa(MemKind::Raw, Addr::new(7)).unwrap();
        assert_eq!(store.eoa(MemKind::Raw).unwrap(), Addr::new(7));

        let mut buf = [0u8; 7];
        store.read(MemKind::Raw, Addr::ZERO, &mut buf).unwrap();
        assert_eq!(&buf, b"payload");

        // The physical extent is also reported relative to the base.
        assert_eq!(store.eof(MemKind::Raw).unwrap(), Addr::new(7));
    }

    #[test]
    fn undefined_extent_is_reported() {
        let store = Store::new(Box::new(UndefinedExtents), StoreOptions::default());

        let result = store.eoa(MemKind::Superblock);
        assert!(matches!(result, Err(StoreError::ExtentUnavailable { .. })));

        let mut buf = [0u8; 4];
        let result = store.read(MemKind::Superblock, Addr::ZERO, &mut buf);
        assert!(matches!(result, Err(StoreError::ExtentUnavailable { .. })));

        let result = store.eof(MemKind::Superblock);
        assert!(matches!(result, Err(StoreError::PhysicalExtent { .. })));
    }

    #[test]
    fn missing_eof_query_falls_back_to_max_addr() {
        let options = StoreOptions::new().max_addr(Addr::new(1 << 20));
        let store = Store::new(Box::new(NoEofQuery), options);
        assert_eq!(store.eof(MemKind::Raw).unwrap(), Addr::new(1 << 20));
    }

    #[test]
    fn address_wrap_is_detected_before_dispatch() {
        let options = StoreOptions::new()
            .base_addr(Addr::new(u64::MAX - 4))
            .flags(AccessFlags::RELAXED_READ);
        let store = open_memory(b"", options);

        let mut buf = [0u8; 1];
        let result = store.read(MemKind::Raw, Addr::new(8), &mut buf);
        assert!(matches!(result, Err(StoreError::AddressWrap { .. })));
    }

    #[test]
    fn tick_hooks_default_to_noops() {
        let mut store = open_memory(b"", StoreOptions::default());
        assert!(store.writer_end_of_tick().is_ok());
        assert!(store.reader_end_of_tick().is_ok());
    }

    #[test]
    fn tick_hooks_can_be_substituted() {
        use std::sync::atomic::{AtomicU32, Ordering};
        use std::sync::Arc;

        struct Recording(Arc<AtomicU32>);

        impl crate::tick::TickHooks for Recording {
            fn writer_end_of_tick(&mut self) -> StoreResult<()> {
                self.0.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
        }

        let ticks = Arc::new(AtomicU32::new(0));
        let mut store = open_memory(b"", StoreOptions::default())
            .with_tick_hooks(Box::new(Recording(Arc::clone(&ticks))));

        store.writer_end_of_tick().unwrap();
        store.writer_end_of_tick().unwrap();
        assert_eq!(ticks.load(Ordering::Relaxed), 2);
    }
}
