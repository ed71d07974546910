//! Storage driver trait definition.

use crate::addr::Addr;
use crate::capability::{DriverKind, FeatureFlags};
use crate::error::DriverResult;
use crate::kind::MemKind;

/// Outcome of a driver's optional physical-extent query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentQuery {
    /// The driver tracks a physical extent and reports it here.
    Known(Addr),
    /// The driver tracks a physical extent but could not determine it.
    Unavailable,
    /// The driver does not implement the physical-extent query at all.
    ///
    /// The dispatch layer substitutes the store's configured address
    /// ceiling in this case.
    Unsupported,
}

/// A low-level storage driver for Strata.
///
/// Drivers are **opaque byte stores** addressed by absolute offsets. They
/// perform I/O and keep the authoritative end-of-allocation (eoa) per
/// [`MemKind`]; all file-format interpretation, relative addressing, and
/// bounds enforcement happens in the dispatch layer above.
///
/// # Invariants
///
/// - `read` returns exactly the bytes previously written at that offset
/// - `write` may grow the physical extent; it never shrinks it
/// - `eoa`/`set_eoa` round-trip: the last value set is the value reported
/// - Drivers must be `Send + Sync` for concurrent access
///
/// # Capability Set
///
/// `read`, `write`, `eoa`, and `set_eoa` are mandatory. [`Driver::eof`]
/// and [`Driver::query`] have default implementations that report the
/// capability as absent; a driver family that tracks a physical extent or
/// advertises feature flags overrides them.
///
/// # Implementors
///
/// - [`super::MemoryDriver`] - For testing and ephemeral stores
/// - [`super::FileDriver`] - For persistent stores
pub trait Driver: Send + Sync {
    /// Returns which driver family this instance belongs to.
    fn kind(&self) -> DriverKind;

    /// Reads `out.len()` bytes starting at the absolute offset `addr`.
    ///
    /// Bytes past the physical extent read back as zeros. The dispatch
    /// layer has already checked the range against the allocation extent
    /// wherever the access mode requires it, so a short physical read is
    /// not an error here.
    ///
    /// # Errors
    ///
    /// Returns an error if the range does not fit in the address space or
    /// an I/O error occurs.
    fn read(&self, kind: MemKind, addr: Addr, out: &mut [u8]) -> DriverResult<()>;

    /// Writes `data` starting at the absolute offset `addr`.
    ///
    /// The physical extent grows as needed; any gap between the previous
    /// extent and `addr` reads back as zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if the range does not fit in the address space or
    /// an I/O error occurs.
    fn write(&mut self, kind: MemKind, addr: Addr, data: &[u8]) -> DriverResult<()>;

    /// Returns the absolute end-of-allocation for `kind`.
    ///
    /// `None` means the driver has no defined allocation extent for this
    /// kind; the dispatch layer treats that as a failure to initialize.
    fn eoa(&self, kind: MemKind) -> Option<Addr>;

    /// Sets the absolute end-of-allocation for `kind`.
    ///
    /// Shrinking the extent is permitted; the driver's extent bookkeeping
    /// is updated atomically with respect to the call.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver cannot record the new extent.
    fn set_eoa(&mut self, kind: MemKind, addr: Addr) -> DriverResult<()>;

    /// Queries the absolute physical extent (end-of-file) for `kind`.
    ///
    /// Optional. The default implementation reports the query as
    /// unsupported.
    fn eof(&self, _kind: MemKind) -> ExtentQuery {
        ExtentQuery::Unsupported
    }

    /// Returns the feature flags of this driver family, if it implements
    /// the feature query.
    ///
    /// Optional. The default implementation reports no query capability,
    /// which callers interpret as an empty flag set.
    fn query(&self) -> Option<FeatureFlags> {
        None
    }
}
