//! Store access configuration.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use strata_driver::Addr;

/// Access-mode flags for an open store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessFlags(u32);

impl AccessFlags {
    /// Read access under relaxed-consistency mode.
    ///
    /// In this single-writer/multiple-reader mode, the locally known
    /// allocation extent may legitimately lag actual file growth, so the
    /// dispatch layer does not bound-check reads against it.
    pub const RELAXED_READ: Self = Self(1 << 0);

    /// Creates an empty flag set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for AccessFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// Configuration for attaching a store to a driver.
///
/// Filled in by the open routine, which also selects the driver variant.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Absolute offset at which the store's logical address space begins.
    ///
    /// Non-zero when an opaque user block precedes the format.
    pub base_addr: Addr,

    /// Upper bound on any relative address ever valid for this store.
    pub max_addr: Addr,

    /// Access-mode flags.
    pub flags: AccessFlags,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            base_addr: Addr::ZERO,
            max_addr: Addr::new(u64::MAX),
            flags: AccessFlags::empty(),
        }
    }
}

impl StoreOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base offset of the logical address space.
    #[must_use]
    pub const fn base_addr(mut self, addr: Addr) -> Self {
        self.base_addr = addr;
        self
    }

    /// Sets the upper bound on relative addresses.
    #[must_use]
    pub const fn max_addr(mut self, addr: Addr) -> Self {
        self.max_addr = addr;
        self
    }

    /// Sets the access-mode flags.
    #[must_use]
    pub const fn flags(mut self, flags: AccessFlags) -> Self {
        self.flags = flags;
        self
    }
}
