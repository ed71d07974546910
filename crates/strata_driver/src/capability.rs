//! Driver feature flags and the no-handle capability query.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::file::FileDriver;

/// Feature flags advertised by a driver family.
///
/// Flags describe optimizations the engine may apply when talking to a
/// driver of that family; a driver that advertises none of them still
/// conforms, the engine just takes the conservative paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags(u32);

impl FeatureFlags {
    /// Metadata allocations may be aggregated into larger blocks.
    pub const AGGREGATE_METADATA: Self = Self(1 << 0);
    /// Metadata writes may be accumulated before reaching the driver.
    pub const ACCUMULATE_METADATA: Self = Self(1 << 1);
    /// Small raw-data reads may be widened into sieve buffers.
    pub const DATA_SIEVE: Self = Self(1 << 2);
    /// Small raw-data allocations may be aggregated.
    pub const AGGREGATE_SMALL_DATA: Self = Self(1 << 3);
    /// The driver tolerates relaxed-consistency (single-writer,
    /// multiple-reader) access.
    pub const RELAXED_CONSISTENCY: Self = Self(1 << 4);

    /// Creates an empty flag set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns the raw bit representation.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if no flags are set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combines two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl BitOr for FeatureFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for FeatureFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for FeatureFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// The closed set of driver families Strata ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    /// In-memory driver, for tests and ephemeral stores.
    Memory,
    /// Local-file driver using OS file APIs.
    File,
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverKind::Memory => "memory",
            DriverKind::File => "file",
        };
        f.write_str(name)
    }
}

/// Queries the feature flags of a driver family without an open store.
///
/// This is the capability query for callers that have chosen a driver but
/// not yet opened anything with it. A family that implements no feature
/// query reports an empty flag set; the call itself never fails.
#[must_use]
pub fn driver_query(kind: DriverKind) -> FeatureFlags {
    match kind {
        // The memory driver implements no feature query.
        DriverKind::Memory => FeatureFlags::empty(),
        DriverKind::File => FileDriver::FEATURES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_union_and_contains() {
        let flags = FeatureFlags::AGGREGATE_METADATA | FeatureFlags::DATA_SIEVE;
        assert!(flags.contains(FeatureFlags::AGGREGATE_METADATA));
        assert!(flags.contains(FeatureFlags::DATA_SIEVE));
        assert!(!flags.contains(FeatureFlags::RELAXED_CONSISTENCY));
    }

    #[test]
    fn empty_flags_contain_nothing_but_empty() {
        let flags = FeatureFlags::empty();
        assert!(flags.is_empty());
        assert!(flags.contains(FeatureFlags::empty()));
        assert!(!flags.contains(FeatureFlags::DATA_SIEVE));
    }

    #[test]
    fn query_without_a_store_never_fails() {
        // The memory family has no query operation: empty flags, not an error.
        assert!(driver_query(DriverKind::Memory).is_empty());

        let file_flags = driver_query(DriverKind::File);
        assert!(file_flags.contains(FeatureFlags::AGGREGATE_METADATA));
        assert!(file_flags.contains(FeatureFlags::RELAXED_CONSISTENCY));
    }
}
