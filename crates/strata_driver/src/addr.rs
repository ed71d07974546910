//! Store address type.

use std::fmt;

/// A 64-bit byte offset within a store's address space.
///
/// An `Addr` is either relative to a store's logical origin or absolute
/// within the backing physical store, depending on which side of the
/// dispatch layer it travels on. The type itself does not distinguish the
/// two; the dispatch layer converts at its boundary.
///
/// An *undefined* address is expressed as `Option<Addr>` by the APIs that
/// need one. There is no in-band sentinel value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(u64);

impl Addr {
    /// The zero address.
    pub const ZERO: Self = Self(0);

    /// Creates an address from a raw offset.
    #[must_use]
    pub const fn new(offset: u64) -> Self {
        Self(offset)
    }

    /// Returns the raw offset value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Advances the address by `n` bytes, detecting wraparound.
    ///
    /// Returns `None` if the result would not fit in 64 bits.
    #[must_use]
    pub const fn checked_add(self, n: u64) -> Option<Self> {
        match self.0.checked_add(n) {
            Some(offset) => Some(Self(offset)),
            None => None,
        }
    }

    /// Computes `self - other`, detecting underflow.
    ///
    /// Returns `None` if `other` is past `self`.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(offset) => Some(Self(offset)),
            None => None,
        }
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Addr {
    fn from(offset: u64) -> Self {
        Self(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addr_ordering_follows_offset() {
        assert!(Addr::ZERO < Addr::new(1));
        assert_eq!(Addr::new(512).max(Addr::new(8)), Addr::new(512));
    }

    #[test]
    fn addr_checked_add_detects_wrap() {
        assert_eq!(Addr::new(8).checked_add(4), Some(Addr::new(12)));
        assert_eq!(Addr::new(u64::MAX).checked_add(1), None);
    }

    #[test]
    fn addr_checked_sub_detects_underflow() {
        assert_eq!(Addr::new(12).checked_sub(Addr::new(8)), Some(Addr::new(4)));
        assert_eq!(Addr::ZERO.checked_sub(Addr::new(1)), None);
    }
}
