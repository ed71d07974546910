//! Error types for store dispatch operations.

use strata_driver::{DriverError, MemKind};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the addressing and dispatch layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A relative address did not fit in the 64-bit address space once
    /// the store's base offset was applied.
    #[error("address overflow: relative address {rel} + base {base} wraps")]
    AddressWrap {
        /// The relative address supplied by the caller.
        rel: u64,
        /// The store's base offset.
        base: u64,
    },

    /// A transfer extended past the authoritative allocation extent.
    #[error("address overflow: addr {addr}, size {size}, eoa {eoa}")]
    Overflow {
        /// The absolute start address of the transfer.
        addr: u64,
        /// The transfer length in bytes.
        size: u64,
        /// The allocation extent the transfer was checked against.
        eoa: u64,
    },

    /// The driver could not report or update the allocation extent.
    #[error("allocation extent unavailable for {kind}")]
    ExtentUnavailable {
        /// The address-space category queried.
        kind: MemKind,
    },

    /// The driver's physical-extent query failed.
    #[error("physical extent unavailable for {kind}")]
    PhysicalExtent {
        /// The address-space category queried.
        kind: MemKind,
    },

    /// The driver's read operation failed.
    #[error("driver read failed: {0}")]
    Read(#[source] DriverError),

    /// The driver's write operation failed.
    #[error("driver write failed: {0}")]
    Write(#[source] DriverError),

    /// An I/O failure occurred while probing for the format signature.
    ///
    /// Distinct from the signature simply not being present, which is a
    /// normal (non-error) search outcome.
    #[error("signature search failed: {0}")]
    SignatureSearch(#[source] Box<StoreError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_message_carries_bounds() {
        let err = StoreError::Overflow {
            addr: 1024,
            size: 16,
            eoa: 1032,
        };
        assert_eq!(
            err.to_string(),
            "address overflow: addr 1024, size 16, eoa 1032"
        );
    }

    #[test]
    fn signature_search_wraps_the_cause() {
        let cause = StoreError::ExtentUnavailable {
            kind: MemKind::Superblock,
        };
        let err = StoreError::SignatureSearch(Box::new(cause));
        assert!(err.to_string().starts_with("signature search failed"));
    }
}
