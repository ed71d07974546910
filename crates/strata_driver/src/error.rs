//! Error types for driver operations.

use std::io;
use thiserror::Error;

/// Result type for driver operations.
pub type DriverResult<T> = Result<T, DriverError>;

/// Errors that can occur inside a storage driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A transfer range did not fit in the driver's address space.
    #[error("transfer beyond addressable range: offset {offset}, len {len}")]
    RangeOverflow {
        /// The requested absolute offset.
        offset: u64,
        /// The requested transfer length.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_offsets() {
        let err = DriverError::RangeOverflow {
            offset: u64::MAX,
            len: 8,
        };
        assert_eq!(
            err.to_string(),
            format!("transfer beyond addressable range: offset {}, len 8", u64::MAX)
        );
    }
}
