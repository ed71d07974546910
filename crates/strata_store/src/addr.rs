//! Relative/absolute address translation.
//!
//! Object addresses inside a Strata store are relative to the store's
//! logical origin, so that an opaque user block of any size can precede
//! the format without shifting every stored address. Drivers work in
//! absolute addresses. These two functions convert at that boundary and
//! are exact inverses whenever the addition does not wrap.

use strata_driver::Addr;

use crate::error::{StoreError, StoreResult};

/// Converts a relative address to an absolute one.
///
/// # Errors
///
/// Returns [`StoreError::AddressWrap`] if `rel + base` does not fit in
/// 64 bits.
pub fn to_absolute(base: Addr, rel: Addr) -> StoreResult<Addr> {
    rel.checked_add(base.as_u64())
        .ok_or(StoreError::AddressWrap {
            rel: rel.as_u64(),
            base: base.as_u64(),
        })
}

/// Converts an absolute address back to a relative one.
///
/// An absolute address below the store's base offset indicates an
/// internal consistency violation, not bad input, so it is checked by
/// assertion rather than reported as a recoverable error.
#[must_use]
pub fn to_relative(base: Addr, abs: Addr) -> Addr {
    debug_assert!(
        abs >= base,
        "absolute address {abs} below store base {base}"
    );
    Addr::new(abs.as_u64().wrapping_sub(base.as_u64()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn translation_is_exact() {
        let base = Addr::new(512);
        let abs = to_absolute(base, Addr::new(96)).unwrap();
        assert_eq!(abs, Addr::new(608));
        assert_eq!(to_relative(base, abs), Addr::new(96));
    }

    #[test]
    fn translation_with_zero_base_is_identity() {
        let abs = to_absolute(Addr::ZERO, Addr::new(2048)).unwrap();
        assert_eq!(abs, Addr::new(2048));
    }

    #[test]
    fn translation_detects_wrap() {
        let result = to_absolute(Addr::new(2), Addr::new(u64::MAX - 1));
        assert!(matches!(result, Err(StoreError::AddressWrap { .. })));
    }

    proptest! {
        #[test]
        fn translation_round_trips_or_reports_wrap(base in any::<u64>(), rel in any::<u64>()) {
            let base = Addr::new(base);
            let rel = Addr::new(rel);
            match rel.as_u64().checked_add(base.as_u64()) {
                Some(expected) => {
                    let abs = to_absolute(base, rel).unwrap();
                    prop_assert_eq!(abs.as_u64(), expected);
                    prop_assert_eq!(to_relative(base, abs), rel);
                }
                None => {
                    prop_assert!(to_absolute(base, rel).is_err());
                }
            }
        }
    }
}
