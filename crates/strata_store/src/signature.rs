//! Format signature search.
//!
//! A Strata store opens with the format signature at relative address 0,
//! or, when an opaque user block precedes the format, at the first
//! power-of-two offset >= 512 past it. The user block's size is unknown
//! at open time, so the signature is found by probing that schedule.

use strata_driver::{Addr, MemKind};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Length of the format signature in bytes.
pub const SIGNATURE_LEN: usize = 8;

/// The format signature.
///
/// The non-ASCII lead byte catches 7-bit transmission damage and the
/// CR/LF pair catches line-ending translation, in the manner of the PNG
/// magic.
pub const SIGNATURE: [u8; SIGNATURE_LEN] = [0x89, b'S', b'T', b'A', b'\r', b'\n', 0x1a, b'\n'];

/// Searches an open store for the format signature.
///
/// Probes relative address 0, then powers of two starting at 512, up to
/// the first power of two past the store's known extents. Each probe
/// temporarily extends the superblock allocation extent so the
/// bounds-checked read is permitted; the original extent is restored on
/// every exit path, so a search never leaks an inflated extent into the
/// store's persisted state.
///
/// Returns `Ok(Some(addr))` with the signature's address, or `Ok(None)`
/// if no probe matched. The caller decides whether "not found" means an
/// invalid store or one still to be created.
///
/// # Errors
///
/// Returns [`StoreError::SignatureSearch`] wrapping the underlying
/// failure if the extents cannot be read or a probe's I/O fails.
pub fn locate_signature(store: &mut Store) -> StoreResult<Option<Addr>> {
    let eof = store.eof(MemKind::Superblock).map_err(seal)?;
    let eoa = store.eoa(MemKind::Superblock).map_err(seal)?;

    // Least n such that 2^n is larger than every byte the store may
    // hold, clamped so the scan always covers the 512-byte boundary.
    let upper = eof.max(eoa);
    let maxpow = bit_width(upper.as_u64()).max(9);

    let mut found = None;
    let mut failure = None;
    let mut buf = [0u8; SIGNATURE_LEN];

    for n in 8..maxpow {
        // Address 0 first, then exact powers of two from 512 up.
        let probe = if n == 8 {
            Addr::ZERO
        } else {
            Addr::new(1u64 << n)
        };
        debug!(n, probe = probe.as_u64(), "probing for format signature");

        // probe is at most 2^63, so this cannot wrap.
        let extended = Addr::new(probe.as_u64() + SIGNATURE_LEN as u64);
        if let Err(err) = store.set_eoa(MemKind::Superblock, extended) {
            failure = Some(err);
            break;
        }

        match store.read(MemKind::Superblock, probe, &mut buf) {
            Ok(()) if buf == SIGNATURE => {
                found = Some(probe);
                break;
            }
            Ok(()) => {}
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    // The probes inflated the extent; put the original value back before
    // reporting anything, including failure.
    let restored = store.set_eoa(MemKind::Superblock, eoa);
    if let Some(err) = failure {
        return Err(seal(err));
    }
    restored.map_err(seal)?;

    Ok(found)
}

fn seal(err: StoreError) -> StoreError {
    StoreError::SignatureSearch(Box::new(err))
}

/// Number of bits needed to represent `value`; the least n with 2^n > value.
fn bit_width(value: u64) -> u32 {
    64 - value.leading_zeros()
}
