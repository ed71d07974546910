//! Consistency-tick coordination hooks.
//!
//! Under relaxed-consistency access, a sole writer and its readers will
//! eventually coordinate through periodic ticks, giving readers a
//! bounded-staleness view of the store's metadata without shared locking.
//! The protocol itself is not implemented yet; these hooks reserve its
//! call sites so they do not change when it lands.

use crate::error::StoreResult;

/// Strategy object notified when a coordination tick elapses.
///
/// Both hooks default to successful no-ops. A future coordination
/// implementation overrides them; call sites must keep treating the
/// default as always succeeding.
pub trait TickHooks: Send + Sync {
    /// Called when a process acting as sole writer completes a tick.
    fn writer_end_of_tick(&mut self) -> StoreResult<()> {
        Ok(())
    }

    /// Called when a process acting as reader completes a tick.
    fn reader_end_of_tick(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

/// The default hooks: every tick is a successful no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTickHooks;

impl TickHooks for NoopTickHooks {}
