//! # Strata Store
//!
//! Addressing and driver dispatch layer for Strata.
//!
//! This crate sits between the engine's logical object space and the
//! pluggable storage drivers of [`strata_driver`]. It has three jobs:
//!
//! - translate logical, driver-agnostic **relative** addresses into
//!   driver-specific **absolute** addresses (the store's logical origin
//!   may sit past an opaque user block of unknown size)
//! - dispatch bounds-checked read/write and extent queries to the active
//!   driver through its capability set
//! - locate the format signature inside an arbitrary backing store at
//!   open time
//!
//! ## Consistency Model
//!
//! Calls are synchronous and blocking. A [`Store`] has exactly one
//! logical owner; extent-mutating operations must not be issued
//! concurrently. Under relaxed-consistency read access
//! ([`AccessFlags::RELAXED_READ`]) the locally known allocation extent
//! may lag a concurrent writer's append-only growth, so reads are not
//! bound-checked against it; writes always are.
//!
//! ## Example
//!
//! ```rust
//! use strata_driver::{Addr, MemKind, MemoryDriver};
//! use strata_store::{locate_signature, Store, StoreOptions, SIGNATURE};
//!
//! let driver = MemoryDriver::with_data(SIGNATURE.to_vec());
//! let mut store = Store::new(Box::new(driver), StoreOptions::default());
//!
//! assert_eq!(locate_signature(&mut store).unwrap(), Some(Addr::ZERO));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod addr;
mod config;
mod error;
mod signature;
mod store;
mod tick;

pub use config::{AccessFlags, StoreOptions};
pub use error::{StoreError, StoreResult};
pub use signature::{locate_signature, SIGNATURE, SIGNATURE_LEN};
pub use store::Store;
pub use tick::{NoopTickHooks, TickHooks};
