//! # Strata Driver
//!
//! Storage driver trait and implementations for Strata.
//!
//! This crate defines the lowest-level abstraction of the Strata engine:
//! a [`Driver`] is an addressable byte store that performs I/O on behalf
//! of the engine and keeps the authoritative allocation extent for each
//! address-space category. Drivers work exclusively in **absolute**
//! addresses; the dispatch layer above translates the engine's relative
//! addresses before calling in.
//!
//! ## Design Principles
//!
//! - Drivers are opaque byte stores and do not interpret the file format
//! - The capability set is closed: `read`, `write`, `eoa`, `set_eoa` are
//!   mandatory, `eof` and `query` are optional
//! - "Undefined address" is an absent value, never a numeric sentinel
//! - Must be `Send + Sync` for concurrent access
//!
//! ## Available Drivers
//!
//! - [`MemoryDriver`] - For testing and ephemeral stores
//! - [`FileDriver`] - For persistent stores using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use strata_driver::{Addr, Driver, MemKind, MemoryDriver};
//!
//! let mut driver = MemoryDriver::new();
//! driver.write(MemKind::Raw, Addr::ZERO, b"hello").unwrap();
//!
//! let mut buf = [0u8; 5];
//! driver.read(MemKind::Raw, Addr::ZERO, &mut buf).unwrap();
//! assert_eq!(&buf, b"hello");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod addr;
mod capability;
mod driver;
mod error;
mod file;
mod kind;
mod memory;

pub use addr::Addr;
pub use capability::{driver_query, DriverKind, FeatureFlags};
pub use driver::{Driver, ExtentQuery};
pub use error::{DriverError, DriverResult};
pub use file::FileDriver;
pub use kind::MemKind;
pub use memory::MemoryDriver;
