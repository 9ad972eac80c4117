//! Domain ports for the hexagonal boundary.
//!
//! Inbound adapters depend on these traits rather than on a concrete store,
//! so handler tests can run against any implementation.

mod macros;
pub(crate) use macros::define_port_error;

mod complaint_store;

pub use complaint_store::{ComplaintStore, StoreError};
