//! Outbound adapters implementing domain ports.
//!
//! - **memory**: the process-local complaint store.
//!
//! Adapters translate between domain types and their backing representation
//! and contain no request handling.

pub mod memory;
