//! Complaint desk library: a small complaint-tracking service.
//!
//! Users register, receive a bearer secret and submit rated complaints. A
//! single administrator secret can list and resolve every complaint. All
//! state lives in one in-memory store shared by the request handlers.
//!
//! - [`domain`]: validated types, access rules and the store port.
//! - [`outbound`]: the in-memory store adapter.
//! - [`inbound`]: Actix HTTP handlers.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
