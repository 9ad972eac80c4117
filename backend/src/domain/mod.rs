//! Domain primitives and aggregates.
//!
//! Purpose: Define strongly typed domain entities used by the API and the
//! complaint store. Types validate on construction and document their
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): registered user and their complaints.
//! - Complaint (alias to `complaint::Complaint`): a rated complaint.
//! - Caller (alias to `access::Caller`): who is asking, and what they may see.

pub mod access;
pub mod complaint;
pub mod error;
pub mod ports;
pub mod secret;
pub mod trace_id;
pub mod user;

pub use self::access::Caller;
pub use self::complaint::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintValidationError, RATING_MAX, RATING_MIN,
    Rating, Title,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::secret::EntropyError;
pub use self::trace_id::TraceId;
pub use self::user::{DisplayName, Email, SecretCode, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use complaint_desk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
