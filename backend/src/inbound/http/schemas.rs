//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their
//! serialised shape and register under the domain type's name, so the
//! document stays accurate without coupling the domain to utoipa.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The secret code is missing or not recognised.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller is known but may not perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested complaint or user does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "rating must be between 1 and 5")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level context, e.g. `{"field":"rating","code":"out_of_range"}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Complaint`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Complaint)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ComplaintSchema {
    /// Stable complaint identifier.
    #[schema(example = "fedcba9876543210fedcba9876543210")]
    id: String,
    /// Complaint headline.
    #[schema(example = "Late delivery")]
    title: String,
    /// Free-text description; may be empty.
    summary: String,
    /// Rating from 1 to 5.
    #[schema(minimum = 1, maximum = 5, example = 2)]
    rating: u8,
    /// Whether an administrator has resolved the complaint.
    resolved: bool,
    /// Identifier of the submitting user.
    #[schema(example = "0123456789abcdef0123456789abcdef")]
    user_id: String,
    /// Submission time in RFC 3339.
    #[schema(value_type = String, format = DateTime)]
    date: String,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(example = "0123456789abcdef0123456789abcdef")]
    id: String,
    /// Bearer secret; send it as `X-Secret-Code`.
    #[schema(example = "feedfacecafebeef")]
    secret_code: String,
    /// Display name given at registration.
    #[schema(example = "Alice")]
    name: String,
    /// Unique contact email.
    #[schema(example = "alice@example.com")]
    email: String,
    /// Complaints submitted by this user, oldest first.
    complaints: Vec<ComplaintSchema>,
}
