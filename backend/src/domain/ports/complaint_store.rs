//! Driving port for user registration and complaint tracking.
//!
//! Every operation either fully succeeds or fails without side effects.
//! Implementations must serialise mutations so concurrent callers never
//! observe partial state.

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, DisplayName, Email, Error, SecretCode, User, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Failures reported by complaint store adapters.
    pub enum StoreError {
        /// Another user already registered this email.
        DuplicateEmail { email: String } => "email already registered: {email}",
        /// No user holds the presented secret.
        UnknownSecret => "secret code not recognised",
        /// The referenced user does not exist.
        UserNotFound { user_id: String } => "user not found: {user_id}",
        /// The referenced complaint does not exist.
        ComplaintNotFound { complaint_id: String } => "complaint not found: {complaint_id}",
        /// The store cannot serve requests (poisoned guard, exhausted id space).
        Unavailable { message: String } => "complaint store unavailable: {message}",
    }
}

impl From<StoreError> for Error {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::DuplicateEmail { .. } => Self::invalid_request("email already registered")
                .with_details(json!({ "field": "email", "code": "duplicate_email" })),
            StoreError::UnknownSecret => Self::unauthorized("invalid secret code"),
            StoreError::UserNotFound { .. } => Self::not_found("user not found"),
            StoreError::ComplaintNotFound { .. } => Self::not_found("complaint not found"),
            StoreError::Unavailable { message } => Self::internal(message),
        }
    }
}

/// Shared user and complaint state.
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Register a user with a fresh identifier and secret.
    async fn create_user(&self, name: DisplayName, email: Email) -> Result<User, StoreError>;

    /// Resolve the user holding `secret`, with their complaints attached.
    async fn authenticate(&self, secret: &SecretCode) -> Result<User, StoreError>;

    /// Whether `secret` is the administrator secret.
    fn is_admin(&self, secret: &SecretCode) -> bool;

    /// Record a new, unresolved complaint owned by `owner`.
    async fn create_complaint(
        &self,
        owner: &UserId,
        draft: ComplaintDraft,
    ) -> Result<Complaint, StoreError>;

    /// Fetch one complaint by identifier.
    async fn complaint(&self, id: &ComplaintId) -> Result<Complaint, StoreError>;

    /// Complaints submitted by `owner`, oldest first.
    async fn user_complaints(&self, owner: &UserId) -> Result<Vec<Complaint>, StoreError>;

    /// Every complaint in creation order.
    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError>;

    /// Mark a complaint resolved. Resolving an already resolved complaint
    /// succeeds.
    async fn resolve_complaint(&self, id: &ComplaintId) -> Result<(), StoreError>;
}
