//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use mockable::DefaultClock;

use crate::domain::ports::{ComplaintStore, StoreError};
use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, DisplayName, Email, SecretCode, User, UserId,
};
use crate::outbound::memory::{DEFAULT_ADMIN_SECRET, InMemoryComplaintStore};

use super::state::HttpState;

/// Administrator secret recognised by [`memory_store`].
pub const ADMIN_SECRET: &str = DEFAULT_ADMIN_SECRET;

/// Fresh, empty in-memory store using [`ADMIN_SECRET`].
pub fn memory_store() -> Arc<dyn ComplaintStore> {
    let admin = SecretCode::new(ADMIN_SECRET).expect("admin secret is non-empty");
    Arc::new(InMemoryComplaintStore::new(admin, Arc::new(DefaultClock)))
}

/// Store whose every operation fails as [`StoreError::Unavailable`].
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T, StoreError> {
    Err(StoreError::unavailable("store lock poisoned"))
}

#[async_trait]
impl ComplaintStore for UnavailableStore {
    async fn create_user(&self, _name: DisplayName, _email: Email) -> Result<User, StoreError> {
        unavailable()
    }

    async fn authenticate(&self, _secret: &SecretCode) -> Result<User, StoreError> {
        unavailable()
    }

    fn is_admin(&self, secret: &SecretCode) -> bool {
        secret.expose() == ADMIN_SECRET
    }

    async fn create_complaint(
        &self,
        _owner: &UserId,
        _draft: ComplaintDraft,
    ) -> Result<Complaint, StoreError> {
        unavailable()
    }

    async fn complaint(&self, _id: &ComplaintId) -> Result<Complaint, StoreError> {
        unavailable()
    }

    async fn user_complaints(&self, _owner: &UserId) -> Result<Vec<Complaint>, StoreError> {
        unavailable()
    }

    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError> {
        unavailable()
    }

    async fn resolve_complaint(&self, _id: &ComplaintId) -> Result<(), StoreError> {
        unavailable()
    }
}

/// Register a user directly against the store.
pub async fn register(store: &dyn ComplaintStore, name: &str, email: &str) -> User {
    store
        .create_user(
            DisplayName::new(name).expect("valid name"),
            Email::new(email).expect("valid email"),
        )
        .await
        .expect("registration succeeds")
}

/// App with every complaint route mounted over `store`.
pub fn test_app(
    store: Arc<dyn ComplaintStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(store)))
        .configure(super::configure)
}
