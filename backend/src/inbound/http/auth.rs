//! Secret-code authentication for HTTP handlers.
//!
//! Callers present their bearer secret in the `X-Secret-Code` header. The
//! [`SecretHeader`] extractor rejects requests without one; the helpers
//! below turn a presented secret into a [`Caller`] and enforce role checks.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};

use crate::domain::ports::{ComplaintStore, StoreError};
use crate::domain::{Caller, Error, SecretCode, User};

use super::ApiResult;

/// Header carrying the caller's secret code.
pub const SECRET_HEADER: &str = "X-Secret-Code";

/// Secret code taken from the `X-Secret-Code` request header.
///
/// Extraction fails with `401 unauthorized` when the header is absent, blank
/// or not valid header text. Wrap in `Option` to make the header optional.
pub struct SecretHeader(SecretCode);

impl SecretHeader {
    /// The presented secret.
    pub fn secret(&self) -> &SecretCode {
        &self.0
    }

    fn parse(req: &HttpRequest) -> ApiResult<Self> {
        let raw = req
            .headers()
            .get(SECRET_HEADER)
            .ok_or_else(|| Error::unauthorized("Secret code required"))?
            .to_str()
            .map_err(|_| Error::unauthorized("Invalid secret code"))?;
        SecretCode::new(raw)
            .map(Self)
            .map_err(|_| Error::unauthorized("Secret code required"))
    }
}

impl FromRequest for SecretHeader {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::parse(req))
    }
}

/// Resolve who holds `secret`: the administrator or a registered user.
///
/// Unknown secrets are `401 unauthorized`.
pub async fn identify(store: &dyn ComplaintStore, secret: &SecretCode) -> ApiResult<Caller> {
    if store.is_admin(secret) {
        return Ok(Caller::Admin);
    }
    let user = store.authenticate(secret).await?;
    Ok(Caller::User(user.id().clone()))
}

/// Resolve a registered user from their secret.
///
/// Unknown secrets are `401`; other store failures keep their own status.
pub async fn require_user(store: &dyn ComplaintStore, secret: &SecretCode) -> ApiResult<User> {
    store.authenticate(secret).await.map_err(|err| match err {
        StoreError::UnknownSecret => Error::unauthorized("Invalid secret code"),
        other => Error::from(other),
    })
}

/// Demand the administrator secret; any other secret is `403 forbidden`.
pub fn require_admin(store: &dyn ComplaintStore, secret: &SecretCode) -> ApiResult<()> {
    if store.is_admin(secret) {
        Ok(())
    } else {
        Err(Error::forbidden("Admin access required"))
    }
}
