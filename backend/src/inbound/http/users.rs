//! Registration and login handlers.
//!
//! ```text
//! POST /register {"name":"Alice","email":"alice@example.com"}
//! POST /login {"secret_code":"feedfacecafebeef"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{DisplayName, Email, Error, SecretCode, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_user;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require, user_field_error};

const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");

/// Login request body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    /// Secret issued at registration.
    #[serde(default)]
    pub secret_code: Option<String>,
}

/// Registration request body for `POST /register`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name; must not be blank.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email; must not be blank and must not already be registered.
    #[serde(default)]
    pub email: Option<String>,
}

/// Response body carrying a single user.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    /// The user, including their secret and complaints.
    #[schema(value_type = UserSchema)]
    pub user: User,
}

/// Exchange a secret code for the user that holds it.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Secret recognised", body = UserEnvelope),
        (status = 400, description = "Malformed JSON", body = ErrorSchema),
        (status = 401, description = "Invalid secret code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let secret = payload
        .into_inner()
        .secret_code
        .and_then(|raw| SecretCode::new(raw).ok())
        .ok_or_else(|| Error::unauthorized("Invalid secret code"))?;
    let user = require_user(state.store.as_ref(), &secret).await?;
    info!(user_id = %user.id(), "user logged in");
    Ok(web::Json(UserEnvelope { user }))
}

/// Register a new user and issue their secret code.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserEnvelope),
        (status = 400, description = "Missing fields or duplicate email", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest { name, email } = payload.into_inner();
    let name = DisplayName::new(require(name, NAME)?)
        .map_err(|err| user_field_error(NAME, &err))?;
    let email =
        Email::new(require(email, EMAIL)?).map_err(|err| user_field_error(EMAIL, &err))?;
    let user = state.store.create_user(name, email).await?;
    Ok(HttpResponse::Created().json(UserEnvelope { user }))
}
