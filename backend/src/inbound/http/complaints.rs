//! Complaint submission, listing, viewing and resolution handlers.
//!
//! ```text
//! POST /submitComplaint {"title":"Late delivery","summary":"","rating":2}
//! GET  /getAllComplaintsForUser
//! GET  /getAllComplaintsForAdmin
//! GET  /viewComplaint?id=<complaint id>
//! POST /resolveComplaint {"complaint_id":"<complaint id>"}
//! ```
//!
//! Every route reads the caller's secret from `X-Secret-Code`.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Complaint, ComplaintDraft, ComplaintId, Error, ErrorCode, Rating, Title};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{SecretHeader, identify, require_admin, require_user};
use crate::inbound::http::schemas::{ComplaintSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, complaint_field_error, require};

const TITLE: FieldName = FieldName::new("title");
const RATING: FieldName = FieldName::new("rating");
const ID: FieldName = FieldName::new("id");
const COMPLAINT_ID: FieldName = FieldName::new("complaint_id");

/// Body for `POST /submitComplaint`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SubmitComplaintRequest {
    /// Headline; must not be blank.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional description.
    #[serde(default)]
    pub summary: Option<String>,
    /// Rating from 1 to 5 inclusive.
    #[serde(default)]
    #[schema(minimum = 1, maximum = 5)]
    pub rating: Option<i64>,
}

impl SubmitComplaintRequest {
    fn into_draft(self) -> ApiResult<ComplaintDraft> {
        let Self {
            title,
            summary,
            rating,
        } = self;
        let title = Title::new(require(title, TITLE)?)
            .map_err(|err| complaint_field_error(TITLE, &err))?;
        let rating = Rating::new(require(rating, RATING)?)
            .map_err(|err| complaint_field_error(RATING, &err))?;
        Ok(ComplaintDraft::new(title, summary.unwrap_or_default(), rating))
    }
}

/// Body for `POST /resolveComplaint`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ResolveComplaintRequest {
    /// Identifier of the complaint to resolve.
    #[serde(default)]
    pub complaint_id: Option<String>,
}

/// Query string for `GET /viewComplaint`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ViewComplaintQuery {
    /// Identifier of the complaint to view.
    pub id: Option<String>,
}

/// Response body carrying a single complaint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintEnvelope {
    /// The complaint.
    #[schema(value_type = ComplaintSchema)]
    pub complaint: Complaint,
}

/// Response body carrying a list of complaints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ComplaintsEnvelope {
    /// Matching complaints.
    #[schema(value_type = Vec<ComplaintSchema>)]
    pub complaints: Vec<Complaint>,
}

/// Confirmation returned by `POST /resolveComplaint`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "Complaint resolved successfully")]
    pub message: String,
}

fn parse_complaint_id(raw: Option<String>, field: FieldName) -> ApiResult<ComplaintId> {
    let raw = require(raw, field)?;
    ComplaintId::new(raw).map_err(|err| complaint_field_error(field, &err))
}

/// Submit a complaint as the user holding the presented secret.
#[utoipa::path(
    post,
    path = "/submitComplaint",
    request_body = SubmitComplaintRequest,
    responses(
        (status = 201, description = "Complaint recorded", body = ComplaintEnvelope),
        (status = 400, description = "Missing title or rating out of range", body = ErrorSchema),
        (status = 401, description = "Missing or invalid secret code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint"
)]
#[post("/submitComplaint")]
pub async fn submit_complaint(
    state: web::Data<HttpState>,
    secret: SecretHeader,
    payload: web::Json<SubmitComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let user = require_user(state.store.as_ref(), secret.secret()).await?;
    let draft = payload.into_inner().into_draft()?;
    let complaint = state.store.create_complaint(user.id(), draft).await?;
    Ok(HttpResponse::Created().json(ComplaintEnvelope { complaint }))
}

/// List the caller's own complaints, oldest first.
#[utoipa::path(
    get,
    path = "/getAllComplaintsForUser",
    responses(
        (status = 200, description = "Caller's complaints", body = ComplaintsEnvelope),
        (status = 401, description = "Missing or invalid secret code", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "getAllComplaintsForUser"
)]
#[get("/getAllComplaintsForUser")]
pub async fn user_complaints(
    state: web::Data<HttpState>,
    secret: SecretHeader,
) -> ApiResult<web::Json<ComplaintsEnvelope>> {
    let user = require_user(state.store.as_ref(), secret.secret()).await?;
    let complaints = state.store.user_complaints(user.id()).await?;
    Ok(web::Json(ComplaintsEnvelope { complaints }))
}

/// List every complaint. Administrator only.
#[utoipa::path(
    get,
    path = "/getAllComplaintsForAdmin",
    responses(
        (status = 200, description = "All complaints", body = ComplaintsEnvelope),
        (status = 401, description = "Missing secret code", body = ErrorSchema),
        (status = 403, description = "Admin access required", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "getAllComplaintsForAdmin"
)]
#[get("/getAllComplaintsForAdmin")]
pub async fn admin_complaints(
    state: web::Data<HttpState>,
    secret: SecretHeader,
) -> ApiResult<web::Json<ComplaintsEnvelope>> {
    require_admin(state.store.as_ref(), secret.secret())?;
    let complaints = state.store.all_complaints().await?;
    Ok(web::Json(ComplaintsEnvelope { complaints }))
}

/// View one complaint as its owner or the administrator.
///
/// The complaint is looked up before the secret is checked, so an unknown
/// id is `404` even without a secret.
#[utoipa::path(
    get,
    path = "/viewComplaint",
    responses(
        (status = 200, description = "The complaint", body = ComplaintEnvelope),
        (status = 400, description = "Missing complaint id", body = ErrorSchema),
        (status = 401, description = "Missing secret code", body = ErrorSchema),
        (status = 403, description = "Neither owner nor admin", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "viewComplaint"
)]
#[get("/viewComplaint")]
pub async fn view_complaint(
    state: web::Data<HttpState>,
    query: web::Query<ViewComplaintQuery>,
    secret: Option<SecretHeader>,
) -> ApiResult<web::Json<ComplaintEnvelope>> {
    let id = parse_complaint_id(query.into_inner().id, ID)?;
    let complaint = state.store.complaint(&id).await?;
    let secret = secret.ok_or_else(|| Error::unauthorized("Secret code required"))?;
    let caller = match identify(state.store.as_ref(), secret.secret()).await {
        Ok(caller) => caller,
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            return Err(Error::forbidden("Access denied"));
        }
        Err(err) => return Err(err),
    };
    if !caller.may_view(&complaint) {
        return Err(Error::forbidden("Access denied"));
    }
    debug!(complaint_id = %id, admin = caller.is_admin(), "complaint viewed");
    Ok(web::Json(ComplaintEnvelope { complaint }))
}

/// Mark a complaint resolved. Administrator only; idempotent.
#[utoipa::path(
    post,
    path = "/resolveComplaint",
    request_body = ResolveComplaintRequest,
    responses(
        (status = 200, description = "Complaint resolved", body = MessageResponse),
        (status = 400, description = "Missing complaint id", body = ErrorSchema),
        (status = 401, description = "Missing secret code", body = ErrorSchema),
        (status = 403, description = "Admin access required", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "resolveComplaint"
)]
#[post("/resolveComplaint")]
pub async fn resolve_complaint(
    state: web::Data<HttpState>,
    secret: SecretHeader,
    payload: web::Json<ResolveComplaintRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    require_admin(state.store.as_ref(), secret.secret())?;
    let id = parse_complaint_id(payload.into_inner().complaint_id, COMPLAINT_ID)?;
    state.store.resolve_complaint(&id).await?;
    info!(complaint_id = %id, "complaint resolved by admin");
    Ok(web::Json(MessageResponse {
        message: "Complaint resolved successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests;
