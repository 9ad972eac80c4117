//! HTTP inbound adapter exposing the complaint routes.

pub mod auth;
pub mod complaints;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register the complaint routes and body/query error handlers.
///
/// JSON bodies are parsed whatever their `Content-Type`.
///
/// Callers must provide `web::Data<state::HttpState>`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use complaint_desk::domain::SecretCode;
/// use complaint_desk::inbound::http::{configure, state::HttpState};
/// use complaint_desk::outbound::memory::InMemoryComplaintStore;
/// use mockable::DefaultClock;
///
/// let store = Arc::new(InMemoryComplaintStore::new(
///     SecretCode::new("admin123").expect("non-empty secret"),
///     Arc::new(DefaultClock),
/// ));
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::new(store)))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .content_type_required(false)
            .error_handler(error::json_error_handler),
    )
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::login)
        .service(users::register)
        .service(complaints::submit_complaint)
        .service(complaints::user_complaints)
        .service(complaints::admin_complaints)
        .service(complaints::view_complaint)
        .service(complaints::resolve_complaint);
}
