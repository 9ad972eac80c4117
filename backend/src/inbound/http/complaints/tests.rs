//! Tests for complaint handlers.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

use crate::domain::ports::ComplaintStore;
use crate::domain::{ComplaintDraft, User};
use crate::inbound::http::auth::SECRET_HEADER;
use crate::inbound::http::test_utils::{
    ADMIN_SECRET, UnavailableStore, memory_store, register, test_app,
};

struct World {
    store: Arc<dyn ComplaintStore>,
    alice: User,
    bob: User,
}

async fn world() -> World {
    let store = memory_store();
    let alice = register(store.as_ref(), "Alice", "a@x.com").await;
    let bob = register(store.as_ref(), "Bob", "b@x.com").await;
    World { store, alice, bob }
}

async fn complaint_for(store: &dyn ComplaintStore, owner: &User, title: &str) -> String {
    let draft = ComplaintDraft::try_from_parts(title, "", 3).expect("valid draft");
    store
        .create_complaint(owner.id(), draft)
        .await
        .expect("submission succeeds")
        .id()
        .to_string()
}

async fn send(store: Arc<dyn ComplaintStore>, request: actix_test::TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(test_app(store)).await;
    actix_test::call_service(&app, request.to_request()).await
}

async fn json_of(response: ServiceResponse) -> Value {
    actix_test::read_body_json(response).await
}

#[actix_web::test]
async fn submission_creates_an_unresolved_complaint() {
    let World { store, alice, .. } = world().await;
    let request = actix_test::TestRequest::post()
        .uri("/submitComplaint")
        .insert_header((SECRET_HEADER, alice.secret_code().expose()))
        .set_json(json!({ "title": "Late delivery", "summary": "two weeks", "rating": 2 }));

    let response = send(store, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_of(response).await;
    let complaint = &body["complaint"];
    assert_eq!(complaint["title"], "Late delivery");
    assert_eq!(complaint["summary"], "two weeks");
    assert_eq!(complaint["rating"], 2);
    assert_eq!(complaint["resolved"], false);
    assert_eq!(complaint["user_id"], alice.id().as_ref());
    assert!(complaint["date"].is_string());
}

#[rstest]
#[case(json!({ "title": "Rude staff", "rating": 1 }))]
#[case(json!({ "title": "Rude staff", "rating": 5 }))]
#[actix_web::test]
async fn boundary_ratings_are_accepted(#[case] payload: Value) {
    let World { store, alice, .. } = world().await;
    let request = actix_test::TestRequest::post()
        .uri("/submitComplaint")
        .insert_header((SECRET_HEADER, alice.secret_code().expose()))
        .set_json(payload);
    let response = send(store, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_of(response).await;
    assert_eq!(body["complaint"]["summary"], "");
}

#[rstest]
#[case(json!({ "title": "Noise", "rating": 0 }), "rating", "out_of_range")]
#[case(json!({ "title": "Noise", "rating": 6 }), "rating", "out_of_range")]
#[case(json!({ "title": "Noise" }), "rating", "missing_field")]
#[case(json!({ "title": "   ", "rating": 3 }), "title", "empty_field")]
#[case(json!({ "rating": 3 }), "title", "missing_field")]
#[actix_web::test]
async fn invalid_submissions_are_rejected_before_the_store(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let World { store, alice, .. } = world().await;
    let request = actix_test::TestRequest::post()
        .uri("/submitComplaint")
        .insert_header((SECRET_HEADER, alice.secret_code().expose()))
        .set_json(payload);
    let response = send(Arc::clone(&store), request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_of(response).await;
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
    assert!(store.all_complaints().await.expect("readable").is_empty());
}

#[rstest]
#[case(None)]
#[case(Some("0000000000000000"))]
#[case(Some(ADMIN_SECRET))]
#[actix_web::test]
async fn submission_requires_a_user_secret(#[case] secret: Option<&str>) {
    let World { store, .. } = world().await;
    let mut request = actix_test::TestRequest::post()
        .uri("/submitComplaint")
        .set_json(json!({ "title": "Noise", "rating": 3 }));
    if let Some(secret) = secret {
        request = request.insert_header((SECRET_HEADER, secret));
    }
    let response = send(store, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn user_listing_only_shows_own_complaints() {
    let World { store, alice, bob } = world().await;
    let mine = complaint_for(store.as_ref(), &alice, "Mine").await;
    complaint_for(store.as_ref(), &bob, "Theirs").await;

    let request = actix_test::TestRequest::get()
        .uri("/getAllComplaintsForUser")
        .insert_header((SECRET_HEADER, alice.secret_code().expose()));
    let response = send(store, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_of(response).await;
    let ids: Vec<&str> = body["complaints"]
        .as_array()
        .expect("complaints array")
        .iter()
        .filter_map(|complaint| complaint["id"].as_str())
        .collect();
    assert_eq!(ids, vec![mine.as_str()]);
}

#[actix_web::test]
async fn fresh_user_lists_an_empty_array() {
    let World { store, bob, .. } = world().await;
    let request = actix_test::TestRequest::get()
        .uri("/getAllComplaintsForUser")
        .insert_header((SECRET_HEADER, bob.secret_code().expose()));
    let response = send(store, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_of(response).await, json!({ "complaints": [] }));
}

#[rstest]
#[case(None, StatusCode::UNAUTHORIZED)]
#[case(Some("someone"), StatusCode::FORBIDDEN)]
#[case(Some(ADMIN_SECRET), StatusCode::OK)]
#[actix_web::test]
async fn admin_listing_requires_admin_secret(
    #[case] secret: Option<&str>,
    #[case] expected: StatusCode,
) {
    let World { store, alice, bob } = world().await;
    complaint_for(store.as_ref(), &alice, "One").await;
    complaint_for(store.as_ref(), &bob, "Two").await;

    let mut request = actix_test::TestRequest::get().uri("/getAllComplaintsForAdmin");
    if let Some(secret) = secret {
        request = request.insert_header((SECRET_HEADER, secret));
    }
    let response = send(store, request).await;
    assert_eq!(response.status(), expected);
    if expected == StatusCode::OK {
        let body = json_of(response).await;
        assert_eq!(body["complaints"].as_array().map(Vec::len), Some(2));
    }
}

#[derive(Debug, Clone, Copy)]
enum Viewer {
    Nobody,
    Owner,
    Stranger,
    Admin,
    Unknown,
}

#[rstest]
#[case(Viewer::Owner, StatusCode::OK)]
#[case(Viewer::Admin, StatusCode::OK)]
#[case(Viewer::Stranger, StatusCode::FORBIDDEN)]
#[case(Viewer::Unknown, StatusCode::FORBIDDEN)]
#[case(Viewer::Nobody, StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn viewing_is_limited_to_owner_and_admin(
    #[case] viewer: Viewer,
    #[case] expected: StatusCode,
) {
    let World { store, alice, bob } = world().await;
    let id = complaint_for(store.as_ref(), &alice, "Private").await;

    let secret = match viewer {
        Viewer::Nobody => None,
        Viewer::Owner => Some(alice.secret_code().expose().to_owned()),
        Viewer::Stranger => Some(bob.secret_code().expose().to_owned()),
        Viewer::Admin => Some(ADMIN_SECRET.to_owned()),
        Viewer::Unknown => Some("0000000000000000".to_owned()),
    };
    let mut request = actix_test::TestRequest::get().uri(&format!("/viewComplaint?id={id}"));
    if let Some(secret) = secret {
        request = request.insert_header((SECRET_HEADER, secret));
    }
    let response = send(store, request).await;
    assert_eq!(response.status(), expected);
    if expected == StatusCode::OK {
        let body = json_of(response).await;
        assert_eq!(body["complaint"]["id"], id.as_str());
    }
}

#[rstest]
#[case("/viewComplaint", StatusCode::BAD_REQUEST)]
#[case("/viewComplaint?id=", StatusCode::BAD_REQUEST)]
#[case("/viewComplaint?id=missing", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn lookup_failures_precede_authorisation(#[case] uri: &str, #[case] expected: StatusCode) {
    let World { store, .. } = world().await;
    let request = actix_test::TestRequest::get().uri(uri);
    let response = send(store, request).await;
    assert_eq!(response.status(), expected);
}

#[actix_web::test]
async fn admin_resolves_complaints_idempotently() {
    let World { store, alice, .. } = world().await;
    let id = complaint_for(store.as_ref(), &alice, "Broken").await;
    let app = actix_test::init_service(test_app(Arc::clone(&store))).await;

    for _ in 0..2 {
        let request = actix_test::TestRequest::post()
            .uri("/resolveComplaint")
            .insert_header((SECRET_HEADER, ADMIN_SECRET))
            .set_json(json!({ "complaint_id": id }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body, json!({ "message": "Complaint resolved successfully" }));
    }

    let complaints = store.user_complaints(alice.id()).await.expect("readable");
    assert!(complaints.iter().all(|complaint| complaint.is_resolved()));
}

#[rstest]
#[case(None, json!({ "complaint_id": "x" }), StatusCode::UNAUTHORIZED)]
#[case(Some("not-admin"), json!({ "complaint_id": "x" }), StatusCode::FORBIDDEN)]
#[case(Some(ADMIN_SECRET), json!({ "complaint_id": "missing" }), StatusCode::NOT_FOUND)]
#[case(Some(ADMIN_SECRET), json!({ "complaint_id": "" }), StatusCode::BAD_REQUEST)]
#[case(Some(ADMIN_SECRET), json!({}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn resolve_failure_modes(
    #[case] secret: Option<&str>,
    #[case] payload: Value,
    #[case] expected: StatusCode,
) {
    let World { store, .. } = world().await;
    let mut request = actix_test::TestRequest::post()
        .uri("/resolveComplaint")
        .set_json(payload);
    if let Some(secret) = secret {
        request = request.insert_header((SECRET_HEADER, secret));
    }
    let response = send(store, request).await;
    assert_eq!(response.status(), expected);
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/getAllComplaintsForUser").insert_header((SECRET_HEADER, "feedfacecafebeef")))]
#[case(actix_test::TestRequest::post().uri("/submitComplaint").insert_header((SECRET_HEADER, "feedfacecafebeef")).set_json(json!({ "title": "Late", "rating": 2 })))]
#[case(actix_test::TestRequest::get().uri("/getAllComplaintsForAdmin").insert_header((SECRET_HEADER, ADMIN_SECRET)))]
#[case(actix_test::TestRequest::get().uri("/viewComplaint?id=c-1").insert_header((SECRET_HEADER, ADMIN_SECRET)))]
#[actix_web::test]
async fn store_failures_surface_as_internal_errors(#[case] request: actix_test::TestRequest) {
    let response = send(Arc::new(UnavailableStore), request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_of(response).await;
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], "Internal server error");
}
