//! Requests that are answered before the database is touched.

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension,
};
use serde_json::json;

use common::{get, offline_state, post, post_json, send};
use recruitment_api::middleware::auth::AuthContext;
use recruitment_api::routes::router;
use recruitment_api::services::jwt_service::JwtService;

#[tokio::test]
async fn health_is_public() {
    let app = router(offline_state());
    let (status, body) = send(&app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn openapi_document_lists_the_workflow_routes() {
    let app = router(offline_state());
    let (status, body) = send(&app, get("/api-docs/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().expect("paths");
    assert!(paths.contains_key("/application/submitApplication"));
    assert!(paths.contains_key("/review/updateApplicationStatus"));
    assert!(paths.contains_key("/person/register"));
}

#[tokio::test]
async fn protected_routes_need_a_principal() {
    let app = router(offline_state());

    let (status, _) = send(&app, get("/application/getAllAvailability?personId=1", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/review/getApplications", Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/review/getApplicationsByStatus/garbage", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/person/findPerson?username=someone", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, post("/person/updateRecruiter?pnr=20070114-1252&email=a@b.se", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

fn signed_in_as(role: &str) -> AuthContext {
    AuthContext {
        person_id: 1,
        username: "leroy".to_string(),
        role: role.to_string(),
    }
}

#[tokio::test]
async fn person_lookups_are_for_recruiters_only() {
    let app = router(offline_state()).layer(Extension(signed_in_as("applicant")));

    let (status, body) = send(&app, get("/person/findPerson?username=someone", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, _) = send(&app, get("/person/find?name=Leroy", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let app = router(offline_state()).layer(Extension(signed_in_as("recruiter")));
    let (status, body) = send(&app, get("/person/findPerson", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please provide PNR, email, or username for search.");
}

#[tokio::test]
async fn tokens_signed_with_another_secret_are_ignored() {
    let app = router(offline_state());
    let foreign = JwtService::new("some-other-secret", 30, 5)
        .generate_token("JoelleWilkinson", "recruiter")
        .unwrap();
    let (status, _) = send(&app, get("/review/getApplications", Some(&foreign))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unparseable_path_id_is_a_bad_request() {
    let app = router(offline_state());
    let (status, body) = send(&app, get("/translation/getSpecificCompetence/abc", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Invalid parameter : Provided value (abc) could not be parsed as a valid integer"
    );
}

#[tokio::test]
async fn translation_requires_a_language() {
    let app = router(offline_state());
    let (status, body) = send(&app, get("/translation/getCompetenceTranslation", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid parameter : Required parameter language is missing");
}

#[tokio::test]
async fn registration_fields_are_validated_first() {
    let app = router(offline_state());
    let payload = json!({
        "name": "Leroy",
        "surname": "Crane",
        "pnr": "2007-01-14",
        "email": "not-an-email",
        "password": "secret",
        "username": "leroy"
    });
    let (status, body) = send(&app, post_json("/person/register", None, &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Request contained 1 or more incorrectly formatted parameters"));
    assert!(message.contains("yyyymmdd-nnnn"));
    assert!(message.contains("well-formed email"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = router(offline_state());
    let request = Request::builder()
        .method("POST")
        .uri("/person/register")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Malformed request body"));
}

#[tokio::test]
async fn login_needs_both_credentials() {
    let app = router(offline_state());
    let (status, body) = send(&app, post("/auth/generateToken?username=leroy", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid parameter : Required parameter password is missing");
}

#[tokio::test]
async fn reset_with_a_forged_token_is_rejected() {
    let app = router(offline_state());
    let (status, body) = send(
        &app,
        post("/person/updateApplicant?resetToken=forged&username=leroy&password=pw", None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "The provided token is invalid due to : Token invalid, either out of date or not generated by this system"
    );
}
