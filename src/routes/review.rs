use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{
    dto::application_dto::ApplicationResponse,
    error::Result,
    models::application::ApplicationDetails,
    routes::params::{int_param, parse_int, parse_status, required},
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateQuery {
    pub application_id: Option<String>,
    pub status: Option<String>,
    pub version_number: Option<String>,
}

fn responses(details: Vec<ApplicationDetails>) -> Json<Vec<ApplicationResponse>> {
    Json(details.into_iter().map(ApplicationResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/review/getApplications",
    responses(
        (status = 200, description = "All applications", body = Vec<ApplicationResponse>)
    )
)]
#[axum::debug_handler]
pub async fn get_applications(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let details = state.review_service.get_applications().await?;
    Ok(responses(details))
}

#[utoipa::path(
    get,
    path = "/review/getApplicationsByStatus/{status}",
    params(("status" = String, Path, description = "unchecked, accepted or denied, any case")),
    responses(
        (status = 200, description = "Applications with the status", body = Vec<ApplicationResponse>),
        (status = 400, description = "Unknown status")
    )
)]
#[axum::debug_handler]
pub async fn get_applications_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<impl IntoResponse> {
    let status = parse_status(&status)?;
    let details = state.review_service.get_applications_by_status(status).await?;
    Ok(responses(details))
}

#[utoipa::path(
    get,
    path = "/review/getApplicationsById/{id}",
    params(("id" = String, Path, description = "Application id")),
    responses(
        (status = 200, description = "The application", body = ApplicationResponse),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Application not found")
    )
)]
#[axum::debug_handler]
pub async fn get_application_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_int(&id)?;
    let details = state.review_service.get_application_by_id(id).await?;
    Ok(Json(ApplicationResponse::from(details)))
}

#[utoipa::path(
    post,
    path = "/review/updateApplicationStatus",
    params(
        ("applicationId" = String, Query, description = "Application id"),
        ("status" = String, Query, description = "New status"),
        ("versionNumber" = String, Query, description = "Version the reviewer last saw")
    ),
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponse),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Application not found or updated by someone else"),
        (status = 409, description = "Status already set")
    )
)]
#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Query(query): Query<StatusUpdateQuery>,
) -> Result<impl IntoResponse> {
    let application_id = int_param("applicationId", query.application_id)?;
    let status = parse_status(&required("status", query.status)?)?;
    let version = int_param("versionNumber", query.version_number)?;

    let details = state
        .review_service
        .set_application_status(application_id, status, version)
        .await?;
    Ok(Json(ApplicationResponse::from(details)))
}
