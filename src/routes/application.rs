use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{
    dto::application_dto::{
        ApplicationResponse, ApplicationSubmission, AvailabilityResponse, CompetenceProfileResponse,
    },
    error::Result,
    routes::params::{int_param, parse_date, parse_double, required},
    AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonQuery {
    pub person_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetenceProfileQuery {
    pub person_id: Option<String>,
    pub competence_id: Option<String>,
    pub years_of_experience: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub person_id: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/application/getAllCompetenceProfiles",
    params(("personId" = String, Query, description = "Person id")),
    responses(
        (status = 200, description = "Competence profiles of the person", body = Vec<CompetenceProfileResponse>),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Person not found")
    )
)]
#[axum::debug_handler]
pub async fn get_all_competence_profiles(
    State(state): State<AppState>,
    Query(query): Query<PersonQuery>,
) -> Result<impl IntoResponse> {
    let person_id = int_param("personId", query.person_id)?;
    let profiles = state
        .application_service
        .get_competence_profiles_for_person(person_id)
        .await?;
    Ok(Json(
        profiles
            .into_iter()
            .map(CompetenceProfileResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/application/createCompetenceProfile",
    params(
        ("personId" = String, Query, description = "Person id"),
        ("competenceId" = String, Query, description = "Competence id"),
        ("yearsOfExperience" = String, Query, description = "Non-negative years of experience")
    ),
    responses(
        (status = 201, description = "Competence profile created", body = CompetenceProfileResponse),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Person or competence not found"),
        (status = 409, description = "Identical competence profile exists")
    )
)]
#[axum::debug_handler]
pub async fn create_competence_profile(
    State(state): State<AppState>,
    Query(query): Query<CompetenceProfileQuery>,
) -> Result<impl IntoResponse> {
    let person_id = int_param("personId", query.person_id)?;
    let competence_id = int_param("competenceId", query.competence_id)?;
    let years = parse_double(&required("yearsOfExperience", query.years_of_experience)?)?;

    let profile = state
        .application_service
        .create_competence_profile(competence_id, person_id, years)
        .await?;
    Ok((StatusCode::CREATED, Json(CompetenceProfileResponse::from(profile))))
}

#[utoipa::path(
    get,
    path = "/application/getAllAvailability",
    params(("personId" = String, Query, description = "Person id")),
    responses(
        (status = 200, description = "Availability periods of the person", body = Vec<AvailabilityResponse>),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Person not found")
    )
)]
#[axum::debug_handler]
pub async fn get_all_availability(
    State(state): State<AppState>,
    Query(query): Query<PersonQuery>,
) -> Result<impl IntoResponse> {
    let person_id = int_param("personId", query.person_id)?;
    let periods = state
        .application_service
        .get_availability_for_person(person_id)
        .await?;
    Ok(Json(
        periods
            .into_iter()
            .map(AvailabilityResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/application/createAvailability",
    params(
        ("personId" = String, Query, description = "Person id"),
        ("fromDate" = String, Query, description = "First day, yyyy-mm-dd"),
        ("toDate" = String, Query, description = "Last day, yyyy-mm-dd")
    ),
    responses(
        (status = 201, description = "Availability period created", body = AvailabilityResponse),
        (status = 400, description = "Invalid parameter, reversed or covered range"),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Identical period exists")
    )
)]
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse> {
    let person_id = int_param("personId", query.person_id)?;
    let from_date = parse_date(&required("fromDate", query.from_date)?)?;
    let to_date = parse_date(&required("toDate", query.to_date)?)?;

    let availability = state
        .application_service
        .create_availability(person_id, from_date, to_date)
        .await?;
    Ok((StatusCode::CREATED, Json(AvailabilityResponse::from(availability))))
}

#[utoipa::path(
    post,
    path = "/application/submitApplication",
    request_body = ApplicationSubmission,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationResponse),
        (status = 400, description = "Malformed body"),
        (status = 404, description = "Person, availability or competence profile invalid")
    )
)]
#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ApplicationSubmission>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(submission) = payload?;
    let details = state
        .application_service
        .submit_application(
            submission.person_id,
            &submission.availability_ids,
            &submission.competence_profile_ids,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(details))))
}
