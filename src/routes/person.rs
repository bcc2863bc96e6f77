use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{
    dto::{
        common::MessageResponse,
        person_dto::{
            ApplicantResetPayload, PersonResponse, RegisterPersonPayload, RegistrationResponse,
            UpdateRecruiterPayload,
        },
    },
    error::Result,
    middleware::auth::AuthContext,
    routes::params::required,
    services::person_service::PersonLookup,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FindPersonQuery {
    pub pnr: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicantQuery {
    pub reset_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRecruiterQuery {
    pub pnr: Option<String>,
    pub email: Option<String>,
}

#[utoipa::path(
    post,
    path = "/person/register",
    request_body = RegisterPersonPayload,
    responses(
        (status = 201, description = "Applicant registered", body = RegistrationResponse),
        (status = 400, description = "Invalid field or pnr, email or username already in use")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterPersonPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let person = state.person_service.register_person(&payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            message: "User registered successfully!".to_string(),
            person: person.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/person/find",
    params(("name" = String, Query, description = "First name, exact match")),
    responses(
        (status = 200, description = "People with the name", body = Vec<PersonResponse>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn find_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<impl IntoResponse> {
    let name = required("name", query.name)?;
    let people = state.person_service.find_people_by_name(&name).await?;
    Ok(Json(
        people.into_iter().map(PersonResponse::from).collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/person/findPerson",
    params(
        ("pnr" = Option<String>, Query, description = "Person number"),
        ("email" = Option<String>, Query, description = "Email"),
        ("username" = Option<String>, Query, description = "Username")
    ),
    responses(
        (status = 200, description = "The person", body = PersonResponse),
        (status = 400, description = "No identifier given"),
        (status = 403, description = "Not a recruiter"),
        (status = 404, description = "Person not found")
    )
)]
#[axum::debug_handler]
pub async fn find_person(
    State(state): State<AppState>,
    Query(query): Query<FindPersonQuery>,
) -> Result<impl IntoResponse> {
    let lookup = PersonLookup::from_query(query.pnr, query.email, query.username)?;
    let person = state.person_service.find_person(&lookup).await?;
    Ok(Json(PersonResponse::from(person)))
}

#[utoipa::path(
    post,
    path = "/person/requestApplicantReset",
    params(("email" = String, Query, description = "Email of the applicant")),
    responses(
        (status = 200, description = "Reset link issued", body = MessageResponse),
        (status = 409, description = "Unknown email or not an applicant")
    )
)]
#[axum::debug_handler]
pub async fn request_applicant_reset(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<impl IntoResponse> {
    let email = required("email", query.email)?;
    let request = state.person_service.request_applicant_reset(&email).await?;
    Ok(Json(MessageResponse::from(format!(
        "Reset link sent to email {}",
        request.email
    ))))
}

#[utoipa::path(
    post,
    path = "/person/updateApplicant",
    params(
        ("resetToken" = String, Query, description = "Token from the reset link"),
        ("username" = String, Query, description = "New username"),
        ("password" = String, Query, description = "New password")
    ),
    responses(
        (status = 200, description = "Credentials updated", body = MessageResponse),
        (status = 400, description = "Invalid token or username taken"),
        (status = 409, description = "Person invalid")
    )
)]
#[axum::debug_handler]
pub async fn update_applicant(
    State(state): State<AppState>,
    Query(query): Query<UpdateApplicantQuery>,
) -> Result<impl IntoResponse> {
    let payload = ApplicantResetPayload {
        reset_token: required("resetToken", query.reset_token)?,
        username: required("username", query.username)?,
        password: required("password", query.password)?,
    };
    let message = state.person_service.apply_applicant_reset(&payload).await?;
    Ok(Json(MessageResponse::from(message)))
}

#[utoipa::path(
    post,
    path = "/person/updateRecruiter",
    params(
        ("pnr" = String, Query, description = "New person number"),
        ("email" = String, Query, description = "New email")
    ),
    responses(
        (status = 200, description = "Recruiter updated", body = MessageResponse),
        (status = 400, description = "Invalid field or value already in use"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn update_recruiter(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<UpdateRecruiterQuery>,
) -> Result<impl IntoResponse> {
    let payload = UpdateRecruiterPayload {
        pnr: required("pnr", query.pnr)?,
        email: required("email", query.email)?,
    };
    let message = state
        .person_service
        .update_recruiter(auth.person_id, &payload)
        .await?;
    Ok(Json(MessageResponse::from(message)))
}
