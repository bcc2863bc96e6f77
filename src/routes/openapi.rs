use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    application_dto::{
        ApplicationResponse, ApplicationSubmission, AvailabilityResponse, CompetenceProfileResponse,
    },
    auth_dto::LoginResponse,
    common::{ErrorResponse, MessageResponse},
    person_dto::{PersonResponse, RegisterPersonPayload, RegistrationResponse, RoleResponse},
    translation_dto::{CompetenceResponse, CompetenceTranslationResponse, LanguageResponse},
};
use crate::models::application::ApplicationStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::auth::generate_token,
        crate::routes::application::get_all_competence_profiles,
        crate::routes::application::create_competence_profile,
        crate::routes::application::get_all_availability,
        crate::routes::application::create_availability,
        crate::routes::application::submit_application,
        crate::routes::review::get_applications,
        crate::routes::review::get_applications_by_status,
        crate::routes::review::get_application_by_id,
        crate::routes::review::update_application_status,
        crate::routes::person::register,
        crate::routes::person::find_by_name,
        crate::routes::person::find_person,
        crate::routes::person::request_applicant_reset,
        crate::routes::person::update_applicant,
        crate::routes::person::update_recruiter,
        crate::routes::translation::get_standard_competences,
        crate::routes::translation::get_specific_competence,
        crate::routes::translation::get_competence_translation,
        crate::routes::translation::get_languages,
    ),
    components(schemas(
        ApplicationResponse,
        ApplicationStatus,
        ApplicationSubmission,
        AvailabilityResponse,
        CompetenceProfileResponse,
        CompetenceResponse,
        CompetenceTranslationResponse,
        ErrorResponse,
        LanguageResponse,
        LoginResponse,
        MessageResponse,
        PersonResponse,
        RegisterPersonPayload,
        RegistrationResponse,
        RoleResponse,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
