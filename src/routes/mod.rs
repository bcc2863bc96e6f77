pub mod application;
pub mod auth;
pub mod health;
pub mod openapi;
pub mod params;
pub mod person;
pub mod review;
pub mod translation;

use axum::{
    extract::Request,
    middleware::{self, Next},
    routing::{get, post},
    Router,
};

use crate::middleware::auth::{authenticate, require_roles};
use crate::models::person::{APPLICANT_ROLE, RECRUITER_ROLE};
use crate::AppState;

/// Every route of the service, wrapped in the authentication layer.
/// Role guards sit on the sub-routers that need them.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json))
        .route("/auth/generateToken", post(auth::generate_token))
        .route("/person/register", post(person::register))
        .route(
            "/person/requestApplicantReset",
            post(person::request_applicant_reset),
        )
        .route("/person/updateApplicant", post(person::update_applicant))
        .route(
            "/translation/getStandardCompetences",
            get(translation::get_standard_competences),
        )
        .route(
            "/translation/getSpecificCompetence/:id",
            get(translation::get_specific_competence),
        )
        .route(
            "/translation/getCompetenceTranslation",
            get(translation::get_competence_translation),
        )
        .route("/translation/getLanguages", get(translation::get_languages));

    let applicant = Router::new()
        .route(
            "/application/getAllCompetenceProfiles",
            get(application::get_all_competence_profiles),
        )
        .route(
            "/application/createCompetenceProfile",
            post(application::create_competence_profile),
        )
        .route(
            "/application/getAllAvailability",
            get(application::get_all_availability),
        )
        .route(
            "/application/createAvailability",
            post(application::create_availability),
        )
        .route(
            "/application/submitApplication",
            post(application::submit_application),
        )
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            require_roles(req, next, &[APPLICANT_ROLE])
        }));

    let recruiter = Router::new()
        .route("/review/getApplications", get(review::get_applications))
        .route(
            "/review/getApplicationsByStatus/:status",
            get(review::get_applications_by_status),
        )
        .route(
            "/review/getApplicationsById/:id",
            get(review::get_application_by_id),
        )
        .route(
            "/review/updateApplicationStatus",
            post(review::update_application_status),
        )
        .route("/person/updateRecruiter", post(person::update_recruiter))
        .route("/person/find", get(person::find_by_name))
        .route("/person/findPerson", get(person::find_person))
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            require_roles(req, next, &[RECRUITER_ROLE])
        }));

    Router::new()
        .merge(public)
        .merge(applicant)
        .merge(recruiter)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .with_state(state)
}
