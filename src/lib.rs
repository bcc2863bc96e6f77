pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::services::{
    application_service::ApplicationService, authentication_service::AuthenticationService,
    jwt_service::JwtService, person_service::PersonService, review_service::ReviewService,
    translation_service::TranslationService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub application_service: ApplicationService,
    pub review_service: ReviewService,
    pub person_service: PersonService,
    pub translation_service: TranslationService,
    pub authentication_service: AuthenticationService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let jwt_service = JwtService::new(
            &config.jwt_secret,
            config.login_token_minutes,
            config.reset_token_minutes,
        );

        let application_service = ApplicationService::new(pool.clone());
        let review_service = ReviewService::new(pool.clone());
        let person_service = PersonService::new(
            pool.clone(),
            jwt_service.clone(),
            config.reset_link_base_url.clone(),
        );
        let translation_service = TranslationService::new(pool.clone());
        let authentication_service = AuthenticationService::new(pool.clone(), jwt_service);

        Self {
            pool,
            application_service,
            review_service,
            person_service,
            translation_service,
            authentication_service,
        }
    }
}
