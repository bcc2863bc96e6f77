use sqlx::PgPool;

use crate::dto::auth_dto::LoginResponse;
use crate::error::{Error, Result};
use crate::models::person::Person;
use crate::repositories::person_repository;
use crate::services::jwt_service::JwtService;
use crate::utils::crypto::verify_password;

#[derive(Clone)]
pub struct AuthenticationService {
    pool: PgPool,
    jwt: JwtService,
}

impl AuthenticationService {
    pub fn new(pool: PgPool, jwt: JwtService) -> Self {
        Self { pool, jwt }
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let mut conn = self.pool.acquire().await?;
        let person = person_repository::find_by_username(&mut conn, username).await?;

        match person {
            Some(person) if verify_password(password, &person.password) => {
                let token = self.jwt.generate_token(&person.username, &person.role.name)?;
                tracing::info!(person_id = person.id, "Issued login token");
                Ok(LoginResponse {
                    token,
                    role: person.role.name,
                })
            }
            _ => {
                tracing::warn!(%username, "Login rejected");
                Err(Error::Unauthorized("Bad credentials".to_string()))
            }
        }
    }

    /// Resolves a bearer token to the stored person it was issued to.
    /// Tokens that do not verify, or whose subject no longer exists, give `None`.
    pub async fn resolve_principal(&self, token: &str) -> Result<Option<Person>> {
        let Some(username) = self.jwt.extract_subject(token) else {
            return Ok(None);
        };

        let mut conn = self.pool.acquire().await?;
        let person = person_repository::find_by_username(&mut conn, &username).await?;
        Ok(person.filter(|p| self.jwt.validate_token(token, &p.username)))
    }
}
