use sqlx::{PgConnection, PgPool};
use validator::Validate;

use crate::dto::person_dto::{ApplicantResetPayload, RegisterPersonPayload, UpdateRecruiterPayload};
use crate::error::{Error, Result};
use crate::models::person::{Person, APPLICANT_ROLE, RECRUITER_ROLE};
use crate::repositories::person_repository::{EMAIL_TAKEN, PNR_TAKEN, USERNAME_TAKEN};
use crate::repositories::{applicant_reset_repository, person_repository, role_repository};
use crate::services::jwt_service::JwtService;
use crate::utils::{crypto, time};

/// Which single identifier a person search uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonLookup {
    Pnr(String),
    Email(String),
    Username(String),
}

impl PersonLookup {
    /// Picks pnr, then email, then username, skipping blank values.
    pub fn from_query(
        pnr: Option<String>,
        email: Option<String>,
        username: Option<String>,
    ) -> Result<Self> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        if let Some(pnr) = present(pnr) {
            return Ok(PersonLookup::Pnr(pnr));
        }
        if let Some(email) = present(email) {
            return Ok(PersonLookup::Email(email));
        }
        if let Some(username) = present(username) {
            return Ok(PersonLookup::Username(username));
        }
        Err(Error::BadRequest(
            "Please provide PNR, email, or username for search.".to_string(),
        ))
    }
}

/// What the reset request produced; the link is what would be mailed out.
#[derive(Debug, Clone)]
pub struct ResetRequest {
    pub email: String,
    pub token: String,
    pub link: String,
}

fn require_role(person: &Person, role: &str) -> Result<()> {
    if person.has_role(role) {
        Ok(())
    } else {
        Err(Error::InvalidPerson(format!(
            "You are not a {}, so this endpoint is not for you!",
            role
        )))
    }
}

/// A value is taken when it belongs to anyone other than `owner`.
fn taken_by_other(found: Option<Person>, owner: Option<i32>) -> bool {
    match (found, owner) {
        (Some(found), Some(owner)) => found.id != owner,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

async fn check_pnr_and_email_free(
    conn: &mut PgConnection,
    pnr: &str,
    email: &str,
    owner: Option<i32>,
) -> Result<()> {
    if taken_by_other(person_repository::find_by_pnr(&mut *conn, pnr).await?, owner) {
        return Err(Error::BadRequest(PNR_TAKEN.to_string()));
    }
    if taken_by_other(person_repository::find_by_email(&mut *conn, email).await?, owner) {
        return Err(Error::BadRequest(EMAIL_TAKEN.to_string()));
    }
    Ok(())
}

async fn check_username_free(conn: &mut PgConnection, username: &str, owner: Option<i32>) -> Result<()> {
    if taken_by_other(person_repository::find_by_username(conn, username).await?, owner) {
        return Err(Error::BadRequest(USERNAME_TAKEN.to_string()));
    }
    Ok(())
}

// Checked in pnr, email, username order; the first clash wins.
async fn check_registration_free(conn: &mut PgConnection, payload: &RegisterPersonPayload) -> Result<()> {
    check_pnr_and_email_free(&mut *conn, &payload.pnr, &payload.email, None).await?;
    check_username_free(conn, &payload.username, None).await
}

#[derive(Clone)]
pub struct PersonService {
    pool: PgPool,
    jwt: JwtService,
    reset_link_base_url: String,
}

impl PersonService {
    pub fn new(pool: PgPool, jwt: JwtService, reset_link_base_url: String) -> Self {
        Self {
            pool,
            jwt,
            reset_link_base_url,
        }
    }

    pub async fn register_person(&self, payload: &RegisterPersonPayload) -> Result<Person> {
        payload.validate()?;

        let mut tx = self.pool.begin().await?;
        if let Err(e) = check_registration_free(&mut tx, payload).await {
            tracing::warn!(username = %payload.username, "Registration failed: {}", e);
            return Err(e);
        }

        let role = role_repository::find_by_name(&mut *tx, APPLICANT_ROLE)
            .await?
            .ok_or_else(|| Error::Internal(format!("Role {} has not been seeded", APPLICANT_ROLE)))?;
        let password_hash = crypto::hash_password(&payload.password)?;

        let person = person_repository::insert(
            &mut *tx,
            person_repository::NewPerson {
                name: &payload.name,
                surname: &payload.surname,
                pnr: &payload.pnr,
                email: &payload.email,
                password_hash: &password_hash,
                username: &payload.username,
                role_id: role.id,
            },
        )
        .await?;
        tx.commit().await?;

        tracing::info!(person_id = person.id, username = %person.username, "Registered new applicant");
        Ok(person)
    }

    pub async fn find_people_by_name(&self, name: &str) -> Result<Vec<Person>> {
        let mut conn = self.pool.acquire().await?;
        person_repository::find_by_name(&mut conn, name).await
    }

    pub async fn find_person_by_email(&self, email: &str) -> Result<Option<Person>> {
        let mut conn = self.pool.acquire().await?;
        person_repository::find_by_email(&mut conn, email).await
    }

    pub async fn find_person_by_username(&self, username: &str) -> Result<Option<Person>> {
        let mut conn = self.pool.acquire().await?;
        person_repository::find_by_username(&mut conn, username).await
    }

    pub async fn find_person_by_pnr(&self, pnr: &str) -> Result<Option<Person>> {
        let mut conn = self.pool.acquire().await?;
        person_repository::find_by_pnr(&mut conn, pnr).await
    }

    pub async fn find_person(&self, lookup: &PersonLookup) -> Result<Person> {
        let found = match lookup {
            PersonLookup::Pnr(pnr) => self.find_person_by_pnr(pnr).await?,
            PersonLookup::Email(email) => self.find_person_by_email(email).await?,
            PersonLookup::Username(username) => self.find_person_by_username(username).await?,
        };
        found.ok_or_else(|| Error::NotFound("Person not found.".to_string()))
    }

    /// Lets a recruiter replace their own pnr and email.
    pub async fn update_recruiter(
        &self,
        person_id: i32,
        payload: &UpdateRecruiterPayload,
    ) -> Result<String> {
        payload.validate()?;

        let mut tx = self.pool.begin().await?;
        let person = person_repository::find_by_id(&mut *tx, person_id)
            .await?
            .ok_or(Error::PersonNotFound(person_id))?;
        require_role(&person, RECRUITER_ROLE)?;
        check_pnr_and_email_free(&mut tx, &payload.pnr, &payload.email, Some(person.id)).await?;

        person_repository::update_pnr_and_email(&mut *tx, person.id, &payload.pnr, &payload.email)
            .await?;
        tx.commit().await?;

        tracing::info!(person_id, "Recruiter updated pnr and email");
        Ok(format!(
            "Updated pnr and email for a reviewer {} to pnr {} and email {}",
            person.name, payload.pnr, payload.email
        ))
    }

    /// First half of the reset flow: records the request and hands back the
    /// token that proves it.
    pub async fn request_applicant_reset(&self, email: &str) -> Result<ResetRequest> {
        let mut tx = self.pool.begin().await?;
        let person = person_repository::find_by_email(&mut *tx, email)
            .await?
            .ok_or_else(|| Error::InvalidPerson("No person with that email exists!".to_string()))?;
        require_role(&person, APPLICANT_ROLE)?;

        let (token, claims) = self.jwt.generate_reset_token(&person.email)?;
        let marker = time::reset_marker(claims.exp)
            .ok_or_else(|| Error::Internal("Reset token expiry is out of range".to_string()))?;
        applicant_reset_repository::insert(&mut *tx, person.id, &marker, claims.random_number)
            .await?;
        tx.commit().await?;

        let link = format!("{}?resetToken={}", self.reset_link_base_url, token);
        tracing::info!(person_id = person.id, %link, "Reset link issued");
        Ok(ResetRequest {
            email: person.email,
            token,
            link,
        })
    }

    /// Second half of the reset flow. The recorded request is consumed, so a
    /// token works once.
    pub async fn apply_applicant_reset(&self, payload: &ApplicantResetPayload) -> Result<String> {
        payload.validate()?;

        let claims = self.jwt.decode_reset_token(&payload.reset_token).ok_or_else(|| {
            Error::InvalidJwt("Token invalid, either out of date or not generated by this system".to_string())
        })?;

        let mut tx = self.pool.begin().await?;
        let person = person_repository::find_by_email(&mut *tx, &claims.sub)
            .await?
            .ok_or_else(|| Error::InvalidPerson("No person with that email exists!".to_string()))?;
        require_role(&person, APPLICANT_ROLE)?;

        let marker = time::reset_marker(claims.exp).unwrap_or_default();
        let reset = applicant_reset_repository::find_matching(&mut *tx, person.id, &marker, claims.random_number)
            .await?
            .ok_or_else(|| {
                Error::InvalidJwt("You gave an invalid but potentially real token, no current request for that person exists in the system. The link may have already been used, in which case you must request a new one.".to_string())
            })?;

        check_username_free(&mut tx, &payload.username, Some(person.id)).await?;
        let password_hash = crypto::hash_password(&payload.password)?;
        person_repository::update_credentials(&mut *tx, person.id, &payload.username, &password_hash)
            .await?;
        applicant_reset_repository::delete(&mut *tx, reset.id).await?;
        tx.commit().await?;

        tracing::info!(person_id = person.id, "Applicant credentials reset");
        Ok(format!("User updated, it now has the username {}", payload.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::person::Role;

    fn person(id: i32, role: &str) -> Person {
        Person {
            id,
            name: "Leroy".to_string(),
            surname: "Crane".to_string(),
            pnr: "20070114-1252".to_string(),
            email: "l_crane118@finnsinte.se".to_string(),
            password: "hash".to_string(),
            username: "badUsername".to_string(),
            role: Role {
                id: 2,
                name: role.to_string(),
            },
        }
    }

    #[test]
    fn lookup_prefers_pnr_then_email_then_username() {
        let lookup = PersonLookup::from_query(
            Some("20070114-1252".into()),
            Some("a@b.se".into()),
            Some("leroy".into()),
        )
        .unwrap();
        assert_eq!(lookup, PersonLookup::Pnr("20070114-1252".into()));

        let lookup = PersonLookup::from_query(Some(" ".into()), None, Some("leroy".into())).unwrap();
        assert_eq!(lookup, PersonLookup::Username("leroy".into()));
    }

    #[test]
    fn lookup_without_identifiers_is_a_bad_request() {
        let err = PersonLookup::from_query(None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Please provide PNR, email, or username for search.");
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn wrong_role_is_an_invalid_person() {
        let err = require_role(&person(1, "recruiter"), APPLICANT_ROLE).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Specified person invalid due to : You are not a applicant, so this endpoint is not for you!"
        );
        assert!(require_role(&person(1, "recruiter"), RECRUITER_ROLE).is_ok());
    }

    #[test]
    fn own_values_are_not_taken() {
        assert!(!taken_by_other(Some(person(4, "recruiter")), Some(4)));
        assert!(taken_by_other(Some(person(4, "recruiter")), Some(5)));
        assert!(taken_by_other(Some(person(4, "recruiter")), None));
        assert!(!taken_by_other(None, None));
    }

    #[test]
    fn serialized_person_has_no_password() {
        let json = serde_json::to_value(person(11, "applicant")).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "badUsername");
    }
}
