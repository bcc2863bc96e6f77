use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

pub const DATABASE_RETRY_MESSAGE: &str = "Failed due to database error, please try again";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid parameter : {0}")]
    InvalidParameter(String),

    #[error("{}", format_validation_errors(.0))]
    Validation(#[from] validator::ValidationErrors),

    #[error("Malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Could not find a person with the following id : {0}")]
    PersonNotFound(i32),

    #[error("Could not find specific competence with id : {0}")]
    CompetenceNotFound(i32),

    #[error("Could not find the following language in the database  : {0}")]
    LanguageNotFound(String),

    #[error("Could not find any translation for the language : {0}")]
    TranslationsNotFound(String),

    #[error("Could not find any matching application due to : {0}")]
    ApplicationNotFound(String),

    #[error("Availability invalid due to : {0}")]
    AvailabilityInvalid(String),

    #[error("Competence profile invalid due to : {0}")]
    CompetenceProfileInvalid(String),

    #[error("The requested resource already exists : {0}")]
    AlreadyExists(String),

    #[error("Could not create availability period since start date {from} is after end date {to}")]
    FromDateAfterToDate { from: NaiveDate, to: NaiveDate },

    #[error("Could not create availability period since range start date {from} to end date {to} is fully covered by an existing availability period")]
    PeriodAlreadyCovered { from: NaiveDate, to: NaiveDate },

    #[error("Could not update application due to : {0}")]
    ApplicationNotUpdated(String),

    #[error("Specified person invalid due to : {0}")]
    InvalidPerson(String),

    #[error("The provided token is invalid due to : {0}")]
    InvalidJwt(String),

    #[error("{}", DATABASE_RETRY_MESSAGE)]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::InvalidParameter(_)
            | Error::Validation(_)
            | Error::Body(_)
            | Error::FromDateAfterToDate { .. }
            | Error::PeriodAlreadyCovered { .. }
            | Error::InvalidJwt(_) => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_)
            | Error::PersonNotFound(_)
            | Error::CompetenceNotFound(_)
            | Error::LanguageNotFound(_)
            | Error::TranslationsNotFound(_)
            | Error::ApplicationNotFound(_)
            | Error::AvailabilityInvalid(_)
            | Error::CompetenceProfileInvalid(_) => StatusCode::NOT_FOUND,
            Error::AlreadyExists(_) | Error::ApplicationNotUpdated(_) | Error::InvalidPerson(_) => {
                StatusCode::CONFLICT
            }
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_message = match &self {
            Error::Database(err) => {
                tracing::error!(error = ?err, "database operation failed");
                self.to_string()
            }
            Error::Config(_) | Error::Internal(_) => {
                tracing::error!(error = %self, "request failed with an internal error");
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(err)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Internal(format!("Token signing failed: {}", err))
    }
}

fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut details: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid ({})", field, err.code),
            })
        })
        .collect();
    details.sort();

    format!(
        "Request contained 1 or more incorrectly formatted parameters, the following are details about the exact issues: {}",
        details.join(" \n")
    )
}
