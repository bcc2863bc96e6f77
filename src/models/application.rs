use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::availability::Availability;
use super::competence_profile::CompetenceProfile;
use super::person::Person;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Unchecked,
    Accepted,
    Denied,
}

#[derive(Debug, thiserror::Error)]
#[error("Provided value ({0}) is not valid value for application status, please specify as \"unchecked\",\"accepted\" or \"denied\"")]
pub struct ParseStatusError(pub String);

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Unchecked => "unchecked",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Denied => "denied",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unchecked" => Ok(ApplicationStatus::Unchecked),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "denied" => Ok(ApplicationStatus::Denied),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ApplicationStatus {
    type Error = ParseStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The application row on its own; the linked periods and profiles live in
/// join tables and are loaded by the repository into [`ApplicationDetails`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    #[sqlx(rename = "application_id")]
    pub id: i32,
    pub person_id: i32,
    #[sqlx(try_from = "String")]
    pub application_status: ApplicationStatus,
    #[sqlx(rename = "application_version_number")]
    pub version: i32,
    pub application_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetails {
    pub application: Application,
    pub applicant: Person,
    pub availability: Vec<Availability>,
    pub competence_profiles: Vec<CompetenceProfile>,
}
