use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::person_dto::PersonResponse;
use crate::dto::translation_dto::CompetenceResponse;
use crate::models::application::{ApplicationDetails, ApplicationStatus};
use crate::models::availability::Availability;
use crate::models::competence_profile::CompetenceProfile;

#[derive(Debug, Clone, Validate)]
pub struct NewCompetenceProfile {
    #[validate(range(min = 0.0, message = "Years of experience must be non-negative"))]
    pub years_of_experience: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub person_id: i32,
    #[serde(default)]
    pub availability_ids: Vec<i32>,
    #[serde(default)]
    pub competence_profile_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub availability_id: i32,
    pub person_id: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl From<Availability> for AvailabilityResponse {
    fn from(a: Availability) -> Self {
        Self {
            availability_id: a.id,
            person_id: a.person_id,
            from_date: a.from_date,
            to_date: a.to_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetenceProfileResponse {
    pub competence_profile_id: i32,
    pub person_id: i32,
    pub competence: CompetenceResponse,
    pub years_of_experience: f64,
}

impl From<CompetenceProfile> for CompetenceProfileResponse {
    fn from(p: CompetenceProfile) -> Self {
        Self {
            competence_profile_id: p.id,
            person_id: p.person_id,
            competence: p.competence.into(),
            years_of_experience: p.years_of_experience,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub application_id: i32,
    pub applicant: PersonResponse,
    pub availability_periods_for_application: Vec<AvailabilityResponse>,
    pub competence_profiles_for_application: Vec<CompetenceProfileResponse>,
    pub version_number: i32,
    pub application_status: ApplicationStatus,
    pub application_date: NaiveDate,
}

impl From<ApplicationDetails> for ApplicationResponse {
    fn from(details: ApplicationDetails) -> Self {
        Self {
            application_id: details.application.id,
            applicant: details.applicant.into(),
            availability_periods_for_application: details
                .availability
                .into_iter()
                .map(Into::into)
                .collect(),
            competence_profiles_for_application: details
                .competence_profiles
                .into_iter()
                .map(Into::into)
                .collect(),
            version_number: details.application.version,
            application_status: details.application.application_status,
            application_date: details.application.application_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_experience_is_rejected() {
        assert!(NewCompetenceProfile { years_of_experience: -0.5 }.validate().is_err());
        assert!(NewCompetenceProfile { years_of_experience: 0.0 }.validate().is_ok());
    }

    #[test]
    fn submission_reads_camel_case_and_defaults_missing_lists() {
        let body: ApplicationSubmission = serde_json::from_str(r#"{"personId": 3, "availabilityIds": [1, 2]}"#).unwrap();
        assert_eq!(body.person_id, 3);
        assert_eq!(body.availability_ids, vec![1, 2]);
        assert!(body.competence_profile_ids.is_empty());
    }
}
