use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::competence::Competence;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompetenceProfile {
    #[sqlx(rename = "competence_profile_id")]
    pub id: i32,
    pub person_id: i32,
    pub years_of_experience: f64,
    #[sqlx(flatten)]
    pub competence: Competence,
}
