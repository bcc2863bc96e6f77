use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const APPLICANT_ROLE: &str = "applicant";
pub const RECRUITER_ROLE: &str = "recruiter";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Role {
    #[sqlx(rename = "role_id")]
    pub id: i32,
    #[sqlx(rename = "role_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Person {
    #[sqlx(rename = "person_id")]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub pnr: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub username: String,
    #[sqlx(flatten)]
    pub role: Role,
}

impl Person {
    pub fn has_role(&self, role: &str) -> bool {
        self.role.name == role
    }
}
