use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::person::{Person, Role};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterPersonPayload {
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Name must not be blank"))]
    pub name: String,
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Surname must not be blank"))]
    pub surname: String,
    #[validate(custom(function = "crate::utils::validation::validate_pnr"))]
    pub pnr: String,
    #[validate(email(message = "Email must be a well-formed email address"))]
    pub email: String,
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Password must not be blank"))]
    pub password: String,
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Username must not be blank"))]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRecruiterPayload {
    #[validate(custom(function = "crate::utils::validation::validate_pnr"))]
    pub pnr: String,
    #[validate(email(message = "Email must be a well-formed email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ApplicantResetPayload {
    pub reset_token: String,
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Username must not be blank"))]
    pub username: String,
    #[validate(custom(function = "crate::utils::validation::not_blank", message = "Password must not be blank"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub role_id: i32,
    pub name: String,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            role_id: role.id,
            name: role.name,
        }
    }
}

/// External view of a person. There is no password field to leak.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonResponse {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub pnr: String,
    pub email: String,
    pub role: RoleResponse,
    pub username: String,
}

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            surname: person.surname,
            pnr: person.pnr,
            email: person.email,
            role: person.role.into(),
            username: person.username,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub message: String,
    pub person: PersonResponse,
}
