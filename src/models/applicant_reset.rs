use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A pending credential reset. `reset_date` holds the expiry of the issued
/// token and `random_long` the number embedded in it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantReset {
    #[sqlx(rename = "reset_id")]
    pub id: i32,
    pub person_id: i32,
    pub reset_date: String,
    pub random_long: i64,
}
