use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Competence {
    #[sqlx(rename = "competence_id")]
    pub id: i32,
    #[sqlx(rename = "competence_name")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Language {
    #[sqlx(rename = "language_id")]
    pub id: i32,
    #[sqlx(rename = "language_name")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CompetenceTranslation {
    #[sqlx(rename = "competence_translation_id")]
    pub id: i32,
    pub translation: String,
    #[sqlx(flatten)]
    pub competence: Competence,
    #[sqlx(flatten)]
    pub language: Language,
}
