use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::competence::{Competence, CompetenceTranslation, Language};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetenceResponse {
    pub competence_id: i32,
    pub name: String,
}

impl From<Competence> for CompetenceResponse {
    fn from(competence: Competence) -> Self {
        Self {
            competence_id: competence.id,
            name: competence.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageResponse {
    pub language_id: i32,
    pub name: String,
}

impl From<Language> for LanguageResponse {
    fn from(language: Language) -> Self {
        Self {
            language_id: language.id,
            name: language.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetenceTranslationResponse {
    pub competence_translation_id: i32,
    pub competence: CompetenceResponse,
    pub language: LanguageResponse,
    pub translation: String,
}

impl From<CompetenceTranslation> for CompetenceTranslationResponse {
    fn from(t: CompetenceTranslation) -> Self {
        Self {
            competence_translation_id: t.id,
            competence: t.competence.into(),
            language: t.language.into(),
            translation: t.translation,
        }
    }
}
