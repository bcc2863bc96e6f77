use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::{
    dto::translation_dto::{CompetenceResponse, CompetenceTranslationResponse, LanguageResponse},
    error::Result,
    routes::params::{parse_int, required},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

#[utoipa::path(
    get,
    path = "/translation/getStandardCompetences",
    responses((status = 200, description = "All competences", body = Vec<CompetenceResponse>))
)]
#[axum::debug_handler]
pub async fn get_standard_competences(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let competences = state.translation_service.get_competences().await?;
    Ok(Json(
        competences
            .into_iter()
            .map(CompetenceResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/translation/getSpecificCompetence/{id}",
    params(("id" = String, Path, description = "Competence id")),
    responses(
        (status = 200, description = "The competence", body = CompetenceResponse),
        (status = 400, description = "Invalid parameter"),
        (status = 404, description = "Competence not found")
    )
)]
#[axum::debug_handler]
pub async fn get_specific_competence(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = parse_int(&id)?;
    let competence = state.translation_service.get_specific_competence(id).await?;
    Ok(Json(CompetenceResponse::from(competence)))
}

#[utoipa::path(
    get,
    path = "/translation/getCompetenceTranslation",
    params(("language" = String, Query, description = "Language name, any case")),
    responses(
        (status = 200, description = "Translations for the language", body = Vec<CompetenceTranslationResponse>),
        (status = 404, description = "Unknown language or no translations")
    )
)]
#[axum::debug_handler]
pub async fn get_competence_translation(
    State(state): State<AppState>,
    Query(query): Query<LanguageQuery>,
) -> Result<impl IntoResponse> {
    let language = required("language", query.language)?;
    let translations = state
        .translation_service
        .get_competence_translations(&language)
        .await?;
    Ok(Json(
        translations
            .into_iter()
            .map(CompetenceTranslationResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/translation/getLanguages",
    responses((status = 200, description = "Supported languages", body = Vec<LanguageResponse>))
)]
#[axum::debug_handler]
pub async fn get_languages(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let languages = state.translation_service.get_languages().await?;
    Ok(Json(
        languages
            .into_iter()
            .map(LanguageResponse::from)
            .collect::<Vec<_>>(),
    ))
}
