use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::competence::{Competence, CompetenceTranslation, Language};
use crate::repositories::competence_repository;

#[derive(Clone)]
pub struct TranslationService {
    pool: PgPool,
}

impl TranslationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_competences(&self) -> Result<Vec<Competence>> {
        let mut conn = self.pool.acquire().await?;
        competence_repository::find_all(&mut conn).await
    }

    pub async fn get_specific_competence(&self, id: i32) -> Result<Competence> {
        let mut conn = self.pool.acquire().await?;
        competence_repository::find_by_id(&mut conn, id)
            .await?
            .ok_or(Error::CompetenceNotFound(id))
    }

    /// Language names are stored lowercase; the lookup folds the request to match.
    pub async fn get_competence_translations(
        &self,
        language_name: &str,
    ) -> Result<Vec<CompetenceTranslation>> {
        let language_name = language_name.trim().to_lowercase();
        let mut conn = self.pool.acquire().await?;

        let language = match competence_repository::find_language_by_name(&mut conn, &language_name).await? {
            Some(language) => language,
            None => {
                tracing::warn!(language = %language_name, "translations requested for unknown language");
                return Err(Error::LanguageNotFound(language_name));
            }
        };

        let translations =
            competence_repository::find_translations_for_language(&mut conn, language.id).await?;
        if translations.is_empty() {
            tracing::warn!(language = %language_name, "language has no translations");
            return Err(Error::TranslationsNotFound(language_name));
        }
        Ok(translations)
    }

    pub async fn get_languages(&self) -> Result<Vec<Language>> {
        let mut conn = self.pool.acquire().await?;
        competence_repository::find_all_languages(&mut conn).await
    }
}
