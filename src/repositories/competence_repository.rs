use sqlx::PgConnection;

use crate::error::Result;
use crate::models::competence::{Competence, CompetenceTranslation, Language};

pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Competence>> {
    let competences = sqlx::query_as::<_, Competence>(
        "SELECT competence_id, name AS competence_name FROM competence ORDER BY competence_id",
    )
    .fetch_all(conn)
    .await?;
    Ok(competences)
}

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Competence>> {
    let competence = sqlx::query_as::<_, Competence>(
        "SELECT competence_id, name AS competence_name FROM competence WHERE competence_id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(competence)
}

pub async fn insert(conn: &mut PgConnection, name: &str) -> Result<Competence> {
    let competence = sqlx::query_as::<_, Competence>(
        "INSERT INTO competence (name) VALUES ($1) RETURNING competence_id, name AS competence_name",
    )
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(competence)
}

pub async fn find_all_languages(conn: &mut PgConnection) -> Result<Vec<Language>> {
    let languages = sqlx::query_as::<_, Language>(
        "SELECT language_id, language_name FROM language ORDER BY language_id",
    )
    .fetch_all(conn)
    .await?;
    Ok(languages)
}

pub async fn find_language_by_name(conn: &mut PgConnection, name: &str) -> Result<Option<Language>> {
    let language = sqlx::query_as::<_, Language>(
        "SELECT language_id, language_name FROM language WHERE language_name = $1",
    )
    .bind(name)
    .fetch_optional(conn)
    .await?;
    Ok(language)
}

pub async fn insert_language_if_missing(conn: &mut PgConnection, name: &str) -> Result<Language> {
    let language = sqlx::query_as::<_, Language>(
        r#"
        INSERT INTO language (language_name) VALUES ($1)
        ON CONFLICT (language_name) DO UPDATE SET language_name = EXCLUDED.language_name
        RETURNING language_id, language_name
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;
    Ok(language)
}

pub async fn find_translations_for_language(
    conn: &mut PgConnection,
    language_id: i32,
) -> Result<Vec<CompetenceTranslation>> {
    let translations = sqlx::query_as::<_, CompetenceTranslation>(
        r#"
        SELECT ct.competence_translation_id, ct.translation,
               c.competence_id, c.name AS competence_name,
               l.language_id, l.language_name
        FROM competence_translation ct
        JOIN competence c ON c.competence_id = ct.competence_id
        JOIN language l ON l.language_id = ct.language_id
        WHERE ct.language_id = $1
        ORDER BY c.competence_id
        "#,
    )
    .bind(language_id)
    .fetch_all(conn)
    .await?;
    Ok(translations)
}

pub async fn insert_translation(
    conn: &mut PgConnection,
    competence_id: i32,
    language_id: i32,
    translation: &str,
) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO competence_translation (competence_id, language_id, translation)
        VALUES ($1, $2, $3)
        ON CONFLICT (competence_id, language_id) DO NOTHING
        "#,
    )
    .bind(competence_id)
    .bind(language_id)
    .bind(translation)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() > 0)
}
