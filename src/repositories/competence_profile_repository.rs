use sqlx::PgConnection;

use crate::error::Result;
use crate::models::competence_profile::CompetenceProfile;

const SELECT_PROFILE: &str = r#"
    SELECT cp.competence_profile_id, cp.person_id, cp.years_of_experience,
           c.competence_id, c.name AS competence_name
    FROM competence_profile cp
    JOIN competence c ON c.competence_id = cp.competence_id
"#;

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<CompetenceProfile>> {
    let sql = format!("{} WHERE cp.competence_profile_id = $1", SELECT_PROFILE);
    let profile = sqlx::query_as::<_, CompetenceProfile>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(profile)
}

pub async fn find_by_person(conn: &mut PgConnection, person_id: i32) -> Result<Vec<CompetenceProfile>> {
    let sql = format!(
        "{} WHERE cp.person_id = $1 ORDER BY cp.competence_profile_id",
        SELECT_PROFILE
    );
    let profiles = sqlx::query_as::<_, CompetenceProfile>(&sql)
        .bind(person_id)
        .fetch_all(conn)
        .await?;
    Ok(profiles)
}

pub async fn insert(
    conn: &mut PgConnection,
    person_id: i32,
    competence_id: i32,
    years_of_experience: f64,
) -> Result<CompetenceProfile> {
    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO competence_profile (person_id, competence_id, years_of_experience)
        VALUES ($1, $2, $3)
        RETURNING competence_profile_id
        "#,
    )
    .bind(person_id)
    .bind(competence_id)
    .bind(years_of_experience)
    .fetch_one(&mut *conn)
    .await?;

    let sql = format!("{} WHERE cp.competence_profile_id = $1", SELECT_PROFILE);
    let profile = sqlx::query_as::<_, CompetenceProfile>(&sql)
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(profile)
}
