use sqlx::PgConnection;

use crate::error::Result;
use crate::models::applicant_reset::ApplicantReset;

pub async fn insert(
    conn: &mut PgConnection,
    person_id: i32,
    reset_date: &str,
    random_long: i64,
) -> Result<ApplicantReset> {
    let reset = sqlx::query_as::<_, ApplicantReset>(
        r#"
        INSERT INTO applicant_reset (person_id, reset_date, random_long)
        VALUES ($1, $2, $3)
        RETURNING reset_id, person_id, reset_date, random_long
        "#,
    )
    .bind(person_id)
    .bind(reset_date)
    .bind(random_long)
    .fetch_one(conn)
    .await?;
    Ok(reset)
}

pub async fn find_matching(
    conn: &mut PgConnection,
    person_id: i32,
    reset_date: &str,
    random_long: i64,
) -> Result<Option<ApplicantReset>> {
    let reset = sqlx::query_as::<_, ApplicantReset>(
        r#"
        SELECT reset_id, person_id, reset_date, random_long
        FROM applicant_reset
        WHERE person_id = $1 AND reset_date = $2 AND random_long = $3
        "#,
    )
    .bind(person_id)
    .bind(reset_date)
    .bind(random_long)
    .fetch_optional(conn)
    .await?;
    Ok(reset)
}

pub async fn delete(conn: &mut PgConnection, reset_id: i32) -> Result<()> {
    sqlx::query("DELETE FROM applicant_reset WHERE reset_id = $1")
        .bind(reset_id)
        .execute(conn)
        .await?;
    Ok(())
}
