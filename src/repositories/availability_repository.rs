use chrono::NaiveDate;
use sqlx::PgConnection;

use crate::error::Result;
use crate::models::availability::Availability;

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Availability>> {
    let availability = sqlx::query_as::<_, Availability>(
        "SELECT availability_id, person_id, from_date, to_date FROM availability WHERE availability_id = $1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(availability)
}

pub async fn find_by_person(conn: &mut PgConnection, person_id: i32) -> Result<Vec<Availability>> {
    let periods = sqlx::query_as::<_, Availability>(
        r#"
        SELECT availability_id, person_id, from_date, to_date
        FROM availability
        WHERE person_id = $1
        ORDER BY from_date, availability_id
        "#,
    )
    .bind(person_id)
    .fetch_all(conn)
    .await?;
    Ok(periods)
}

pub async fn insert(
    conn: &mut PgConnection,
    person_id: i32,
    from_date: NaiveDate,
    to_date: NaiveDate,
) -> Result<Availability> {
    let availability = sqlx::query_as::<_, Availability>(
        r#"
        INSERT INTO availability (person_id, from_date, to_date)
        VALUES ($1, $2, $3)
        RETURNING availability_id, person_id, from_date, to_date
        "#,
    )
    .bind(person_id)
    .bind(from_date)
    .bind(to_date)
    .fetch_one(conn)
    .await?;
    Ok(availability)
}
