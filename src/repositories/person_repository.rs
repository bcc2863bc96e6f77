use sqlx::PgConnection;

use crate::error::{Error, Result};
use crate::models::person::Person;

pub const PNR_TAKEN: &str = "PNR is already in use!";
pub const EMAIL_TAKEN: &str = "Email is already registered!";
pub const USERNAME_TAKEN: &str = "Username is already taken!";

const SELECT_PERSON: &str = r#"
    SELECT p.person_id, p.name, p.surname, p.pnr, p.email, p.password, p.username,
           r.role_id, r.name AS role_name
    FROM person p
    JOIN role r ON r.role_id = p.role_id
"#;

/// Message for a violated unique constraint on `person`, keyed by the
/// constraint names PostgreSQL derives for the inline `UNIQUE` columns.
fn taken_message(constraint: &str) -> Option<&'static str> {
    match constraint {
        "person_pnr_key" => Some(PNR_TAKEN),
        "person_email_key" => Some(EMAIL_TAKEN),
        "person_username_key" => Some(USERNAME_TAKEN),
        _ => None,
    }
}

/// Writes that lose a race against another registration report the same
/// message as the up-front uniqueness checks.
fn map_unique_violation(err: sqlx::Error) -> Error {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            if let Some(message) = db.constraint().and_then(taken_message) {
                return Error::BadRequest(message.to_string());
            }
        }
    }
    Error::Database(err)
}

pub struct NewPerson<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub pnr: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub username: &'a str,
    pub role_id: i32,
}

async fn find_one(conn: &mut PgConnection, column: &str, value: &str) -> Result<Option<Person>> {
    let sql = format!("{} WHERE p.{} = $1", SELECT_PERSON, column);
    let person = sqlx::query_as::<_, Person>(&sql)
        .bind(value)
        .fetch_optional(conn)
        .await?;
    Ok(person)
}

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Person>> {
    let sql = format!("{} WHERE p.person_id = $1", SELECT_PERSON);
    let person = sqlx::query_as::<_, Person>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(person)
}

pub async fn find_by_ids(conn: &mut PgConnection, ids: &[i32]) -> Result<Vec<Person>> {
    let sql = format!("{} WHERE p.person_id = ANY($1)", SELECT_PERSON);
    let persons = sqlx::query_as::<_, Person>(&sql)
        .bind(ids)
        .fetch_all(conn)
        .await?;
    Ok(persons)
}

pub async fn find_by_name(conn: &mut PgConnection, name: &str) -> Result<Vec<Person>> {
    let sql = format!("{} WHERE p.name = $1 ORDER BY p.person_id", SELECT_PERSON);
    let persons = sqlx::query_as::<_, Person>(&sql)
        .bind(name)
        .fetch_all(conn)
        .await?;
    Ok(persons)
}

pub async fn find_by_email(conn: &mut PgConnection, email: &str) -> Result<Option<Person>> {
    find_one(conn, "email", email).await
}

pub async fn find_by_username(conn: &mut PgConnection, username: &str) -> Result<Option<Person>> {
    find_one(conn, "username", username).await
}

pub async fn find_by_pnr(conn: &mut PgConnection, pnr: &str) -> Result<Option<Person>> {
    find_one(conn, "pnr", pnr).await
}

pub async fn insert(conn: &mut PgConnection, new: NewPerson<'_>) -> Result<Person> {
    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO person (name, surname, pnr, email, password, username, role_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING person_id
        "#,
    )
    .bind(new.name)
    .bind(new.surname)
    .bind(new.pnr)
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.username)
    .bind(new.role_id)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_unique_violation)?;

    let sql = format!("{} WHERE p.person_id = $1", SELECT_PERSON);
    let person = sqlx::query_as::<_, Person>(&sql)
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(person)
}

pub async fn update_credentials(
    conn: &mut PgConnection,
    person_id: i32,
    username: &str,
    password_hash: &str,
) -> Result<()> {
    sqlx::query("UPDATE person SET username = $1, password = $2 WHERE person_id = $3")
        .bind(username)
        .bind(password_hash)
        .bind(person_id)
        .execute(conn)
        .await
        .map_err(map_unique_violation)?;
    Ok(())
}

pub async fn update_pnr_and_email(
    conn: &mut PgConnection,
    person_id: i32,
    pnr: &str,
    email: &str,
) -> Result<()> {
    sqlx::query("UPDATE person SET pnr = $1, email = $2 WHERE person_id = $3")
        .bind(pnr)
        .bind(email)
        .bind(person_id)
        .execute(conn)
        .await
        .map_err(map_unique_violation)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_constraints_map_to_registration_messages() {
        assert_eq!(taken_message("person_pnr_key"), Some(PNR_TAKEN));
        assert_eq!(taken_message("person_email_key"), Some(EMAIL_TAKEN));
        assert_eq!(taken_message("person_username_key"), Some(USERNAME_TAKEN));
        assert_eq!(taken_message("role_name_key"), None);
    }

    #[test]
    fn other_errors_stay_database_errors() {
        let err = map_unique_violation(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, Error::Database(sqlx::Error::PoolTimedOut)));
    }
}
