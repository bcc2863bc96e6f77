use sqlx::PgConnection;

use crate::error::Result;
use crate::models::person::Role;

pub async fn find_by_name(conn: &mut PgConnection, name: &str) -> Result<Option<Role>> {
    let role = sqlx::query_as::<_, Role>("SELECT role_id, name AS role_name FROM role WHERE name = $1")
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(role)
}

pub async fn insert_if_missing(conn: &mut PgConnection, name: &str) -> Result<bool> {
    let result = sqlx::query("INSERT INTO role (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
        .bind(name)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}
