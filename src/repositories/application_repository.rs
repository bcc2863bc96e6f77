use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::{FromRow, PgConnection};

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationDetails, ApplicationStatus};
use crate::models::availability::Availability;
use crate::models::competence_profile::CompetenceProfile;

use super::person_repository;

const APPLICATION_COLUMNS: &str =
    "application_id, person_id, application_status, application_version_number, application_date";

#[derive(FromRow)]
struct LinkedAvailability {
    application_id: i32,
    #[sqlx(flatten)]
    availability: Availability,
}

#[derive(FromRow)]
struct LinkedProfile {
    application_id: i32,
    #[sqlx(flatten)]
    profile: CompetenceProfile,
}

pub async fn find_by_id(conn: &mut PgConnection, id: i32) -> Result<Option<Application>> {
    let sql = format!(
        "SELECT {} FROM application WHERE application_id = $1",
        APPLICATION_COLUMNS
    );
    let application = sqlx::query_as::<_, Application>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(application)
}

pub async fn find_all(conn: &mut PgConnection) -> Result<Vec<Application>> {
    let sql = format!(
        "SELECT {} FROM application ORDER BY application_id",
        APPLICATION_COLUMNS
    );
    let applications = sqlx::query_as::<_, Application>(&sql)
        .fetch_all(conn)
        .await?;
    Ok(applications)
}

pub async fn find_by_status(
    conn: &mut PgConnection,
    status: ApplicationStatus,
) -> Result<Vec<Application>> {
    let sql = format!(
        "SELECT {} FROM application WHERE application_status = $1 ORDER BY application_id",
        APPLICATION_COLUMNS
    );
    let applications = sqlx::query_as::<_, Application>(&sql)
        .bind(status.as_str())
        .fetch_all(conn)
        .await?;
    Ok(applications)
}

/// The availability ids of every application the person has submitted, one
/// vector per application.
pub async fn availability_sets_for_person(
    conn: &mut PgConnection,
    person_id: i32,
) -> Result<Vec<Vec<i32>>> {
    let rows = sqlx::query_as::<_, (i32, i32)>(
        r#"
        SELECT a.application_id, aap.availability_id
        FROM application a
        JOIN application_availability_periods aap ON aap.application_id = a.application_id
        WHERE a.person_id = $1
        ORDER BY a.application_id
        "#,
    )
    .bind(person_id)
    .fetch_all(conn)
    .await?;

    let mut sets: HashMap<i32, Vec<i32>> = HashMap::new();
    for (application_id, availability_id) in rows {
        sets.entry(application_id).or_default().push(availability_id);
    }
    Ok(sets.into_values().collect())
}

pub async fn insert(
    conn: &mut PgConnection,
    person_id: i32,
    application_date: NaiveDate,
    availability_ids: &[i32],
    competence_profile_ids: &[i32],
) -> Result<Application> {
    let sql = format!(
        r#"
        INSERT INTO application (person_id, application_status, application_version_number, application_date)
        VALUES ($1, $2, 0, $3)
        RETURNING {}
        "#,
        APPLICATION_COLUMNS
    );
    let application = sqlx::query_as::<_, Application>(&sql)
        .bind(person_id)
        .bind(ApplicationStatus::Unchecked.as_str())
        .bind(application_date)
        .fetch_one(&mut *conn)
        .await?;

    sqlx::query(
        r#"
        INSERT INTO application_availability_periods (application_id, availability_id)
        SELECT $1, UNNEST($2::int4[])
        "#,
    )
    .bind(application.id)
    .bind(availability_ids)
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO application_competence_profiles (application_id, competence_profile_id)
        SELECT $1, UNNEST($2::int4[])
        "#,
    )
    .bind(application.id)
    .bind(competence_profile_ids)
    .execute(&mut *conn)
    .await?;

    Ok(application)
}

/// Writes the new status only if the stored version still equals
/// `expected_version`, bumping the version in the same statement.
/// `None` means another writer got there first (or the row is gone).
pub async fn compare_and_set_status(
    conn: &mut PgConnection,
    application_id: i32,
    expected_version: i32,
    status: ApplicationStatus,
) -> Result<Option<Application>> {
    let sql = format!(
        r#"
        UPDATE application
        SET application_status = $1,
            application_version_number = application_version_number + 1
        WHERE application_id = $2 AND application_version_number = $3
        RETURNING {}
        "#,
        APPLICATION_COLUMNS
    );
    let application = sqlx::query_as::<_, Application>(&sql)
        .bind(status.as_str())
        .bind(application_id)
        .bind(expected_version)
        .fetch_optional(conn)
        .await?;
    Ok(application)
}

/// Loads applicants, periods and profiles for a batch of applications with
/// one query each.
pub async fn load_details(
    conn: &mut PgConnection,
    applications: Vec<Application>,
) -> Result<Vec<ApplicationDetails>> {
    if applications.is_empty() {
        return Ok(Vec::new());
    }

    let application_ids: Vec<i32> = applications.iter().map(|a| a.id).collect();
    let mut person_ids: Vec<i32> = applications.iter().map(|a| a.person_id).collect();
    person_ids.sort_unstable();
    person_ids.dedup();

    let applicants: HashMap<i32, _> = person_repository::find_by_ids(&mut *conn, &person_ids)
        .await?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

    let linked_periods = sqlx::query_as::<_, LinkedAvailability>(
        r#"
        SELECT aap.application_id, av.availability_id, av.person_id, av.from_date, av.to_date
        FROM application_availability_periods aap
        JOIN availability av ON av.availability_id = aap.availability_id
        WHERE aap.application_id = ANY($1)
        ORDER BY av.from_date, av.availability_id
        "#,
    )
    .bind(&application_ids)
    .fetch_all(&mut *conn)
    .await?;

    let linked_profiles = sqlx::query_as::<_, LinkedProfile>(
        r#"
        SELECT acp.application_id, cp.competence_profile_id, cp.person_id, cp.years_of_experience,
               c.competence_id, c.name AS competence_name
        FROM application_competence_profiles acp
        JOIN competence_profile cp ON cp.competence_profile_id = acp.competence_profile_id
        JOIN competence c ON c.competence_id = cp.competence_id
        WHERE acp.application_id = ANY($1)
        ORDER BY cp.competence_profile_id
        "#,
    )
    .bind(&application_ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut periods: HashMap<i32, Vec<Availability>> = HashMap::new();
    for linked in linked_periods {
        periods
            .entry(linked.application_id)
            .or_default()
            .push(linked.availability);
    }

    let mut profiles: HashMap<i32, Vec<CompetenceProfile>> = HashMap::new();
    for linked in linked_profiles {
        profiles
            .entry(linked.application_id)
            .or_default()
            .push(linked.profile);
    }

    applications
        .into_iter()
        .map(|application| -> Result<ApplicationDetails> {
            let applicant = applicants.get(&application.person_id).cloned().ok_or_else(|| {
                Error::Internal(format!(
                    "Applicant {} of application {} is missing",
                    application.person_id, application.id
                ))
            })?;
            Ok(ApplicationDetails {
                availability: periods.remove(&application.id).unwrap_or_default(),
                competence_profiles: profiles.remove(&application.id).unwrap_or_default(),
                applicant,
                application,
            })
        })
        .collect()
}
