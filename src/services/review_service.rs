use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationDetails, ApplicationStatus};
use crate::repositories::application_repository;

fn not_found(application_id: i32) -> Error {
    Error::ApplicationNotFound(format!("No application with id : \"{}\" found", application_id))
}

fn stale() -> Error {
    Error::ApplicationNotFound(
        "Unable to update application since someone else updated it since you last retrived it"
            .to_string(),
    )
}

/// Version is compared before status so a stale reviewer learns about the
/// concurrent update even when they asked for the status it already has.
fn check_status_change(
    current: &Application,
    new_status: ApplicationStatus,
    expected_version: i32,
) -> Result<()> {
    if current.version != expected_version {
        return Err(stale());
    }
    if current.application_status == new_status {
        return Err(Error::ApplicationNotUpdated(format!(
            "application status is already {}",
            new_status
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_applications(&self) -> Result<Vec<ApplicationDetails>> {
        let mut tx = self.pool.begin().await?;
        let applications = application_repository::find_all(&mut *tx).await?;
        let details = application_repository::load_details(&mut *tx, applications).await?;
        tx.commit().await?;
        Ok(details)
    }

    pub async fn get_applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Result<Vec<ApplicationDetails>> {
        let mut tx = self.pool.begin().await?;
        let applications = application_repository::find_by_status(&mut *tx, status).await?;
        let details = application_repository::load_details(&mut *tx, applications).await?;
        tx.commit().await?;
        Ok(details)
    }

    pub async fn get_application_by_id(&self, application_id: i32) -> Result<ApplicationDetails> {
        let mut tx = self.pool.begin().await?;
        let application = application_repository::find_by_id(&mut *tx, application_id)
            .await?
            .ok_or_else(|| not_found(application_id))?;
        let details = application_repository::load_details(&mut *tx, vec![application])
            .await?
            .pop()
            .ok_or_else(|| not_found(application_id))?;
        tx.commit().await?;
        Ok(details)
    }

    pub async fn set_application_status(
        &self,
        application_id: i32,
        new_status: ApplicationStatus,
        expected_version: i32,
    ) -> Result<ApplicationDetails> {
        let mut tx = self.pool.begin().await?;

        let current = application_repository::find_by_id(&mut *tx, application_id)
            .await?
            .ok_or_else(|| not_found(application_id))?;
        if let Err(e) = check_status_change(&current, new_status, expected_version) {
            tracing::warn!(
                application_id,
                expected_version,
                current_version = current.version,
                "Status update rejected: {}",
                e
            );
            return Err(e);
        }

        // A reviewer that committed between our read and this write bumped the
        // version, so the guarded update matches nothing.
        let updated = application_repository::compare_and_set_status(
            &mut *tx,
            application_id,
            expected_version,
            new_status,
        )
        .await?
        .ok_or_else(stale)?;

        let details = application_repository::load_details(&mut *tx, vec![updated])
            .await?
            .pop()
            .ok_or_else(|| not_found(application_id))?;
        tx.commit().await?;

        tracing::info!(
            application_id,
            status = %new_status,
            version = details.application.version,
            "Application status updated"
        );
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn application(status: ApplicationStatus, version: i32) -> Application {
        Application {
            id: 3,
            person_id: 1,
            application_status: status,
            version,
            application_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    #[test]
    fn stale_version_is_reported_as_not_found() {
        let err = check_status_change(&application(ApplicationStatus::Unchecked, 2), ApplicationStatus::Accepted, 1)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not find any matching application due to : Unable to update application since someone else updated it since you last retrived it"
        );
    }

    #[test]
    fn same_status_is_not_an_update() {
        let err = check_status_change(&application(ApplicationStatus::Denied, 0), ApplicationStatus::Denied, 0)
            .unwrap_err();
        assert!(matches!(err, Error::ApplicationNotUpdated(_)));
        assert_eq!(
            err.to_string(),
            "Could not update application due to : application status is already denied"
        );
    }

    #[test]
    fn decided_applications_can_still_be_revised() {
        assert!(check_status_change(&application(ApplicationStatus::Accepted, 4), ApplicationStatus::Denied, 4).is_ok());
        assert!(check_status_change(&application(ApplicationStatus::Unchecked, 0), ApplicationStatus::Accepted, 0).is_ok());
    }

    #[test]
    fn missing_application_message_quotes_the_id() {
        assert_eq!(
            not_found(42).to_string(),
            "Could not find any matching application due to : No application with id : \"42\" found"
        );
    }
}
