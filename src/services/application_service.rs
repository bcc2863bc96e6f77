use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::application_dto::NewCompetenceProfile;
use crate::error::{Error, Result};
use crate::models::application::ApplicationDetails;
use crate::models::availability::Availability;
use crate::models::competence_profile::CompetenceProfile;
use crate::repositories::{
    application_repository, availability_repository, competence_profile_repository,
    competence_repository, person_repository,
};
use crate::utils::time::now;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Availability,
    CompetenceProfile,
}

impl Selection {
    fn label(self) -> &'static str {
        match self {
            Selection::Availability => "availability",
            Selection::CompetenceProfile => "competence profile",
        }
    }

    fn invalid(self, reason: String) -> Error {
        match self {
            Selection::Availability => Error::AvailabilityInvalid(reason),
            Selection::CompetenceProfile => Error::CompetenceProfileInvalid(reason),
        }
    }

    fn empty(self) -> Error {
        let what = match self {
            Selection::Availability => "availability period",
            Selection::CompetenceProfile => "competence profile",
        };
        self.invalid(format!(
            "No {} was specified, please specify at least one for this application",
            what
        ))
    }

    fn missing(self, id: i32) -> Error {
        self.invalid(format!("No {} with id {} in the database", self.label(), id))
    }

    fn foreign(self, id: i32) -> Error {
        let what = match self {
            Selection::Availability => "availability period",
            Selection::CompetenceProfile => "competence profile",
        };
        self.invalid(format!("The {} with id {} belongs to another user", what, id))
    }
}

/// Drops repeated ids while keeping the order they were given in.
fn distinct_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = BTreeSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// `owner` is the person the selected row belongs to, `None` when no row exists.
fn check_selected(kind: Selection, id: i32, owner: Option<i32>, person_id: i32) -> Result<()> {
    match owner {
        None => Err(kind.missing(id)),
        Some(owner) if owner != person_id => Err(kind.foreign(id)),
        Some(_) => Ok(()),
    }
}

fn is_duplicate_selection(existing: &[Vec<i32>], requested: &[i32]) -> bool {
    let requested: BTreeSet<i32> = requested.iter().copied().collect();
    existing
        .iter()
        .any(|ids| ids.iter().copied().collect::<BTreeSet<i32>>() == requested)
}

fn check_new_availability(existing: &[Availability], from: NaiveDate, to: NaiveDate) -> Result<()> {
    if from > to {
        return Err(Error::FromDateAfterToDate { from, to });
    }
    if existing.iter().any(|a| a.is_same_period(from, to)) {
        return Err(Error::AlreadyExists(
            "This availability period already exists, so it does not need to be created".to_string(),
        ));
    }
    if existing.iter().any(|a| a.covers(from, to)) {
        return Err(Error::PeriodAlreadyCovered { from, to });
    }
    Ok(())
}

// Only an identical (competence, years) pair counts as a duplicate.
fn check_new_profile(existing: &[CompetenceProfile], competence_id: i32, years: f64) -> Result<()> {
    let duplicate = existing
        .iter()
        .any(|p| p.competence.id == competence_id && p.years_of_experience == years);
    if duplicate {
        return Err(Error::AlreadyExists(
            "This competence profile already exists, so it does not need to be created".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_competence_profile(
        &self,
        competence_id: i32,
        person_id: i32,
        years_of_experience: f64,
    ) -> Result<CompetenceProfile> {
        NewCompetenceProfile {
            years_of_experience,
        }
        .validate()?;

        let mut tx = self.pool.begin().await?;

        if competence_repository::find_by_id(&mut *tx, competence_id)
            .await?
            .is_none()
        {
            tracing::warn!(competence_id, person_id, "competence profile for unknown competence");
            return Err(Error::CompetenceNotFound(competence_id));
        }
        if person_repository::find_by_id(&mut *tx, person_id).await?.is_none() {
            tracing::warn!(person_id, "competence profile for unknown person");
            return Err(Error::PersonNotFound(person_id));
        }

        let existing = competence_profile_repository::find_by_person(&mut *tx, person_id).await?;
        check_new_profile(&existing, competence_id, years_of_experience)?;

        let profile = competence_profile_repository::insert(
            &mut *tx,
            person_id,
            competence_id,
            years_of_experience,
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            profile_id = profile.id,
            person_id,
            competence_id,
            "Created competence profile"
        );
        Ok(profile)
    }

    pub async fn get_competence_profiles_for_person(
        &self,
        person_id: i32,
    ) -> Result<Vec<CompetenceProfile>> {
        let mut tx = self.pool.begin().await?;
        if person_repository::find_by_id(&mut *tx, person_id).await?.is_none() {
            return Err(Error::PersonNotFound(person_id));
        }
        let profiles = competence_profile_repository::find_by_person(&mut *tx, person_id).await?;
        tx.commit().await?;
        Ok(profiles)
    }

    pub async fn create_availability(
        &self,
        person_id: i32,
        from_date: NaiveDate,
        to_date: NaiveDate,
    ) -> Result<Availability> {
        let mut tx = self.pool.begin().await?;

        if person_repository::find_by_id(&mut *tx, person_id).await?.is_none() {
            tracing::warn!(person_id, "availability for unknown person");
            return Err(Error::PersonNotFound(person_id));
        }

        let existing = availability_repository::find_by_person(&mut *tx, person_id).await?;
        if let Err(e) = check_new_availability(&existing, from_date, to_date) {
            tracing::warn!(person_id, %from_date, %to_date, "Rejected availability: {}", e);
            return Err(e);
        }

        let availability =
            availability_repository::insert(&mut *tx, person_id, from_date, to_date).await?;
        tx.commit().await?;

        tracing::info!(
            availability_id = availability.id,
            person_id,
            "Created availability period"
        );
        Ok(availability)
    }

    pub async fn get_availability_for_person(&self, person_id: i32) -> Result<Vec<Availability>> {
        let mut tx = self.pool.begin().await?;
        if person_repository::find_by_id(&mut *tx, person_id).await?.is_none() {
            return Err(Error::PersonNotFound(person_id));
        }
        let periods = availability_repository::find_by_person(&mut *tx, person_id).await?;
        tx.commit().await?;
        Ok(periods)
    }

    pub async fn submit_application(
        &self,
        person_id: i32,
        availability_ids: &[i32],
        competence_profile_ids: &[i32],
    ) -> Result<ApplicationDetails> {
        let mut tx = self.pool.begin().await?;

        if person_repository::find_by_id(&mut *tx, person_id).await?.is_none() {
            tracing::warn!(person_id, "application for unknown person");
            return Err(Error::PersonNotFound(person_id));
        }

        let availability_ids = distinct_ids(availability_ids);
        if availability_ids.is_empty() {
            return Err(Selection::Availability.empty());
        }
        for &id in &availability_ids {
            let owner = availability_repository::find_by_id(&mut *tx, id)
                .await?
                .map(|a| a.person_id);
            check_selected(Selection::Availability, id, owner, person_id)?;
        }

        let submitted = application_repository::availability_sets_for_person(&mut *tx, person_id).await?;
        if is_duplicate_selection(&submitted, &availability_ids) {
            tracing::warn!(person_id, "duplicate application rejected");
            return Err(Error::AvailabilityInvalid(
                "You already have an application with the exact same availability period(s)"
                    .to_string(),
            ));
        }

        let competence_profile_ids = distinct_ids(competence_profile_ids);
        if competence_profile_ids.is_empty() {
            return Err(Selection::CompetenceProfile.empty());
        }
        for &id in &competence_profile_ids {
            let owner = competence_profile_repository::find_by_id(&mut *tx, id)
                .await?
                .map(|p| p.person_id);
            check_selected(Selection::CompetenceProfile, id, owner, person_id)?;
        }

        let application = application_repository::insert(
            &mut *tx,
            person_id,
            now().date_naive(),
            &availability_ids,
            &competence_profile_ids,
        )
        .await?;
        let details = application_repository::load_details(&mut *tx, vec![application])
            .await?
            .pop()
            .ok_or_else(|| Error::Internal("Created application could not be read back".to_string()))?;
        tx.commit().await?;

        tracing::info!(
            application_id = details.application.id,
            person_id,
            "Created new application"
        );
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::competence::Competence;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(id: i32, from: NaiveDate, to: NaiveDate) -> Availability {
        Availability {
            id,
            person_id: 1,
            from_date: from,
            to_date: to,
        }
    }

    #[test]
    fn reversed_range_is_rejected_before_anything_else() {
        let existing = vec![period(1, date(2001, 11, 1), date(2001, 12, 31))];
        let err = check_new_availability(&existing, date(2001, 12, 1), date(2001, 11, 30)).unwrap_err();
        assert!(matches!(err, Error::FromDateAfterToDate { .. }));
    }

    #[test]
    fn single_day_period_is_allowed() {
        assert!(check_new_availability(&[], date(2000, 1, 10), date(2000, 1, 10)).is_ok());
    }

    #[test]
    fn exact_duplicate_is_already_exists() {
        let existing = vec![period(1, date(2000, 1, 10), date(2000, 1, 14))];
        let err = check_new_availability(&existing, date(2000, 1, 10), date(2000, 1, 14)).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[test]
    fn contained_period_is_covered_but_overhangs_are_not() {
        let existing = vec![period(1, date(2000, 1, 10), date(2000, 1, 14))];
        let err = check_new_availability(&existing, date(2000, 1, 10), date(2000, 1, 13)).unwrap_err();
        assert!(matches!(err, Error::PeriodAlreadyCovered { .. }));
        assert!(check_new_availability(&existing, date(2000, 1, 9), date(2000, 1, 13)).is_ok());
        assert!(check_new_availability(&existing, date(2000, 1, 11), date(2000, 1, 15)).is_ok());
    }

    #[test]
    fn profile_duplicates_need_the_same_years() {
        let existing = vec![CompetenceProfile {
            id: 7,
            person_id: 1,
            years_of_experience: 2.5,
            competence: Competence {
                id: 1,
                name: "ticket sales".to_string(),
            },
        }];
        assert!(matches!(
            check_new_profile(&existing, 1, 2.5),
            Err(Error::AlreadyExists(_))
        ));
        assert!(check_new_profile(&existing, 1, 3.0).is_ok());
        assert!(check_new_profile(&existing, 2, 2.5).is_ok());
    }

    #[test]
    fn selection_errors_name_the_offending_id() {
        let err = check_selected(Selection::Availability, 4, None, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Availability invalid due to : No availability with id 4 in the database"
        );
        let err = check_selected(Selection::CompetenceProfile, 9, Some(2), 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Competence profile invalid due to : The competence profile with id 9 belongs to another user"
        );
        assert!(check_selected(Selection::Availability, 4, Some(1), 1).is_ok());
    }

    #[test]
    fn empty_selections_are_rejected_with_their_own_kind() {
        assert!(matches!(
            Selection::Availability.empty(),
            Error::AvailabilityInvalid(_)
        ));
        assert!(matches!(
            Selection::CompetenceProfile.empty(),
            Error::CompetenceProfileInvalid(_)
        ));
    }

    #[test]
    fn duplicate_selection_ignores_order() {
        let existing = vec![vec![3, 1], vec![5]];
        assert!(is_duplicate_selection(&existing, &[1, 3]));
        assert!(!is_duplicate_selection(&existing, &[1]));
        assert!(!is_duplicate_selection(&existing, &[1, 3, 5]));
        assert_eq!(distinct_ids(&[3, 1, 3]), vec![3, 1]);
    }
}
