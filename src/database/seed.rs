use sqlx::PgPool;

use crate::error::Result;
use crate::models::competence::Competence;
use crate::models::person::{APPLICANT_ROLE, RECRUITER_ROLE};
use crate::repositories::{competence_repository, role_repository};

const STANDARD_COMPETENCES: [&str; 3] = ["ticket sales", "lotteries", "roller coaster operation"];

// (language, translations in STANDARD_COMPETENCES order)
const SEEDED_TRANSLATIONS: [(&str, [&str; 3]); 2] = [
    ("english", ["Ticket sales", "Lotteries", "Roller coaster operation"]),
    ("swedish", ["Biljettförsäljning", "Lotterier", "Berg- och dalbanedrift"]),
];

/// Pairs each stored standard competence with its translation. Competences
/// stored under other names get nothing.
fn translations_for<'a>(competences: &[Competence], translations: [&'a str; 3]) -> Vec<(i32, &'a str)> {
    STANDARD_COMPETENCES
        .iter()
        .zip(translations)
        .filter_map(|(name, translation)| {
            competences
                .iter()
                .find(|c| c.name == *name)
                .map(|c| (c.id, translation))
        })
        .collect()
}

/// Loads reference data. Safe to run on every start: existing rows are kept
/// and a language only gets translations when it has none.
pub async fn seed_reference_data(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    for role in [RECRUITER_ROLE, APPLICANT_ROLE] {
        if role_repository::insert_if_missing(&mut *tx, role).await? {
            tracing::info!(%role, "Seeded role");
        }
    }

    let mut competences = competence_repository::find_all(&mut *tx).await?;
    if competences.is_empty() {
        for name in STANDARD_COMPETENCES {
            competences.push(competence_repository::insert(&mut *tx, name).await?);
        }
        tracing::info!(count = competences.len(), "Seeded standard competences");
    }

    for (language_name, translations) in SEEDED_TRANSLATIONS {
        let language = competence_repository::insert_language_if_missing(&mut *tx, language_name).await?;
        let existing =
            competence_repository::find_translations_for_language(&mut *tx, language.id).await?;
        if !existing.is_empty() {
            tracing::info!(
                language = %language_name,
                count = existing.len(),
                "Translations already present"
            );
            continue;
        }
        let mut inserted = 0;
        for (competence_id, translation) in translations_for(&competences, translations) {
            if competence_repository::insert_translation(&mut *tx, competence_id, language.id, translation)
                .await?
            {
                inserted += 1;
            }
        }
        if inserted == 0 {
            tracing::warn!(
                language = %language_name,
                "No standard competences stored, no translations seeded"
            );
        } else {
            tracing::info!(language = %language_name, count = inserted, "Seeded translations");
        }
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competence(id: i32, name: &str) -> Competence {
        Competence {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn translations_follow_competence_names() {
        let stored = [competence(7, "lotteries"), competence(3, "ticket sales")];
        let english = SEEDED_TRANSLATIONS[0].1;
        assert_eq!(
            translations_for(&stored, english),
            vec![(3, "Ticket sales"), (7, "Lotteries")]
        );
    }

    #[test]
    fn unknown_competences_get_no_translations() {
        let stored = [competence(1, "welding"), competence(2, "catering")];
        assert!(translations_for(&stored, SEEDED_TRANSLATIONS[1].1).is_empty());
    }
}
