pub mod applicant_reset;
pub mod application;
pub mod availability;
pub mod competence;
pub mod competence_profile;
pub mod person;
