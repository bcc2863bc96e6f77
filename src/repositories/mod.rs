//! Persistence gateways. Every function runs on a borrowed connection so the
//! calling service decides the transaction boundary.

pub mod applicant_reset_repository;
pub mod application_repository;
pub mod availability_repository;
pub mod competence_profile_repository;
pub mod competence_repository;
pub mod person_repository;
pub mod role_repository;
