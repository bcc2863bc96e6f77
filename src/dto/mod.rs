pub mod application_dto;
pub mod auth_dto;
pub mod common;
pub mod person_dto;
pub mod translation_dto;
