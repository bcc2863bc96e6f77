pub mod application_service;
pub mod authentication_service;
pub mod jwt_service;
pub mod person_service;
pub mod review_service;
pub mod translation_service;
