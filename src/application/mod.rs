pub mod asset_service;
pub mod auth_service;
pub mod profile_service;
pub mod workout_service;
