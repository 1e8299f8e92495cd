pub mod asset_store;
pub mod catalog;
pub mod log_repository;
pub mod plan_repository;
pub mod user_repository;
