pub mod asset;
pub mod error;
pub mod exercise;
pub mod repository;
pub mod user;
pub mod workout;
