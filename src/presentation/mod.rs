pub mod auth;
pub mod handlers;
pub mod middleware;
pub mod uploads;
pub mod users;
pub mod workouts;
