use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use fitplan_api::application::asset_service::AssetService;
use fitplan_api::application::auth_service::AuthService;
use fitplan_api::application::profile_service::ProfileService;
use fitplan_api::application::workout_service::WorkoutService;
use fitplan_api::data::asset_store::{InMemoryAssetRepository, InMemoryObjectStore};
use fitplan_api::data::catalog::InMemoryExerciseCatalog;
use fitplan_api::data::log_repository::InMemoryLogRepository;
use fitplan_api::data::plan_repository::InMemoryPlanRepository;
use fitplan_api::data::user_repository::InMemoryUserRepository;
use fitplan_api::infrastructure::config::AppConfig;
use fitplan_api::infrastructure::logging::init_logging;
use fitplan_api::presentation::handlers::{AppState, health_check};
use fitplan_api::presentation::middleware::{JwtAuthMiddleware, RequestContextMiddleware};
use fitplan_api::presentation::{auth, uploads, users, workouts};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_logging();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;
    info!(bind_address = %config.bind_address, "Configuration loaded");

    let user_repository = Arc::new(InMemoryUserRepository::new());
    let catalog = Arc::new(InMemoryExerciseCatalog::with_default_catalog());
    let plan_repository = Arc::new(InMemoryPlanRepository::new());
    let log_repository = Arc::new(InMemoryLogRepository::new());
    let asset_repository = Arc::new(InMemoryAssetRepository::new());
    let object_store = Arc::new(InMemoryObjectStore::new(config.asset_bucket.clone()));

    let auth_service = Arc::new(AuthService::new(
        user_repository.clone(),
        config.jwt_secret.clone(),
    ));
    let workout_service = Arc::new(WorkoutService::new(
        plan_repository,
        log_repository,
        catalog,
    ));
    let profile_service = Arc::new(ProfileService::new(
        user_repository.clone(),
        object_store.clone(),
    ));
    let asset_service = Arc::new(AssetService::new(asset_repository, object_store));

    let state = web::Data::new(AppState {
        auth_service,
        workout_service,
        profile_service,
        asset_service,
    });
    info!("Application state initialized");

    let jwt_secret = config.jwt_secret.clone();
    let cors_origin = config.cors_allowed_origin.clone();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allow_any_method()
            .allow_any_header();

        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
            .wrap(cors)
            .wrap(RequestContextMiddleware)
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(health_check))
                    .route("/auth/register", web::post().to(auth::register))
                    .route("/auth/login", web::post().to(auth::login))
                    .route("/workouts", web::get().to(workouts::list_plans))
                    .route("/workouts", web::post().to(workouts::generate_plan))
                    .route("/workouts/{id}", web::get().to(workouts::get_plan))
                    .route("/workouts/{id}", web::put().to(workouts::rename_plan))
                    .route("/workouts/{id}", web::delete().to(workouts::delete_plan))
                    .route("/logs", web::get().to(workouts::list_logs))
                    .route("/logs", web::post().to(workouts::create_log))
                    .route("/exercises", web::get().to(workouts::list_exercises))
                    .route("/exercises/{id}", web::get().to(workouts::get_exercise))
                    .route("/users/me", web::get().to(users::get_me))
                    .route("/users/me", web::put().to(users::update_me))
                    .route(
                        "/users/profile-picture",
                        web::get().to(users::get_profile_picture),
                    )
                    .route(
                        "/users/upload-profile-picture",
                        web::post().to(users::upload_profile_picture),
                    )
                    .route("/upload", web::post().to(uploads::upload_asset))
                    .route("/upload", web::get().to(uploads::list_assets)),
            )
    });

    info!(address = %config.bind_address, "Starting HTTP server");
    server.bind(config.bind_address)?.run().await
}
