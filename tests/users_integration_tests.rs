use actix_web::{App, test, web};
use fitplan_api::application::asset_service::AssetService;
use fitplan_api::application::auth_service::AuthService;
use fitplan_api::application::profile_service::ProfileService;
use fitplan_api::application::workout_service::WorkoutService;
use fitplan_api::data::asset_store::{InMemoryAssetRepository, InMemoryObjectStore};
use fitplan_api::data::catalog::InMemoryExerciseCatalog;
use fitplan_api::data::log_repository::InMemoryLogRepository;
use fitplan_api::data::plan_repository::InMemoryPlanRepository;
use fitplan_api::data::user_repository::InMemoryUserRepository;
use fitplan_api::presentation::handlers::AppState;
use fitplan_api::presentation::middleware::JwtAuthMiddleware;
use fitplan_api::presentation::{auth, uploads, users};
use std::sync::Arc;

const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

macro_rules! setup_users_test {
    () => {{
        let user_repository = Arc::new(InMemoryUserRepository::new());
        let jwt_secret = "test-secret-key-for-user-tests".to_string();
        let auth_service = Arc::new(AuthService::new(
            user_repository.clone(),
            jwt_secret.clone(),
        ));
        let workout_service = Arc::new(WorkoutService::new(
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(InMemoryLogRepository::new()),
            Arc::new(InMemoryExerciseCatalog::with_default_catalog()),
        ));
        let object_store = Arc::new(InMemoryObjectStore::new("test-bucket"));
        let profile_service = Arc::new(ProfileService::new(
            user_repository.clone(),
            object_store.clone(),
        ));
        let asset_service = Arc::new(AssetService::new(
            Arc::new(InMemoryAssetRepository::new()),
            object_store,
        ));

        let state = web::Data::new(AppState {
            auth_service,
            workout_service,
            profile_service,
            asset_service,
        });

        test::init_service(
            App::new()
                .app_data(state.clone())
                .wrap(JwtAuthMiddleware::new(jwt_secret))
                .service(
                    web::scope("/api")
                        .route("/auth/register", web::post().to(auth::register))
                        .route("/auth/login", web::post().to(auth::login))
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
                ),
        )
        .await
    }};
}

macro_rules! register_and_login {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "name": "Test User",
                "email": $email,
                "password": "password123"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": $email,
                "password": "password123"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        body["token"].as_str().unwrap().to_string()
    }};
}

fn multipart_body(file_name: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "-----------------------------testboundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
            boundary, file_name, content_type
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}

#[actix_web::test]
async fn test_get_me_returns_profile() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "me@example.com");

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "me@example.com");
    assert_eq!(body["name"], "Test User");
    assert!(body["profilePictureUrl"].is_null());
}

#[actix_web::test]
async fn test_update_me_changes_name() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "update@example.com");

    let req = test::TestRequest::put()
        .uri("/api/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "name": "Renamed User" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Renamed User");
    assert_eq!(body["email"], "update@example.com");

    let req = test::TestRequest::get()
        .uri("/api/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Renamed User");
}

#[actix_web::test]
async fn test_update_me_email_conflict() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "original@example.com");
    register_and_login!(app, "taken@example.com");

    let req = test::TestRequest::put()
        .uri("/api/users/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(serde_json::json!({ "email": "taken@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_profile_picture_initially_null() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "nopicture@example.com");

    let req = test::TestRequest::get()
        .uri("/api/users/profile-picture")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["profilePictureUrl"].is_null());
}

#[actix_web::test]
async fn test_upload_profile_picture_png() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "picture@example.com");

    let (content_type, body) = multipart_body("avatar.png", "image/png", PNG_MAGIC);
    let req = test::TestRequest::post()
        .uri("/api/users/upload-profile-picture")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let url = body["profilePictureUrl"].as_str().unwrap();
    assert!(url.contains("profile-pictures/"));
    assert!(url.ends_with(".png"));

    // Subsequent reads return the stored URL
    let req = test::TestRequest::get()
        .uri("/api/users/profile-picture")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["profilePictureUrl"].as_str().unwrap(), url);
}

#[actix_web::test]
async fn test_upload_profile_picture_rejects_non_image() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "notimage@example.com");

    let (content_type, body) = multipart_body("notes.txt", "text/plain", b"just some text");
    let req = test::TestRequest::post()
        .uri("/api/users/upload-profile-picture")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_generic_upload_and_list() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "uploader@example.com");

    let (content_type, body) = multipart_body("report.pdf", "application/pdf", b"%PDF-1.4 data");
    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let url = body["fileUrl"].as_str().unwrap();
    assert!(url.contains("uploads/"));
    assert!(url.ends_with("report.pdf"));

    let req = test::TestRequest::get()
        .uri("/api/upload")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let assets = body.as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["fileName"], "report.pdf");
}

#[actix_web::test]
async fn test_upload_empty_body_rejected() {
    let app = setup_users_test!();
    let token = register_and_login!(app, "empty@example.com");

    let (content_type, body) = multipart_body("empty.bin", "application/octet-stream", b"");
    let req = test::TestRequest::post()
        .uri("/api/upload")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .insert_header(("Content-Type", content_type))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "No file uploaded.");
}
