use crate::domain::user::UpdateProfileRequest;
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use crate::presentation::uploads::{MAX_UPLOAD_BYTES, read_file_field};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use tracing::{info, instrument};

#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn get_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let profile = state.profile_service.get_profile(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state, req), fields(user_id = %user.user_id))]
pub async fn update_me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let profile = state
        .profile_service
        .update_profile(&user.user_id, req.into_inner())
        .await?;
    info!("Profile updated");
    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn get_profile_picture(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let url = state.profile_service.profile_picture(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "profilePictureUrl": url })))
}

#[instrument(skip(state, req, payload), fields(user_id = %user.user_id))]
pub async fn upload_profile_picture(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let file = read_file_field(&req, payload, MAX_UPLOAD_BYTES).await?;

    let url = state
        .profile_service
        .set_profile_picture(&user.user_id, file.data)
        .await?;

    info!("Profile picture updated");
    Ok(HttpResponse::Ok().json(json!({ "profilePictureUrl": url })))
}
