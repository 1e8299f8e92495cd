use crate::domain::workout::{CreateLogRequest, GeneratePlanRequest, UpdatePlanRequest};
use crate::presentation::handlers::{ApiError, AppState};
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{error, info, instrument};

#[instrument(skip(state, req), fields(user_id = %user.user_id))]
pub async fn generate_plan(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<GeneratePlanRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(fitness_level = %req.fitness_level, "Plan generation requested");
    let detail = state
        .workout_service
        .generate_plan(&user.user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to generate plan");
            ApiError::from(e)
        })?;
    info!(plan_id = detail.plan.id, "Plan generated");
    Ok(HttpResponse::Created().json(detail))
}

#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn list_plans(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let plans = state.workout_service.list_plans(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(plans))
}

#[instrument(skip(state), fields(user_id = %user.user_id, plan_id = %*path))]
pub async fn get_plan(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let detail = state
        .workout_service
        .get_plan(&user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(detail))
}

#[instrument(skip(state, req), fields(user_id = %user.user_id, plan_id = %*path))]
pub async fn rename_plan(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
    req: web::Json<UpdatePlanRequest>,
) -> Result<HttpResponse, ApiError> {
    let plan = state
        .workout_service
        .rename_plan(&user.user_id, path.into_inner(), req.into_inner().name)
        .await?;
    Ok(HttpResponse::Ok().json(plan))
}

#[instrument(skip(state), fields(user_id = %user.user_id, plan_id = %*path))]
pub async fn delete_plan(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    state
        .workout_service
        .delete_plan(&user.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Workout plan deleted" })))
}

#[instrument(skip(state, req), fields(user_id = %user.user_id))]
pub async fn create_log(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CreateLogRequest>,
) -> Result<HttpResponse, ApiError> {
    let log = state
        .workout_service
        .create_log(&user.user_id, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create log");
            ApiError::from(e)
        })?;
    info!(log_id = log.id, "Workout log created");
    Ok(HttpResponse::Created().json(log))
}

#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn list_logs(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let logs = state.workout_service.list_logs(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(logs))
}

#[instrument(skip(state))]
pub async fn list_exercises(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let exercises = state.workout_service.list_exercises().await?;
    Ok(HttpResponse::Ok().json(exercises))
}

#[instrument(skip(state), fields(exercise_id = %*path))]
pub async fn get_exercise(
    state: web::Data<AppState>,
    _user: AuthenticatedUser,
    path: web::Path<u32>,
) -> Result<HttpResponse, ApiError> {
    let exercise = state
        .workout_service
        .get_exercise(path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(exercise))
}
