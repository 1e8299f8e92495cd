use crate::application::asset_service::AssetService;
use crate::application::auth_service::AuthService;
use crate::application::profile_service::ProfileService;
use crate::application::workout_service::WorkoutService;
use crate::data::asset_store::{InMemoryAssetRepository, InMemoryObjectStore};
use crate::data::catalog::InMemoryExerciseCatalog;
use crate::data::log_repository::InMemoryLogRepository;
use crate::data::plan_repository::InMemoryPlanRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{FromRequest, HttpMessage, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Serialize;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// AppState holding the services
pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
    pub workout_service: Arc<
        WorkoutService<InMemoryPlanRepository, InMemoryLogRepository, InMemoryExerciseCatalog>,
    >,
    pub profile_service: Arc<ProfileService<InMemoryUserRepository, InMemoryObjectStore>>,
    pub asset_service: Arc<AssetService<InMemoryAssetRepository, InMemoryObjectStore>>,
}

// Every failure body is a bare human-readable message.
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match self {
            ApiError::Validation(_) => actix_web::http::StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => actix_web::http::StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => actix_web::http::StatusCode::CONFLICT,
            ApiError::NotFound(_) => actix_web::http::StatusCode::NOT_FOUND,
            ApiError::Internal(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = self.to_string();

        match self {
            ApiError::Validation(_) => {
                warn!(message = %message, status = %status, "Validation error")
            }
            ApiError::Unauthorized(_) => {
                warn!(message = %message, status = %status, "Unauthorized")
            }
            ApiError::Conflict(_) => warn!(message = %message, status = %status, "Conflict"),
            ApiError::NotFound(_) => {
                warn!(message = %message, status = %status, "Resource not found")
            }
            ApiError::Internal(_) => {
                error!(message = %message, status = %status, "Internal error")
            }
        }

        // Internal details stay in the logs; clients get a generic message.
        let body = if matches!(self, ApiError::Internal(_)) {
            "Server error".to_string()
        } else {
            message
        };
        HttpResponse::build(status).json(ErrorResponse { message: body })
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DomainError>() {
            Some(DomainError::Validation(msg)) => ApiError::Validation(msg.clone()),
            Some(DomainError::NoMatchingExercises) => {
                ApiError::Validation("No exercises found matching criteria".to_string())
            }
            Some(DomainError::Conflict(msg)) => ApiError::Conflict(msg.clone()),
            Some(DomainError::NotFound(msg)) => ApiError::NotFound(msg.clone()),
            Some(DomainError::Unauthorized(msg)) => ApiError::Unauthorized(msg.clone()),
            Some(DomainError::Internal(msg)) => ApiError::Internal(msg.clone()),
            None => ApiError::Internal(err.to_string()),
        }
    }
}

// AuthenticatedUser extractor: the bearer middleware puts the identity into
// request extensions; handlers receive it as a plain argument.
impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move {
            user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}
