use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::infrastructure::security::{generate_token, hash_password, verify_password};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: RegisterRequest) -> Result<User> {
        if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
            return Err(DomainError::Validation(
                "Please provide email, name, and password.".to_string(),
            )
            .into());
        }

        if self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .is_some()
        {
            warn!(email = %req.email, "Registration rejected, email already taken");
            return Err(
                DomainError::Conflict("User with this email already exists.".to_string()).into(),
            );
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: req.email,
            name: req.name,
            password_hash,
            profile_picture_url: None,
            created_at: now,
            updated_at: now,
        };

        debug!(user_id = %user.id, "Saving new user");
        self.user_repository.save_user(user.clone()).await?;

        info!(user_id = %user.id, email = %user.email, "User registered successfully");
        Ok(user)
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<String> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(DomainError::Validation(
                "Please provide email and password.".to_string(),
            )
            .into());
        }

        // Unknown email and wrong password produce the same message.
        let user = self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "Login attempt for unknown email");
                DomainError::Unauthorized("Invalid email or password.".to_string())
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(DomainError::Unauthorized("Invalid email or password.".to_string()).into());
        }

        let token = generate_token(&user.id, &self.jwt_secret).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;

        info!(user_id = %user.id, "Login successful");
        Ok(token)
    }
}
