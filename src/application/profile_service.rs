use crate::domain::error::DomainError;
use crate::domain::repository::{ObjectStore, UserRepository};
use crate::domain::user::{UpdateProfileRequest, User, UserProfile};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

pub struct ProfileService<R: UserRepository, O: ObjectStore> {
    user_repository: Arc<R>,
    object_store: Arc<O>,
}

impl<R: UserRepository, O: ObjectStore> ProfileService<R, O> {
    pub fn new(user_repository: Arc<R>, object_store: Arc<O>) -> Self {
        Self {
            user_repository,
            object_store,
        }
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        Ok(self.owned_user(user_id).await?.into())
    }

    #[instrument(skip(self, req), fields(user_id = user_id))]
    pub async fn update_profile(
        &self,
        user_id: &str,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile> {
        let mut user = self.owned_user(user_id).await?;

        if let Some(email) = req.email.filter(|e| !e.is_empty()) {
            if email != user.email {
                let taken = self
                    .user_repository
                    .find_user_by_email(&email)
                    .await?
                    .is_some_and(|other| other.id != user.id);
                if taken {
                    warn!(user_id = user_id, "Email change rejected, address taken");
                    return Err(DomainError::Conflict(
                        "User with this email already exists.".to_string(),
                    )
                    .into());
                }
                user.email = email;
            }
        }
        if let Some(name) = req.name.filter(|n| !n.is_empty()) {
            user.name = name;
        }

        user.updated_at = Utc::now();
        self.user_repository.update_user(user.clone()).await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user.into())
    }

    pub async fn profile_picture(&self, user_id: &str) -> Result<Option<String>> {
        Ok(self.owned_user(user_id).await?.profile_picture_url)
    }

    /// Validates the bytes as a JPEG/PNG image, stores them, and persists
    /// the resulting URL on the user.
    #[instrument(skip(self, data), fields(user_id = user_id, bytes = data.len()))]
    pub async fn set_profile_picture(&self, user_id: &str, data: Vec<u8>) -> Result<String> {
        let mut user = self.owned_user(user_id).await?;

        let kind = infer::get(&data).ok_or_else(|| {
            DomainError::Validation("Unable to detect file type".to_string())
        })?;
        if !ALLOWED_IMAGE_MIME_TYPES.contains(&kind.mime_type()) {
            return Err(DomainError::Validation(
                "Only JPEG and PNG images are allowed".to_string(),
            )
            .into());
        }

        let key = format!(
            "profile-pictures/{}/{}.{}",
            user_id,
            Uuid::new_v4(),
            kind.extension()
        );
        let url = self.object_store.put_object(&key, data).await?;

        user.profile_picture_url = Some(url.clone());
        user.updated_at = Utc::now();
        self.user_repository.update_user(user).await?;

        info!(user_id = user_id, url = %url, "Profile picture updated");
        Ok(url)
    }

    async fn owned_user(&self, user_id: &str) -> Result<User> {
        self.user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".to_string()).into())
    }
}
