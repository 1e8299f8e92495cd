use crate::domain::asset::Asset;
use crate::domain::error::DomainError;
use crate::domain::repository::{AssetRepository, ObjectStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct AssetService<A: AssetRepository, O: ObjectStore> {
    assets: Arc<A>,
    object_store: Arc<O>,
}

impl<A: AssetRepository, O: ObjectStore> AssetService<A, O> {
    pub fn new(assets: Arc<A>, object_store: Arc<O>) -> Self {
        Self {
            assets,
            object_store,
        }
    }

    #[instrument(skip(self, data), fields(user_id = user_id, bytes = data.len()))]
    pub async fn upload(
        &self,
        user_id: &str,
        file_name: Option<String>,
        data: Vec<u8>,
    ) -> Result<Asset> {
        if data.is_empty() {
            return Err(DomainError::Validation("No file uploaded.".to_string()).into());
        }

        let file_name = file_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("upload-{}", Uuid::new_v4()));
        // Unique key prefix so identical file names never collide.
        let key = format!("uploads/{}-{}", Uuid::new_v4(), file_name);
        let file_url = self.object_store.put_object(&key, data).await?;

        let asset = Asset {
            id: fastrand::u32(..),
            user_id: user_id.to_string(),
            file_url,
            file_name,
        };
        self.assets.save_asset(asset.clone()).await?;

        info!(asset_id = asset.id, url = %asset.file_url, "Asset uploaded");
        Ok(asset)
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Asset>> {
        self.assets.find_assets_by_user(user_id).await
    }
}
