use crate::domain::asset::Asset;
use crate::domain::repository::{AssetRepository, ObjectStore};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryAssetRepository {
    storage: Arc<RwLock<HashMap<u32, Asset>>>,
}

impl InMemoryAssetRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAssetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetRepository for InMemoryAssetRepository {
    #[instrument(skip(self, asset), fields(asset_id = asset.id, user_id = %asset.user_id))]
    async fn save_asset(&self, asset: Asset) -> Result<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(&asset.id) {
            bail!("asset id {} already in use", asset.id);
        }
        storage.insert(asset.id, asset);
        Ok(())
    }

    async fn find_assets_by_user(&self, user_id: &str) -> Result<Vec<Asset>> {
        let storage = self.storage.read().await;
        let mut assets: Vec<Asset> = storage
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        assets.sort_by_key(|a| a.id);
        Ok(assets)
    }
}

/// In-memory stand-in for the object-storage collaborator. Returns the
/// `s3://<bucket>/<key>` URI a real bucket upload would yield.
#[derive(Clone)]
pub struct InMemoryObjectStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryObjectStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    #[instrument(skip(self, data), fields(key = key, bytes = data.len()))]
    async fn put_object(&self, key: &str, data: Vec<u8>) -> Result<String> {
        let mut objects = self.objects.write().await;
        objects.insert(key.to_string(), data);
        let uri = format!("s3://{}/{}", self.bucket, key);
        debug!(uri = %uri, "Object stored");
        Ok(uri)
    }
}
