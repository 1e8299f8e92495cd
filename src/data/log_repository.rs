use crate::domain::repository::LogRepository;
use crate::domain::workout::WorkoutLog;
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryLogRepository {
    storage: Arc<RwLock<HashMap<u32, WorkoutLog>>>,
}

impl InMemoryLogRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryLogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogRepository for InMemoryLogRepository {
    #[instrument(skip(self, log), fields(log_id = log.id, user_id = %log.user_id))]
    async fn save_log(&self, log: WorkoutLog) -> Result<()> {
        let mut storage = self.storage.write().await;
        if storage.contains_key(&log.id) {
            bail!("log id {} already in use", log.id);
        }
        debug!(log_id = log.id, plan_id = log.workout_plan_id, "Log saved");
        storage.insert(log.id, log);
        Ok(())
    }

    async fn find_logs_by_user(&self, user_id: &str) -> Result<Vec<WorkoutLog>> {
        let storage = self.storage.read().await;
        let mut logs: Vec<WorkoutLog> = storage
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        // Newest date first; most recently created first on equal dates.
        logs.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(logs)
    }

    #[instrument(skip(self), fields(plan_id = plan_id))]
    async fn delete_logs_for_plan(&self, plan_id: u32) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.retain(|_, log| log.workout_plan_id != plan_id);
        Ok(())
    }
}
