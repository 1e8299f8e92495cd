use crate::domain::repository::PlanRepository;
use crate::domain::workout::{WorkoutExercise, WorkoutPlan};
use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

struct PlanRecord {
    plan: WorkoutPlan,
    exercises: Vec<WorkoutExercise>,
}

/// In-memory plan store. A plan and its join rows live in one record, so
/// `save_plan` writes them together and `delete_plan` cascades them together.
#[derive(Clone)]
pub struct InMemoryPlanRepository {
    storage: Arc<RwLock<HashMap<u32, PlanRecord>>>,
}

impl InMemoryPlanRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPlanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlanRepository for InMemoryPlanRepository {
    #[instrument(skip(self, plan, exercises), fields(plan_id = plan.id, user_id = %plan.user_id))]
    async fn save_plan(&self, plan: WorkoutPlan, exercises: Vec<WorkoutExercise>) -> Result<()> {
        let mut storage = self.storage.write().await;
        // Ids are random; a collision must fail loudly, never overwrite.
        if storage.contains_key(&plan.id) {
            bail!("plan id {} already in use", plan.id);
        }
        debug!(
            plan_id = plan.id,
            exercise_rows = exercises.len(),
            "Saving plan with join rows"
        );
        storage.insert(plan.id, PlanRecord { plan, exercises });
        Ok(())
    }

    async fn find_plans_by_user(&self, user_id: &str) -> Result<Vec<WorkoutPlan>> {
        let storage = self.storage.read().await;
        let mut plans: Vec<WorkoutPlan> = storage
            .values()
            .filter(|r| r.plan.user_id == user_id)
            .map(|r| r.plan.clone())
            .collect();
        plans.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(plans)
    }

    async fn find_plan(&self, user_id: &str, plan_id: u32) -> Result<Option<WorkoutPlan>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(&plan_id)
            .filter(|r| r.plan.user_id == user_id)
            .map(|r| r.plan.clone()))
    }

    async fn plan_exercises(&self, plan_id: u32) -> Result<Vec<WorkoutExercise>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(&plan_id)
            .map(|r| r.exercises.clone())
            .unwrap_or_default())
    }

    async fn update_plan(&self, plan: WorkoutPlan) -> Result<()> {
        let mut storage = self.storage.write().await;
        if let Some(record) = storage.get_mut(&plan.id) {
            record.plan = plan;
        }
        Ok(())
    }

    #[instrument(skip(self), fields(plan_id = plan_id, user_id = user_id))]
    async fn delete_plan(&self, user_id: &str, plan_id: u32) -> Result<bool> {
        let mut storage = self.storage.write().await;
        let owned = storage
            .get(&plan_id)
            .is_some_and(|r| r.plan.user_id == user_id);
        if !owned {
            return Ok(false);
        }
        storage.remove(&plan_id);
        debug!(plan_id = plan_id, "Plan and join rows deleted");
        Ok(true)
    }
}
