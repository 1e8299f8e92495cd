use crate::domain::asset::Asset;
use crate::domain::exercise::Exercise;
use crate::domain::user::User;
use crate::domain::workout::{WorkoutExercise, WorkoutLog, WorkoutPlan};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save_user(&self, user: User) -> Result<()>;
    async fn update_user(&self, user: User) -> Result<()>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// All entries in catalog storage order.
    async fn list_exercises(&self) -> Result<Vec<Exercise>>;
    async fn find_exercise_by_id(&self, id: u32) -> Result<Option<Exercise>>;
    /// Entries whose equipment tag is in `equipment` and whose difficulty tag
    /// equals `difficulty`. Exact, case-sensitive matches, storage order.
    async fn find_matching(&self, equipment: &[String], difficulty: &str) -> Result<Vec<Exercise>>;
}

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Persists a plan together with its join rows in one step.
    async fn save_plan(&self, plan: WorkoutPlan, exercises: Vec<WorkoutExercise>) -> Result<()>;
    async fn find_plans_by_user(&self, user_id: &str) -> Result<Vec<WorkoutPlan>>;
    /// Ownership-scoped lookup: a plan owned by another user resolves to
    /// `None`, indistinguishable from a missing plan.
    async fn find_plan(&self, user_id: &str, plan_id: u32) -> Result<Option<WorkoutPlan>>;
    async fn plan_exercises(&self, plan_id: u32) -> Result<Vec<WorkoutExercise>>;
    async fn update_plan(&self, plan: WorkoutPlan) -> Result<()>;
    /// Removes the plan and its join rows; returns whether anything was
    /// deleted under the caller's ownership.
    async fn delete_plan(&self, user_id: &str, plan_id: u32) -> Result<bool>;
}

#[async_trait]
pub trait LogRepository: Send + Sync {
    async fn save_log(&self, log: WorkoutLog) -> Result<()>;
    /// The caller's logs, newest date first.
    async fn find_logs_by_user(&self, user_id: &str) -> Result<Vec<WorkoutLog>>;
    async fn delete_logs_for_plan(&self, plan_id: u32) -> Result<()>;
}

#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn save_asset(&self, asset: Asset) -> Result<()>;
    async fn find_assets_by_user(&self, user_id: &str) -> Result<Vec<Asset>>;
}

/// Seam to the external object-storage collaborator.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores the bytes under `key` and returns the resulting URL.
    async fn put_object(&self, key: &str, data: Vec<u8>) -> Result<String>;
}
