use crate::domain::exercise::Exercise;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: u32,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Join row between a plan and a catalog exercise with its prescription.
/// Created only in bulk at plan-generation time, never mutated individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutExercise {
    pub id: u32,
    pub workout_plan_id: u32,
    pub exercise_id: u32,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLog {
    pub id: u32,
    pub user_id: String,
    pub workout_plan_id: u32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default)]
    pub fitness_level: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub workout_days: u8,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    #[serde(default)]
    pub workout_plan_id: Option<u32>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A join row with its catalog exercise expanded for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescribedExercise {
    pub id: u32,
    pub sets: u32,
    pub reps: u32,
    pub exercise: Exercise,
}

/// Fully-expanded plan aggregate: the explicit, named fetch shape that
/// replaces implicit relation loading.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlanDetail {
    #[serde(flatten)]
    pub plan: WorkoutPlan,
    pub workout_exercises: Vec<PrescribedExercise>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLogDetail {
    #[serde(flatten)]
    pub log: WorkoutLog,
    pub workout_plan: WorkoutPlanDetail,
}
