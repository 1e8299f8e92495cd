use crate::domain::error::DomainError;
use crate::domain::exercise::Exercise;
use crate::domain::repository::{ExerciseCatalog, LogRepository, PlanRepository};
use crate::domain::workout::{
    CreateLogRequest, GeneratePlanRequest, PrescribedExercise, WorkoutExercise, WorkoutLog,
    WorkoutLogDetail, WorkoutPlan, WorkoutPlanDetail,
};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Fixed default prescription applied to every generated join row. `goals`
/// and `workout_days` are accepted and validated but do not vary these yet;
/// a future generator can key off them here.
const DEFAULT_SETS: u32 = 3;
const DEFAULT_REPS: u32 = 10;

const FITNESS_LEVELS: &[&str] = &["beginner", "intermediate", "advanced"];

pub struct WorkoutService<P: PlanRepository, L: LogRepository, C: ExerciseCatalog> {
    plans: Arc<P>,
    logs: Arc<L>,
    catalog: Arc<C>,
}

impl<P: PlanRepository, L: LogRepository, C: ExerciseCatalog> WorkoutService<P, L, C> {
    pub fn new(plans: Arc<P>, logs: Arc<L>, catalog: Arc<C>) -> Self {
        Self {
            plans,
            logs,
            catalog,
        }
    }

    #[instrument(skip(self, req), fields(user_id = user_id, fitness_level = %req.fitness_level))]
    pub async fn generate_plan(
        &self,
        user_id: &str,
        req: GeneratePlanRequest,
    ) -> Result<WorkoutPlanDetail> {
        validate_generate_request(&req)?;

        let matches = self
            .catalog
            .find_matching(&req.equipment, &req.fitness_level)
            .await?;
        if matches.is_empty() {
            warn!(
                fitness_level = %req.fitness_level,
                equipment = ?req.equipment,
                "No catalog entries matched the request"
            );
            return Err(DomainError::NoMatchingExercises.into());
        }

        let now = Utc::now();
        let name = req
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| format!("Workout Plan {}", now.format("%Y-%m-%d")));

        let plan = WorkoutPlan {
            id: fastrand::u32(..),
            user_id: user_id.to_string(),
            name,
            created_at: now,
            updated_at: now,
        };
        let rows: Vec<WorkoutExercise> = matches
            .iter()
            .map(|exercise| WorkoutExercise {
                id: fastrand::u32(..),
                workout_plan_id: plan.id,
                exercise_id: exercise.id,
                sets: DEFAULT_SETS,
                reps: DEFAULT_REPS,
            })
            .collect();

        // Plan and join rows go down in a single call so a failure never
        // leaves a plan with half its rows.
        self.plans.save_plan(plan.clone(), rows.clone()).await?;

        info!(
            plan_id = plan.id,
            exercises = rows.len(),
            "Workout plan generated"
        );
        Ok(assemble_detail(plan, rows, &matches))
    }

    pub async fn list_plans(&self, user_id: &str) -> Result<Vec<WorkoutPlanDetail>> {
        let plans = self.plans.find_plans_by_user(user_id).await?;
        let mut details = Vec::with_capacity(plans.len());
        for plan in plans {
            details.push(self.expand_plan(plan).await?);
        }
        Ok(details)
    }

    pub async fn get_plan(&self, user_id: &str, plan_id: u32) -> Result<WorkoutPlanDetail> {
        let plan = self.owned_plan(user_id, plan_id).await?;
        self.expand_plan(plan).await
    }

    #[instrument(skip(self, name), fields(user_id = user_id, plan_id = plan_id))]
    pub async fn rename_plan(
        &self,
        user_id: &str,
        plan_id: u32,
        name: Option<String>,
    ) -> Result<WorkoutPlan> {
        let mut plan = self.owned_plan(user_id, plan_id).await?;

        let new_name = match name.filter(|n| !n.is_empty()) {
            Some(n) => n,
            // No name supplied: nothing to change.
            None => return Ok(plan),
        };
        if new_name == plan.name {
            // No-op on identical name, no updated_at bump.
            return Ok(plan);
        }

        plan.name = new_name;
        plan.updated_at = Utc::now();
        self.plans.update_plan(plan.clone()).await?;
        info!(plan_id = plan.id, "Workout plan renamed");
        Ok(plan)
    }

    #[instrument(skip(self), fields(user_id = user_id, plan_id = plan_id))]
    pub async fn delete_plan(&self, user_id: &str, plan_id: u32) -> Result<()> {
        let deleted = self.plans.delete_plan(user_id, plan_id).await?;
        if !deleted {
            return Err(DomainError::NotFound("Workout plan not found".to_string()).into());
        }
        // Logs follow their plan; orphaned history has no display path.
        self.logs.delete_logs_for_plan(plan_id).await?;
        info!(plan_id = plan_id, "Workout plan deleted");
        Ok(())
    }

    #[instrument(skip(self, req), fields(user_id = user_id))]
    pub async fn create_log(&self, user_id: &str, req: CreateLogRequest) -> Result<WorkoutLog> {
        let (plan_id, date) = match (req.workout_plan_id, req.date) {
            (Some(plan_id), Some(date)) => (plan_id, date),
            _ => {
                return Err(DomainError::Validation(
                    "Please provide workoutPlanId and date.".to_string(),
                )
                .into());
            }
        };

        // The shared owner check: a log can only ever reference a plan the
        // caller owns, so nothing is written when this fails.
        self.owned_plan(user_id, plan_id).await?;

        let now = Utc::now();
        let log = WorkoutLog {
            id: fastrand::u32(..),
            user_id: user_id.to_string(),
            workout_plan_id: plan_id,
            date,
            notes: req.notes,
            created_at: now,
            updated_at: now,
        };
        self.logs.save_log(log.clone()).await?;

        info!(log_id = log.id, plan_id = plan_id, "Workout log created");
        Ok(log)
    }

    pub async fn list_logs(&self, user_id: &str) -> Result<Vec<WorkoutLogDetail>> {
        let logs = self.logs.find_logs_by_user(user_id).await?;
        let mut details = Vec::with_capacity(logs.len());
        for log in logs {
            let plan = self
                .plans
                .find_plan(user_id, log.workout_plan_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Internal(format!(
                        "Plan {} missing for log {}",
                        log.workout_plan_id, log.id
                    ))
                })?;
            let workout_plan = self.expand_plan(plan).await?;
            details.push(WorkoutLogDetail { log, workout_plan });
        }
        Ok(details)
    }

    pub async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        self.catalog.list_exercises().await
    }

    pub async fn get_exercise(&self, id: u32) -> Result<Exercise> {
        self.catalog
            .find_exercise_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Exercise not found".to_string()).into())
    }

    async fn owned_plan(&self, user_id: &str, plan_id: u32) -> Result<WorkoutPlan> {
        self.plans
            .find_plan(user_id, plan_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Workout plan not found".to_string()).into())
    }

    async fn expand_plan(&self, plan: WorkoutPlan) -> Result<WorkoutPlanDetail> {
        let rows = self.plans.plan_exercises(plan.id).await?;
        let mut workout_exercises = Vec::with_capacity(rows.len());
        for row in rows {
            let exercise = self
                .catalog
                .find_exercise_by_id(row.exercise_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Internal(format!("Catalog entry {} missing", row.exercise_id))
                })?;
            workout_exercises.push(PrescribedExercise {
                id: row.id,
                sets: row.sets,
                reps: row.reps,
                exercise,
            });
        }
        Ok(WorkoutPlanDetail {
            plan,
            workout_exercises,
        })
    }
}

fn validate_generate_request(req: &GeneratePlanRequest) -> Result<()> {
    if req.fitness_level.is_empty()
        || req.goals.is_empty()
        || req.equipment.is_empty()
        || req.workout_days == 0
    {
        return Err(DomainError::Validation("Missing required fields".to_string()).into());
    }
    if !FITNESS_LEVELS.contains(&req.fitness_level.as_str()) {
        return Err(DomainError::Validation(format!(
            "Unknown fitness level: {}",
            req.fitness_level
        ))
        .into());
    }
    if req.workout_days > 7 {
        return Err(
            DomainError::Validation("workoutDays must be between 1 and 7".to_string()).into(),
        );
    }
    Ok(())
}

fn assemble_detail(
    plan: WorkoutPlan,
    rows: Vec<WorkoutExercise>,
    matches: &[Exercise],
) -> WorkoutPlanDetail {
    let workout_exercises = rows
        .into_iter()
        .zip(matches.iter().cloned())
        .map(|(row, exercise)| PrescribedExercise {
            id: row.id,
            sets: row.sets,
            reps: row.reps,
            exercise,
        })
        .collect();
    WorkoutPlanDetail {
        plan,
        workout_exercises,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::catalog::InMemoryExerciseCatalog;
    use crate::data::log_repository::InMemoryLogRepository;
    use crate::data::plan_repository::InMemoryPlanRepository;

    fn service()
    -> WorkoutService<InMemoryPlanRepository, InMemoryLogRepository, InMemoryExerciseCatalog> {
        WorkoutService::new(
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(InMemoryLogRepository::new()),
            Arc::new(InMemoryExerciseCatalog::with_default_catalog()),
        )
    }

    fn generate_request() -> GeneratePlanRequest {
        GeneratePlanRequest {
            fitness_level: "beginner".to_string(),
            goals: "strength".to_string(),
            equipment: vec!["bodyweight".to_string()],
            workout_days: 3,
            name: None,
        }
    }

    #[tokio::test]
    async fn test_generate_applies_default_prescription() {
        let service = service();
        let detail = service
            .generate_plan("user-a", generate_request())
            .await
            .unwrap();

        assert_eq!(detail.workout_exercises.len(), 2);
        for prescribed in &detail.workout_exercises {
            assert_eq!(prescribed.sets, 3);
            assert_eq!(prescribed.reps, 10);
        }
    }

    #[tokio::test]
    async fn test_generate_default_name_carries_date() {
        let service = service();
        let detail = service
            .generate_plan("user-a", generate_request())
            .await
            .unwrap();

        let expected = format!("Workout Plan {}", Utc::now().format("%Y-%m-%d"));
        assert_eq!(detail.plan.name, expected);
    }

    #[tokio::test]
    async fn test_generate_keeps_supplied_name() {
        let service = service();
        let mut req = generate_request();
        req.name = Some("Leg day".to_string());

        let detail = service.generate_plan("user-a", req).await.unwrap();
        assert_eq!(detail.plan.name, "Leg day");
    }

    #[tokio::test]
    async fn test_generate_empty_match_writes_nothing() {
        let service = service();
        let mut req = generate_request();
        req.equipment = vec!["kettlebell".to_string()];

        let err = service.generate_plan("user-a", req).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NoMatchingExercises)
        ));
        assert!(service.list_plans("user-a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_rejects_out_of_range_workout_days() {
        let service = service();
        for days in [0u8, 8] {
            let mut req = generate_request();
            req.workout_days = days;
            let err = service.generate_plan("user-a", req).await.unwrap_err();
            assert!(matches!(
                err.downcast_ref::<DomainError>(),
                Some(DomainError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_fitness_level() {
        let service = service();
        let mut req = generate_request();
        req.fitness_level = "expert".to_string();

        let err = service.generate_plan("user-a", req).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_rename_identical_name_is_noop() {
        let service = service();
        let detail = service
            .generate_plan("user-a", generate_request())
            .await
            .unwrap();

        let renamed = service
            .rename_plan("user-a", detail.plan.id, Some(detail.plan.name.clone()))
            .await
            .unwrap();
        assert_eq!(renamed.updated_at, detail.plan.updated_at);
    }

    #[tokio::test]
    async fn test_delete_plan_cascades_logs() {
        let service = service();
        let detail = service
            .generate_plan("user-a", generate_request())
            .await
            .unwrap();
        service
            .create_log(
                "user-a",
                CreateLogRequest {
                    workout_plan_id: Some(detail.plan.id),
                    date: Some("2026-01-15".parse().unwrap()),
                    notes: Some("felt good".to_string()),
                },
            )
            .await
            .unwrap();

        service.delete_plan("user-a", detail.plan.id).await.unwrap();
        assert!(service.list_logs("user-a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_log_requires_owned_plan() {
        let service = service();
        let detail = service
            .generate_plan("user-a", generate_request())
            .await
            .unwrap();

        let err = service
            .create_log(
                "user-b",
                CreateLogRequest {
                    workout_plan_id: Some(detail.plan.id),
                    date: Some("2026-01-15".parse().unwrap()),
                    notes: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
        assert!(service.list_logs("user-b").await.unwrap().is_empty());
    }
}
