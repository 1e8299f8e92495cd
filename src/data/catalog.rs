use crate::domain::exercise::Exercise;
use crate::domain::repository::ExerciseCatalog;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// In-memory exercise catalog. Backed by a `Vec` so that "catalog storage
/// order" is a concrete, observable property of listings and match results.
#[derive(Clone)]
pub struct InMemoryExerciseCatalog {
    storage: Arc<RwLock<Vec<Exercise>>>,
}

impl InMemoryExerciseCatalog {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(exercises)),
        }
    }

    /// The stock catalog the application ships with.
    pub fn with_default_catalog() -> Self {
        Self::from_exercises(default_exercises())
    }
}

impl Default for InMemoryExerciseCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExerciseCatalog for InMemoryExerciseCatalog {
    async fn list_exercises(&self) -> Result<Vec<Exercise>> {
        let storage = self.storage.read().await;
        Ok(storage.clone())
    }

    async fn find_exercise_by_id(&self, id: u32) -> Result<Option<Exercise>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|e| e.id == id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_matching(&self, equipment: &[String], difficulty: &str) -> Result<Vec<Exercise>> {
        let storage = self.storage.read().await;
        let matches: Vec<Exercise> = storage
            .iter()
            .filter(|e| equipment.iter().any(|tag| *tag == e.equipment) && e.difficulty == difficulty)
            .cloned()
            .collect();
        debug!(
            difficulty = difficulty,
            matched = matches.len(),
            "Catalog match completed"
        );
        Ok(matches)
    }
}

fn default_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            id: 1,
            name: "Push-up".to_string(),
            description: "A bodyweight exercise that targets the chest.".to_string(),
            image_url: "https://example.com/push-up.jpg".to_string(),
            equipment: "bodyweight".to_string(),
            difficulty: "beginner".to_string(),
        },
        Exercise {
            id: 2,
            name: "Squat".to_string(),
            description: "A lower-body exercise that targets the thighs and glutes.".to_string(),
            image_url: "https://example.com/squat.jpg".to_string(),
            equipment: "bodyweight".to_string(),
            difficulty: "beginner".to_string(),
        },
        Exercise {
            id: 3,
            name: "Barbell Deadlift".to_string(),
            description: "A compound exercise that targets the back and legs.".to_string(),
            image_url: "https://example.com/deadlift.jpg".to_string(),
            equipment: "barbell".to_string(),
            difficulty: "intermediate".to_string(),
        },
        Exercise {
            id: 4,
            name: "Intermediate Push-up".to_string(),
            description: "A bodyweight exercise for intermediate level.".to_string(),
            image_url: "https://example.com/push-up.jpg".to_string(),
            equipment: "bodyweight".to_string(),
            difficulty: "intermediate".to_string(),
        },
        Exercise {
            id: 5,
            name: "Intermediate Squat".to_string(),
            description: "A bodyweight exercise for intermediate level.".to_string(),
            image_url: "https://example.com/squat.jpg".to_string(),
            equipment: "bodyweight".to_string(),
            difficulty: "intermediate".to_string(),
        },
    ]
}
