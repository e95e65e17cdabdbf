/*
 * The exercise catalog capability. `ExerciseCatalog` describes the lookups the
 * application needs; `InMemoryExerciseCatalog` answers them from a fixed list
 * after a simulated network delay. Every exercise handed out carries
 * `is_favorite = Some(false)`; callers recompute the flag from the favorites
 * slice.
 */
use crate::core::models::Exercise;
use std::collections::BTreeSet;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Unavailable(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Unavailable(reason) => write!(f, "Failed to fetch exercises: {reason}"),
        }
    }
}

impl std::error::Error for CatalogError {}

pub type Result<T> = std::result::Result<T, CatalogError>;

pub trait ExerciseCatalog: Send + Sync {
    /* All exercises, or those whose muscle contains `muscle` (case-insensitive). */
    fn fetch_exercises(&self, muscle: Option<&str>) -> Result<Vec<Exercise>>;
    fn get_exercise_by_id(&self, id: &str) -> Result<Option<Exercise>>;
    /* Exercises whose muscle equals `muscle`, ignoring case. */
    fn get_exercises_by_muscle(&self, muscle: &str) -> Result<Vec<Exercise>>;
    /* Distinct muscle groups, sorted. */
    fn get_muscle_groups(&self) -> Result<Vec<String>>;
    /* Exercises whose name, type, or muscle contains `query` (case-insensitive). */
    fn search_exercises(&self, query: &str) -> Result<Vec<Exercise>>;
}

pub fn matches_query(exercise: &Exercise, query: &str) -> bool {
    let query = query.to_lowercase();
    exercise.name.to_lowercase().contains(&query)
        || exercise.exercise_type.to_lowercase().contains(&query)
        || exercise.muscle.to_lowercase().contains(&query)
}

pub struct InMemoryExerciseCatalog {
    exercises: Vec<Exercise>,
    latency: Duration,
}

impl InMemoryExerciseCatalog {
    pub fn new(latency: Duration) -> Self {
        InMemoryExerciseCatalog {
            exercises: default_exercises(),
            latency,
        }
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    fn select(&self, predicate: impl Fn(&Exercise) -> bool) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|exercise| predicate(*exercise))
            .cloned()
            .map(|mut exercise| {
                exercise.is_favorite = Some(false);
                exercise
            })
            .collect()
    }
}

impl ExerciseCatalog for InMemoryExerciseCatalog {
    fn fetch_exercises(&self, muscle: Option<&str>) -> Result<Vec<Exercise>> {
        self.simulate_latency();
        let exercises = match muscle.map(str::to_lowercase) {
            Some(muscle) => self.select(|e| e.muscle.to_lowercase().contains(&muscle)),
            None => self.select(|_| true),
        };
        log::debug!(
            "InMemoryExerciseCatalog: Fetched {} exercises (muscle filter: {muscle:?}).",
            exercises.len()
        );
        Ok(exercises)
    }

    fn get_exercise_by_id(&self, id: &str) -> Result<Option<Exercise>> {
        self.simulate_latency();
        Ok(self.select(|e| e.id == id).into_iter().next())
    }

    fn get_exercises_by_muscle(&self, muscle: &str) -> Result<Vec<Exercise>> {
        self.simulate_latency();
        let muscle = muscle.to_lowercase();
        Ok(self.select(|e| e.muscle.to_lowercase() == muscle))
    }

    fn get_muscle_groups(&self) -> Result<Vec<String>> {
        let groups: BTreeSet<&str> = self.exercises.iter().map(|e| e.muscle.as_str()).collect();
        Ok(groups.into_iter().map(str::to_string).collect())
    }

    fn search_exercises(&self, query: &str) -> Result<Vec<Exercise>> {
        self.simulate_latency();
        Ok(self.select(|e| matches_query(e, query)))
    }
}

fn catalog_entry(
    id: &str,
    name: &str,
    exercise_type: &str,
    muscle: &str,
    equipment: &str,
    difficulty: &str,
    instructions: &str,
) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        exercise_type: exercise_type.to_string(),
        muscle: muscle.to_string(),
        equipment: equipment.to_string(),
        difficulty: difficulty.to_string(),
        instructions: Some(instructions.to_string()),
        is_favorite: None,
    }
}

fn default_exercises() -> Vec<Exercise> {
    vec![
        catalog_entry(
            "1",
            "Push-ups",
            "calisthenics",
            "chest",
            "body weight",
            "beginner",
            "Start in a plank position. Lower your body until your chest touches the floor. Push back up to the starting position.",
        ),
        catalog_entry(
            "2",
            "Squats",
            "strength",
            "quadriceps",
            "body weight",
            "beginner",
            "Stand with feet shoulder-width apart. Lower your body by bending knees and hips. Return to starting position.",
        ),
        catalog_entry(
            "3",
            "Deadlifts",
            "strength",
            "back",
            "barbell",
            "intermediate",
            "Stand with feet hip-width apart. Bend at hips and knees. Grip the bar and lift with your legs.",
        ),
        catalog_entry(
            "4",
            "Planks",
            "calisthenics",
            "abs",
            "body weight",
            "beginner",
            "Hold a forearm plank position. Keep your body in a straight line from head to heels. Hold for 30-60 seconds.",
        ),
        catalog_entry(
            "5",
            "Burpees",
            "cardio",
            "full body",
            "body weight",
            "intermediate",
            "Start standing. Drop to plank, do a push-up, jump feet to hands, jump up with arms overhead.",
        ),
        catalog_entry(
            "6",
            "Mountain Climbers",
            "cardio",
            "core",
            "body weight",
            "beginner",
            "Start in plank position. Alternately drive your knees toward your chest in a running motion.",
        ),
        catalog_entry(
            "7",
            "Lunges",
            "strength",
            "legs",
            "body weight",
            "beginner",
            "Step forward and lower your hips until both knees are bent at 90 degrees. Return and repeat with other leg.",
        ),
        catalog_entry(
            "8",
            "Pull-ups",
            "strength",
            "back",
            "pull-up bar",
            "advanced",
            "Grip the bar with hands shoulder-width apart. Pull your body up until chin clears the bar. Lower back down.",
        ),
    ]
}
