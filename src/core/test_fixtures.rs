// Builders shared by the unit tests of the core modules.
use crate::core::models::Exercise;

pub fn exercise(id: &str, name: &str, muscle: &str) -> Exercise {
    Exercise {
        id: id.to_string(),
        name: name.to_string(),
        exercise_type: "strength".to_string(),
        muscle: muscle.to_string(),
        equipment: "body weight".to_string(),
        difficulty: "beginner".to_string(),
        instructions: None,
        is_favorite: Some(false),
    }
}
