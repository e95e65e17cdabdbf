/*
 * Plain, serializable records shared by every slice of the application state.
 * Field names serialize in camelCase so that values persisted in the durable
 * store keep the same JSON shape across releases. None of these types enforce
 * cross-references; identity is carried by string ids only.
 */
use serde::{Deserialize, Serialize};

/*
 * An authenticated user as retained on the client. The password is never part
 * of this record; auth providers strip it before handing a user back.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

/*
 * An entry of the exercise catalog. `is_favorite` is a presentation flag that is
 * recomputed against the favorites slice; it is never authoritative.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: String,
    pub muscle: String,
    pub equipment: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
}

impl Exercise {
    pub fn is_marked_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Exercise,
    Water,
    Meal,
    Achievement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Light,
    Moderate,
    Intense,
}

/*
 * One entry of the activity feed. `timestamp` is an RFC 3339 string and
 * `duration` is in minutes.
 */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipCategory {
    Health,
    Nutrition,
    Fitness,
    Mental,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessTip {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: TipCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

// Water intake in ml, calories in kcal, workout time in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub water_intake: u32,
    pub calories_burned: u32,
    pub total_workout_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_serializes_with_wire_field_names() {
        let exercise = Exercise {
            id: "1".to_string(),
            name: "Push-ups".to_string(),
            exercise_type: "calisthenics".to_string(),
            muscle: "chest".to_string(),
            equipment: "body weight".to_string(),
            difficulty: "beginner".to_string(),
            instructions: None,
            is_favorite: Some(true),
        };

        let value = serde_json::to_value(&exercise).unwrap();
        assert_eq!(value["type"], "calisthenics");
        assert_eq!(value["isFavorite"], true);
        assert!(value.get("instructions").is_none());
    }

    #[test]
    fn test_user_stats_deserializes_camel_case() {
        let json = r#"{"waterIntake":750,"caloriesBurned":120,"totalWorkoutTime":30}"#;
        let stats: UserStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.water_intake, 750);
        assert_eq!(stats.calories_burned, 120);
        assert_eq!(stats.total_workout_time, 30);
    }

    #[test]
    fn test_activity_type_is_lowercase_on_the_wire() {
        let json = r#"{"id":"9","type":"water","name":"Water intake","timestamp":"2024-01-01T00:00:00Z"}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert_eq!(activity.activity_type, ActivityType::Water);
        assert_eq!(activity.duration, None);
        assert_eq!(activity.intensity, None);
    }
}
