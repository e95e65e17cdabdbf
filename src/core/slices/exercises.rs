// Exercise catalog slice. Every successful fetch replaces `items` wholesale.
use crate::core::models::Exercise;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisesState {
    pub items: Vec<Exercise>,
    pub is_loading: bool,
    pub error: Option<String>,
    /* The exercise staged for the detail view. */
    pub selected_exercise: Option<Exercise>,
}

impl ExercisesState {
    pub fn find_by_id(&self, id: &str) -> Option<&Exercise> {
        self.items.iter().find(|exercise| exercise.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExercisesAction {
    FetchExercisesStart,
    SetExercises(Vec<Exercise>),
    FetchExercisesFailure(String),
    SetSelectedExercise(Option<Exercise>),
    SetLoading(bool),
    SetError(Option<String>),
}

pub fn reduce(state: &mut ExercisesState, action: ExercisesAction) {
    match action {
        ExercisesAction::FetchExercisesStart => {
            state.is_loading = true;
            state.error = None;
        }
        ExercisesAction::SetExercises(items) => {
            state.items = items;
            state.is_loading = false;
            state.error = None;
        }
        ExercisesAction::FetchExercisesFailure(message) => {
            state.is_loading = false;
            state.error = Some(message);
        }
        ExercisesAction::SetSelectedExercise(exercise) => state.selected_exercise = exercise,
        ExercisesAction::SetLoading(is_loading) => state.is_loading = is_loading,
        ExercisesAction::SetError(error) => state.error = error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_fixtures::exercise;

    #[test]
    fn test_fetch_start_sets_loading_and_clears_error() {
        let mut state = ExercisesState {
            error: Some("old".to_string()),
            ..ExercisesState::default()
        };

        reduce(&mut state, ExercisesAction::FetchExercisesStart);

        assert!(state.is_loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_set_exercises_replaces_items() {
        let mut state = ExercisesState::default();
        reduce(
            &mut state,
            ExercisesAction::SetExercises(vec![exercise("1", "Push-ups", "chest")]),
        );
        reduce(&mut state, ExercisesAction::FetchExercisesStart);

        reduce(
            &mut state,
            ExercisesAction::SetExercises(vec![
                exercise("2", "Squats", "quadriceps"),
                exercise("3", "Deadlifts", "back"),
            ]),
        );

        let ids: Vec<&str> = state.items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert!(!state.is_loading);
        assert!(state.find_by_id("1").is_none());
        assert_eq!(state.find_by_id("3").map(|e| e.name.as_str()), Some("Deadlifts"));
    }

    #[test]
    fn test_fetch_failure_keeps_previous_items() {
        let mut state = ExercisesState::default();
        reduce(
            &mut state,
            ExercisesAction::SetExercises(vec![exercise("1", "Push-ups", "chest")]),
        );
        reduce(&mut state, ExercisesAction::FetchExercisesStart);

        reduce(
            &mut state,
            ExercisesAction::FetchExercisesFailure("Failed to fetch exercises".to_string()),
        );

        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch exercises"));
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_selected_exercise_set_and_clear() {
        let mut state = ExercisesState::default();
        let push_ups = exercise("1", "Push-ups", "chest");

        reduce(
            &mut state,
            ExercisesAction::SetSelectedExercise(Some(push_ups.clone())),
        );
        assert_eq!(state.selected_exercise, Some(push_ups));

        reduce(&mut state, ExercisesAction::SetSelectedExercise(None));
        assert_eq!(state.selected_exercise, None);
    }
}
