/*
 * Favorite exercises, stored with set semantics keyed by exercise id: `items`
 * never holds two entries with the same id. This slice is persisted to the
 * durable store and restored on launch.
 */
use crate::core::models::Exercise;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesState {
    items: Vec<Exercise>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl FavoritesState {
    pub fn items(&self) -> &[Exercise] {
        &self.items
    }

    pub fn contains(&self, exercise_id: &str) -> bool {
        self.items.iter().any(|item| item.id == exercise_id)
    }

    fn insert(&mut self, mut exercise: Exercise) -> bool {
        if self.contains(&exercise.id) {
            return false;
        }
        exercise.is_favorite = Some(true);
        self.items.push(exercise);
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    SetFavorites(Vec<Exercise>),
    AddFavorite(Exercise),
    RemoveFavorite(String),
    SetLoading(bool),
    SetError(Option<String>),
}

pub fn reduce(state: &mut FavoritesState, action: FavoritesAction) {
    match action {
        FavoritesAction::SetFavorites(items) => {
            // Persisted lists may predate the uniqueness rule; first entry per id wins.
            state.items.clear();
            for exercise in items {
                state.insert(exercise);
            }
            state.error = None;
        }
        FavoritesAction::AddFavorite(exercise) => {
            if !state.insert(exercise) {
                log::trace!("FavoritesSlice: Exercise already favorited, ignoring add.");
            }
        }
        FavoritesAction::RemoveFavorite(exercise_id) => {
            state.items.retain(|item| item.id != exercise_id);
        }
        FavoritesAction::SetLoading(is_loading) => state.is_loading = is_loading,
        FavoritesAction::SetError(error) => state.error = error,
    }
}
