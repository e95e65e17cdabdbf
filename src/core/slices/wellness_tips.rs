/*
 * The wellness-tip carousel: a static tip catalog, a set of favorited tip ids,
 * and the index of the tip currently shown. `current_index` is kept inside
 * `0..items.len()` (0 for an empty catalog) by clamping on every write.
 *
 * Tip favorites are a separate namespace from exercise favorites even though
 * the action names match.
 */
use crate::core::models::{TipCategory, WellnessTip};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessTipsState {
    items: Vec<WellnessTip>,
    current_index: usize,
    favorites: Vec<String>,
}

impl Default for WellnessTipsState {
    fn default() -> Self {
        WellnessTipsState {
            items: default_tips(),
            current_index: 0,
            favorites: Vec::new(),
        }
    }
}

impl WellnessTipsState {
    pub fn items(&self) -> &[WellnessTip] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_favorite(&self, tip_id: &str) -> bool {
        self.favorites.iter().any(|id| id == tip_id)
    }

    pub fn current_tip(&self) -> Option<&WellnessTip> {
        self.items.get(self.current_index)
    }

    fn clamp_index(&self, index: usize) -> usize {
        index.min(self.items.len().saturating_sub(1))
    }
}

fn tip(id: &str, title: &str, description: &str, category: TipCategory, icon: &str) -> WellnessTip {
    WellnessTip {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category,
        icon: Some(icon.to_string()),
    }
}

fn default_tips() -> Vec<WellnessTip> {
    vec![
        tip(
            "1",
            "Stay Hydrated",
            "Drink 8-10 glasses of water daily to keep your body functioning optimally.",
            TipCategory::Health,
            "droplet",
        ),
        tip(
            "2",
            "Morning Stretches",
            "Start your day with 5-10 minutes of stretching to improve flexibility and reduce tension.",
            TipCategory::Fitness,
            "activity",
        ),
        tip(
            "3",
            "Balanced Nutrition",
            "Eat a mix of proteins, carbs, and healthy fats for sustained energy throughout the day.",
            TipCategory::Nutrition,
            "fork-knife",
        ),
        tip(
            "4",
            "Quality Sleep",
            "Aim for 7-9 hours of quality sleep to support recovery and overall wellness.",
            TipCategory::Health,
            "moon",
        ),
        tip(
            "5",
            "Mindful Breathing",
            "Practice deep breathing exercises for 5 minutes to reduce stress and improve focus.",
            TipCategory::Mental,
            "wind",
        ),
        tip(
            "6",
            "Active Recovery",
            "On rest days, do light activities like walking or yoga to aid muscle recovery.",
            TipCategory::Fitness,
            "heart",
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WellnessTipsAction {
    SetCurrentIndex(usize),
    AddFavorite(String),
    RemoveFavorite(String),
    SetTips(Vec<WellnessTip>),
}

pub fn reduce(state: &mut WellnessTipsState, action: WellnessTipsAction) {
    match action {
        WellnessTipsAction::SetCurrentIndex(index) => {
            let clamped = state.clamp_index(index);
            if clamped != index {
                log::debug!(
                    "WellnessTipsSlice: Index {index} out of range for {} tips, clamped to {clamped}.",
                    state.items.len()
                );
            }
            state.current_index = clamped;
        }
        WellnessTipsAction::AddFavorite(tip_id) => {
            if !state.is_favorite(&tip_id) {
                state.favorites.push(tip_id);
            }
        }
        WellnessTipsAction::RemoveFavorite(tip_id) => {
            state.favorites.retain(|id| *id != tip_id);
        }
        WellnessTipsAction::SetTips(items) => {
            state.items = items;
            state.current_index = state.clamp_index(state.current_index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_six_tips() {
        let state = WellnessTipsState::default();
        assert_eq!(state.items().len(), 6);
        assert_eq!(state.current_index(), 0);
        assert_eq!(
            state.current_tip().map(|t| t.title.as_str()),
            Some("Stay Hydrated")
        );
    }

    #[test]
    fn test_set_current_index_clamps_to_last_tip() {
        let mut state = WellnessTipsState::default();

        reduce(&mut state, WellnessTipsAction::SetCurrentIndex(3));
        assert_eq!(state.current_index(), 3);

        reduce(&mut state, WellnessTipsAction::SetCurrentIndex(99));
        assert_eq!(state.current_index(), 5);
    }

    #[test]
    fn test_shrinking_tip_list_reclamps_index() {
        let mut state = WellnessTipsState::default();
        reduce(&mut state, WellnessTipsAction::SetCurrentIndex(5));

        let first_two = state.items()[..2].to_vec();
        reduce(&mut state, WellnessTipsAction::SetTips(first_two));
        assert_eq!(state.current_index(), 1);

        reduce(&mut state, WellnessTipsAction::SetTips(Vec::new()));
        assert_eq!(state.current_index(), 0);
        assert!(state.current_tip().is_none());
    }

    #[test]
    fn test_tip_favorites_have_set_semantics() {
        let mut state = WellnessTipsState::default();
        reduce(&mut state, WellnessTipsAction::AddFavorite("2".to_string()));
        reduce(&mut state, WellnessTipsAction::AddFavorite("2".to_string()));
        reduce(&mut state, WellnessTipsAction::AddFavorite("5".to_string()));
        assert_eq!(state.favorites(), &["2".to_string(), "5".to_string()]);

        reduce(&mut state, WellnessTipsAction::RemoveFavorite("2".to_string()));
        assert!(!state.is_favorite("2"));
        assert!(state.is_favorite("5"));
    }
}
