/*
 * Read-only views derived from the state tree. Nothing here is stored; each
 * function recomputes its answer from the slices it reads.
 */
use crate::core::exercise_catalog::matches_query;
use crate::core::models::{Exercise, WellnessTip};
use crate::core::store::AppState;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
}

/* The root screen for the current state: a pure function of authentication. */
pub fn route_for(state: &AppState) -> Route {
    if state.auth.is_authenticated() {
        Route::Home
    } else {
        Route::Login
    }
}

/* The catalog with `is_favorite` recomputed against the favorites slice. */
pub fn exercises_with_favorite_flags(state: &AppState) -> Vec<Exercise> {
    state
        .exercises
        .items
        .iter()
        .map(|exercise| {
            let mut exercise = exercise.clone();
            exercise.is_favorite = Some(state.favorites.contains(&exercise.id));
            exercise
        })
        .collect()
}

pub fn filter_exercises<'a>(items: &'a [Exercise], query: &str) -> Vec<&'a Exercise> {
    let query = query.trim();
    items
        .iter()
        .filter(|exercise| query.is_empty() || matches_query(exercise, query))
        .collect()
}

pub fn current_tip(state: &AppState) -> Option<&WellnessTip> {
    state.wellness_tips.current_tip()
}

pub fn is_current_tip_favorited(state: &AppState) -> bool {
    current_tip(state).is_some_and(|tip| state.wellness_tips.is_favorite(&tip.id))
}

/* Percentage of the daily goal reached, capped at 100. A zero goal counts as met. */
pub fn water_progress_percent(intake_ml: u32, goal_ml: u32) -> u32 {
    if goal_ml == 0 {
        return 100;
    }
    let percent = u64::from(intake_ml) * 100 / u64::from(goal_ml);
    percent.min(100) as u32
}

/*
 * Formats how long ago `timestamp` (RFC 3339) was, relative to `now`:
 * minutes under an hour, hours under a day, days otherwise. Returns `None`
 * for timestamps that do not parse.
 */
pub fn time_ago(timestamp: &str, now: OffsetDateTime) -> Option<String> {
    let then = OffsetDateTime::parse(timestamp, &Rfc3339).ok()?;
    let elapsed = now - then;
    let minutes = elapsed.whole_minutes().max(0);
    let hours = elapsed.whole_hours().max(0);
    let days = elapsed.whole_days().max(0);
    Some(if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{days}d ago")
    })
}
