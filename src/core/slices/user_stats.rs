/*
 * Daily user statistics. The `Update*` actions are absolute setters; the
 * `Add*` actions apply a delta inside the reducer so callers do not have to
 * read the current value first. Additions saturate instead of overflowing.
 */
use crate::core::models::UserStats;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsState {
    pub stats: UserStats,
    pub is_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserStatsAction {
    SetStats(UserStats),
    UpdateWaterIntake(u32),
    UpdateCaloriesBurned(u32),
    UpdateWorkoutTime(u32),
    AddWaterIntake(u32),
    AddCaloriesBurned(u32),
    AddWorkoutTime(u32),
    ResetStats,
}

pub fn reduce(state: &mut UserStatsState, action: UserStatsAction) {
    let stats = &mut state.stats;
    match action {
        UserStatsAction::SetStats(new_stats) => *stats = new_stats,
        UserStatsAction::UpdateWaterIntake(ml) => stats.water_intake = ml,
        UserStatsAction::UpdateCaloriesBurned(kcal) => stats.calories_burned = kcal,
        UserStatsAction::UpdateWorkoutTime(minutes) => stats.total_workout_time = minutes,
        UserStatsAction::AddWaterIntake(ml) => {
            stats.water_intake = stats.water_intake.saturating_add(ml)
        }
        UserStatsAction::AddCaloriesBurned(kcal) => {
            stats.calories_burned = stats.calories_burned.saturating_add(kcal)
        }
        UserStatsAction::AddWorkoutTime(minutes) => {
            stats.total_workout_time = stats.total_workout_time.saturating_add(minutes)
        }
        UserStatsAction::ResetStats => *stats = UserStats::default(),
    }
}
