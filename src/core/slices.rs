/*
 * The independently reducible subtrees of the application state. Each slice
 * owns one state struct, one action enum, and a pure `reduce` function that
 * applies an action in place. Reducers never perform I/O and never dispatch.
 */
pub mod activity;
pub mod auth;
pub mod exercises;
pub mod favorites;
pub mod settings;
pub mod user_stats;
pub mod wellness_tips;

pub use activity::{ActivityAction, ActivityState};
pub use auth::{AuthAction, AuthState};
pub use exercises::{ExercisesAction, ExercisesState};
pub use favorites::{FavoritesAction, FavoritesState};
pub use settings::{SettingsAction, SettingsState};
pub use user_stats::{UserStatsAction, UserStatsState};
pub use wellness_tips::{WellnessTipsAction, WellnessTipsState};
