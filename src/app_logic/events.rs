/*
 * The contract between the application logic and whatever presents it. The
 * presentation layer reports user intent as `AppEvent`s and executes the
 * `UiCommand`s the logic queues in response; it reads everything else from
 * the `Store`'s state.
 */
use crate::core::models::Exercise;
use crate::core::selectors::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    LoginSubmitted {
        email: String,
        password: String,
    },
    RegisterSubmitted {
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    LogoutRequested,
    // Loads (or reloads) the exercise catalog, optionally filtered by muscle.
    ExercisesRequested {
        muscle: Option<String>,
    },
    ExerciseFavoriteToggled {
        exercise_id: String,
    },
    ExerciseOpened {
        exercise_id: String,
    },
    WaterAdded {
        ml: u32,
    },
    WaterReset,
    // One-tap hydration from the home screen; also records a feed entry.
    QuickWaterLogged,
    WorkoutLogged {
        name: String,
        minutes: u32,
        calories: u32,
    },
    StatsResetRequested,
    TipFavoriteToggled,
    TipScrolled {
        index: usize,
    },
    ThemeToggled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Navigate(Route),
    // Opens the detail view with its payload; the view needs nothing else.
    ShowExerciseDetail(Exercise),
    ShowAlert { title: String, message: String },
    // Inline form errors; these never reach the store.
    ShowValidationErrors(Vec<String>),
}

pub trait EventHandler {
    // Handles one event and enqueues any resulting `UiCommand`s.
    fn handle_event(&mut self, event: AppEvent);

    // Called once when the application is about to exit.
    fn on_quit(&mut self) {}

    fn try_dequeue_command(&mut self) -> Option<UiCommand>;
}
