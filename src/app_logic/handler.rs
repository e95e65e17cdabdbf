use crate::app_logic::events::{AppEvent, EventHandler, UiCommand};
use crate::app_logic::validation;
use crate::core::durable_store::{self, DurableStoreOperations, StorageKeys};
use crate::core::models::{Activity, ActivityType, Exercise, User};
use crate::core::selectors::{self, Route};
use crate::core::slices::{
    ActivityAction, AuthAction, ExercisesAction, FavoritesAction, SettingsAction, UserStatsAction,
    WellnessTipsAction,
};
use crate::core::{
    AppConfig, AppState, AuthProvider, ExerciseCatalog, RestorationReport, RestorationSequencer,
    Store,
};
use std::collections::VecDeque;
use std::sync::Arc;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// Auth tokens are opaque to the client; the mock backend derives them from the user id.
pub(crate) fn auth_token_for(user: &User) -> String {
    format!("token_{}", user.id)
}

/*
 * The orchestration layer between the presentation and the `Store`. It turns
 * UI events into side effects (auth and catalog calls, durable-store writes)
 * and dispatches only pure result intents, following the start / success /
 * failure pattern for every latency-bearing call. Failures never escape as
 * errors: they become failure intents, alerts, or log lines.
 *
 * After every handled event the current route is recomputed from the state,
 * and a `Navigate` command is queued whenever it changed.
 */
pub struct FitBuddyAppLogic {
    store: Store,
    config: AppConfig,
    durable_store: Arc<dyn DurableStoreOperations>,
    auth_provider: Arc<dyn AuthProvider>,
    catalog: Arc<dyn ExerciseCatalog>,
    command_queue: VecDeque<UiCommand>,
    last_route: Option<Route>,
    activity_counter: u64,
}

impl FitBuddyAppLogic {
    pub fn new(
        config: AppConfig,
        durable_store: Arc<dyn DurableStoreOperations>,
        auth_provider: Arc<dyn AuthProvider>,
        catalog: Arc<dyn ExerciseCatalog>,
    ) -> Self {
        let initial_state =
            AppState::initial(config.activity_feed_limit, OffsetDateTime::now_utc());
        FitBuddyAppLogic {
            store: Store::new(initial_state),
            config,
            durable_store,
            auth_provider,
            catalog,
            command_queue: VecDeque::new(),
            last_route: None,
            activity_counter: 0,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    // Mutable access is for subscribing; state changes go through events.
    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /*
     * Runs restoration and reveals the UI by queueing the initial route. Must be
     * called once, before any event is handled.
     */
    pub fn on_startup(&mut self) -> RestorationReport {
        log::info!("AppLogic: Startup, restoring persisted state.");
        let report = RestorationSequencer::new(Arc::clone(&self.durable_store)).run(&mut self.store);
        self.publish_route_if_changed();
        report
    }

    pub fn drain_commands(&mut self) -> Vec<UiCommand> {
        self.command_queue.drain(..).collect()
    }

    fn enqueue_command(&mut self, command: UiCommand) {
        log::trace!("AppLogic: Enqueuing {command:?}");
        self.command_queue.push_back(command);
    }

    fn alert(&mut self, title: &str, message: impl Into<String>) {
        self.enqueue_command(UiCommand::ShowAlert {
            title: title.to_string(),
            message: message.into(),
        });
    }

    fn publish_route_if_changed(&mut self) {
        let route = selectors::route_for(self.store.state());
        if self.last_route != Some(route) {
            log::debug!("AppLogic: Route changed {:?} -> {route:?}", self.last_route);
            self.last_route = Some(route);
            self.enqueue_command(UiCommand::Navigate(route));
        }
    }

    fn next_activity_id(&mut self, now: OffsetDateTime) -> String {
        self.activity_counter += 1;
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        format!("{millis}-{}", self.activity_counter)
    }

    fn record_activity(
        &mut self,
        activity_type: ActivityType,
        name: String,
        duration: Option<u32>,
        icon: &str,
    ) {
        let now = OffsetDateTime::now_utc();
        let timestamp = match now.format(&Rfc3339) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                log::error!("AppLogic: Could not format activity timestamp: {e}");
                return;
            }
        };
        let activity = Activity {
            id: self.next_activity_id(now),
            activity_type,
            name,
            duration,
            intensity: None,
            timestamp,
            icon: Some(icon.to_string()),
        };
        self.store.dispatch(ActivityAction::AddActivity(activity));
    }

    // --- Persistence. Write failures are logged and otherwise ignored. ---

    fn persist_session(&self, user: &User) {
        if let Err(e) = durable_store::set_typed(self.durable_store.as_ref(), StorageKeys::USER, user)
        {
            log::error!("AppLogic: Failed to persist user '{}': {e}", user.username);
        }
        if let Err(e) = durable_store::set_typed(
            self.durable_store.as_ref(),
            StorageKeys::AUTH_TOKEN,
            &auth_token_for(user),
        ) {
            log::error!("AppLogic: Failed to persist auth token: {e}");
        }
    }

    fn clear_session(&self) {
        for key in [StorageKeys::AUTH_TOKEN, StorageKeys::USER] {
            if let Err(e) = self.durable_store.remove_item(key) {
                log::error!("AppLogic: Failed to remove '{key}': {e}");
            }
        }
    }

    fn persist_favorites(&self) {
        let favorites = self.store.state().favorites.items();
        if let Err(e) =
            durable_store::set_typed(self.durable_store.as_ref(), StorageKeys::FAVORITES, &favorites)
        {
            log::error!("AppLogic: Failed to persist {} favorites: {e}", favorites.len());
        }
    }

    fn persist_theme(&self) {
        let is_dark = self.store.state().settings.is_dark;
        if let Err(e) =
            durable_store::set_typed(self.durable_store.as_ref(), StorageKeys::THEME, &is_dark)
        {
            log::error!("AppLogic: Failed to persist theme preference: {e}");
        }
    }

    // --- Event handlers ---

    fn handle_login(&mut self, email: String, password: String) {
        let errors = validation::validate_login(&email, &password);
        if !errors.is_empty() {
            self.enqueue_command(UiCommand::ShowValidationErrors(
                errors.iter().map(ToString::to_string).collect(),
            ));
            return;
        }

        self.store.dispatch(AuthAction::SetLoading(true));
        match self.auth_provider.login(email.trim(), &password) {
            Ok(user) => {
                log::info!("AppLogic: Logged in as '{}'.", user.username);
                self.persist_session(&user);
                self.store.dispatch(AuthAction::LoginSuccess(user));
            }
            Err(e) => {
                log::info!("AppLogic: Login failed for '{email}': {e}");
                self.store.dispatch(AuthAction::LoginFailure(e.to_string()));
                self.alert("Login Error", e.to_string());
            }
        }
        self.store.dispatch(AuthAction::SetLoading(false));
    }

    fn handle_register(
        &mut self,
        username: String,
        email: String,
        password: String,
        confirm_password: String,
    ) {
        let errors =
            validation::validate_registration(&username, &email, &password, &confirm_password);
        if !errors.is_empty() {
            self.enqueue_command(UiCommand::ShowValidationErrors(
                errors.iter().map(ToString::to_string).collect(),
            ));
            return;
        }

        self.store.dispatch(AuthAction::SetLoading(true));
        match self
            .auth_provider
            .register(username.trim(), email.trim(), &password)
        {
            Ok(user) => {
                log::info!("AppLogic: Registered '{}' (id {}).", user.username, user.id);
                self.persist_session(&user);
                self.store.dispatch(AuthAction::RegisterSuccess(user));
                self.alert("Success", "Account created successfully!");
            }
            Err(e) => {
                log::info!("AppLogic: Registration failed for '{email}': {e}");
                self.store.dispatch(AuthAction::LoginFailure(e.to_string()));
                self.alert("Registration Error", e.to_string());
            }
        }
        self.store.dispatch(AuthAction::SetLoading(false));
    }

    fn handle_logout(&mut self) {
        log::info!("AppLogic: Logging out.");
        self.store.dispatch(AuthAction::Logout);
        self.clear_session();
    }

    fn handle_exercises_requested(&mut self, muscle: Option<String>) {
        self.store.dispatch(ExercisesAction::FetchExercisesStart);
        match self.catalog.fetch_exercises(muscle.as_deref()) {
            Ok(exercises) => {
                let favorites = &self.store.state().favorites;
                let flagged: Vec<Exercise> = exercises
                    .into_iter()
                    .map(|mut exercise| {
                        exercise.is_favorite = Some(favorites.contains(&exercise.id));
                        exercise
                    })
                    .collect();
                self.store.dispatch(ExercisesAction::SetExercises(flagged));
            }
            Err(e) => {
                log::warn!("AppLogic: Exercise fetch failed: {e}");
                self.store
                    .dispatch(ExercisesAction::FetchExercisesFailure(e.to_string()));
            }
        }
    }

    /*
     * Finds an exercise by id, preferring the already loaded catalog and
     * falling back to a catalog lookup.
     */
    fn lookup_exercise(&self, exercise_id: &str) -> Option<Exercise> {
        if let Some(exercise) = self.store.state().exercises.find_by_id(exercise_id) {
            return Some(exercise.clone());
        }
        if let Some(exercise) = self
            .store
            .state()
            .favorites
            .items()
            .iter()
            .find(|favorite| favorite.id == exercise_id)
        {
            return Some(exercise.clone());
        }
        match self.catalog.get_exercise_by_id(exercise_id) {
            Ok(found) => found,
            Err(e) => {
                log::warn!("AppLogic: Catalog lookup for exercise '{exercise_id}' failed: {e}");
                None
            }
        }
    }

    fn handle_favorite_toggled(&mut self, exercise_id: String) {
        if self.store.state().favorites.contains(&exercise_id) {
            self.store
                .dispatch(FavoritesAction::RemoveFavorite(exercise_id));
        } else {
            match self.lookup_exercise(&exercise_id) {
                Some(exercise) => self.store.dispatch(FavoritesAction::AddFavorite(exercise)),
                None => {
                    log::warn!("AppLogic: Cannot favorite unknown exercise '{exercise_id}'.");
                    return;
                }
            }
        }
        self.persist_favorites();
    }

    fn handle_exercise_opened(&mut self, exercise_id: String) {
        match self.lookup_exercise(&exercise_id) {
            Some(mut exercise) => {
                exercise.is_favorite = Some(self.store.state().favorites.contains(&exercise.id));
                self.enqueue_command(UiCommand::ShowExerciseDetail(exercise));
            }
            None => {
                log::warn!("AppLogic: Exercise '{exercise_id}' not found.");
                self.alert("Exercise Not Found", "This exercise is no longer available.");
            }
        }
    }

    fn handle_quick_water(&mut self) {
        let amount = self.config.quick_water_ml;
        self.store.dispatch(UserStatsAction::AddWaterIntake(amount));
        self.record_activity(ActivityType::Water, "Water intake".to_string(), None, "droplet");
    }

    fn handle_workout_logged(&mut self, name: String, minutes: u32, calories: u32) {
        self.store.dispatch(UserStatsAction::AddWorkoutTime(minutes));
        self.store.dispatch(UserStatsAction::AddCaloriesBurned(calories));
        self.record_activity(ActivityType::Exercise, name, Some(minutes), "activity");
    }

    fn handle_tip_favorite_toggled(&mut self) {
        let Some(tip_id) = selectors::current_tip(self.store.state()).map(|tip| tip.id.clone())
        else {
            log::debug!("AppLogic: No current tip to favorite.");
            return;
        };
        if self.store.state().wellness_tips.is_favorite(&tip_id) {
            self.store
                .dispatch(WellnessTipsAction::RemoveFavorite(tip_id));
        } else {
            self.store.dispatch(WellnessTipsAction::AddFavorite(tip_id));
        }
    }

    fn handle_tip_scrolled(&mut self, index: usize) {
        if index != self.store.state().wellness_tips.current_index() {
            self.store
                .dispatch(WellnessTipsAction::SetCurrentIndex(index));
        }
    }

    fn handle_theme_toggled(&mut self) {
        self.store.dispatch(SettingsAction::ToggleTheme);
        self.persist_theme();
    }
}

impl EventHandler for FitBuddyAppLogic {
    fn handle_event(&mut self, event: AppEvent) {
        log::debug!("AppLogic: Handling {event:?}");
        match event {
            AppEvent::LoginSubmitted { email, password } => self.handle_login(email, password),
            AppEvent::RegisterSubmitted {
                username,
                email,
                password,
                confirm_password,
            } => self.handle_register(username, email, password, confirm_password),
            AppEvent::LogoutRequested => self.handle_logout(),
            AppEvent::ExercisesRequested { muscle } => self.handle_exercises_requested(muscle),
            AppEvent::ExerciseFavoriteToggled { exercise_id } => {
                self.handle_favorite_toggled(exercise_id)
            }
            AppEvent::ExerciseOpened { exercise_id } => self.handle_exercise_opened(exercise_id),
            AppEvent::WaterAdded { ml } => {
                self.store.dispatch(UserStatsAction::AddWaterIntake(ml))
            }
            AppEvent::WaterReset => self.store.dispatch(UserStatsAction::UpdateWaterIntake(0)),
            AppEvent::QuickWaterLogged => self.handle_quick_water(),
            AppEvent::WorkoutLogged {
                name,
                minutes,
                calories,
            } => self.handle_workout_logged(name, minutes, calories),
            AppEvent::StatsResetRequested => self.store.dispatch(UserStatsAction::ResetStats),
            AppEvent::TipFavoriteToggled => self.handle_tip_favorite_toggled(),
            AppEvent::TipScrolled { index } => self.handle_tip_scrolled(index),
            AppEvent::ThemeToggled => self.handle_theme_toggled(),
        }
        self.publish_route_if_changed();
    }

    fn on_quit(&mut self) {
        log::info!("AppLogic: on_quit called. Tearing down the store.");
        self.store.teardown();
    }

    fn try_dequeue_command(&mut self) -> Option<UiCommand> {
        self.command_queue.pop_front()
    }
}
