/*
 * The application state container. A `Store` owns the whole state tree and
 * changes it only through `dispatch`, which routes an `Intent` to the matching
 * slice reducer and then notifies every subscriber with the new state.
 *
 * The store is an explicit instance with a start/stop lifecycle: it is built
 * at application start and torn down at exit. Subscribers receive a shared
 * reference to the state, so they cannot dispatch from inside a notification,
 * and reducers have no access to the store at all.
 */
use crate::core::slices::{
    self, ActivityAction, ActivityState, AuthAction, AuthState, ExercisesAction, ExercisesState,
    FavoritesAction, FavoritesState, SettingsAction, SettingsState, UserStatsAction,
    UserStatsState, WellnessTipsAction, WellnessTipsState,
};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub auth: AuthState,
    pub exercises: ExercisesState,
    pub favorites: FavoritesState,
    pub user_stats: UserStatsState,
    pub activity: ActivityState,
    pub wellness_tips: WellnessTipsState,
    pub settings: SettingsState,
}

impl AppState {
    /*
     * The state a fresh launch starts from before restoration runs: anonymous,
     * no favorites, zeroed stats, the sample activity feed, and the default tips.
     */
    pub fn initial(activity_feed_limit: usize, now: time::OffsetDateTime) -> Self {
        AppState {
            activity: ActivityState::seeded(activity_feed_limit, now),
            ..AppState::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Auth(AuthAction),
    Exercises(ExercisesAction),
    Favorites(FavoritesAction),
    UserStats(UserStatsAction),
    Activity(ActivityAction),
    WellnessTips(WellnessTipsAction),
    Settings(SettingsAction),
}

impl From<AuthAction> for Intent {
    fn from(action: AuthAction) -> Self {
        Intent::Auth(action)
    }
}

impl From<ExercisesAction> for Intent {
    fn from(action: ExercisesAction) -> Self {
        Intent::Exercises(action)
    }
}

impl From<FavoritesAction> for Intent {
    fn from(action: FavoritesAction) -> Self {
        Intent::Favorites(action)
    }
}

impl From<UserStatsAction> for Intent {
    fn from(action: UserStatsAction) -> Self {
        Intent::UserStats(action)
    }
}

impl From<ActivityAction> for Intent {
    fn from(action: ActivityAction) -> Self {
        Intent::Activity(action)
    }
}

impl From<WellnessTipsAction> for Intent {
    fn from(action: WellnessTipsAction) -> Self {
        Intent::WellnessTips(action)
    }
}

impl From<SettingsAction> for Intent {
    fn from(action: SettingsAction) -> Self {
        Intent::Settings(action)
    }
}

/*
 * Applies one intent to the state tree. Pure with respect to the outside
 * world: no I/O, no dispatching.
 */
pub fn root_reducer(state: &mut AppState, intent: Intent) {
    match intent {
        Intent::Auth(action) => slices::auth::reduce(&mut state.auth, action),
        Intent::Exercises(action) => slices::exercises::reduce(&mut state.exercises, action),
        Intent::Favorites(action) => slices::favorites::reduce(&mut state.favorites, action),
        Intent::UserStats(action) => slices::user_stats::reduce(&mut state.user_stats, action),
        Intent::Activity(action) => slices::activity::reduce(&mut state.activity, action),
        Intent::WellnessTips(action) => {
            slices::wellness_tips::reduce(&mut state.wellness_tips, action)
        }
        Intent::Settings(action) => slices::settings::reduce(&mut state.settings, action),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&AppState) + Send>;

pub struct Store {
    state: AppState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription_id: u64,
    dispatch_count: u64,
    is_running: bool,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        log::debug!("Store: Created.");
        Store {
            state: initial_state,
            subscribers: Vec::new(),
            next_subscription_id: 1,
            dispatch_count: 0,
            is_running: true,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /* Number of intents applied since the store was created. */
    pub fn dispatch_count(&self) -> u64 {
        self.dispatch_count
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn dispatch(&mut self, intent: impl Into<Intent>) {
        let intent = intent.into();
        if !self.is_running {
            log::warn!("Store: Ignoring {intent:?} dispatched after teardown.");
            return;
        }
        log::trace!("Store: Dispatching {intent:?}");
        root_reducer(&mut self.state, intent);
        self.dispatch_count += 1;

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&AppState) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        log::trace!("Store: Added subscriber {id:?}.");
        id
    }

    /* Returns false when `id` was not subscribed. */
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        before != self.subscribers.len()
    }

    /*
     * Stops the store: drops all subscribers and turns later dispatches into
     * no-ops. The last state stays readable.
     */
    pub fn teardown(&mut self) {
        if !self.is_running {
            return;
        }
        log::debug!(
            "Store: Tearing down after {} dispatches, dropping {} subscribers.",
            self.dispatch_count,
            self.subscribers.len()
        );
        self.subscribers.clear();
        self.is_running = false;
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(AppState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::User;
    use crate::core::test_fixtures::exercise;
    use std::sync::{Arc, Mutex};

    fn john() -> User {
        User {
            id: "1".to_string(),
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    #[test]
    fn test_dispatch_routes_to_matching_slice() {
        let mut store = Store::default();

        store.dispatch(AuthAction::LoginSuccess(john()));
        store.dispatch(UserStatsAction::AddWaterIntake(250));
        store.dispatch(FavoritesAction::AddFavorite(exercise("1", "Push-ups", "chest")));

        let state = store.state();
        assert!(state.auth.is_authenticated());
        assert_eq!(state.user_stats.stats.water_intake, 250);
        assert!(state.favorites.contains("1"));
        assert_eq!(store.dispatch_count(), 3);
    }

    #[test]
    fn test_subscribers_see_state_after_each_dispatch() {
        let mut store = Store::default();
        let seen: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_in_subscriber = Arc::clone(&seen);
        store.subscribe(move |state| {
            seen_in_subscriber
                .lock()
                .unwrap()
                .push(state.user_stats.stats.water_intake);
        });

        store.dispatch(UserStatsAction::AddWaterIntake(250));
        store.dispatch(UserStatsAction::AddWaterIntake(500));
        store.dispatch(UserStatsAction::ResetStats);

        assert_eq!(*seen.lock().unwrap(), vec![250, 750, 0]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = Store::default();
        let calls = Arc::new(Mutex::new(0u32));
        let calls_in_subscriber = Arc::clone(&calls);
        let id = store.subscribe(move |_| *calls_in_subscriber.lock().unwrap() += 1);

        store.dispatch(SettingsAction::ToggleTheme);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(SettingsAction::ToggleTheme);

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_teardown_ignores_later_dispatches() {
        let mut store = Store::default();
        store.dispatch(AuthAction::RestoreAuth(john()));

        store.teardown();
        store.dispatch(AuthAction::Logout);

        assert!(!store.is_running());
        assert!(store.state().auth.is_authenticated());
        assert_eq!(store.dispatch_count(), 1);
    }

    #[test]
    fn test_state_serializes_as_camel_case_tree() {
        let store = Store::default();
        let value = serde_json::to_value(store.state()).unwrap();
        assert!(value.get("userStats").is_some());
        assert!(value.get("wellnessTips").is_some());
        assert_eq!(value["auth"]["isAuthenticated"], false);
    }
}
