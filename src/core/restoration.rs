/*
 * Startup restoration. Before the first meaningful render, the sequencer reads
 * the persisted user, auth token, favorites, and theme from the durable store
 * and dispatches the matching hydration intents into the `Store`.
 *
 * Each read is independent: a failing read is logged and treated as "value
 * absent", and the sequence continues with the next key. Nothing is retried.
 * The sequencer always runs to completion, after which routing depends only
 * on `AuthState::is_authenticated` (see `selectors::route_for`).
 */
use crate::core::durable_store::{self, DurableStoreOperations, StorageError, StorageKeys};
use crate::core::models::{Exercise, User};
use crate::core::slices::{AuthAction, FavoritesAction, SettingsAction};
use crate::core::store::Store;
use serde::de::DeserializeOwned;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestorationReport {
    pub restored_user: Option<String>,
    pub restored_favorites: Option<usize>,
    pub restored_dark_mode: Option<bool>,
    /* Reads that failed and were treated as absent. */
    pub failed_keys: Vec<&'static str>,
}

pub struct RestorationSequencer {
    durable_store: Arc<dyn DurableStoreOperations>,
}

impl RestorationSequencer {
    pub fn new(durable_store: Arc<dyn DurableStoreOperations>) -> Self {
        RestorationSequencer { durable_store }
    }

    fn read_or_absent<T: DeserializeOwned>(
        &self,
        key: &'static str,
        report: &mut RestorationReport,
    ) -> Option<T> {
        match durable_store::get_typed::<T>(self.durable_store.as_ref(), key) {
            Ok(value) => value,
            Err(e) => {
                match &e {
                    StorageError::Serde(_) => log::warn!(
                        "RestorationSequencer: Stored value for '{key}' is unreadable, ignoring it: {e}"
                    ),
                    _ => log::error!("RestorationSequencer: Failed to read '{key}': {e}"),
                }
                report.failed_keys.push(key);
                None
            }
        }
    }

    /*
     * Runs the full restoration sequence against `store`:
     * 1. user + auth token; both present -> `RestoreAuth(user)`.
     * 2. favorites present -> `SetFavorites(list)`.
     * 3. theme present -> `SetDarkMode(flag)`.
     */
    pub fn run(&self, store: &mut Store) -> RestorationReport {
        log::debug!("RestorationSequencer: Starting restoration.");
        let mut report = RestorationReport::default();

        let user: Option<User> = self.read_or_absent(StorageKeys::USER, &mut report);
        // An empty token is no session.
        let token: Option<String> = self
            .read_or_absent(StorageKeys::AUTH_TOKEN, &mut report)
            .filter(|token: &String| !token.is_empty());
        match (user, token) {
            (Some(user), Some(_token)) => {
                log::info!("RestorationSequencer: Restoring session for '{}'.", user.username);
                report.restored_user = Some(user.id.clone());
                store.dispatch(AuthAction::RestoreAuth(user));
            }
            (Some(_), None) => {
                log::debug!("RestorationSequencer: Stored user has no auth token, staying signed out.");
            }
            (None, _) => log::debug!("RestorationSequencer: No stored session."),
        }

        let favorites: Option<Vec<Exercise>> =
            self.read_or_absent(StorageKeys::FAVORITES, &mut report);
        if let Some(favorites) = favorites {
            log::debug!("RestorationSequencer: Restoring {} favorites.", favorites.len());
            report.restored_favorites = Some(favorites.len());
            store.dispatch(FavoritesAction::SetFavorites(favorites));
        }

        let dark_mode: Option<bool> = self.read_or_absent(StorageKeys::THEME, &mut report);
        if let Some(is_dark) = dark_mode {
            report.restored_dark_mode = Some(is_dark);
            store.dispatch(SettingsAction::SetDarkMode(is_dark));
        }

        log::info!(
            "RestorationSequencer: Restoration finished (authenticated: {}, failed reads: {}).",
            store.state().auth.is_authenticated(),
            report.failed_keys.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::durable_store::{InMemoryDurableStore, Result as StorageResult, set_typed};
    use crate::core::selectors::{Route, route_for};
    use crate::core::test_fixtures::exercise;
    use serde_json::{Value, json};
    use std::collections::HashSet;
    use std::io;

    fn john() -> User {
        User {
            id: "1".to_string(),
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
        }
    }

    // Durable store whose reads fail for a chosen set of keys.
    struct FailingReadStore {
        inner: InMemoryDurableStore,
        failing_keys: HashSet<&'static str>,
    }

    impl DurableStoreOperations for FailingReadStore {
        fn get_item(&self, key: &str) -> StorageResult<Option<Value>> {
            if self.failing_keys.contains(key) {
                return Err(StorageError::Io(io::Error::other("disk unavailable")));
            }
            self.inner.get_item(key)
        }
        fn set_item(&self, key: &str, value: &Value) -> StorageResult<()> {
            self.inner.set_item(key, value)
        }
        fn remove_item(&self, key: &str) -> StorageResult<()> {
            self.inner.remove_item(key)
        }
        fn clear(&self) -> StorageResult<()> {
            self.inner.clear()
        }
    }

    #[test]
    fn test_restores_session_when_user_and_token_present() {
        let durable = Arc::new(InMemoryDurableStore::new());
        set_typed(durable.as_ref(), StorageKeys::USER, &john()).unwrap();
        set_typed(durable.as_ref(), StorageKeys::AUTH_TOKEN, &"token_1").unwrap();
        let mut store = Store::default();

        let report = RestorationSequencer::new(durable).run(&mut store);

        assert!(store.state().auth.is_authenticated());
        assert_eq!(store.state().auth.user(), Some(&john()));
        assert_eq!(report.restored_user.as_deref(), Some("1"));
        assert_eq!(route_for(store.state()), Route::Home);
    }

    #[test]
    fn test_empty_store_finishes_signed_out() {
        let mut store = Store::default();

        let report =
            RestorationSequencer::new(Arc::new(InMemoryDurableStore::new())).run(&mut store);

        assert!(!store.state().auth.is_authenticated());
        assert_eq!(report, RestorationReport::default());
        assert_eq!(route_for(store.state()), Route::Login);
        assert_eq!(store.dispatch_count(), 0);
    }

    #[test]
    fn test_user_without_token_is_not_restored() {
        let durable = Arc::new(InMemoryDurableStore::new());
        set_typed(durable.as_ref(), StorageKeys::USER, &john()).unwrap();
        let mut store = Store::default();

        RestorationSequencer::new(durable).run(&mut store);

        assert!(!store.state().auth.is_authenticated());
    }

    #[test]
    fn test_user_with_empty_token_is_not_restored() {
        let durable = Arc::new(InMemoryDurableStore::new());
        set_typed(durable.as_ref(), StorageKeys::USER, &john()).unwrap();
        set_typed(durable.as_ref(), StorageKeys::AUTH_TOKEN, &"").unwrap();
        let mut store = Store::default();

        let report = RestorationSequencer::new(durable).run(&mut store);

        assert!(!store.state().auth.is_authenticated());
        assert_eq!(report.restored_user, None);
        assert!(report.failed_keys.is_empty());
        assert_eq!(route_for(store.state()), Route::Login);
    }

    #[test]
    fn test_restores_favorites_and_theme() {
        let durable = Arc::new(InMemoryDurableStore::new());
        let favorites = vec![exercise("1", "Push-ups", "chest"), exercise("4", "Planks", "abs")];
        set_typed(durable.as_ref(), StorageKeys::FAVORITES, &favorites).unwrap();
        set_typed(durable.as_ref(), StorageKeys::THEME, &true).unwrap();
        let mut store = Store::default();

        let report = RestorationSequencer::new(durable).run(&mut store);

        assert_eq!(report.restored_favorites, Some(2));
        assert!(store.state().favorites.contains("4"));
        assert!(store.state().settings.is_dark);
        assert_eq!(report.restored_dark_mode, Some(true));
    }

    #[test]
    fn test_read_failure_is_swallowed_and_later_keys_still_restored() {
        let inner = InMemoryDurableStore::new();
        set_typed(&inner, StorageKeys::USER, &john()).unwrap();
        set_typed(&inner, StorageKeys::AUTH_TOKEN, &"token_1").unwrap();
        set_typed(&inner, StorageKeys::THEME, &true).unwrap();
        let durable = Arc::new(FailingReadStore {
            inner,
            failing_keys: [StorageKeys::USER, StorageKeys::FAVORITES].into_iter().collect(),
        });
        let mut store = Store::default();

        let report = RestorationSequencer::new(durable).run(&mut store);

        assert_eq!(report.failed_keys, vec![StorageKeys::USER, StorageKeys::FAVORITES]);
        assert!(!store.state().auth.is_authenticated());
        assert!(store.state().settings.is_dark);
    }

    #[test]
    fn test_corrupt_value_counts_as_absent() {
        let durable = Arc::new(InMemoryDurableStore::new());
        durable
            .set_item(StorageKeys::FAVORITES, &json!({"not": "a list"}))
            .unwrap();
        let mut store = Store::default();

        let report = RestorationSequencer::new(durable).run(&mut store);

        assert_eq!(report.failed_keys, vec![StorageKeys::FAVORITES]);
        assert!(store.state().favorites.items().is_empty());
    }

    #[test]
    fn test_logout_after_restoration_reroutes_to_login() {
        let durable = Arc::new(InMemoryDurableStore::new());
        set_typed(durable.as_ref(), StorageKeys::USER, &john()).unwrap();
        set_typed(durable.as_ref(), StorageKeys::AUTH_TOKEN, &"token_1").unwrap();
        let mut store = Store::default();
        RestorationSequencer::new(durable).run(&mut store);
        assert_eq!(route_for(store.state()), Route::Home);

        store.dispatch(AuthAction::Logout);

        assert_eq!(route_for(store.state()), Route::Login);
    }
}
