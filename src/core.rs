/*
 * This module consolidates the core, platform-agnostic logic of the application:
 * the data model, the state slices and the `Store` composing them, selectors,
 * the durable key-value storage, configuration, the capability interfaces for
 * authentication (`AuthProvider`) and the exercise catalog (`ExerciseCatalog`),
 * and the startup `RestorationSequencer`.
 */
pub mod auth_provider;
pub mod config;
pub mod durable_store;
pub mod exercise_catalog;
pub mod models;
pub mod path_utils;
pub mod restoration;
pub mod selectors;
pub mod slices;
pub mod store;

#[cfg(test)]
pub mod test_fixtures;

#[cfg(test)]
pub use models::{ActivityType, Exercise, User, UserStats};

// Re-export storage related items
pub use durable_store::{CoreDurableStore, DurableStoreOperations, InMemoryDurableStore};

#[cfg(test)]
pub use durable_store::{StorageError, StorageKeys};

// Re-export config related items
pub use config::{AppConfig, ConfigManagerOperations, CoreConfigManager};

// Re-export capability interfaces
pub use auth_provider::{AuthProvider, InMemoryAuthProvider};
pub use exercise_catalog::{ExerciseCatalog, InMemoryExerciseCatalog};

#[cfg(test)]
pub use auth_provider::AuthError;
#[cfg(test)]
pub use exercise_catalog::CatalogError;

pub use restoration::{RestorationReport, RestorationSequencer};
pub use store::{AppState, Store};

#[cfg(test)]
pub use selectors::Route;
