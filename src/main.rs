mod app_logic;
mod console;
mod core;

use crate::app_logic::events::EventHandler;
use crate::app_logic::handler::FitBuddyAppLogic;
use crate::console::ConsoleInput;
use crate::core::path_utils;
use crate::core::{
    AppConfig, ConfigManagerOperations, CoreConfigManager, CoreDurableStore,
    DurableStoreOperations, InMemoryAuthProvider, InMemoryDurableStore, InMemoryExerciseCatalog,
};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::{Arc, Once};
use time::OffsetDateTime;

pub const APP_NAME: &str = "FitBuddy";
const LOG_FILENAME: &str = "fitbuddy.log";

static LOGGING_INIT: Once = Once::new();

/*
 * Sets up logging for tests: debug level to the terminal only. Safe to call
 * from every test; only the first call has any effect.
 */
pub fn initialize_logging() {
    initialize_logging_with(LevelFilter::Debug, None);
}

fn initialize_logging_with(level: LevelFilter, log_file: Option<PathBuf>) {
    LOGGING_INIT.call_once(|| {
        let config = ConfigBuilder::new()
            .set_thread_level(LevelFilter::Off)
            .set_target_level(LevelFilter::Off)
            .build();
        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )];
        if let Some(path) = log_file {
            match File::create(&path) {
                Ok(file) => loggers.push(WriteLogger::new(level, config, file)),
                Err(e) => eprintln!("Could not create log file {path:?}: {e}"),
            }
        }
        if let Err(e) = CombinedLogger::init(loggers) {
            eprintln!("Failed to initialize logger: {e}");
        }
    });
}

/* Prefers the on-disk store; falls back to memory when no storage directory can be resolved. */
fn create_durable_store(config: &AppConfig) -> Arc<dyn DurableStoreOperations> {
    match CoreDurableStore::for_app(APP_NAME, config.storage_dir.as_deref()) {
        Ok(store) => {
            log::info!("Main: Using durable storage at {:?}.", store.storage_dir());
            Arc::new(store)
        }
        Err(e) => {
            log::warn!("Main: {e}, state will not survive a restart.");
            Arc::new(InMemoryDurableStore::new())
        }
    }
}

fn flush_commands(app_logic: &mut FitBuddyAppLogic) {
    while let Some(command) = app_logic.try_dequeue_command() {
        println!("{}", console::render_command(&command));
    }
}

fn main() {
    let config_manager = CoreConfigManager::new();
    let (config, config_error) = match config_manager.load_config(APP_NAME) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let log_file =
        path_utils::get_base_app_config_local_dir(APP_NAME).map(|dir| dir.join(LOG_FILENAME));
    initialize_logging_with(config.log_level_filter(), log_file);
    if let Some(e) = config_error {
        log::error!("Main: Failed to load configuration, using defaults: {e}");
    }
    log::info!("Main: {APP_NAME} starting.");

    let durable_store = create_durable_store(&config);
    let auth_provider = Arc::new(InMemoryAuthProvider::new(config.auth_latency()));
    let catalog = Arc::new(InMemoryExerciseCatalog::new(config.catalog_latency()));
    let mut app_logic =
        FitBuddyAppLogic::new(config.clone(), durable_store, auth_provider, catalog);

    let report = app_logic.on_startup();
    log::debug!("Main: Restoration report: {report:?}");
    flush_commands(&mut app_logic);
    println!("Type 'help' for a list of commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            log::warn!("Main: Could not flush prompt: {e}");
        }
        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                log::error!("Main: Failed to read input: {e}");
                break;
            }
        }
        if line.trim().is_empty() {
            continue;
        }
        match console::parse_line(&line) {
            Ok(ConsoleInput::Event(event)) => {
                app_logic.handle_event(event);
                flush_commands(&mut app_logic);
            }
            Ok(ConsoleInput::ShowState) => {
                println!("{}", console::render_state(app_logic.state(), app_logic.config()))
            }
            Ok(ConsoleInput::ShowFeed) => {
                println!(
                    "{}",
                    console::render_feed(app_logic.state(), OffsetDateTime::now_utc())
                )
            }
            Ok(ConsoleInput::ShowTip) => println!("{}", console::render_tip(app_logic.state())),
            Ok(ConsoleInput::Search(query)) => {
                let flagged = crate::core::selectors::exercises_with_favorite_flags(app_logic.state());
                let found = crate::core::selectors::filter_exercises(&flagged, &query);
                if found.is_empty() {
                    println!("No exercises match '{query}'.");
                }
                for exercise in found {
                    let star = if exercise.is_marked_favorite() { "*" } else { " " };
                    println!("{star} [{}] {} ({})", exercise.id, exercise.name, exercise.muscle);
                }
            }
            Ok(ConsoleInput::Help) => println!("{}", console::HELP_TEXT),
            Ok(ConsoleInput::Quit) => break,
            Err(message) => println!("{message}"),
        }
    }

    app_logic.on_quit();
    log::info!("Main: {APP_NAME} exited after {} dispatches.", app_logic.store().dispatch_count());
}
