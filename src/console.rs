/*
 * A line-oriented stand-in for a graphical front end. Each input line is
 * parsed into either an `AppEvent` for the application logic or a local
 * request (help, state inspection, quit). Queued `UiCommand`s are rendered
 * back as plain text.
 */
use crate::app_logic::events::{AppEvent, UiCommand};
use crate::core::selectors::{self, Route};
use crate::core::{AppConfig, AppState};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Event(AppEvent),
    ShowState,
    ShowFeed,
    ShowTip,
    Search(String),
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "\
Commands:
  login <email> <password>
  register <username> <email> <password> <confirm>
  logout
  exercises [muscle]          load the catalog
  search <query>              filter the loaded catalog
  fav <exercise_id>           toggle an exercise favorite
  open <exercise_id>          show exercise details
  water <ml> | water reset | quick
  workout <minutes> <calories> <name...>
  reset-stats
  tip | tip <index> | tip fav
  theme                       toggle dark mode
  state | feed | help | quit";

fn parse_number<T: std::str::FromStr>(value: Option<&str>, what: &str) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("Missing {what}"))?;
    value
        .parse()
        .map_err(|_| format!("'{value}' is not a valid {what}"))
}

fn required(value: Option<&str>, what: &str) -> Result<String, String> {
    value
        .map(str::to_string)
        .ok_or_else(|| format!("Missing {what}"))
}

pub fn parse_line(line: &str) -> Result<ConsoleInput, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Err("Empty command".to_string());
    };
    let input = match command.to_ascii_lowercase().as_str() {
        "login" => ConsoleInput::Event(AppEvent::LoginSubmitted {
            email: required(words.next(), "email")?,
            password: required(words.next(), "password")?,
        }),
        "register" => ConsoleInput::Event(AppEvent::RegisterSubmitted {
            username: required(words.next(), "username")?,
            email: required(words.next(), "email")?,
            password: required(words.next(), "password")?,
            confirm_password: required(words.next(), "password confirmation")?,
        }),
        "logout" => ConsoleInput::Event(AppEvent::LogoutRequested),
        "exercises" => ConsoleInput::Event(AppEvent::ExercisesRequested {
            muscle: words.next().map(str::to_string),
        }),
        "search" => ConsoleInput::Search(words.collect::<Vec<_>>().join(" ")),
        "fav" => ConsoleInput::Event(AppEvent::ExerciseFavoriteToggled {
            exercise_id: required(words.next(), "exercise id")?,
        }),
        "open" => ConsoleInput::Event(AppEvent::ExerciseOpened {
            exercise_id: required(words.next(), "exercise id")?,
        }),
        "water" => match words.next() {
            Some("reset") => ConsoleInput::Event(AppEvent::WaterReset),
            amount => ConsoleInput::Event(AppEvent::WaterAdded {
                ml: parse_number(amount, "amount in ml")?,
            }),
        },
        "quick" => ConsoleInput::Event(AppEvent::QuickWaterLogged),
        "workout" => {
            let minutes = parse_number(words.next(), "number of minutes")?;
            let calories = parse_number(words.next(), "number of calories")?;
            let name = words.collect::<Vec<_>>().join(" ");
            ConsoleInput::Event(AppEvent::WorkoutLogged {
                name: if name.is_empty() { "Workout".to_string() } else { name },
                minutes,
                calories,
            })
        }
        "reset-stats" => ConsoleInput::Event(AppEvent::StatsResetRequested),
        "tip" => match words.next() {
            None => ConsoleInput::ShowTip,
            Some("fav") => ConsoleInput::Event(AppEvent::TipFavoriteToggled),
            index => ConsoleInput::Event(AppEvent::TipScrolled {
                index: parse_number(index, "tip index")?,
            }),
        },
        "theme" => ConsoleInput::Event(AppEvent::ThemeToggled),
        "state" => ConsoleInput::ShowState,
        "feed" => ConsoleInput::ShowFeed,
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" => ConsoleInput::Quit,
        other => return Err(format!("Unknown command '{other}', try 'help'")),
    };
    Ok(input)
}

pub fn render_command(command: &UiCommand) -> String {
    match command {
        UiCommand::Navigate(Route::Login) => "== Login ==".to_string(),
        UiCommand::Navigate(Route::Home) => "== Home ==".to_string(),
        UiCommand::ShowExerciseDetail(exercise) => {
            let mut text = format!(
                "{} [{}] muscle: {}, equipment: {}, difficulty: {}{}",
                exercise.name,
                exercise.id,
                exercise.muscle,
                exercise.equipment,
                exercise.difficulty,
                if exercise.is_marked_favorite() { " (favorite)" } else { "" }
            );
            if let Some(instructions) = &exercise.instructions {
                text.push_str("\n  ");
                text.push_str(instructions);
            }
            text
        }
        UiCommand::ShowAlert { title, message } => format!("[{title}] {message}"),
        UiCommand::ShowValidationErrors(errors) => errors
            .iter()
            .map(|error| format!("  ! {error}"))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render_state(state: &AppState, config: &AppConfig) -> String {
    let stats = &state.user_stats.stats;
    let user = state
        .auth
        .user()
        .map_or("(signed out)".to_string(), |user| {
            format!("{} <{}>", user.username, user.email)
        });
    format!(
        "User: {user}\nWater: {} / {} ml ({}%)\nCalories: {}  Workout: {} min\nExercises loaded: {}  Favorites: {}\nTheme: {}",
        stats.water_intake,
        config.daily_water_goal_ml,
        selectors::water_progress_percent(stats.water_intake, config.daily_water_goal_ml),
        stats.calories_burned,
        stats.total_workout_time,
        state.exercises.items.len(),
        state.favorites.items().len(),
        if state.settings.is_dark { "dark" } else { "light" },
    )
}

pub fn render_feed(state: &AppState, now: OffsetDateTime) -> String {
    if state.activity.items.is_empty() {
        return "No activity yet.".to_string();
    }
    state
        .activity
        .items
        .iter()
        .map(|activity| {
            let when = selectors::time_ago(&activity.timestamp, now)
                .unwrap_or_else(|| activity.timestamp.clone());
            match activity.duration {
                Some(minutes) => format!("  {} ({minutes} min) {when}", activity.name),
                None => format!("  {} {when}", activity.name),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_tip(state: &AppState) -> String {
    match selectors::current_tip(state) {
        Some(tip) => format!(
            "Tip {}/{}: {}{}\n  {}",
            state.wellness_tips.current_index() + 1,
            state.wellness_tips.items().len(),
            tip.title,
            if selectors::is_current_tip_favorited(state) { " (favorite)" } else { "" },
            tip.description
        ),
        None => "No tips available.".to_string(),
    }
}
