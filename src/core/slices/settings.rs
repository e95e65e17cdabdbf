// Presentation settings persisted across launches. Only the theme for now.
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsState {
    pub is_dark: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    SetDarkMode(bool),
    ToggleTheme,
}

pub fn reduce(state: &mut SettingsState, action: SettingsAction) {
    match action {
        SettingsAction::SetDarkMode(is_dark) => state.is_dark = is_dark,
        SettingsAction::ToggleTheme => state.is_dark = !state.is_dark,
    }
}
