/*
 * Authentication slice. `user` and `is_authenticated` are only ever changed
 * together, so `is_authenticated == user.is_some()` holds in every reachable
 * state.
 */
use crate::core::models::User;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    user: Option<User>,
    is_authenticated: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.error = None;
    }

    fn sign_out(&mut self) {
        self.user = None;
        self.is_authenticated = false;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SetLoading(bool),
    LoginSuccess(User),
    RegisterSuccess(User),
    LoginFailure(String),
    Logout,
    RestoreAuth(User),
}

pub fn reduce(state: &mut AuthState, action: AuthAction) {
    match action {
        AuthAction::SetLoading(is_loading) => state.is_loading = is_loading,
        AuthAction::LoginSuccess(user)
        | AuthAction::RegisterSuccess(user)
        | AuthAction::RestoreAuth(user) => {
            state.sign_in(user);
            state.is_loading = false;
        }
        AuthAction::LoginFailure(message) => {
            state.sign_out();
            state.is_loading = false;
            state.error = Some(message);
        }
        AuthAction::Logout => {
            state.sign_out();
            state.error = None;
        }
    }
}
