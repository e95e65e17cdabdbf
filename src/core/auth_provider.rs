/*
 * The authentication capability. `AuthProvider` is the seam a real backend
 * would implement; `InMemoryAuthProvider` checks credentials against a small
 * user table held in memory and waits a configurable delay to mimic a network
 * round trip. Passwords stay inside the provider: callers only ever receive a
 * `User` record.
 */
use crate::core::models::User;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    InvalidCredentials,
    EmailAlreadyRegistered,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::EmailAlreadyRegistered => write!(f, "Email already registered"),
        }
    }
}

impl std::error::Error for AuthError {}

pub type Result<T> = std::result::Result<T, AuthError>;

pub trait AuthProvider: Send + Sync {
    fn login(&self, email: &str, password: &str) -> Result<User>;
    fn register(&self, username: &str, email: &str, password: &str) -> Result<User>;
}

struct StoredAccount {
    user: User,
    password: String,
}

pub struct InMemoryAuthProvider {
    accounts: Mutex<Vec<StoredAccount>>,
    latency: Duration,
}

impl InMemoryAuthProvider {
    /* Seeds the two demo accounts. */
    pub fn new(latency: Duration) -> Self {
        let seed = |id: &str, username: &str, email: &str| StoredAccount {
            user: User {
                id: id.to_string(),
                username: username.to_string(),
                email: email.to_string(),
            },
            password: "password123".to_string(),
        };
        InMemoryAuthProvider {
            accounts: Mutex::new(vec![
                seed("1", "john_doe", "john@example.com"),
                seed("2", "jane_smith", "jane@example.com"),
            ]),
            latency,
        }
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }

    fn lock_accounts(&self) -> std::sync::MutexGuard<'_, Vec<StoredAccount>> {
        self.accounts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AuthProvider for InMemoryAuthProvider {
    fn login(&self, email: &str, password: &str) -> Result<User> {
        log::trace!("InMemoryAuthProvider: Login attempt for '{email}'");
        self.simulate_latency();
        let accounts = self.lock_accounts();
        match accounts
            .iter()
            .find(|account| account.user.email == email && account.password == password)
        {
            Some(account) => {
                log::debug!("InMemoryAuthProvider: '{email}' signed in.");
                Ok(account.user.clone())
            }
            None => {
                log::debug!("InMemoryAuthProvider: Rejected credentials for '{email}'.");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    fn register(&self, username: &str, email: &str, password: &str) -> Result<User> {
        log::trace!("InMemoryAuthProvider: Registration attempt for '{email}'");
        self.simulate_latency();
        let mut accounts = self.lock_accounts();
        if accounts.iter().any(|account| account.user.email == email) {
            log::debug!("InMemoryAuthProvider: '{email}' is already registered.");
            return Err(AuthError::EmailAlreadyRegistered);
        }
        let user = User {
            id: (accounts.len() + 1).to_string(),
            username: username.to_string(),
            email: email.to_string(),
        };
        accounts.push(StoredAccount {
            user: user.clone(),
            password: password.to_string(),
        });
        log::info!(
            "InMemoryAuthProvider: Registered '{}' with id {}.",
            user.username,
            user.id
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> InMemoryAuthProvider {
        InMemoryAuthProvider::new(Duration::ZERO)
    }

    #[test]
    fn test_login_with_valid_credentials_returns_user_without_password() {
        let user = provider()
            .login("john@example.com", "password123")
            .unwrap();

        assert_eq!(
            user,
            User {
                id: "1".to_string(),
                username: "john_doe".to_string(),
                email: "john@example.com".to_string(),
            }
        );
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_login_with_wrong_password_is_rejected() {
        let err = provider()
            .login("john@example.com", "wrong")
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_register_assigns_incrementing_ids() {
        let provider = provider();

        let first = provider.register("newuser", "new@x.com", "pw").unwrap();
        let second = provider.register("other", "other@x.com", "pw").unwrap();

        assert_eq!(first.id, "3");
        assert_eq!(first.username, "newuser");
        assert_eq!(second.id, "4");
    }

    #[test]
    fn test_register_duplicate_email_is_rejected() {
        let provider = provider();
        provider.register("newuser", "new@x.com", "pw").unwrap();

        let err = provider.register("newuser", "new@x.com", "pw").unwrap_err();

        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_registered_account_can_log_in() {
        let provider = provider();
        let registered = provider.register("newuser", "new@x.com", "secret1").unwrap();

        let logged_in = provider.login("new@x.com", "secret1").unwrap();

        assert_eq!(logged_in, registered);
    }
}
