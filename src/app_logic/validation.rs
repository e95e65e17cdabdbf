/*
 * Form-level validation for the login and registration forms. Failures are
 * shown inline next to the form and never produce a store intent.
 */

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MIN_USERNAME_LENGTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmailRequired,
    EmailInvalid,
    PasswordRequired,
    PasswordTooShort,
    UsernameRequired,
    UsernameTooShort,
    PasswordsDoNotMatch,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmailRequired => write!(f, "Email is required"),
            ValidationError::EmailInvalid => write!(f, "Please enter a valid email"),
            ValidationError::PasswordRequired => write!(f, "Password is required"),
            ValidationError::PasswordTooShort => write!(
                f,
                "Password must be at least {MIN_PASSWORD_LENGTH} characters"
            ),
            ValidationError::UsernameRequired => write!(f, "Username is required"),
            ValidationError::UsernameTooShort => write!(
                f,
                "Username must be at least {MIN_USERNAME_LENGTH} characters"
            ),
            ValidationError::PasswordsDoNotMatch => write!(f, "Passwords must match"),
        }
    }
}

impl std::error::Error for ValidationError {}

// One '@' with a non-empty local part and a dotted domain.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.chars().any(char::is_whitespace)
}

fn check_email(email: &str, errors: &mut Vec<ValidationError>) {
    let email = email.trim();
    if email.is_empty() {
        errors.push(ValidationError::EmailRequired);
    } else if !is_plausible_email(email) {
        errors.push(ValidationError::EmailInvalid);
    }
}

fn check_password(password: &str, errors: &mut Vec<ValidationError>) {
    if password.is_empty() {
        errors.push(ValidationError::PasswordRequired);
    } else if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(ValidationError::PasswordTooShort);
    }
}

pub fn validate_login(email: &str, password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    check_email(email, &mut errors);
    check_password(password, &mut errors);
    errors
}

pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let username = username.trim();
    if username.is_empty() {
        errors.push(ValidationError::UsernameRequired);
    } else if username.chars().count() < MIN_USERNAME_LENGTH {
        errors.push(ValidationError::UsernameTooShort);
    }
    check_email(email, &mut errors);
    check_password(password, &mut errors);
    if password != confirm_password {
        errors.push(ValidationError::PasswordsDoNotMatch);
    }
    errors
}
