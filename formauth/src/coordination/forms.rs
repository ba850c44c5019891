use serde::Deserialize;

use crate::password::PASSWORD_MAX_BYTES;
use crate::userdb::{EMAIL_MAX_LEN, USERNAME_MAX_LEN};

use super::errors::CoordinationError;

/// Fields posted by the registration form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Fields posted by the login form
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Trim and lowercase where appropriate, then check every field
    pub fn normalize(self) -> Result<Self, CoordinationError> {
        let username = self.username.trim().to_string();
        let email = normalize_email(&self.email);

        if username.is_empty() {
            return Err(CoordinationError::Validation(
                "Username is required".to_string(),
            ));
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(CoordinationError::Validation(format!(
                "Username must be at most {USERNAME_MAX_LEN} characters"
            )));
        }
        check_email(&email)?;
        if self.password.is_empty() {
            return Err(CoordinationError::Validation(
                "Password is required".to_string(),
            ));
        }
        if self.password.len() > PASSWORD_MAX_BYTES {
            return Err(CoordinationError::Validation(format!(
                "Password must be at most {PASSWORD_MAX_BYTES} bytes"
            )));
        }

        Ok(Self {
            username,
            email,
            password: self.password,
        })
    }
}

impl LoginForm {
    pub fn normalize(self) -> Result<Self, CoordinationError> {
        let email = normalize_email(&self.email);
        if email.is_empty() || self.password.is_empty() {
            return Err(CoordinationError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        Ok(Self {
            email,
            password: self.password,
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn check_email(email: &str) -> Result<(), CoordinationError> {
    if email.is_empty() {
        return Err(CoordinationError::Validation("Email is required".to_string()));
    }
    if email.chars().count() > EMAIL_MAX_LEN {
        return Err(CoordinationError::Validation(format!(
            "Email must be at most {EMAIL_MAX_LEN} characters"
        )));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoordinationError::Validation(
            "Email address is not valid".to_string(),
        )),
    }
}
