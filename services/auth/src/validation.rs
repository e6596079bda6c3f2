//! Signup and login input validation

use regex::Regex;
use std::sync::OnceLock;

/// Column limits of the `users` table
pub const MAX_USERNAME_LEN: usize = 50;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("username is required".to_string());
    }

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(format!(
            "username must be at most {} characters long",
            MAX_USERNAME_LEN
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email is required".to_string());
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(format!(
            "email must be at most {} characters long",
            MAX_EMAIL_LEN
        ));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("email has an invalid format".to_string());
    }

    Ok(())
}

/// Validate password
///
/// No composition rules; length is only bounded to keep request bodies sane.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("password is required".to_string());
    }

    if password.len() > MAX_PASSWORD_LEN {
        return Err(format!(
            "password must be at most {} characters long",
            MAX_PASSWORD_LEN
        ));
    }

    Ok(())
}

/// Validate a complete signup form, reporting the first invalid field
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), String> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)
}

/// Validate a login form
///
/// Only presence is checked; a badly shaped email simply never matches.
pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if password.is_empty() {
        return Err("password is required".to_string());
    }
    Ok(())
}
