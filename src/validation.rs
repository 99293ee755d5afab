use chrono::NaiveTime;

use crate::error::{BotError, Result};
use crate::models::{Account, ResponseTemplate, Settings};

const MAX_USERNAME_LEN: usize = 50;
const MAX_RESPONSE_LEN: usize = 280;

fn malformed(reason: impl Into<String>) -> BotError {
    BotError::MalformedInput(reason.into())
}

/// Boundary checks run before a payload reaches a service
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Decode a JSON payload, reporting shape errors as malformed input
    pub fn parse_payload<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T> {
        serde_json::from_str(payload).map_err(|e| malformed(format!("Invalid payload: {e}")))
    }

    /// Validate an id supplied by the caller
    pub fn validate_id(id: &str) -> Result<()> {
        if id.trim().is_empty() {
            return Err(malformed("Id cannot be empty"));
        }
        Ok(())
    }

    /// Validate an account payload
    pub fn validate_account(account: &Account) -> Result<()> {
        Self::validate_id(&account.id)?;

        let username = account.username.trim();
        if username.is_empty() {
            return Err(malformed("Username cannot be empty"));
        }

        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(malformed(format!(
                "Username too long (max {MAX_USERNAME_LEN} characters)"
            )));
        }

        if username.chars().any(char::is_control) {
            return Err(malformed("Username contains invalid characters"));
        }

        Ok(())
    }

    /// Validate a response template payload
    pub fn validate_response(response: &ResponseTemplate) -> Result<()> {
        Self::validate_id(&response.id)?;

        if response.text.trim().is_empty() {
            return Err(malformed("Response text cannot be empty"));
        }

        if response.text.chars().count() > MAX_RESPONSE_LEN {
            return Err(malformed(format!(
                "Response text too long (max {MAX_RESPONSE_LEN} characters)"
            )));
        }

        Ok(())
    }

    /// Validate a settings payload
    pub fn validate_settings(settings: &Settings) -> Result<()> {
        if settings.check_interval == 0 {
            return Err(malformed("Check interval must be greater than 0"));
        }

        if let Some(email) = settings.notification_email.as_deref() {
            if !email.is_empty() {
                Self::validate_email(email)?;
            }
        }

        if let Some(start) = settings.pause_start.as_deref() {
            Self::validate_time_of_day(start)?;
        }
        if let Some(end) = settings.pause_end.as_deref() {
            Self::validate_time_of_day(end)?;
        }

        if settings.pause_overnight
            && (settings.pause_start.is_none() || settings.pause_end.is_none())
        {
            return Err(malformed(
                "Overnight pause requires both pause start and pause end",
            ));
        }

        Ok(())
    }

    /// Validate email format
    pub fn validate_email(email: &str) -> Result<()> {
        if email.len() > 254 {
            return Err(malformed("Email too long (max 254 characters)"));
        }

        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            return Err(malformed("Email must have exactly one @ symbol"));
        }

        let (local_part, domain_part) = (parts[0], parts[1]);
        if local_part.is_empty() || local_part.len() > 64 {
            return Err(malformed("Email local part invalid"));
        }

        if domain_part.is_empty() || !domain_part.contains('.') {
            return Err(malformed("Email domain invalid"));
        }

        Ok(())
    }

    /// Validate an `HH:MM` time of day
    pub fn validate_time_of_day(value: &str) -> Result<()> {
        if value.len() != 5 || NaiveTime::parse_from_str(value, "%H:%M").is_err() {
            return Err(malformed(format!("Invalid time of day: {value} (expected HH:MM)")));
        }
        Ok(())
    }
}
