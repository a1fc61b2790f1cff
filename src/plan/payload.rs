//! Registration Payloads
//!
//! Builds the JSON bodies posted during the feature demonstration and the
//! curl commands that send them.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::Serialize;

use crate::error::Result;

/// Last millisecond stamp handed out by [`unique_email`].
static LAST_EMAIL_STAMP: AtomicI64 = AtomicI64::new(0);

/// Body of a registration request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegistrationPayload {
    /// Payload whose password is too short and should be rejected.
    pub fn short_password() -> Self {
        Self {
            name: "Demo User".to_string(),
            email: "demo@test.com".to_string(),
            password: "123".to_string(),
        }
    }

    /// Payload with a valid password and a fresh email address.
    pub fn valid_password() -> Self {
        Self {
            name: "Demo User Valid".to_string(),
            email: unique_email(),
            password: "securepassword123".to_string(),
        }
    }

    /// Serializes the payload as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Returns `demo<millis>@test.com`, never repeating within the process.
///
/// Calls landing in the same millisecond are bumped forward so each stamp
/// is strictly greater than the previous one.
pub fn unique_email() -> String {
    let now = Utc::now().timestamp_millis();
    let previous = LAST_EMAIL_STAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or_else(|last| last);
    let stamp = now.max(previous + 1);

    format!("demo{}@test.com", stamp)
}

/// Quotes a string for safe use as a single POSIX shell word.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Builds the curl command that POSTs `payload` as JSON to `url`.
pub fn post_json_command(url: &str, payload: &RegistrationPayload) -> Result<String> {
    let body = payload.to_json()?;
    Ok(format!(
        "curl -s -X POST -H \"Content-Type: application/json\" -d {} {}",
        shell_quote(&body),
        shell_quote(url)
    ))
}
