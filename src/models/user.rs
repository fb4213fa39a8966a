//!
//! # User record and mapper
//!
//! A `User` couples credentials with session state: `state` is the
//! is-logged-in flag and `timeout` the absolute epoch-millisecond instant
//! after which the session no longer counts as active.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::error::AppError;
use crate::validate::shape_matches;

/// Field set an inbound credential payload is expected to carry.
pub const USER_FIELDS: &[&str] = &["username", "password"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub username: String,
    pub password: String,
    /// Whether the user currently counts as logged in.
    pub state: bool,
    /// Session expiry instant, epoch milliseconds.
    pub timeout: i64,
}

impl User {
    /// Constructs a user, enforcing the field-level constraints: non-empty
    /// username, password of at least 8 characters, non-negative timeout.
    pub fn new(
        username: String,
        password: String,
        state: bool,
        timeout: i64,
    ) -> Result<Self, AppError> {
        if username.is_empty() {
            return Err(AppError::BadRequest("Invalid Field Value".into()));
        }
        if password.len() < 8 {
            return Err(AppError::BadRequest(
                "Length of password is too short".into(),
            ));
        }
        if timeout < 0 {
            return Err(AppError::BadRequest("Invalid Field Value".into()));
        }
        Ok(Self {
            username,
            password,
            state,
            timeout,
        })
    }
}

fn string_field(data: &Map<String, Value>, key: &str) -> Result<String, AppError> {
    match data.get(key) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(AppError::BadRequest("Invalid Field Value".into())),
    }
}

/// Builds a [`User`] out of a validated untyped map.
///
/// With `full_map` unset (every inbound request), client-submitted session
/// fields are never trusted: `state` is forced to `false` and `timeout` to
/// the current instant. `full_map` is reserved for trusted round-trips of
/// complete stored records.
pub fn user_from_map(
    data: &Map<String, Value>,
    strict: bool,
    full_map: bool,
) -> Result<User, AppError> {
    if !shape_matches(data, USER_FIELDS, strict) {
        return Err(AppError::BadRequest("Invalid Parameters".into()));
    }

    let username = string_field(data, "username")?;
    let password = string_field(data, "password")?;

    let (state, timeout) = if full_map {
        let state = match data.get("state") {
            Some(Value::Bool(value)) => *value,
            _ => return Err(AppError::BadRequest("Invalid Field Value".into())),
        };
        let timeout = data
            .get("timeout")
            .and_then(Value::as_i64)
            .ok_or_else(|| AppError::BadRequest("Invalid Field Value".into()))?;
        (state, timeout)
    } else {
        (false, Utc::now().timestamp_millis())
    };

    User::new(username, password, state, timeout)
}
