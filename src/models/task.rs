//!
//! # Task record and mapper
//!
//! Tasks are plain text entries owned by a username. The id is unique per
//! user and monotonically assigned by the store; it never appears inside
//! the stored details.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

use crate::error::AppError;
use crate::validate::shape_matches;

/// Represents a task entry as stored and as returned on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub details: String,
}

/// Partial task value built from an inbound payload. Ignored fields stay
/// `None`; the handler decides which parts it needs.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TaskInput {
    pub id: Option<i64>,
    pub details: Option<String>,
}

/// Builds a [`TaskInput`] out of a validated untyped map.
///
/// The expected field set shrinks with the ignore flags, so an id-only
/// deletion payload validates against `{id}` and a creation payload
/// against `{details}`. `id` must be a non-negative integer and `details`
/// a string (possibly empty).
pub fn task_from_map(
    data: &Map<String, Value>,
    strict: bool,
    ignore_id: bool,
    ignore_details: bool,
) -> Result<TaskInput, AppError> {
    let mut expected: Vec<&str> = Vec::with_capacity(2);
    if !ignore_id {
        expected.push("id");
    }
    if !ignore_details {
        expected.push("details");
    }

    if !shape_matches(data, &expected, strict) {
        return Err(AppError::BadRequest("Invalid Parameters".into()));
    }

    let id = if ignore_id {
        None
    } else {
        match data.get("id").and_then(Value::as_i64) {
            Some(id) if id >= 0 => Some(id),
            _ => return Err(AppError::BadRequest("Invalid Field Value".into())),
        }
    };

    let details = if ignore_details {
        None
    } else {
        match data.get("details") {
            Some(Value::String(details)) => Some(details.clone()),
            _ => return Err(AppError::BadRequest("Invalid Field Value".into())),
        }
    };

    Ok(TaskInput { id, details })
}
