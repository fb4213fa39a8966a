//!
//! # Task routes
//!
//! The four task operations. Each one assembles the payload, validates the
//! credential shape, runs the session gate, and only then parses the task
//! fields it needs and performs the single persistence call.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::envelope::{Envelope, Outcome};
use crate::error::AppError;
use crate::gate::authorize;
use crate::models::{task_from_map, user_from_map, Task};
use crate::routes::query_first;
use crate::AppState;

/// Lists the authenticated user's tasks.
///
/// ## Outcomes
/// - `200 ok` "List of {n} tasks" with the list in `data`.
/// - `403 forbidden` from the gate.
#[get("")]
pub async fn list_tasks(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = query_first(&req, &body)?;
    let submitted = user_from_map(&data, true, false)?;
    let user = authorize(state.store.as_ref(), &submitted).await?;

    let tasks = state.store.list_tasks(&user.username).await?;
    Ok(Envelope::of(Outcome::Ok)
        .message(format!("List of {} tasks", tasks.len()))
        .data(json!(tasks))
        .respond())
}

/// Adds a task. The id is assigned by the store as max existing id plus
/// one, so ids are never reused even after deletions.
///
/// ## Outcomes
/// - `200 ok` "Added Successfully" with the created `{id, details}`.
/// - `400 bad` for shape or field violations.
/// - `403 forbidden` from the gate.
#[post("")]
pub async fn create_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = query_first(&req, &body)?;
    let submitted = user_from_map(&data, false, false)?;
    let user = authorize(state.store.as_ref(), &submitted).await?;

    let input = task_from_map(&data, false, true, false)?;
    let details = input
        .details
        .ok_or_else(|| AppError::BadRequest("Invalid Parameters".into()))?;

    let id = state.store.next_task_id(&user.username).await?;
    if state.store.create_task(&user.username, id, &details).await? {
        Ok(Envelope::of(Outcome::Ok)
            .message("Added Successfully")
            .data(json!(Task { id, details }))
            .respond())
    } else {
        Err(AppError::Internal(format!(
            "task insert not acknowledged for {}",
            user.username
        )))
    }
}

/// Rewrites the details of an existing task.
///
/// ## Outcomes
/// - `200 ok` "Updated Successfully".
/// - `400 bad` "Failed to Update" when no task with that id exists.
/// - `403 forbidden` from the gate.
#[put("")]
pub async fn update_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = query_first(&req, &body)?;
    let submitted = user_from_map(&data, false, false)?;
    let user = authorize(state.store.as_ref(), &submitted).await?;

    let input = task_from_map(&data, false, false, false)?;
    let (id, details) = match (input.id, input.details) {
        (Some(id), Some(details)) => (id, details),
        _ => return Err(AppError::BadRequest("Invalid Parameters".into())),
    };

    if state.store.update_task(&user.username, id, &details).await? {
        Ok(Envelope::of(Outcome::Ok)
            .message("Updated Successfully")
            .respond())
    } else {
        Err(AppError::BadRequest("Failed to Update".into()))
    }
}

/// Deletes a task by id.
///
/// ## Outcomes
/// - `200 ok` "Deleted Successfully".
/// - `400 bad` "Failed to Delete" when no task with that id exists.
/// - `403 forbidden` from the gate.
#[delete("")]
pub async fn delete_task(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = query_first(&req, &body)?;
    let submitted = user_from_map(&data, false, false)?;
    let user = authorize(state.store.as_ref(), &submitted).await?;

    let input = task_from_map(&data, false, false, true)?;
    let id = input
        .id
        .ok_or_else(|| AppError::BadRequest("Invalid Parameters".into()))?;

    if state.store.delete_task(&user.username, id).await? {
        Ok(Envelope::of(Outcome::Ok)
            .message("Deleted Successfully")
            .respond())
    } else {
        Err(AppError::BadRequest("Failed to Delete".into()))
    }
}
