//!
//! # User routes
//!
//! Registration, login, and logout. Login and logout authenticate against
//! the stored record directly; the session gate only guards the task
//! routes, since logging in is what establishes the session it checks.

use actix_web::{get, post, web, HttpRequest, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::envelope::{Envelope, Outcome};
use crate::error::AppError;
use crate::gate::{hash_password, verify_password};
use crate::models::user_from_map;
use crate::routes::{body_first, query_first};
use crate::AppState;

/// Registers a new user.
///
/// Expects exactly `username` and `password`. The fresh record starts with
/// an open session window, so a register can be followed directly by task
/// calls without a separate login.
///
/// ## Outcomes
/// - `202 accepted` on success.
/// - `403 forbidden` "Username Taken" when the name is already registered.
/// - `400 bad` for shape or field violations.
#[post("/new")]
pub async fn register(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = body_first(&req, &body)?;
    let mut user = user_from_map(&data, true, false)?;

    if state.store.get_user(&user.username).await?.is_some() {
        return Err(AppError::Forbidden("Username Taken".into()));
    }

    user.password = hash_password(&user.password)?;
    user.state = true;
    user.timeout = Utc::now().timestamp_millis() + state.max_login_time_ms;

    if state.store.create_user(&user).await? {
        Ok(Envelope::of(Outcome::Accepted).respond())
    } else {
        Err(AppError::Internal(format!(
            "user insert not acknowledged for {}",
            user.username
        )))
    }
}

/// Logs a user in and replies with their task list in `data`.
///
/// ## Outcomes
/// - `202 accepted` "Login Successful" with the task list.
/// - `403 forbidden` "Invalid Credentials" on a password mismatch.
/// - `500 internal` when the username is unknown. An unknown username
///   deliberately maps to `internal`, not `forbidden`; see DESIGN.md.
#[get("/in")]
pub async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = query_first(&req, &body)?;
    let submitted = user_from_map(&data, true, false)?;

    let stored = state
        .store
        .get_user(&submitted.username)
        .await?
        .ok_or_else(|| AppError::Internal(format!("no record for {}", submitted.username)))?;

    if !verify_password(&submitted.password, &stored.password)? {
        return Err(AppError::Forbidden("Invalid Credentials".into()));
    }

    if !state
        .store
        .set_user_session(&stored.username, true, state.max_login_time_ms)
        .await?
    {
        return Err(AppError::Internal(format!(
            "session refresh not acknowledged for {}",
            stored.username
        )));
    }

    let tasks = state.store.list_tasks(&stored.username).await?;
    Ok(Envelope::of(Outcome::Accepted)
        .message("Login Successful")
        .data(json!(tasks))
        .respond())
}

/// Logs a user out, closing the session window.
///
/// ## Outcomes
/// - `200 ok` "Logout Successful".
/// - `403 forbidden` "Invalid Credentials" on a password mismatch.
/// - `500 internal` when the username is unknown (same quirk as login).
#[post("/out")]
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let data = body_first(&req, &body)?;
    let submitted = user_from_map(&data, true, false)?;

    let stored = state
        .store
        .get_user(&submitted.username)
        .await?
        .ok_or_else(|| AppError::Internal(format!("no record for {}", submitted.username)))?;

    if !verify_password(&submitted.password, &stored.password)? {
        return Err(AppError::Forbidden("Invalid Credentials".into()));
    }

    if !state.store.set_user_session(&stored.username, false, 0).await? {
        return Err(AppError::Internal(format!(
            "session close not acknowledged for {}",
            stored.username
        )));
    }

    Ok(Envelope::of(Outcome::Ok)
        .message("Logout Successful")
        .respond())
}
