use actix_web::{get, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::envelope::{Envelope, Outcome};

/// Health check endpoint
///
/// Replies with the uniform envelope, carrying the current timestamp in
/// `data`.
#[get("/health")]
pub async fn health() -> HttpResponse {
    Envelope::of(Outcome::Ok)
        .data(json!({ "timestamp": Utc::now() }))
        .respond()
}
