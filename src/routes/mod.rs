pub mod health;
pub mod tasks;
pub mod users;

use actix_web::{web, HttpRequest};
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::validate::{merge_sources, payload_map, query_map};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(users::register)
            .service(users::login)
            .service(users::logout),
    )
    .service(
        web::scope("/task")
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// Assembles the request payload with body fields taking precedence over
/// query parameters.
pub(crate) fn body_first(
    req: &HttpRequest,
    body: &web::Bytes,
) -> Result<Map<String, Value>, AppError> {
    merge_sources(payload_map(body), query_map(req.query_string()))
        .ok_or_else(|| AppError::Invalid("Couldn't Parse Data".into()))
}

/// Assembles the request payload with query parameters taking precedence
/// over body fields.
pub(crate) fn query_first(
    req: &HttpRequest,
    body: &web::Bytes,
) -> Result<Map<String, Value>, AppError> {
    merge_sources(query_map(req.query_string()), payload_map(body))
        .ok_or_else(|| AppError::Invalid("Couldn't Parse Data".into()))
}
