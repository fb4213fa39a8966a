//!
//! # Response Envelope
//!
//! Every route replies with the same wire shape, `{message, status, error,
//! data}`, regardless of outcome. `Outcome` is the closed vocabulary of
//! response categories and carries the fixed status code and default
//! error/message text for each; `Envelope` is the builder that renders one
//! into an `HttpResponse`.
//!
//! Callers may override the default `message` and `error` strings, but the
//! status code is fixed per `Outcome` so the API's status vocabulary stays
//! closed and predictable.

use actix_web::{http::StatusCode, HttpResponse};
use serde_json::{json, Value};

/// The closed set of response categories supported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Created,
    Accepted,
    Bad,
    Invalid,
    Forbidden,
    NotFound,
    Internal,
}

impl Outcome {
    /// Fixed (status, default error, default message) row for this category.
    const fn row(self) -> (u16, Option<&'static str>, &'static str) {
        match self {
            Outcome::Ok => (200, None, "The request was successful"),
            Outcome::Created => (201, None, "The creation was successful"),
            Outcome::Accepted => (202, None, "Accepted"),
            Outcome::Bad => (
                400,
                Some("Bad or Invalid Request"),
                "A bad request was sent to the server",
            ),
            Outcome::Invalid => (
                400,
                Some("Bad or Invalid Request"),
                "An invalid request was sent to the server",
            ),
            Outcome::Forbidden => (
                403,
                Some("Forbidden"),
                "This method or Request is Forbidden",
            ),
            Outcome::NotFound => (
                404,
                Some("Not Found"),
                "The resource or method was not found",
            ),
            Outcome::Internal => (
                500,
                Some("Internal Server Error"),
                "Some internal system has failed to respond",
            ),
        }
    }

    pub fn status(self) -> StatusCode {
        // The table only holds codes from the standard registry.
        StatusCode::from_u16(self.row().0).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn default_error(self) -> Option<&'static str> {
        self.row().1
    }

    pub fn default_message(self) -> &'static str {
        self.row().2
    }
}

/// Uniform response wrapper. Build with [`Envelope::of`] and finish with
/// [`Envelope::respond`].
#[derive(Debug)]
pub struct Envelope {
    kind: Outcome,
    message: Option<String>,
    error: Option<String>,
    data: Option<Value>,
}

impl Envelope {
    pub fn of(kind: Outcome) -> Self {
        Self {
            kind,
            message: None,
            error: None,
            data: None,
        }
    }

    /// Override the default message text.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Override the default error text.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attach a payload to the `data` field.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn respond(self) -> HttpResponse {
        let status = self.kind.status();
        let message = self
            .message
            .unwrap_or_else(|| self.kind.default_message().to_string());
        let error = self
            .error
            .or_else(|| self.kind.default_error().map(str::to_string));
        HttpResponse::build(status).json(json!({
            "message": message,
            "status": status.as_u16(),
            "error": error,
            "data": self.data,
        }))
    }
}
