#![doc = "The `taskbook` library crate."]
#![doc = ""]
#![doc = "This crate contains the validation pipeline, session gate, response"]
#![doc = "envelope, routing configuration, and data access for the taskbook"]
#![doc = "service. It is used by the main binary (`main.rs`) to construct and"]
#![doc = "run the application."]

pub mod config;
pub mod envelope;
pub mod error;
pub mod gate;
pub mod models;
pub mod routes;
pub mod store;
pub mod validate;

use std::sync::Arc;

use crate::store::TaskStore;

/// Shared application state: the store handle and the session validity
/// window. Configuration is loaded once at startup; there is no other
/// in-process shared mutable state.
pub struct AppState {
    pub store: Arc<dyn TaskStore>,
    pub max_login_time_ms: i64,
}

impl AppState {
    pub fn new(store: Arc<dyn TaskStore>, max_login_time_ms: i64) -> Self {
        Self {
            store,
            max_login_time_ms,
        }
    }
}
