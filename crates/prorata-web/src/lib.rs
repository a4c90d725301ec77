//! Web form for the prorata maintenance calculator.
//!
//! Serves the input form, renders the result panels, and exposes the same
//! calculation as a JSON endpoint. Every request runs one independent
//! calculation; the only shared state is the loaded configuration.

pub mod config;
pub mod error;
pub mod handlers;
pub mod tracing_setup;

use axum::{
    Router,
    routing::{get, post},
};
use prorata_calculator::{ProrationCalculator, ProrationError};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use config::ProrataConfig;
pub use error::WebError;

/// Shared per-request state: configuration and the calculator built from it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProrataConfig>,
    pub calculator: ProrationCalculator,
}

impl AppState {
    pub fn new(config: ProrataConfig) -> Result<Self, ProrationError> {
        let calculator = config.calculator()?;
        Ok(Self { config: Arc::new(config), calculator })
    }
}

/// Builds the application router for a validated configuration.
pub fn app(config: ProrataConfig) -> Result<Router, ProrationError> {
    let state = AppState::new(config)?;
    Ok(Router::new()
        .route("/", get(handlers::index))
        .route("/calculate", post(handlers::calculate))
        .route("/api/v1/proration", post(handlers::api_proration))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
