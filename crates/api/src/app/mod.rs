//! HTTP application wiring (Axum routers + service wiring).
//!
//! - `services.rs`: builds the tier services from configuration
//! - `routes/`: HTTP routes + handlers (one folder per tier)
//! - `dto.rs`: request DTOs and path parsing helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockroom_infra::business::BusinessServices;
use stockroom_infra::data::DataServices;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Router of the data tier (`/data/...`).
pub fn build_data_app(services: DataServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::data::router().layer(Extension(Arc::new(services))))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_requests)))
}

/// Router of the business tier (`/api/...`).
pub fn build_business_app(services: BusinessServices) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::business::router().layer(Extension(Arc::new(services))))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_requests)))
}
