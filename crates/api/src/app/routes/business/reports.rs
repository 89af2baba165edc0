use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use stockroom_infra::business::BusinessServices;

use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/stock-bajo", get(low_stock))
        .route("/valor-inventario", get(inventory_value))
}

pub async fn low_stock(Extension(services): Extension<Arc<BusinessServices>>) -> axum::response::Response {
    match services.inventory.low_stock().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Total value as a bare JSON number (`2000.00`), not a string.
pub async fn inventory_value(Extension(services): Extension<Arc<BusinessServices>>) -> axum::response::Response {
    match services.inventory.total_value().await {
        Ok(total) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            total.to_string(),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
