use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_infra::business::BusinessServices;

use crate::app::errors;

pub fn router() -> Router {
    Router::new().route("/", get(list_categories))
}

pub async fn list_categories(Extension(services): Extension<Arc<BusinessServices>>) -> axum::response::Response {
    match services.categories.list().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
