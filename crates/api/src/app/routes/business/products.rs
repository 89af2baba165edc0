use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::ProductId;
use stockroom_infra::business::BusinessServices;
use stockroom_products::ProductRequest;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/:id", get(get_product))
        .route("/categoria/:nombre", get(products_by_category))
}

pub async fn list_products(Extension(services): Extension<Arc<BusinessServices>>) -> axum::response::Response {
    match services.products.list().await {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<BusinessServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products.get(id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<BusinessServices>>,
    body: Result<Json<ProductRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(request) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.products.create(request).await {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn products_by_category(
    Extension(services): Extension<Arc<BusinessServices>>,
    Path(nombre): Path<String>,
) -> axum::response::Response {
    match services.products.by_category(&nombre).await {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
