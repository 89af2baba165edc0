use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use stockroom_core::CategoryId;
use stockroom_infra::data::DataServices;
use stockroom_products::CategoryDraft;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", get(get_category).put(update_category).delete(delete_category))
        .route("/nombre/:nombre", get(category_by_name))
}

pub async fn list_categories(Extension(services): Extension<Arc<DataServices>>) -> axum::response::Response {
    match services.categories.list().await {
        Ok(categories) => (StatusCode::OK, Json(categories)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.categories.get(id).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn category_by_name(
    Extension(services): Extension<Arc<DataServices>>,
    Path(nombre): Path<String>,
) -> axum::response::Response {
    match services.categories.get_by_name(&nombre).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_category(
    Extension(services): Extension<Arc<DataServices>>,
    body: Result<Json<CategoryDraft>, JsonRejection>,
) -> axum::response::Response {
    let Json(draft) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.categories.create(draft).await {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_category(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
    body: Result<Json<CategoryDraft>, JsonRejection>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(draft) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.categories.update(id, draft).await {
        Ok(category) => (StatusCode::OK, Json(category)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_category(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CategoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.categories.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
