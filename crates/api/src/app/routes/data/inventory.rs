use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use stockroom_core::{InventoryId, ProductId};
use stockroom_infra::data::DataServices;
use stockroom_inventory::{InventoryDraft, QuantityUpdate};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inventory).post(create_inventory))
        .route("/stock-bajo", get(low_stock))
        .route("/sin-stock", get(out_of_stock))
        .route("/con-producto", get(with_product))
        .route("/:id", get(get_inventory).put(update_inventory).delete(delete_inventory))
        .route("/producto/:id", get(inventory_by_product))
        .route("/producto/:id/cantidad", put(set_quantity))
        .route("/producto/:id/disponible", get(stock_available))
}

pub async fn list_inventory(Extension(services): Extension<Arc<DataServices>>) -> axum::response::Response {
    match services.inventory.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn low_stock(Extension(services): Extension<Arc<DataServices>>) -> axum::response::Response {
    match services.inventory.low_stock().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn out_of_stock(Extension(services): Extension<Arc<DataServices>>) -> axum::response::Response {
    match services.inventory.out_of_stock().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn with_product(Extension(services): Extension<Arc<DataServices>>) -> axum::response::Response {
    match services.inventory.list_with_product().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_inventory(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InventoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inventory.get(id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_inventory(
    Extension(services): Extension<Arc<DataServices>>,
    body: Result<Json<InventoryDraft>, JsonRejection>,
) -> axum::response::Response {
    let Json(draft) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.inventory.create(draft).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_inventory(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
    body: Result<Json<InventoryDraft>, JsonRejection>,
) -> axum::response::Response {
    let id: InventoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(draft) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.inventory.update(id, draft).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_inventory(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: InventoryId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inventory.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn inventory_by_product(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.inventory.get_by_product(product_id).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn set_quantity(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
    body: Result<Json<QuantityUpdate>, JsonRejection>,
) -> axum::response::Response {
    let product_id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Json(update) = match body {
        Ok(v) => v,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.inventory.set_quantity(product_id, update.quantity).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn stock_available(
    Extension(services): Extension<Arc<DataServices>>,
    Path(id): Path<String>,
    query: Result<Query<dto::StockQuery>, QueryRejection>,
) -> axum::response::Response {
    let product_id: ProductId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Query(query) = match query {
        Ok(v) => v,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    match services
        .inventory
        .has_sufficient_stock(product_id, query.cantidad)
        .await
    {
        Ok(available) => (StatusCode::OK, Json(available)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
