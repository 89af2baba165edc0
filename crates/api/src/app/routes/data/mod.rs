//! Data tier: full entity CRUD under `/data`.

use axum::Router;

pub mod categories;
pub mod inventory;
pub mod products;

pub fn router() -> Router {
    Router::new()
        .nest("/data/productos", products::router())
        .nest("/data/categorias", categories::router())
        .nest("/data/inventario", inventory::router())
}
