//! Business tier: validated creation, simplified views and reports under `/api`.

use axum::Router;

pub mod categories;
pub mod products;
pub mod reports;

pub fn router() -> Router {
    Router::new()
        .nest("/api/productos", products::router())
        .nest("/api/categorias", categories::router())
        .nest("/api/reportes", reports::router())
}
