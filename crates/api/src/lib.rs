//! HTTP API: routers for both tiers, error mapping, request logging.

pub mod app;
pub mod middleware;
