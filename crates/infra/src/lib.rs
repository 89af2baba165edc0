//! Infrastructure layer: entity stores, tier services, inter-service client, config.

pub mod business;
pub mod client;
pub mod config;
pub mod data;
pub mod store;
