//! Core domain logic for the Stockroom product service.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::product::{Category, DataValidationError, Product, ProductId};
pub use repo::product_repo::{
    PriceQuery, ProductRepository, RepoError, RepoResult, SqliteProductRepository,
};
pub use service::product_service::ProductService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
