//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for products.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Product::validate()` before SQL
//!   mutations.
//! - Repository APIs return semantic errors (`NotFound`, validation)
//!   in addition to DB transport errors.

pub mod product_repo;
