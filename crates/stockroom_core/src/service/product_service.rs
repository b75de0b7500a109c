//! Product use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD and lookup entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence
//!   contracts.
//! - Service layer remains storage-agnostic.

use crate::model::product::{Category, Product, ProductId};
use crate::repo::product_repo::{PriceQuery, ProductRepository, RepoResult};

/// Use-case service wrapper for product CRUD and filtered lookups.
pub struct ProductService<R: ProductRepository> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new product; the assigned id is written back into it.
    pub fn create(&self, product: &mut Product) -> RepoResult<ProductId> {
        self.repo.create(product)
    }

    /// Updates an existing product by its persisted id.
    ///
    /// Returns repository-level validation or not-found errors unchanged.
    pub fn update(&self, product: &Product) -> RepoResult<()> {
        self.repo.update(product)
    }

    /// Removes a persisted product.
    pub fn delete(&self, product: &Product) -> RepoResult<()> {
        self.repo.delete(product)
    }

    /// Lists every stored product.
    pub fn all(&self) -> RepoResult<Vec<Product>> {
        self.repo.all()
    }

    /// Gets one product by id; absence is `None`, not an error.
    pub fn find(&self, id: ProductId) -> RepoResult<Option<Product>> {
        self.repo.find(id)
    }

    /// Finds products by exact name match.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Vec<Product>> {
        self.repo.find_by_name(name)
    }

    /// Finds products whose price equals the normalized input.
    pub fn find_by_price(&self, price: &PriceQuery) -> RepoResult<Vec<Product>> {
        self.repo.find_by_price(price)
    }

    /// Finds products by availability; `None` defaults to available.
    pub fn find_by_availability(&self, available: Option<bool>) -> RepoResult<Vec<Product>> {
        self.repo.find_by_availability(available)
    }

    /// Finds products by category; `None` defaults to `UNKNOWN`.
    pub fn find_by_category(&self, category: Option<Category>) -> RepoResult<Vec<Product>> {
        self.repo.find_by_category(category)
    }
}
