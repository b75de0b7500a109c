//! Domain model for the product record store.
//!
//! # Responsibility
//! - Define the canonical `Product` record and its `Category` taxonomy.
//! - Own the validation/serialization boundary between untyped external
//!   mappings and typed records.
//!
//! # Invariants
//! - A record without an `id` is "new" and has never been persisted.
//! - `category` read back from storage is always one of the six named
//!   variants, never free text.

pub mod product;
