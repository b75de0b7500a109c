//! Shared fixtures: schema-valid randomized products for test setup.

use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use stockroom_core::{Category, Product};

const NAMES: &[&str] = &[
    "hat", "pants", "shirt", "apple", "banana", "pots", "towels", "ford", "chevy", "hammer",
    "wrench",
];

const ASSIGNABLE_CATEGORIES: &[Category] = &[
    Category::Cloths,
    Category::Food,
    Category::Housewares,
    Category::Automotive,
    Category::Tools,
];

/// Builds one random, schema-valid, not-yet-persisted product.
pub fn random_product() -> Product {
    let mut rng = rand::thread_rng();

    let name = NAMES
        .choose(&mut rng)
        .expect("name pool is non-empty")
        .to_string();
    let category = *ASSIGNABLE_CATEGORIES
        .choose(&mut rng)
        .expect("category pool is non-empty");

    // Two-decimal amount in [1.00, 999.99], built from integral cents so
    // no float ever touches the price.
    let cents: i64 = rng.gen_range(100..=99_999);
    let price = Decimal::new(cents, 2);

    Product::new(
        name.clone(),
        format!("a fine {name} for testing"),
        price,
        rng.gen_bool(0.5),
        category,
    )
}

/// Builds a batch of random products.
#[allow(dead_code)]
pub fn random_products(count: usize) -> Vec<Product> {
    (0..count).map(|_| random_product()).collect()
}
