//! Product repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and filtered-lookup APIs over `products` rows.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Product::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `create` always assigns a fresh id; stale in-memory ids are
//!   discarded, never reused.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::product::{Category, DataValidationError, Product, ProductId};
use log::info;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const PRODUCT_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    price,
    available,
    category
FROM products";

const PRODUCTS_TABLE: &str = "products";
const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "price",
    "available",
    "category",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for product persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Recoverable input error; external layers map this family to 400.
    Validation(DataValidationError),
    /// Storage transport failure; propagates unmodified.
    Db(DbError),
    /// Row addressed by id does not exist.
    NotFound(ProductId),
    /// Persisted state does not satisfy model invariants.
    InvalidData(String),
    /// Connection was never bootstrapped through `db::open_db`.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Bootstrapped connection is missing a required table.
    MissingRequiredTable(&'static str),
    /// Bootstrapped connection is missing a required column.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "product not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted product data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection not bootstrapped: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "connection is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DataValidationError> for RepoError {
    fn from(value: DataValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Accepted input shapes for price lookups.
///
/// Callers hand over whatever they received (a decimal, a bare numeric
/// literal, or a possibly JSON-quoted string); `normalize` folds all
/// three into one canonical decimal before comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceQuery {
    /// Already-typed decimal amount.
    Amount(Decimal),
    /// Bare numeric literal from an untyped source.
    Number(f64),
    /// String form, optionally quoted and/or whitespace-padded.
    Text(String),
}

impl PriceQuery {
    /// Produces the canonical decimal for this input.
    ///
    /// # Errors
    /// - `InvalidPrice` when the text form is not a decimal literal or
    ///   the numeric literal is not finite.
    pub fn normalize(&self) -> Result<Decimal, DataValidationError> {
        match self {
            Self::Amount(value) => Ok(*value),
            Self::Number(value) => {
                // Via the displayed string form, so binary float artifacts
                // never leak into the decimal value.
                let text = value.to_string();
                if !value.is_finite() {
                    return Err(DataValidationError::InvalidPrice(text));
                }
                Decimal::from_str(&text).map_err(|_| DataValidationError::InvalidPrice(text))
            }
            Self::Text(raw) => {
                // Callers sometimes pass JSON-quoted numeric strings;
                // strip surrounding quotes/whitespace, nothing more.
                let stripped = raw.trim_matches(|c: char| c == '"' || c.is_whitespace());
                Decimal::from_str(stripped)
                    .map_err(|_| DataValidationError::InvalidPrice(stripped.to_string()))
            }
        }
    }
}

/// Repository interface for product CRUD and filtered lookups.
pub trait ProductRepository {
    /// Persists a new record, assigning (and writing back) a fresh id.
    fn create(&self, product: &mut Product) -> RepoResult<ProductId>;
    /// Persists all current field values for the row matching `id`.
    fn update(&self, product: &Product) -> RepoResult<()>;
    /// Removes the row matching `id`; missing rows are not reported.
    fn delete(&self, product: &Product) -> RepoResult<()>;
    /// Returns every stored record in insertion order.
    fn all(&self) -> RepoResult<Vec<Product>>;
    /// Returns the record matching `id`, or `None` when absent.
    fn find(&self, id: ProductId) -> RepoResult<Option<Product>>;
    /// Returns all records with an exact name match.
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Product>>;
    /// Returns all records whose price is numerically equal to the input.
    fn find_by_price(&self, price: &PriceQuery) -> RepoResult<Vec<Product>>;
    /// Returns all records with the given availability; defaults to `true`.
    fn find_by_availability(&self, available: Option<bool>) -> RepoResult<Vec<Product>>;
    /// Returns all records in the given category; defaults to `UNKNOWN`.
    fn find_by_category(&self, category: Option<Category>) -> RepoResult<Vec<Product>>;
}

/// SQLite-backed product repository.
pub struct SqliteProductRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProductRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match
    ///   this binary's latest migration.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema
    ///   shape does not hold.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ProductRepository for SqliteProductRepository<'_> {
    fn create(&self, product: &mut Product) -> RepoResult<ProductId> {
        info!(
            "event=product_create module=repo status=start name={}",
            product.name
        );
        // Any stale id is discarded; the store owns identity assignment.
        product.id = None;
        product.validate()?;

        self.conn.execute(
            "INSERT INTO products (name, description, price, available, category)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                product.name.as_str(),
                product.description.as_str(),
                product.price.to_string(),
                bool_to_int(product.available),
                product.category.unwrap_or_default().name(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        product.id = Some(id);
        Ok(id)
    }

    fn update(&self, product: &Product) -> RepoResult<()> {
        info!(
            "event=product_update module=repo status=start name={}",
            product.name
        );
        let id = product.id.ok_or(DataValidationError::EmptyIdentity)?;
        product.validate()?;

        let changed = self.conn.execute(
            "UPDATE products
             SET
                name = ?1,
                description = ?2,
                price = ?3,
                available = ?4,
                category = ?5
             WHERE id = ?6;",
            params![
                product.name.as_str(),
                product.description.as_str(),
                product.price.to_string(),
                bool_to_int(product.available),
                product.category.unwrap_or_default().name(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete(&self, product: &Product) -> RepoResult<()> {
        info!(
            "event=product_delete module=repo status=start name={}",
            product.name
        );
        let id = product.id.ok_or(DataValidationError::EmptyIdentity)?;

        self.conn
            .execute("DELETE FROM products WHERE id = ?1;", params![id])?;

        Ok(())
    }

    fn all(&self) -> RepoResult<Vec<Product>> {
        info!("event=product_all module=repo status=start");
        self.select_products(&format!("{PRODUCT_SELECT_SQL} ORDER BY id;"), params![])
    }

    fn find(&self, id: ProductId) -> RepoResult<Option<Product>> {
        info!("event=product_find module=repo status=start id={id}");
        let mut stmt = self
            .conn
            .prepare(&format!("{PRODUCT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_product_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Product>> {
        info!("event=product_find_by_name module=repo status=start name={name}");
        self.select_products(
            &format!("{PRODUCT_SELECT_SQL} WHERE name = ?1 ORDER BY id;"),
            params![name],
        )
    }

    fn find_by_price(&self, price: &PriceQuery) -> RepoResult<Vec<Product>> {
        let target = price.normalize()?;
        info!("event=product_find_by_price module=repo status=start price={target}");

        // Stored text preserves the caller's original scale, so equality
        // is decided numerically on the decoded decimals rather than by
        // SQL text comparison (12.5 must match 12.50).
        let mut products =
            self.select_products(&format!("{PRODUCT_SELECT_SQL} ORDER BY id;"), params![])?;
        products.retain(|product| product.price == target);
        Ok(products)
    }

    fn find_by_availability(&self, available: Option<bool>) -> RepoResult<Vec<Product>> {
        let available = available.unwrap_or(true);
        info!("event=product_find_by_availability module=repo status=start available={available}");
        self.select_products(
            &format!("{PRODUCT_SELECT_SQL} WHERE available = ?1 ORDER BY id;"),
            params![bool_to_int(available)],
        )
    }

    fn find_by_category(&self, category: Option<Category>) -> RepoResult<Vec<Product>> {
        let category = category.unwrap_or_default();
        info!(
            "event=product_find_by_category module=repo status=start category={}",
            category.name()
        );
        self.select_products(
            &format!("{PRODUCT_SELECT_SQL} WHERE category = ?1 ORDER BY id;"),
            params![category.name()],
        )
    }
}

impl SqliteProductRepository<'_> {
    fn select_products(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> RepoResult<Vec<Product>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut products = Vec::new();

        while let Some(row) = rows.next()? {
            products.push(parse_product_row(row)?);
        }

        Ok(products)
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_count: u32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1;",
        params![PRODUCTS_TABLE],
        |row| row.get(0),
    )?;
    if table_count == 0 {
        return Err(RepoError::MissingRequiredTable(PRODUCTS_TABLE));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({PRODUCTS_TABLE});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>("name")?);
    }

    for column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: PRODUCTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_product_row(row: &Row<'_>) -> RepoResult<Product> {
    let price_text: String = row.get("price")?;
    let price = Decimal::from_str(&price_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid price value `{price_text}` in products.price"))
    })?;

    let available = match row.get::<_, i64>("available")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid available value `{other}` in products.available"
            )));
        }
    };

    let category_text: String = row.get("category")?;
    let category = Category::from_name(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category value `{category_text}` in products.category"
        ))
    })?;

    let product = Product {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        description: row.get("description")?,
        price,
        available,
        category: Some(category),
    };
    product.validate()?;
    Ok(product)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
