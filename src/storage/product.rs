//! Product model and repository queries.

use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Database, StorageError};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Create a product with a fresh UUIDv4 id.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            price,
        }
    }

    /// Parse from a JSON request body.
    pub fn from_json(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Backfill the id with a fresh UUIDv4 when absent or malformed.
    pub fn ensure_id(&mut self) {
        let valid = Uuid::try_parse(&self.id)
            .map(|id| id.get_version_num() == 4)
            .unwrap_or(false);
        if !valid {
            self.id = Uuid::new_v4().to_string();
        }
    }

    fn from_row(row: &rusqlite::Row<'_>) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            price: row.get(2)?,
        })
    }
}

impl Database {
    pub async fn create_product(&self, product: Product) -> Result<(), StorageError> {
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO products(id, name, price) VALUES(?1, ?2, ?3)",
                params![product.id, product.name, product.price],
            )
            .map(|_| ())
        })
        .await
    }

    pub async fn product(&self, id: &str) -> Result<Product, StorageError> {
        let id = id.to_string();
        let row = self
            .call(move |conn| {
                conn.query_row(
                    "SELECT id, name, price FROM products WHERE id=?1",
                    params![id],
                    Product::from_row,
                )
                .optional()
            })
            .await?;
        row.ok_or(StorageError::NotFound)
    }

    pub async fn update_product(&self, id: &str, product: &Product) -> Result<(), StorageError> {
        let id = id.to_string();
        let (name, price) = (product.name.clone(), product.price);
        self.call(move |conn| {
            conn.execute(
                "UPDATE products SET name=?1, price=?2 WHERE id=?3",
                params![name, price, id],
            )
            .map(|_| ())
        })
        .await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), StorageError> {
        let id = id.to_string();
        self.call(move |conn| {
            conn.execute("DELETE FROM products WHERE id=?1", params![id])
                .map(|_| ())
        })
        .await
    }

    /// Paged select; `page` is one-based.
    pub async fn products(&self, page: u64, count: u8) -> Result<Vec<Product>, StorageError> {
        let offset = page.saturating_sub(1) * u64::from(count);
        self.call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, price FROM products LIMIT ?1 OFFSET ?2")?;
            let rows = stmt.query_map(params![count, offset], Product::from_row)?;
            rows.collect()
        })
        .await
    }

    /// Total product count; storage errors coerce to zero, matching the
    /// lenient listing totals of the original service.
    pub async fn product_count(&self) -> u64 {
        self.call(|conn| conn.query_row("SELECT COUNT(id) FROM products", [], |row| row.get::<_, i64>(0)))
            .await
            .map(|n| n.max(0) as u64)
            .unwrap_or(0)
    }
}
