//! Read-only product catalog
//!
//! Products are owned by the storefront; the calculator only reads the
//! pricing and packaging columns it needs.

use axum::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use crate::domain::Product;

/// Product lookup used by the calculator endpoints
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch an active product by id
    async fn find_product(&self, id: i64) -> Result<Option<Product>, sqlx::Error>;

    /// Lightweight connectivity check
    async fn health_check(&self) -> bool;
}

/// Database row for product
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: Decimal,
    unit: Option<String>,
    calculation_type: Option<String>,
    dimensions: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            unit: row.unit.unwrap_or_else(|| "pc".to_string()),
            calculation_type: row.calculation_type.filter(|t| !t.trim().is_empty()),
            dimensions: row.dimensions,
        }
    }
}

/// PostgreSQL-backed catalog
#[derive(Clone)]
pub struct PgProductCatalog {
    pool: PgPool,
}

impl PgProductCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for PgProductCatalog {
    #[instrument(skip(self))]
    async fn find_product(&self, id: i64) -> Result<Option<Product>, sqlx::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id::bigint AS id, name, price, unit, calculation_type, dimensions
            FROM products
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn health_check(&self) -> bool {
        crate::db::health_check(&self.pool).await
    }
}
