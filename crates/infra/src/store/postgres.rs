//! Postgres-backed beer store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Duplicate` |
//! | Database (other) | Any other | `Backend` |
//! | PoolClosed / PoolTimedOut / Io | N/A | `Unavailable` |
//! | Other | N/A | `Backend` |
//!
//! Name comparisons use `=` on `TEXT`, which is case-sensitive under the default
//! deterministic collation.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::{instrument, Span};

use taproom_core::BeerId;
use taproom_inventory::{Beer, BeerType, NewBeer};

use super::{BeerStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS beers (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    brand       TEXT NOT NULL,
    maximum     INTEGER NOT NULL CHECK (maximum > 0),
    quantity    INTEGER NOT NULL CHECK (quantity >= 0 AND quantity <= maximum),
    beer_type   TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

const COLUMNS: &str = "id, name, brand, maximum, quantity, beer_type";

/// Postgres-backed beer store.
///
/// `PgPool` is internally reference-counted, so this is cheap to clone and share.
#[derive(Debug, Clone)]
pub struct PostgresBeerStore {
    pool: PgPool,
}

impl PostgresBeerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `beers` table if it does not exist yet.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl BeerStore for PostgresBeerStore {
    #[instrument(skip(self, beer), fields(name = %beer.name, id = tracing::field::Empty))]
    async fn insert(&self, beer: NewBeer) -> Result<Beer, StoreError> {
        let id = BeerId::new();
        Span::current().record("id", tracing::field::display(id));

        let row = sqlx::query(&format!(
            "INSERT INTO beers ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(&beer.name)
        .bind(&beer.brand)
        .bind(beer.maximum)
        .bind(beer.quantity)
        .bind(beer.beer_type.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        beer_from_row(&row)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: BeerId) -> Result<Option<Beer>, StoreError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM beers WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_id", e))?;

        row.as_ref().map(beer_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> Result<Vec<Beer>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM beers WHERE name = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_by_name", e))?;

        rows.iter().map(beer_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn exists_by_id(&self, id: BeerId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS (SELECT 1 FROM beers WHERE id = $1) AS present")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("exists_by_id", e))?;

        row.try_get::<bool, _>("present")
            .map_err(|e| StoreError::Backend(format!("failed to read exists flag: {e}")))
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: BeerId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM beers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_by_id", e))?;
        Ok(())
    }

    #[instrument(skip(self), fields(count = tracing::field::Empty))]
    async fn find_all(&self) -> Result<Vec<Beer>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM beers ORDER BY created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        Span::current().record("count", rows.len());
        rows.iter().map(beer_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn update_quantity(&self, id: BeerId, quantity: i32) -> Result<Option<Beer>, StoreError> {
        let row = sqlx::query(&format!(
            "UPDATE beers SET quantity = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.as_uuid())
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_quantity", e))?;

        row.as_ref().map(beer_from_row).transpose()
    }
}

fn beer_from_row(row: &PgRow) -> Result<Beer, StoreError> {
    let decode = |e: sqlx::Error| StoreError::Backend(format!("failed to decode beer row: {e}"));

    let id: uuid::Uuid = row.try_get("id").map_err(decode)?;
    let beer_type: String = row.try_get("beer_type").map_err(decode)?;
    let beer_type = parse_beer_type(&beer_type)?;

    Ok(Beer {
        id: BeerId::from_uuid(id),
        name: row.try_get("name").map_err(decode)?,
        brand: row.try_get("brand").map_err(decode)?,
        maximum: row.try_get("maximum").map_err(decode)?,
        quantity: row.try_get("quantity").map_err(decode)?,
        beer_type,
    })
}

/// A stored type outside the closed set means the row was written by something else.
fn parse_beer_type(stored: &str) -> Result<BeerType, StoreError> {
    stored
        .parse::<BeerType>()
        .map_err(|e| StoreError::Backend(format!("failed to decode beer row: {e}")))
}

/// Map SQLx errors to StoreError.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => StoreError::Duplicate(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("connection pool unavailable in {}", operation))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {}: {}", operation, e)),
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_types_decode_exactly() {
        assert_eq!(parse_beer_type("WEISS").unwrap(), BeerType::Weiss);

        for bad in ["weiss", "PORTER", ""] {
            let err = parse_beer_type(bad).unwrap_err();
            assert!(matches!(err, StoreError::Backend(ref msg) if msg.contains("decode")));
        }
    }

    #[test]
    fn pool_and_io_failures_are_unavailable() {
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("find_all", sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        match map_sqlx_error("connect", sqlx::Error::Io(io)) {
            StoreError::Unavailable(msg) => assert!(msg.contains("connect")),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn other_sqlx_errors_are_backend_failures() {
        match map_sqlx_error("insert", sqlx::Error::RowNotFound) {
            StoreError::Backend(msg) => assert!(msg.contains("insert")),
            other => panic!("expected Backend, got {other:?}"),
        }
        assert!(matches!(
            map_sqlx_error("find_by_id", sqlx::Error::ColumnNotFound("beer_type".to_string())),
            StoreError::Backend(_)
        ));
    }
}
