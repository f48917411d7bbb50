//! MySQL seeder: schema creation and table population.

use crate::config::AppConfig;
use crate::dataset::{DatasetError, Product, unique_user_ids};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions, MySqlRow};
use sqlx::{MySql, Pool, Row};
use tracing::{debug, info};

/// SeederError represents errors from schema or data operations.
#[derive(Debug, thiserror::Error)]
pub enum SeederError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Seeder owns the database connection pool for the run.
pub struct Seeder {
    pool: Pool<MySql>,
}

/// Server-level options without a schema selected.
fn server_options(config: &AppConfig) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&config.hostname)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
}

/// MySQL error 1049 (ER_BAD_DB_ERROR): the named database does not exist.
fn is_unknown_database(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db
            .try_downcast_ref::<sqlx::mysql::MySqlDatabaseError>()
            .is_some_and(|e| e.number() == 1049),
        _ => false,
    }
}

/// Builds a multi-row `INSERT INTO <table> (...) VALUES (?, ...), ...`
/// statement with one placeholder group per row.
fn bulk_insert_sql(table: &str, columns: &[&str], rows: usize) -> String {
    let placeholders = vec!["?"; columns.len()].join(", ");
    let groups = vec![format!("({placeholders})"); rows].join(", ");
    format!(
        "INSERT INTO {table} ({}) VALUES {groups}",
        columns.join(", ")
    )
}

const PRODUCT_COLUMNS: &[&str] = &[
    "id",
    "prod_id",
    "name",
    "code",
    "price",
    "preview_text",
    "detail_text",
    "user_id",
];

/// Idempotent DDL in execution order: users first, products carries a
/// foreign key into it.
const MIGRATE_SQL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INT PRIMARY KEY
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id INT PRIMARY KEY,
        prod_id INT NULL,
        name VARCHAR(64) NOT NULL,
        code VARCHAR(32) NOT NULL,
        price INT NOT NULL,
        preview_text VARCHAR(128) NOT NULL,
        detail_text VARCHAR(256) NOT NULL,
        user_id INT,
        FOREIGN KEY (user_id) REFERENCES users(id)
    )
    "#,
];

/// Clears both tables for a replace, in execution order: children before
/// parents so the foreign key holds throughout.
const CLEAR_SQL: &[&str] = &["DELETE FROM products", "DELETE FROM users"];

/// Rows per INSERT statement. MySQL caps prepared statements at 65,535
/// placeholders; 1000 product rows use 8000.
const INSERT_CHUNK: usize = 1000;

impl Seeder {
    /// Connects to the configured database.
    ///
    /// If the database does not exist yet, connects to the server instead,
    /// issues `CREATE DATABASE IF NOT EXISTS`, and reconnects.
    pub async fn connect(config: &AppConfig) -> Result<Self, SeederError> {
        let options = server_options(config).database(&config.database);

        let pool = match Self::open_pool(options.clone()).await {
            Ok(pool) => pool,
            Err(e) if is_unknown_database(&e) => {
                info!(database = %config.database, "Database missing, creating it");
                Self::create_database(config).await?;
                Self::open_pool(options).await?
            }
            Err(e) => return Err(e.into()),
        };

        info!(
            host = %config.hostname,
            port = config.port,
            database = %config.database,
            "Connected to MySQL"
        );
        Ok(Self { pool })
    }

    async fn open_pool(options: MySqlConnectOptions) -> Result<Pool<MySql>, sqlx::Error> {
        MySqlPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
    }

    /// Creates the target database via a server-level connection.
    async fn create_database(config: &AppConfig) -> Result<(), SeederError> {
        let pool = Self::open_pool(server_options(config)).await?;

        sqlx::query(&format!(
            "CREATE DATABASE IF NOT EXISTS `{}`",
            config.database
        ))
        .execute(&pool)
        .await?;
        pool.close().await;

        info!(database = %config.database, "Database created");
        Ok(())
    }

    /// Creates both tables if they do not exist. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<(), SeederError> {
        for statement in MIGRATE_SQL {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        info!("Schema ready");
        Ok(())
    }

    /// Replaces the contents of both tables with the given dataset.
    ///
    /// The users table is derived from the distinct user ids the products
    /// reference. Delete children before parents, insert parents before
    /// children, so the foreign key holds throughout.
    pub async fn seed(&self, products: &[Product]) -> Result<(), SeederError> {
        let user_ids = unique_user_ids(products);

        for statement in CLEAR_SQL {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        for chunk in user_ids.chunks(INSERT_CHUNK) {
            let sql = bulk_insert_sql("users", &["id"], chunk.len());
            let mut query = sqlx::query(&sql);
            for id in chunk {
                query = query.bind(id);
            }
            query.execute(&self.pool).await?;
        }

        for chunk in products.chunks(INSERT_CHUNK) {
            let sql = bulk_insert_sql("products", PRODUCT_COLUMNS, chunk.len());
            let mut query = sqlx::query(&sql);
            for product in chunk {
                query = query
                    .bind(product.id)
                    .bind(product.prod_id)
                    .bind(&product.name)
                    .bind(&product.code)
                    .bind(product.price)
                    .bind(&product.preview_text)
                    .bind(&product.detail_text)
                    .bind(product.user_id);
            }
            query.execute(&self.pool).await?;
        }

        debug!(
            products = products.len(),
            users = user_ids.len(),
            "Tables replaced"
        );
        Ok(())
    }

    /// Reads back the products table.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, SeederError> {
        let rows = sqlx::query("SELECT * FROM products")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(parse_product_row).collect()
    }

    /// Reads back the user ids.
    pub async fn fetch_user_ids(&self) -> Result<Vec<i64>, SeederError> {
        let rows = sqlx::query("SELECT id FROM users")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<i32, _>("id").map(i64::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(SeederError::from)
    }

    /// Row count of a table. Table names come from a fixed set, not input.
    pub async fn count(&self, table: &str) -> Result<i64, SeederError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS count FROM {table}"))
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    /// Closes the connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parses a product from a database row.
fn parse_product_row(row: &MySqlRow) -> Result<Product, SeederError> {
    Ok(Product {
        id: i64::from(row.try_get::<i32, _>("id")?),
        prod_id: row.try_get::<Option<i32>, _>("prod_id")?.map(i64::from),
        name: row.try_get("name")?,
        code: row.try_get("code")?,
        price: i64::from(row.try_get::<i32, _>("price")?),
        preview_text: row.try_get("preview_text")?,
        detail_text: row.try_get("detail_text")?,
        user_id: i64::from(row.try_get::<i32, _>("user_id")?),
    })
}

#[cfg(test)]
mod tests;
