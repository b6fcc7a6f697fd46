//! SQLite persistence layer for worker profiles.
//!
//! This crate provides async database operations for worker profiles using
//! SQLx with SQLite. Profile fields extracted from transcripts are stored as a
//! JSON document next to the fixed columns.
//!
//! # Example
//!
//! ```no_run
//! use database::{profile, Database, NewProfile, ProfileData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:worker_profiles.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a profile
//!     let id = profile::create_profile(
//!         db.pool(),
//!         &NewProfile::named("Unnamed Worker", ProfileData::new()),
//!     )
//!     .await?;
//!
//!     let stored = profile::get_profile(db.pool(), id).await?;
//!     println!("{:?}", stored.name);
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod profile;

pub use error::{DatabaseError, Result};
pub use models::{NewProfile, Profile, ProfileData};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 10;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/profiles.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing, keep the pool at one connection)
    /// let db = database::Database::connect_with_pool_size("sqlite::memory:", 1).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Drop all profile data and recreate the schema.
    ///
    /// Destroys every stored profile. Callers gate this behind debug mode.
    pub async fn reset(&self) -> Result<()> {
        tracing::warn!("Dropping profiles table and migration history");

        sqlx::query("DROP TABLE IF EXISTS profiles")
            .execute(&self.pool)
            .await?;
        sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
            .execute(&self.pool)
            .await?;

        self.migrate().await
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
