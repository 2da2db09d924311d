//! Database connections and migrations.
use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

use crate::config;
use crate::user::{PgUserRepository, SqliteUserRepository, UserRepository};

pub const DEFAULT_CREDENTIALS: &str = "postgres";
pub const DEFAULT_DATABASE_NAME: &str = "matchmaker";
pub const DEFAULT_POOL_SIZE: u32 = 10;
pub const IN_MEMORY_SQLITE: &str = "sqlite::memory:";

/// Connect to PostgreSQL and run migrations.
pub async fn postgres(config: &config::Postgres) -> Result<PgPool, sqlx::Error> {
    let username = config.username.as_deref().unwrap_or(DEFAULT_CREDENTIALS);
    let password = config.password.as_deref().unwrap_or(DEFAULT_CREDENTIALS);
    let db = config.database.as_deref().unwrap_or(DEFAULT_DATABASE_NAME);
    let hostname = &config.address;

    let addr = format!("postgres://{username}:{password}@{hostname}/{db}");
    let pool = PgPoolOptions::new()
        .max_connections(config.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        .connect(&addr)
        .await?;

    sqlx::migrate!("./migrations/postgres").run(&pool).await?;
    tracing::info!(%hostname, %db, "postgres connected");

    Ok(pool)
}

/// Open a SQLite database and run migrations.
///
/// An in-memory database lives as long as its single connection, so the
/// pool is pinned to one connection that never expires.
pub async fn sqlite(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool_options = if url == IN_MEMORY_SQLITE {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(DEFAULT_POOL_SIZE)
    };
    let pool = pool_options.connect_with(options).await?;

    sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
    tracing::info!(%url, "sqlite opened");

    Ok(pool)
}

/// Build the user store selected by configuration.
pub async fn connect(
    config: &config::Configuration,
) -> Result<Arc<dyn UserRepository>, sqlx::Error> {
    if let Some(cfg) = &config.postgres {
        return Ok(Arc::new(PgUserRepository::new(postgres(cfg).await?)));
    }

    let url = match &config.sqlite {
        Some(cfg) => cfg.url.as_str(),
        None => {
            tracing::warn!(
                "no `postgres` nor `sqlite` entry on configuration, data will not be persisted"
            );
            IN_MEMORY_SQLITE
        },
    };

    Ok(Arc::new(SqliteUserRepository::new(sqlite(url).await?)))
}
