// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::errors::{StoreError, StoreResult};
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqlitePool, SqlitePoolOptions},
    Sqlite,
};

/// Open the single long-lived connection used for the whole process.
///
/// The pool is capped at one connection that never idles out, so every
/// operation shares the same handle and in-memory databases survive between
/// calls.
pub async fn create_db_pool(db_url: &str) -> StoreResult<SqlitePool> {
    // Create database if it doesn't exist
    if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
        Sqlite::create_database(db_url)
            .await
            .map_err(StoreError::Open)?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(db_url)
        .await
        .map_err(StoreError::Open)?;

    Ok(pool)
}

/// Create the currency tables. Safe to run any number of times.
pub async fn migrate(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}

#[cfg(test)]
pub async fn create_test_pool() -> StoreResult<SqlitePool> {
    let pool = create_db_pool("sqlite::memory:").await?;
    migrate(&pool).await?;
    Ok(pool)
}
