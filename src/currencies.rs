// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::db;
use crate::errors::{StoreError, StoreResult};
use crate::models::{CryptoCurrency, Currency, CurrencyKind, FiatCurrency};
use log::{debug, error, info};
use sqlx::sqlite::SqlitePool;

const CRYPTO: &str = "crypto";
const FIAT: &str = "fiat";
const ALL: &str = "crypto+fiat";

/// Persistence for crypto and fiat currencies.
///
/// Holds one connection for its whole lifetime; call [`CurrencyStore::close`]
/// on shutdown.
pub struct CurrencyStore {
    pool: SqlitePool,
}

impl CurrencyStore {
    /// Open (creating if needed) the database behind `db_url`
    pub async fn open(db_url: &str) -> StoreResult<Self> {
        let pool = db::create_db_pool(db_url).await.map_err(|e| {
            error!("Failed to open currency database {}: {}", db_url, e);
            e
        })?;
        info!("Opened currency database {}", db_url);
        Ok(Self { pool })
    }

    /// Create both tables if they are missing. Existing rows are kept.
    pub async fn initialize(&self) -> StoreResult<()> {
        db::migrate(&self.pool).await.map_err(|e| {
            error!("Failed to initialize database: {}", e);
            e
        })?;
        debug!("Currency tables ready");
        Ok(())
    }

    /// Delete every row from both tables in one transaction
    pub async fn clear_all(&self) -> StoreResult<()> {
        delete_all_rows(&self.pool).await.map_err(|e| {
            error!("Failed to clear data: {}", e);
            StoreError::write(ALL)(e)
        })?;
        debug!("Cleared crypto and fiat tables");
        Ok(())
    }

    /// Insert or replace crypto rows by id. The batch applies as a whole or not at all.
    pub async fn upsert_crypto(&self, records: &[CryptoCurrency]) -> StoreResult<()> {
        write_crypto_rows(&self.pool, records).await.map_err(|e| {
            error!("Failed to insert crypto data: {}", e);
            StoreError::write(CRYPTO)(e)
        })?;
        debug!("Upserted {} crypto rows", records.len());
        Ok(())
    }

    /// Insert or replace fiat rows by id. The batch applies as a whole or not at all.
    pub async fn upsert_fiat(&self, records: &[FiatCurrency]) -> StoreResult<()> {
        write_fiat_rows(&self.pool, records).await.map_err(|e| {
            error!("Failed to insert fiat data: {}", e);
            StoreError::write(FIAT)(e)
        })?;
        debug!("Upserted {} fiat rows", records.len());
        Ok(())
    }

    /// All crypto rows. Callers must not rely on the order.
    pub async fn read_crypto(&self) -> StoreResult<Vec<CryptoCurrency>> {
        let records = sqlx::query_as::<_, (String, String, String)>(
            r#"
            SELECT id, name, symbol
            FROM crypto
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get crypto data: {}", e);
            StoreError::read(CRYPTO)(e)
        })?;

        debug!("Read {} crypto rows", records.len());
        Ok(records
            .into_iter()
            .map(|(id, name, symbol)| CryptoCurrency { id, name, symbol })
            .collect())
    }

    /// All fiat rows. Callers must not rely on the order.
    pub async fn read_fiat(&self) -> StoreResult<Vec<FiatCurrency>> {
        let records = sqlx::query_as::<_, (String, String, String, String)>(
            r#"
            SELECT id, name, symbol, code
            FROM fiat
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get fiat data: {}", e);
            StoreError::read(FIAT)(e)
        })?;

        debug!("Read {} fiat rows", records.len());
        Ok(records
            .into_iter()
            .map(|(id, name, symbol, code)| FiatCurrency {
                id,
                name,
                symbol,
                code,
            })
            .collect())
    }

    /// Crypto rows (with an empty code) followed by fiat rows
    pub async fn read_all(&self) -> StoreResult<Vec<Currency>> {
        let records = sqlx::query_as::<_, (String, String, String, String, String)>(
            r#"
            SELECT 'crypto' AS kind, id, name, symbol, '' AS code FROM crypto
            UNION ALL
            SELECT 'fiat' AS kind, id, name, symbol, code FROM fiat
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to get all currency data: {}", e);
            StoreError::read(ALL)(e)
        })?;

        debug!("Read {} currency rows", records.len());
        Ok(records
            .into_iter()
            .map(|(kind, id, name, symbol, code)| {
                if kind == CurrencyKind::Fiat.table() {
                    Currency::Fiat(FiatCurrency {
                        id,
                        name,
                        symbol,
                        code,
                    })
                } else {
                    Currency::Crypto(CryptoCurrency { id, name, symbol })
                }
            })
            .collect())
    }

    /// Release the connection
    pub async fn close(self) {
        self.pool.close().await;
        debug!("Closed currency database");
    }
}

async fn delete_all_rows(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM crypto").execute(&mut *tx).await?;
    sqlx::query("DELETE FROM fiat").execute(&mut *tx).await?;
    // Dropping `tx` on an early return rolls both deletes back
    tx.commit().await
}

async fn write_crypto_rows(
    pool: &SqlitePool,
    records: &[CryptoCurrency],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for record in records {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO crypto (id, name, symbol)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.symbol)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

async fn write_fiat_rows(
    pool: &SqlitePool,
    records: &[FiatCurrency],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for record in records {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO fiat (id, name, symbol, code)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.symbol)
        .bind(&record.code)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}
