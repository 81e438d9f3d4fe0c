// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures surfaced by the currency store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open currency database: {0}")]
    Open(#[source] sqlx::Error),

    #[error("Failed to create currency tables: {0}")]
    Schema(#[from] sqlx::migrate::MigrateError),

    #[error("Failed to write {table} data: {source}")]
    Write {
        table: &'static str,
        source: sqlx::Error,
    },

    #[error("Failed to read {table} data: {source}")]
    Read {
        table: &'static str,
        source: sqlx::Error,
    },
}

impl StoreError {
    pub(crate) fn write(table: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |source| StoreError::Write { table, source }
    }

    pub(crate) fn read(table: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
        move |source| StoreError::Read { table, source }
    }
}
