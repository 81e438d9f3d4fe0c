// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::errors::StoreError;
use crate::models::{Currency, CurrencyKind};
use crate::search::filter_currencies;
use chrono::Utc;

pub const NO_RESULTS: &str = "No Results";
pub const NO_RESULTS_HINT: &str = "Try \"CRO\"";

/// Which list a load request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ListSource {
    Crypto,
    Fiat,
    All,
}

impl ListSource {
    fn loaded_message(self) -> &'static str {
        match self {
            ListSource::Crypto => "Crypto data loaded!",
            ListSource::Fiat => "Fiat data loaded!",
            ListSource::All => "All currency data loaded!",
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            ListSource::Crypto => "No crypto data yet. Please insert data first.",
            ListSource::Fiat => "No fiat data yet. Please insert data first.",
            ListSource::All => "No Data yet. Please insert data first.",
        }
    }
}

/// The store call that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    Clear,
    Insert,
    Load(ListSource),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Transient message shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    /// Millisecond timestamp; two identical messages still get distinct keys
    pub key: i64,
}

impl Notification {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            key: Utc::now().timestamp_millis(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            key: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug)]
pub enum Action {
    Cleared,
    Inserted,
    Loaded {
        source: ListSource,
        currencies: Vec<Currency>,
    },
    Failed {
        operation: Operation,
        error: StoreError,
    },
    QueryChanged(String),
    QueryCleared,
    NotificationDismissed,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub currencies: Vec<Currency>,
    pub query: String,
    pub notification: Option<Notification>,
}

impl AppState {
    pub fn update(&mut self, action: Action) {
        match action {
            Action::Cleared => {
                self.currencies.clear();
                self.notification = Some(Notification::info("Data cleared successfully!"));
            }
            Action::Inserted => {
                self.notification = Some(Notification::info("Data inserted successfully!"));
            }
            Action::Loaded { source, currencies } => {
                if currencies.is_empty() {
                    self.notification = Some(Notification::info(source.empty_message()));
                } else {
                    self.currencies = currencies;
                    self.notification = Some(Notification::info(source.loaded_message()));
                }
            }
            Action::Failed { operation, error } => {
                self.notification = Some(Notification::error(failure_message(operation, &error)));
            }
            Action::QueryChanged(query) => self.query = query,
            Action::QueryCleared => self.query.clear(),
            Action::NotificationDismissed => self.notification = None,
        }
    }

    /// Currencies matching the current query, recomputed on every call
    pub fn visible(&self) -> Vec<&Currency> {
        filter_currencies(&self.query, &self.currencies)
    }

    /// Text rows for the visible list, or the placeholder when nothing matches
    pub fn render_rows(&self) -> Vec<String> {
        let visible = self.visible();
        if visible.is_empty() {
            return vec![NO_RESULTS.to_string(), NO_RESULTS_HINT.to_string()];
        }
        visible.into_iter().map(render_row).collect()
    }
}

/// One list row: avatar initial and name, plus a symbol badge for crypto rows
pub fn render_row(currency: &Currency) -> String {
    let initial = currency.name().chars().next().unwrap_or(' ');
    match currency.kind() {
        CurrencyKind::Crypto => {
            format!("({}) {}  {} >", initial, currency.name(), currency.symbol())
        }
        CurrencyKind::Fiat => format!("({}) {}", initial, currency.name()),
    }
}

fn failure_message(operation: Operation, error: &StoreError) -> String {
    let action = match operation {
        Operation::Initialize => "open the currency database",
        Operation::Clear => "clear data",
        Operation::Insert => "insert data",
        Operation::Load(ListSource::Crypto) => "load crypto currencies",
        Operation::Load(ListSource::Fiat) => "load fiat currencies",
        Operation::Load(ListSource::All) => "load currencies",
    };

    let advice = match error {
        StoreError::Open(_) | StoreError::Schema(_) => {
            "The currency database is unavailable. Check that its location is writable and restart."
        }
        StoreError::Write { .. } => "No changes were saved. Try again.",
        StoreError::Read { .. } => {
            "Stored data could not be read. Try clearing and inserting data again."
        }
    };

    format!("Could not {}. {}", action, advice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CryptoCurrency, FiatCurrency};

    fn crypto(name: &str, symbol: &str) -> Currency {
        Currency::Crypto(CryptoCurrency {
            id: symbol.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
        })
    }

    fn fiat(name: &str, code: &str) -> Currency {
        Currency::Fiat(FiatCurrency {
            id: code.to_string(),
            name: name.to_string(),
            symbol: "$".to_string(),
            code: code.to_string(),
        })
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::default();
        state.update(Action::Loaded {
            source: ListSource::All,
            currencies: vec![
                crypto("Bitcoin", "BTC"),
                crypto("Cronos", "CRO"),
                fiat("US Dollar", "USD"),
            ],
        });
        state
    }

    fn message(state: &AppState) -> &str {
        state.notification.as_ref().map(|n| n.message.as_str()).unwrap_or("")
    }

    #[test]
    fn test_load_replaces_list() {
        let state = loaded_state();
        assert_eq!(state.currencies.len(), 3);
        assert_eq!(message(&state), "All currency data loaded!");
        assert_eq!(state.notification.as_ref().unwrap().severity, Severity::Info);
    }

    #[test]
    fn test_empty_load_keeps_list() {
        let mut state = loaded_state();
        state.update(Action::Loaded {
            source: ListSource::Crypto,
            currencies: Vec::new(),
        });

        assert_eq!(state.currencies.len(), 3);
        assert_eq!(message(&state), "No crypto data yet. Please insert data first.");
    }

    #[test]
    fn test_cleared_empties_list() {
        let mut state = loaded_state();
        state.update(Action::Cleared);

        assert!(state.currencies.is_empty());
        assert_eq!(message(&state), "Data cleared successfully!");
    }

    #[test]
    fn test_query_filters_visible() {
        let mut state = loaded_state();

        state.update(Action::QueryChanged("cro".to_string()));
        assert_eq!(state.visible(), vec![&crypto("Cronos", "CRO")]);

        state.update(Action::QueryChanged("Dollar".to_string()));
        assert_eq!(state.visible(), vec![&fiat("US Dollar", "USD")]);

        state.update(Action::QueryCleared);
        assert_eq!(state.visible().len(), 3);
    }

    #[test]
    fn test_visible_follows_new_list() {
        let mut state = loaded_state();
        state.update(Action::QueryChanged("b".to_string()));
        assert_eq!(state.visible().len(), 1);

        state.update(Action::Loaded {
            source: ListSource::Crypto,
            currencies: vec![crypto("Binance Coin", "BNB"), crypto("Bitcoin Cash", "BCH")],
        });
        assert_eq!(state.visible().len(), 2);
    }

    #[test]
    fn test_failure_keeps_list_and_reports() {
        let mut state = loaded_state();
        state.update(Action::Failed {
            operation: Operation::Insert,
            error: StoreError::Write {
                table: "crypto",
                source: sqlx::Error::RowNotFound,
            },
        });

        assert_eq!(state.currencies.len(), 3);
        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(
            notification.message,
            "Could not insert data. No changes were saved. Try again."
        );
    }

    #[test]
    fn test_read_failure_message() {
        let mut state = AppState::default();
        state.update(Action::Failed {
            operation: Operation::Load(ListSource::Fiat),
            error: StoreError::Read {
                table: "fiat",
                source: sqlx::Error::RowNotFound,
            },
        });

        assert!(message(&state).starts_with("Could not load fiat currencies."));
    }

    #[test]
    fn test_dismiss_notification() {
        let mut state = loaded_state();
        state.update(Action::NotificationDismissed);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_render_rows() {
        let mut state = loaded_state();
        assert_eq!(
            state.render_rows(),
            vec![
                "(B) Bitcoin  BTC >".to_string(),
                "(C) Cronos  CRO >".to_string(),
                "(U) US Dollar".to_string(),
            ]
        );

        state.update(Action::QueryChanged("xyz".to_string()));
        assert_eq!(state.render_rows(), vec!["No Results".to_string(), "Try \"CRO\"".to_string()]);
    }

    #[tokio::test]
    async fn test_store_to_visible_flow() -> anyhow::Result<()> {
        use crate::currencies::CurrencyStore;
        use crate::fixtures::Fixtures;

        let store = CurrencyStore::open("sqlite::memory:").await?;
        store.initialize().await?;
        let fixtures = Fixtures::load(None, None)?;
        store.upsert_crypto(&fixtures.crypto).await?;
        store.upsert_fiat(&fixtures.fiat).await?;

        let mut state = AppState::default();
        state.update(Action::Loaded {
            source: ListSource::All,
            currencies: store.read_all().await?,
        });
        assert_eq!(
            state.currencies.len(),
            fixtures.crypto.len() + fixtures.fiat.len()
        );

        state.update(Action::QueryChanged("CRO".to_string()));
        let visible = state.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].symbol(), "CRO");

        state.update(Action::QueryChanged("dollar".to_string()));
        assert!(state.visible().iter().all(|c| c.kind() == CurrencyKind::Fiat));
        assert!(state.visible().len() >= 2);

        store.clear_all().await?;
        state.update(Action::Cleared);
        state.update(Action::Loaded {
            source: ListSource::All,
            currencies: store.read_all().await?,
        });
        assert!(state.currencies.is_empty());
        assert_eq!(message(&state), "No Data yet. Please insert data first.");

        store.close().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_open_failure_reports_unavailable_database() -> anyhow::Result<()> {
        use crate::currencies::CurrencyStore;

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("no_such_dir").join("currency_info.db");
        let error = match CurrencyStore::open(&format!("sqlite://{}", path.display())).await {
            Ok(_) => anyhow::bail!("opening inside a missing directory should fail"),
            Err(error) => error,
        };
        assert!(matches!(error, StoreError::Open(_)));

        let mut state = loaded_state();
        state.update(Action::Failed {
            operation: Operation::Initialize,
            error,
        });

        let notification = state.notification.as_ref().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(
            notification.message,
            "Could not open the currency database. The currency database is unavailable. \
             Check that its location is writable and restart."
        );
        assert_eq!(state.currencies.len(), 3);
        Ok(())
    }
}
