// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use currency_list::app::{Action, AppState, ListSource, Operation, Severity};
use currency_list::config;
use currency_list::currencies::CurrencyStore;
use currency_list::errors::StoreResult;
use currency_list::fixtures::Fixtures;
use currency_list::models::Currency;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Browse and search stored crypto and fiat currencies",
    long_about = None
)]
struct Cli {
    /// Database URL, overrides config.toml and DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete all stored crypto and fiat currencies
    Clear,
    /// Store the mock crypto and fiat currency lists
    Insert,
    /// Print a stored list, optionally filtered
    Show {
        #[arg(value_enum)]
        source: ListSource,
        /// Search by name or symbol
        #[arg(short, long, default_value = "")]
        query: String,
        /// Print the matching rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load a stored list and filter it by each line read from stdin
    Browse {
        #[arg(value_enum)]
        source: ListSource,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = config::Config::default().with_env_overrides();
    let database_url = cli.database_url.unwrap_or(config.database_url.clone());

    let mut state = AppState::default();
    let store = match open_store(&database_url).await {
        Ok(store) => store,
        Err(error) => {
            state.update(Action::Failed {
                operation: Operation::Initialize,
                error,
            });
            print_notification(&state);
            bail!("Currency database {} is unavailable", database_url);
        }
    };
    let result = match cli.command {
        Commands::Clear => clear_data(&store, &mut state).await,
        Commands::Insert => insert_data(&store, &mut state, &config).await,
        Commands::Show {
            source,
            query,
            json,
        } => {
            load_list(&store, &mut state, source).await;
            state.update(Action::QueryChanged(query));
            if json {
                print_json(&state.visible())
            } else {
                print_notification(&state);
                print_rows(&state);
                Ok(())
            }
        }
        Commands::Browse { source } => {
            load_list(&store, &mut state, source).await;
            browse(&mut state)
        }
    };

    store.close().await;
    result
}

async fn open_store(database_url: &str) -> StoreResult<CurrencyStore> {
    let store = CurrencyStore::open(database_url).await?;
    store.initialize().await?;
    Ok(store)
}

async fn clear_data(store: &CurrencyStore, state: &mut AppState) -> Result<()> {
    match store.clear_all().await {
        Ok(()) => state.update(Action::Cleared),
        Err(error) => state.update(Action::Failed {
            operation: Operation::Clear,
            error,
        }),
    }
    print_notification(state);
    Ok(())
}

async fn insert_data(
    store: &CurrencyStore,
    state: &mut AppState,
    config: &config::Config,
) -> Result<()> {
    let fixtures = Fixtures::load(
        config.crypto_fixture.as_deref(),
        config.fiat_fixture.as_deref(),
    )?;

    let result = match store.upsert_crypto(&fixtures.crypto).await {
        Ok(()) => store.upsert_fiat(&fixtures.fiat).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => state.update(Action::Inserted),
        Err(error) => state.update(Action::Failed {
            operation: Operation::Insert,
            error,
        }),
    }
    print_notification(state);
    Ok(())
}

async fn load_list(store: &CurrencyStore, state: &mut AppState, source: ListSource) {
    let result: StoreResult<Vec<Currency>> = match source {
        ListSource::Crypto => store
            .read_crypto()
            .await
            .map(|rows| rows.into_iter().map(Currency::from).collect()),
        ListSource::Fiat => store
            .read_fiat()
            .await
            .map(|rows| rows.into_iter().map(Currency::from).collect()),
        ListSource::All => store.read_all().await,
    };

    match result {
        Ok(currencies) => state.update(Action::Loaded { source, currencies }),
        Err(error) => state.update(Action::Failed {
            operation: Operation::Load(source),
            error,
        }),
    }
}

fn browse(state: &mut AppState) -> Result<()> {
    print_notification(state);
    state.update(Action::NotificationDismissed);
    print_rows(state);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        state.update(Action::QueryChanged(line));
        println!("---");
        print_rows(state);
        io::stdout().flush()?;
    }

    Ok(())
}

fn print_notification(state: &AppState) {
    if let Some(notification) = &state.notification {
        log::debug!("Showing notification {}", notification.key);
        match notification.severity {
            Severity::Info => println!("✅ {}", notification.message),
            Severity::Error => eprintln!("❌ {}", notification.message),
        }
    }
}

fn print_rows(state: &AppState) {
    for row in state.render_rows() {
        println!("{}", row);
    }
}

fn print_json(rows: &[&Currency]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(rows)?);
    Ok(())
}
