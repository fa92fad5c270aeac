pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

use services::{finance_store::SqliteStore, ingest::{ExpenseClassifier, HeaderScanLayout, Ingestor}};

// Application state
pub struct AppState {
    pub config: config::Config,
    pub store: SqliteStore,
    pub ingestor: Ingestor,
}

impl AppState {
    pub fn new(config: config::Config, store: SqliteStore) -> Self {
        let classifier = ExpenseClassifier::with_extra_keywords(&config.fixed_expense_keywords);
        Self {
            config,
            store,
            ingestor: Ingestor::new(Box::new(HeaderScanLayout), classifier),
        }
    }
}
