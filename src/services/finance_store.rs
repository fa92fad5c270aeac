use rusqlite::{params, Connection, OptionalExtension};
use parking_lot::Mutex;
use std::path::Path;
use tracing::{info, debug, error};
use crate::error::AppError;
use crate::models::{AnnualSummary, ExpenseCategory, ExpenseEntry, IngestionResult, Month, RevenueEntry};
use crate::services::ingest::{monthly_series, reconcile};

const SHEET_URL_KEY: &str = "sheet_url";
const LAST_INGESTED_AT_KEY: &str = "last_ingested_at";

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS receitas (
        id INTEGER PRIMARY KEY,
        mes TEXT NOT NULL,
        cliente TEXT NOT NULL,
        valor REAL NOT NULL,
        status TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS despesas (
        id INTEGER PRIMARY KEY,
        mes TEXT NOT NULL,
        nome_despesa TEXT NOT NULL,
        valor REAL NOT NULL,
        status TEXT NOT NULL,
        tipo TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS resumo_anual (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        total_entradas REAL NOT NULL,
        total_saidas REAL NOT NULL,
        saldo_atual REAL NOT NULL
    );

    CREATE TABLE IF NOT EXISTS settings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

/// Where ingestion results live between uploads.
pub trait FinanceStore: Send + Sync {
    /// Drops whatever the previous ingestion stored and keeps `result` instead.
    fn replace_all(&self, result: &IngestionResult) -> Result<(), AppError>;

    /// The stored record set, with monthly series and summary rebuilt from the
    /// entries.
    fn snapshot(&self) -> Result<IngestionResult, AppError>;
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>, default_sheet_url: &str) -> Result<Self, AppError> {
        let path = path.as_ref();
        info!("Opening finance database at {}", path.display());
        let conn = Connection::open(path).map_err(|e| {
            error!("Failed to open database {}: {}", path.display(), e);
            AppError::DatabaseError(e.to_string())
        })?;
        Self::init(conn, default_sheet_url)
    }

    pub fn open_in_memory(default_sheet_url: &str) -> Result<Self, AppError> {
        debug!("Opening in-memory finance database");
        let conn = Connection::open_in_memory()?;
        Self::init(conn, default_sheet_url)
    }

    fn init(conn: Connection, default_sheet_url: &str) -> Result<Self, AppError> {
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute(
            "INSERT OR IGNORE INTO settings (key, value) VALUES (?1, ?2)",
            params![SHEET_URL_KEY, default_sheet_url],
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub fn sheet_url(&self) -> Result<String, AppError> {
        Ok(self.setting(SHEET_URL_KEY)?.unwrap_or_default())
    }

    pub fn set_sheet_url(&self, url: &str) -> Result<(), AppError> {
        self.put_setting(&self.conn.lock(), SHEET_URL_KEY, url)?;
        info!("Sheet URL updated");
        Ok(())
    }

    pub fn last_ingested_at(&self) -> Result<Option<String>, AppError> {
        self.setting(LAST_INGESTED_AT_KEY)
    }

    fn setting(&self, key: &str) -> Result<Option<String>, AppError> {
        let conn = self.conn.lock();
        let value = conn
            .query_row("SELECT value FROM settings WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn put_setting(&self, conn: &Connection, key: &str, value: &str) -> Result<(), AppError> {
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

impl FinanceStore for SqliteStore {
    fn replace_all(&self, result: &IngestionResult) -> Result<(), AppError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM receitas", [])?;
        tx.execute("DELETE FROM despesas", [])?;
        tx.execute("DELETE FROM resumo_anual", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO receitas (id, mes, cliente, valor, status) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for entry in &result.revenue_entries {
                stmt.execute(params![
                    entry.id as i64,
                    entry.month.label(),
                    entry.client,
                    entry.amount,
                    entry.status
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO despesas (id, mes, nome_despesa, valor, status, tipo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for entry in &result.expense_entries {
                stmt.execute(params![
                    entry.id as i64,
                    entry.month.label(),
                    entry.name,
                    entry.amount,
                    entry.status,
                    entry.category.label()
                ])?;
            }
        }

        let summary = &result.annual_summary;
        tx.execute(
            "INSERT INTO resumo_anual (id, total_entradas, total_saidas, saldo_atual) VALUES (1, ?1, ?2, ?3)",
            params![summary.total_inflow, summary.total_outflow, summary.current_balance],
        )?;

        self.put_setting(&tx, LAST_INGESTED_AT_KEY, &chrono::Utc::now().to_rfc3339())?;
        tx.commit()?;

        info!(
            "Stored {} revenue and {} expense entries",
            result.revenue_entries.len(),
            result.expense_entries.len()
        );
        Ok(())
    }

    fn snapshot(&self) -> Result<IngestionResult, AppError> {
        let conn = self.conn.lock();

        let mut stmt = conn.prepare("SELECT id, mes, cliente, valor, status FROM receitas ORDER BY id")?;
        let revenue_entries = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .map(|row| -> Result<RevenueEntry, AppError> {
                let (id, mes, client, amount, status) = row?;
                Ok(RevenueEntry { id: id as u64, month: parse_month(&mes)?, client, amount, status })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let mut stmt = conn.prepare(
            "SELECT id, mes, nome_despesa, valor, status, tipo FROM despesas ORDER BY id",
        )?;
        let expense_entries = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                ))
            })?
            .map(|row| -> Result<ExpenseEntry, AppError> {
                let (id, mes, name, amount, status, tipo) = row?;
                let category = ExpenseCategory::from_label(&tipo).ok_or_else(|| {
                    AppError::DatabaseError(format!("Unknown expense category in database: {}", tipo))
                })?;
                Ok(ExpenseEntry { id: id as u64, month: parse_month(&mes)?, name, amount, status, category })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        let stored = conn
            .query_row(
                "SELECT total_entradas, total_saidas, saldo_atual FROM resumo_anual WHERE id = 1",
                [],
                |row| {
                    Ok(AnnualSummary {
                        total_inflow: row.get(0)?,
                        total_outflow: row.get(1)?,
                        current_balance: row.get(2)?,
                    })
                },
            )
            .optional()?;

        debug!(
            "Loaded {} revenue and {} expense entries from database",
            revenue_entries.len(),
            expense_entries.len()
        );

        Ok(IngestionResult {
            annual_summary: reconcile(stored, &revenue_entries, &expense_entries),
            monthly_series: monthly_series(&revenue_entries, &expense_entries),
            revenue_entries,
            expense_entries,
        })
    }
}

fn parse_month(label: &str) -> Result<Month, AppError> {
    Month::from_label(label)
        .ok_or_else(|| AppError::DatabaseError(format!("Unknown month in database: {}", label)))
}
