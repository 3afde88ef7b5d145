//! Repository layer for the target database
//!
//! Runs over a single [`AnyConnection`] so the same code path serves
//! PostgreSQL in production and SQLite for local targets.

pub mod end_users;

use anyhow::{Context, Result};
use sqlx::{AnyConnection, Connection};

/// SQL dialects the importer knows how to address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    Sqlite,
}

impl Dialect {
    /// Detect the dialect of an open connection
    pub fn of(conn: &AnyConnection) -> Result<Self> {
        match conn.backend_name() {
            "PostgreSQL" => Ok(Dialect::Postgres),
            "SQLite" => Ok(Dialect::Sqlite),
            other => anyhow::bail!("Unsupported database backend: {}", other),
        }
    }
}

/// Open the single connection used for a run
pub async fn connect(database_url: &str) -> Result<AnyConnection> {
    sqlx::any::install_default_drivers();

    let conn = AnyConnection::connect(database_url)
        .await
        .with_context(|| format!("Failed to connect to database: {}", redact(database_url)))?;

    log::info!("Connected to {} database", conn.backend_name());
    Ok(conn)
}

/// Hide the password portion of a connection URL for display
pub fn redact(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return database_url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return database_url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:***@{}", scheme, user, host),
        None => database_url.to_string(),
    }
}
