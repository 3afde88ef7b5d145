//! Row-by-row import into `end_users`
//!
//! All rows share one transaction that is committed once at the end. Each
//! insert runs inside its own savepoint, so a row the database rejects is
//! rolled back on its own and the run continues with the next row.

use anyhow::{Context, Result};
use sqlx::{Any, AnyConnection, Connection, Transaction};

use super::types::{ImportReport, RawRow, SkipReason};
use super::validate::RowValidator;
use crate::repository::{Dialect, end_users};

/// Validate every row without touching the database
pub fn validate_rows(rows: &[RawRow], validator: &RowValidator) -> ImportReport {
    let mut report = ImportReport {
        total_rows: rows.len(),
        dry_run: true,
        ..Default::default()
    };

    for row in rows {
        match validator.validate(row) {
            Ok(_) => report.valid_rows += 1,
            Err(reason) => report.skip(row.row_number, reason),
        }
    }

    report
}

/// Validate and insert every row, committing once
///
/// Per-row validation failures and database errors are recorded in the
/// report. Any other failure rolls back the whole run and is returned.
pub async fn import_rows(
    conn: &mut AnyConnection,
    rows: &[RawRow],
    validator: &RowValidator,
) -> Result<ImportReport> {
    let dialect = Dialect::of(conn)?;
    let mut tx = conn.begin().await.context("Failed to start transaction")?;

    match insert_all(&mut tx, dialect, rows, validator).await {
        Ok(report) => {
            tx.commit().await.context("Failed to commit transaction")?;
            log::info!(
                "Committed {} rows into {} ({} skipped)",
                report.inserted,
                end_users::TABLE,
                report.skipped.len()
            );
            Ok(report)
        }
        Err(err) => {
            log::error!("Import aborted, rolling back: {:#}", err);
            if let Err(rollback_err) = tx.rollback().await {
                log::error!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

async fn insert_all(
    tx: &mut Transaction<'_, Any>,
    dialect: Dialect,
    rows: &[RawRow],
    validator: &RowValidator,
) -> Result<ImportReport> {
    let mut report = ImportReport {
        total_rows: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let record = match validator.validate(row) {
            Ok(record) => record,
            Err(reason) => {
                report.skip(row.row_number, reason);
                continue;
            }
        };
        report.valid_rows += 1;

        let mut savepoint = tx
            .begin()
            .await
            .with_context(|| format!("Failed to open savepoint for row {}", row.row_number))?;

        match end_users::insert_end_user(&mut savepoint, dialect, &record).await {
            Ok(affected) => {
                savepoint
                    .commit()
                    .await
                    .with_context(|| {
                        format!("Failed to release savepoint for row {}", row.row_number)
                    })?;
                log::debug!("Row {}: inserted '{}'", row.row_number, record.username);
                report.inserted += affected;
            }
            Err(err) => {
                savepoint
                    .rollback()
                    .await
                    .with_context(|| format!("Failed to roll back row {}", row.row_number))?;
                report.skip(
                    row.row_number,
                    SkipReason::Database {
                        username: record.username,
                        message: err.to_string(),
                    },
                );
            }
        }
    }

    Ok(report)
}
