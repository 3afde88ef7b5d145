//! Repository for the `end_users` table

use anyhow::{Context, Result};
use sqlx::AnyConnection;

use super::Dialect;
use crate::import::EndUserRecord;

pub const TABLE: &str = "end_users";

const INSERT_POSTGRES: &str = r#"
    INSERT INTO end_users (username, section, email, mobile, employee_id, password)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

const INSERT_SQLITE: &str = r#"
    INSERT INTO end_users (username, section, email, mobile, employee_id, password)
    VALUES (?, ?, ?, ?, ?, ?)
"#;

/// Insert one end user, returning the rows affected
///
/// Driver errors are returned untouched so callers can report the
/// database's own message for the row.
pub async fn insert_end_user(
    conn: &mut AnyConnection,
    dialect: Dialect,
    record: &EndUserRecord,
) -> std::result::Result<u64, sqlx::Error> {
    let sql = match dialect {
        Dialect::Postgres => INSERT_POSTGRES,
        Dialect::Sqlite => INSERT_SQLITE,
    };

    let result = sqlx::query(sql)
        .bind(record.username.as_str())
        .bind(record.section.as_deref())
        .bind(record.email.as_deref())
        .bind(record.mobile.as_deref())
        .bind(record.employee_id.as_deref())
        .bind(record.password.as_str())
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Count rows in `end_users`; fails when the table is missing
pub async fn count_end_users(conn: &mut AnyConnection) -> Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM end_users")
        .fetch_one(conn)
        .await
        .with_context(|| format!("Table {} does not exist or is not accessible", TABLE))
}
