use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

/// Schema of the authentication tables
const AUTH_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS sys_users (
    id TEXT PRIMARY KEY NOT NULL,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL,
    last_login_at TEXT
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_sys_users_email ON sys_users (lower(email));

-- Key/value settings, e.g. the generated JWT secret
CREATE TABLE IF NOT EXISTS sys_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Apply authentication system migration
pub async fn apply_auth_migration() -> Result<()> {
    use crate::shared::data::db::get_connection;

    let conn = get_connection();

    // Execute each statement separately (SQLite doesn't support execute_batch in sea-orm)
    for (idx, statement) in split_statements(AUTH_SCHEMA).into_iter().enumerate() {
        let preview = statement
            .chars()
            .take(100)
            .collect::<String>()
            .replace('\n', " ");
        tracing::debug!("Executing migration statement #{}: {}...", idx, preview);

        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!("{};", statement),
        ))
        .await
        .with_context(|| format!("Failed to execute statement #{}: {}", idx, preview))?;
    }

    tracing::info!("Auth system migration applied successfully");

    Ok(())
}

/// Splits a script on `;`, dropping comment lines and empty statements.
fn split_statements(script: &str) -> Vec<String> {
    script
        .split(';')
        .map(|statement| {
            statement
                .lines()
                .filter(|line| {
                    let trimmed_line = line.trim();
                    !trimmed_line.is_empty() && !trimmed_line.starts_with("--")
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
