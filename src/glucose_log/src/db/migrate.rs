//! Embedded schema migrations.

use anyhow::anyhow;
use diesel::{Connection, SqliteConnection, connection::SimpleConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Embedded Diesel migrations bundled with this crate.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs pending migrations on the SQLite database at `url`, returning how
/// many were applied.
///
/// Switches the file to WAL first; WAL is persistent, so later connections
/// inherit it.
pub fn run_sqlite(url: &str) -> anyhow::Result<usize> {
    let mut conn = SqliteConnection::establish(url)?;
    conn.batch_execute("PRAGMA journal_mode=WAL;")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;

    if !applied.is_empty() {
        tracing::info!(count = applied.len(), database = url, "applied migrations");
    }
    Ok(applied.len())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn migrations_apply_once() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().to_string_lossy().to_string();

        assert_eq!(run_sqlite(&path).expect("migration run"), 1);
        assert_eq!(run_sqlite(&path).expect("second run"), 0);

        let mut conn = SqliteConnection::establish(&path).unwrap();
        conn.batch_execute("INSERT INTO profiles (user_id) VALUES ('hello')")
            .unwrap();
    }
}
