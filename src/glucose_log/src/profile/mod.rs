//! SQLite-backed profile store.
//!
//! [`repo`] holds synchronous functions over a borrowed `SqliteConnection`;
//! [`SqliteProfileStore`] runs them on tokio's blocking pool, one connection
//! per operation, and implements [`ProfileStore`].
//!
//! Repository functions return `anyhow::Result`. Domain failures travel
//! inside it as a [`StoreError`] and are recovered by downcasting at the
//! async boundary; anything else becomes [`StoreError::Backend`].

pub mod repo;

use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use diesel::SqliteConnection;
use reading_aggregator::{ProfileDocument, ProfileStore, Reading, ReadingLog, StoreError, UserId};

use crate::db::{connection::connect_sqlite, migrate};

/// [`ProfileStore`] over a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteProfileStore {
    database_url: Arc<str>,
}

impl SqliteProfileStore {
    /// Open the database at `database_url`, applying pending migrations.
    ///
    /// In-memory databases are refused: every operation opens its own
    /// connection, so `:memory:` would lose data between calls.
    pub fn open(database_url: &str) -> anyhow::Result<Self> {
        if database_url.trim().is_empty() || database_url.contains(":memory:") {
            bail!("a file-backed database url is required, got {database_url:?}");
        }
        migrate::run_sqlite(database_url)?;
        Ok(Self {
            database_url: Arc::from(database_url),
        })
    }

    /// Database this store writes to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Import a whole profile document; see [`repo::import_document`].
    pub async fn import_document(
        &self,
        user: &UserId,
        doc: ProfileDocument,
    ) -> Result<usize, StoreError> {
        let user = user.clone();
        self.run(move |conn| repo::import_document(conn, &user, doc))
            .await
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> anyhow::Result<T> + Send + 'static,
    {
        let url = Arc::clone(&self.database_url);
        let joined = tokio::task::spawn_blocking(move || {
            let mut conn = connect_sqlite(&url)?;
            op(&mut conn)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(into_store_error),
            Err(e) => Err(StoreError::Backend(format!("blocking task failed: {e}"))),
        }
    }
}

fn into_store_error(err: anyhow::Error) -> StoreError {
    match err.downcast::<StoreError>() {
        Ok(store_err) => store_err,
        Err(other) => {
            let msg = format!("{other:#}");
            tracing::warn!(error = %msg, "profile store backend failure");
            StoreError::Backend(msg)
        }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn fetch(&self, user: &UserId) -> Result<ReadingLog, StoreError> {
        let user = user.clone();
        self.run(move |conn| repo::fetch_log(conn, &user)).await
    }

    async fn append(&self, user: &UserId, reading: Reading) -> Result<(), StoreError> {
        let user = user.clone();
        self.run(move |conn| repo::append_reading(conn, &user, &reading).map(|_| ()))
            .await
    }

    async fn create_profile(&self, user: &UserId) -> Result<bool, StoreError> {
        let user = user.clone();
        self.run(move |conn| repo::create_profile(conn, &user)).await
    }
}
