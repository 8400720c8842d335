//! In-memory [`ProfileStore`], used by tests and embedders without a database.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ProfileStore, StoreError};
use crate::models::{
    reading::{Reading, UserId},
    reading_log::ReadingLog,
};

/// Profiles held in a map behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Vec<Reading>>>,
}

impl MemoryProfileStore {
    /// Seed a store with existing logs.
    pub fn with_profiles(profiles: impl IntoIterator<Item = (UserId, ReadingLog)>) -> Self {
        let map = profiles
            .into_iter()
            .map(|(user, log)| (user, log.into_readings()))
            .collect();
        Self {
            profiles: RwLock::new(map),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch(&self, user: &UserId) -> Result<ReadingLog, StoreError> {
        let profiles = self.profiles.read().await;
        profiles
            .get(user)
            .map(|readings| ReadingLog::from_readings(readings.clone()))
            .ok_or_else(|| StoreError::NotFound(user.clone()))
    }

    async fn append(&self, user: &UserId, reading: Reading) -> Result<(), StoreError> {
        StoreError::check_reading(&reading)?;
        let mut profiles = self.profiles.write().await;
        let readings = profiles
            .get_mut(user)
            .ok_or_else(|| StoreError::NotFound(user.clone()))?;
        readings.push(reading);
        tracing::debug!(user = %user, count = readings.len(), "appended reading");
        Ok(())
    }

    async fn create_profile(&self, user: &UserId) -> Result<bool, StoreError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(user) {
            return Ok(false);
        }
        profiles.insert(user.clone(), Vec::new());
        tracing::debug!(user = %user, "created profile");
        Ok(true)
    }
}
