use async_trait::async_trait;
use crate::models::{HealthProfile, StoredProfile};
use thiserror::Error;

/// Errors that can occur when reading or writing stored profiles
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Profile store is full ({0} accounts)")]
    CapacityExceeded(u64),
}

/// Persistent profile storage keyed by account identity
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get(&self, account_id: &str) -> Result<Option<StoredProfile>, StoreError>;

    /// Insert or replace the profile for an account
    async fn set(&self, account_id: &str, profile: HealthProfile) -> Result<StoredProfile, StoreError>;

    /// Returns whether a profile existed
    async fn remove(&self, account_id: &str) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Reject profiles the profile form would not let through
///
/// Every family member needs an explicitly chosen gender.
pub fn validate_for_save(profile: &HealthProfile) -> Result<(), StoreError> {
    match profile.family_members.iter().position(|m| m.gender.is_none()) {
        Some(index) => Err(StoreError::InvalidInput(format!(
            "Please select a gender for family member {}",
            index + 1
        ))),
        None => Ok(()),
    }
}

/// In-process profile store backed by a moka cache
///
/// Saved profiles are never evicted. Once `capacity` accounts are stored,
/// saves for new accounts fail with `CapacityExceeded`; existing accounts
/// can still be updated.
pub struct MemoryProfileStore {
    profiles: moka::future::Cache<String, StoredProfile>,
    capacity: u64,
    admission: tokio::sync::Mutex<()>,
}

impl MemoryProfileStore {
    pub fn new(capacity: u64) -> Self {
        let profiles = moka::future::Cache::builder().build();
        Self {
            profiles,
            capacity,
            admission: tokio::sync::Mutex::new(()),
        }
    }

    async fn admit(&self, account_id: &str) -> Result<(), StoreError> {
        if self.profiles.contains_key(account_id) {
            return Ok(());
        }
        self.profiles.run_pending_tasks().await;
        if self.profiles.entry_count() >= self.capacity {
            tracing::warn!("Memory profile store full, rejecting account {}", account_id);
            return Err(StoreError::CapacityExceeded(self.capacity));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get(&self, account_id: &str) -> Result<Option<StoredProfile>, StoreError> {
        Ok(self.profiles.get(account_id).await)
    }

    async fn set(&self, account_id: &str, profile: HealthProfile) -> Result<StoredProfile, StoreError> {
        validate_for_save(&profile)?;

        let _guard = self.admission.lock().await;
        self.admit(account_id).await?;

        let stored = StoredProfile {
            account_id: account_id.to_string(),
            profile,
            updated_at: chrono::Utc::now(),
        };
        self.profiles.insert(account_id.to_string(), stored.clone()).await;

        tracing::trace!("Stored profile for account {}", account_id);
        Ok(stored)
    }

    async fn remove(&self, account_id: &str) -> Result<bool, StoreError> {
        Ok(self.profiles.remove(account_id).await.is_some())
    }
}
