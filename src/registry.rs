//! Stamp registry lookups.
//!
//! The registry is a separate app on the host platform mapping user
//! codes to registered stamp images. Lookups are uncached: every call
//! re-queries, so a stamp registered moments ago is picked up by the
//! next approval action.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::errors::StampError;
use crate::platform::{FileRef, RecordSnapshot, UserRef};
use crate::workflow::traits::RecordStore;

/// One row of the stamp registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampRecord {
    pub owner_user_code: String,
    pub stamp_file: FileRef,
}

/// Client for the external stamp registry collection.
#[derive(Debug)]
pub struct StampRegistryClient<R> {
    store: Arc<R>,
    app_id: u64,
    user_code_field: String,
    stamp_file_field: String,
    registry_url: String,
}

impl<R: RecordStore> StampRegistryClient<R> {
    pub fn new(store: Arc<R>, config: &RegistryConfig, registry_url: String) -> Self {
        Self {
            store,
            app_id: config.app_id,
            user_code_field: config.user_code_field.clone(),
            stamp_file_field: config.stamp_file_field.clone(),
            registry_url,
        }
    }

    /// Location of the registry app, for registration guidance in
    /// user-facing failures.
    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Look up the stamp registered for a user by exact user-code
    /// match. The first returned row wins when the registry holds
    /// duplicates; zero rows (or a row without a stamp image) is
    /// `StampNotFound`.
    pub async fn lookup_stamp(&self, user: &UserRef) -> Result<StampRecord, StampError> {
        let query = format!(
            "{} in (\"{}\")",
            self.user_code_field,
            user.code.replace('"', "\\\"")
        );
        let records = self.store.query_records(self.app_id, &query).await?;

        if records.len() > 1 {
            // Duplicate rows for one user code are an upstream data
            // ambiguity; surface it rather than guessing.
            warn!(
                user_code = %user.code,
                rows = records.len(),
                "registry returned multiple stamps for one user code; using first match"
            );
        }

        let record = records
            .into_iter()
            .next()
            .ok_or_else(|| self.not_found(user))?;
        let stamp_file = self.stamp_file(&record).ok_or_else(|| {
            warn!(
                user_code = %user.code,
                field = %self.stamp_file_field,
                "registry row has no stamp image attached"
            );
            self.not_found(user)
        })?;

        let owner_user_code = record
            .field(&self.user_code_field)
            .and_then(|value| value.user_code())
            .unwrap_or(&user.code)
            .to_string();
        debug!(user_code = %user.code, file = %stamp_file.name, "stamp found in registry");

        Ok(StampRecord { owner_user_code, stamp_file })
    }

    fn stamp_file(&self, record: &RecordSnapshot) -> Option<FileRef> {
        record
            .field(&self.stamp_file_field)
            .and_then(|value| value.as_files())
            .and_then(|files| files.first())
            .cloned()
    }

    fn not_found(&self, user: &UserRef) -> StampError {
        StampError::StampNotFound {
            user_code: user.code.clone(),
            user_name: user.name.clone(),
            registry_url: self.registry_url.clone(),
        }
    }
}
