// Capability interfaces for dependency injection - the orchestrator is
// written against these so it can be exercised with fakes.

use async_trait::async_trait;
use tracing::info;

use crate::platform::{FileToken, PlatformError, ProcessDefinition, RecordSnapshot};

/// Record query/update operations of the host platform.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch records from an app by filter expression.
    async fn query_records(
        &self,
        app_id: u64,
        query: &str,
    ) -> Result<Vec<RecordSnapshot>, PlatformError>;

    /// Replace one field of one record with the given file references.
    async fn update_record_field(
        &self,
        app_id: u64,
        record_id: u64,
        field_code: &str,
        files: &[FileToken],
    ) -> Result<(), PlatformError>;
}

/// File storage operations of the host platform.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Fetch the byte content addressed by a storage key.
    async fn download(&self, file_key: &str) -> Result<Vec<u8>, PlatformError>;

    /// Submit bytes plus filename, minting a fresh storage token.
    async fn upload(&self, file_name: &str, content: Vec<u8>) -> Result<FileToken, PlatformError>;
}

/// Access to an app's process-management configuration.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ProcessSource: Send + Sync {
    async fn fetch_definition(&self, app_id: u64) -> Result<ProcessDefinition, PlatformError>;
}

/// Side effects the host performs on the orchestrator's behalf.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait HostHooks: Send + Sync {
    /// Request a full reload of the record view so the newly attached
    /// file is rendered.
    async fn refresh_view(&self, app_id: u64, record_id: u64);
}

/// Hook implementation for hosts that handle rendering themselves;
/// just records that a refresh was requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHostHooks;

#[async_trait]
impl HostHooks for TracingHostHooks {
    async fn refresh_view(&self, app_id: u64, record_id: u64) {
        info!(app_id, record_id, "view refresh requested");
    }
}
