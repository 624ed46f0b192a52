//! The core transfer primitive: copy a file's bytes from the source
//! app's storage into the destination app's storage, minting a new,
//! independent file token. Storage keys are never aliased across apps.

use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::{StampError, TransferPhase};
use crate::observability::OperationTimer;
use crate::platform::FileToken;
use crate::workflow::traits::StorageClient;

/// Two-phase, strictly ordered download-then-upload relay.
#[derive(Debug)]
pub struct FileRelay<S> {
    storage: Arc<S>,
}

impl<S: StorageClient> FileRelay<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    /// Fetch the bytes addressed by `source_key`, then publish them
    /// under `file_name` to the destination app's storage.
    ///
    /// The publish phase only begins once the fetch has completed
    /// successfully; a failure in either phase is terminal for the
    /// call and no partial result is exposed. No retries.
    pub async fn relay(&self, source_key: &str, file_name: &str) -> Result<FileToken, StampError> {
        let timer = OperationTimer::new("stamp_relay");
        debug!(source_key, file_name, "relay fetch phase starting");
        let content = self
            .storage
            .download(source_key)
            .await
            .map_err(|source| StampError::Transfer { phase: TransferPhase::Download, source })?;

        debug!(source_key, size = content.len(), "relay publish phase starting");
        let token = self
            .storage
            .upload(file_name, content)
            .await
            .map_err(|source| StampError::Transfer { phase: TransferPhase::Upload, source })?;

        info!(
            source_key,
            file_key = %token.file_key,
            file_name,
            "file relayed to destination storage"
        );
        timer.finish();
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;
    use crate::workflow::traits::MockStorageClient;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn relays_bytes_unchanged_and_mints_new_token() {
        let content = b"\x89PNG stamp bytes".to_vec();
        let expected = content.clone();

        let mut storage = MockStorageClient::new();
        storage
            .expect_download()
            .with(eq("registry-key"))
            .times(1)
            .returning(move |_| Ok(content.clone()));
        storage
            .expect_upload()
            .withf(move |name, bytes| name == "hanko.png" && bytes.as_slice() == expected.as_slice())
            .times(1)
            .returning(|name, _| {
                Ok(FileToken { file_key: "fresh-key".to_string(), file_name: name.to_string() })
            });

        let relay = FileRelay::new(Arc::new(storage));
        let token = relay.relay("registry-key", "hanko.png").await.unwrap();
        assert_eq!(token.file_key, "fresh-key");
        assert_ne!(token.file_key, "registry-key");
    }

    #[tokio::test]
    async fn publish_never_starts_after_failed_fetch() {
        let mut storage = MockStorageClient::new();
        storage.expect_download().times(1).returning(|_| {
            Err(PlatformError::Api { status: 502, message: "storage unavailable".to_string() })
        });
        storage.expect_upload().times(0);

        let relay = FileRelay::new(Arc::new(storage));
        let error = relay.relay("registry-key", "hanko.png").await.unwrap_err();
        assert!(matches!(error, StampError::Transfer { phase: TransferPhase::Download, .. }));
    }

    #[tokio::test]
    async fn upload_failure_is_terminal_with_no_retry() {
        let mut storage = MockStorageClient::new();
        storage.expect_download().times(1).returning(|_| Ok(vec![1, 2, 3]));
        storage.expect_upload().times(1).returning(|_, _| {
            Err(PlatformError::Api { status: 500, message: "upload rejected".to_string() })
        });

        let relay = FileRelay::new(Arc::new(storage));
        let error = relay.relay("registry-key", "hanko.png").await.unwrap_err();
        assert!(matches!(error, StampError::Transfer { phase: TransferPhase::Upload, .. }));
    }
}
