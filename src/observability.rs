use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::info;

/// Platform API usage metrics
#[derive(Debug, Default)]
pub struct PlatformApiMetrics {
    pub total_requests: AtomicU64,
    pub errors: AtomicU64,
    pub bytes_downloaded: AtomicU64,
    pub bytes_uploaded: AtomicU64,
}

impl PlatformApiMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_download(&self, bytes: usize) {
        self.bytes_downloaded.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn record_upload(&self, bytes: usize) {
        self.bytes_uploaded.fetch_add(bytes as u64, Ordering::Relaxed);
    }

    pub fn get_stats(&self) -> PlatformApiStats {
        PlatformApiStats {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            bytes_downloaded: self.bytes_downloaded.load(Ordering::Relaxed),
            bytes_uploaded: self.bytes_uploaded.load(Ordering::Relaxed),
        }
    }

    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Platform API metrics: requests={}, errors={}, bytes_down={}, bytes_up={}",
            stats.total_requests, stats.errors, stats.bytes_downloaded, stats.bytes_uploaded
        );
    }
}

#[derive(Debug, Clone)]
pub struct PlatformApiStats {
    pub total_requests: u64,
    pub errors: u64,
    pub bytes_downloaded: u64,
    pub bytes_uploaded: u64,
}

/// Global metrics instance
static PLATFORM_METRICS: std::sync::LazyLock<PlatformApiMetrics> =
    std::sync::LazyLock::new(PlatformApiMetrics::new);

pub fn platform_metrics() -> &'static PlatformApiMetrics {
    &PLATFORM_METRICS
}

/// Time an operation and record metrics
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn finish(self) {
        let duration = self.start.elapsed();
        info!(
            operation = %self.operation,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
    }
}

#[macro_export]
macro_rules! time_operation {
    ($operation:expr) => {
        let _timer = $crate::observability::OperationTimer::new($operation);
    };
}
