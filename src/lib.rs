// Hanko Relay - approval stamp attachment for record platforms
// This exposes the core components for host integration and testing

pub mod config;
pub mod errors;
pub mod fields;
pub mod observability;
pub mod platform;
pub mod registry;
pub mod relay;
pub mod telemetry;
pub mod workflow;

// Re-export key types for easy access
pub use config::{config, init_config, HankoRelayConfig, RegistryConfig};
pub use errors::{StampError, TransferPhase};
pub use fields::{inspect_record_view, resolve_step_fields};
pub use observability::{platform_metrics, OperationTimer, PlatformApiMetrics};
pub use platform::{
    FieldDescriptor, FieldValue, FileRef, FileToken, PlatformClient, PlatformError,
    ProcessDefinition, ProcessTransition, RecordSnapshot, UserRef,
};
pub use registry::{StampRecord, StampRegistryClient};
pub use relay::FileRelay;
pub use telemetry::{create_workflow_span, generate_correlation_id, init_telemetry};
pub use workflow::{
    AttachmentState, HostHooks, ProcessSource, RecordStore, StampAttachmentOrchestrator,
    StorageClient, TracingHostHooks, TransitionEvent, TransitionOutcome,
};
