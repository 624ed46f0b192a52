pub mod state_machine;
pub mod traits;
pub mod types;

pub use state_machine::StampAttachmentOrchestrator;
pub use traits::{HostHooks, ProcessSource, RecordStore, StorageClient, TracingHostHooks};
pub use types::{AttachmentState, TransitionEvent, TransitionOutcome};
