pub mod client;
pub mod errors;
pub mod files;
pub mod process;
pub mod records;
pub mod types;

pub use client::PlatformClient;
pub use errors::PlatformError;
pub use files::FileHandler;
pub use process::ProcessHandler;
pub use records::RecordHandler;
pub use types::{
    FieldDescriptor, FieldValue, FileRef, FileToken, ProcessDefinition, ProcessTransition,
    RecordSnapshot, UserRef,
};
