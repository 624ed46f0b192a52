use std::fmt;
use thiserror::Error;

use crate::platform::PlatformError;

/// Which phase of a file relay failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    Download,
    Upload,
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferPhase::Download => write!(f, "download"),
            TransferPhase::Upload => write!(f, "upload"),
        }
    }
}

/// Failures of the stamp-attachment workflow.
///
/// Every variant except `ProcessUndefined` vetoes an in-progress
/// transition; `ProcessUndefined` only blocks stamp features on the
/// record view, never the view itself.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("process management is not enabled for this app")]
    ProcessUndefined,

    #[error("no approval stamp registered for {user_name} ({user_code})")]
    StampNotFound {
        user_code: String,
        user_name: String,
        registry_url: String,
    },

    #[error("stamp transfer failed during {phase}: {source}")]
    Transfer {
        phase: TransferPhase,
        #[source]
        source: PlatformError,
    },

    #[error("record update failed after stamp relay: {source}")]
    RecordUpdate {
        #[source]
        source: PlatformError,
    },

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

impl StampError {
    /// Render the blocking dialog text shown to the acting user when a
    /// transition is vetoed (or, for `ProcessUndefined`, when a record
    /// view cannot offer stamp features).
    pub fn user_message(&self) -> String {
        match self {
            StampError::ProcessUndefined => "Process Configuration Missing\n\
                 ─────────────────────────────\n\
                 Process management is not enabled for this app.\n\n\
                 HOW TO FIX:\n\
                 \x20  → Enable process management in the app settings\n\
                 \x20  → Approval stamps require at least one process step"
                .to_string(),
            StampError::StampNotFound { user_code, user_name, registry_url } => format!(
                "Stamp Not Registered\n\
                 ────────────────────\n\
                 No approval stamp is registered for {user_name} ({user_code}).\n\n\
                 HOW TO FIX:\n\
                 \x20  → Register a stamp image in the stamp registry: {registry_url}\n\
                 \x20  → Run the approval action again once registered"
            ),
            StampError::Transfer { phase, .. } => format!(
                "Stamp Attachment Failed\n\
                 ───────────────────────\n\
                 The stamp image could not be transferred ({phase} failed),\n\
                 so the approval was not advanced.\n\n\
                 HOW TO FIX:\n\
                 \x20  → Check network connectivity to the platform\n\
                 \x20  → Run the approval action again"
            ),
            StampError::RecordUpdate { .. } => "Stamp Attachment Failed\n\
                 ───────────────────────\n\
                 The stamp image was transferred but could not be saved\n\
                 to the record, so the approval was not advanced.\n\n\
                 HOW TO FIX:\n\
                 \x20  → Check that the approval field accepts attachments\n\
                 \x20  → Run the approval action again"
                .to_string(),
            StampError::Platform(source) => format!(
                "Stamp Attachment Failed\n\
                 ───────────────────────\n\
                 The stamp registry could not be reached, so the approval\n\
                 was not advanced.\n\n\
                 Details: {source}\n\n\
                 HOW TO FIX:\n\
                 \x20  → Check network connectivity to the platform\n\
                 \x20  → Run the approval action again"
            ),
        }
    }
}
