use serde::{Deserialize, Serialize};

use crate::errors::StampError;
use crate::platform::{FileToken, RecordSnapshot, UserRef};

/// One "proceed" click of an approval process, as delivered by the
/// host platform. Ephemeral; never persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub app_id: u64,
    pub record_id: u64,
    /// In-progress snapshot of the transitioning record.
    pub record: RecordSnapshot,
    /// Name of the step the record is advancing to.
    pub destination_step: String,
    /// Authenticated user executing the transition.
    pub actor: UserRef,
}

/// Workflow states of one stamp-attachment run.
///
/// A run walks `Idle → FieldMatched → StampFound → FileRelayed →
/// RecordUpdated → Done`; failure exits map to `TransitionOutcome`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentState {
    Idle,
    FieldMatched,
    StampFound,
    FileRelayed,
    RecordUpdated,
    Done,
}

/// What the host's transition hook should do with the event.
#[derive(Debug)]
pub enum TransitionOutcome {
    /// The destination step has no matching record field; the event is
    /// returned unchanged and the transition proceeds normally. Not an
    /// error.
    Passthrough(TransitionEvent),
    /// The stamp was attached and committed; the transition proceeds.
    Attached {
        event: TransitionEvent,
        token: FileToken,
    },
    /// The transition must not be applied. `message` is the blocking
    /// dialog text for the acting user.
    Veto {
        error: StampError,
        message: String,
    },
}

impl TransitionOutcome {
    /// Whether the host may advance the underlying business transition.
    pub fn allows_transition(&self) -> bool {
        !matches!(self, TransitionOutcome::Veto { .. })
    }
}
