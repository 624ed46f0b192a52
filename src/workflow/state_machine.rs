//! The stamp-attachment orchestrator.
//!
//! Triggered once per process-transition event. Stages run as a
//! linear sequence of awaited steps - field match, registry lookup,
//! file relay, record update, view refresh - and every failure after
//! the field match vetoes the underlying transition: an approval must
//! not advance without its stamp.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::traits::{HostHooks, RecordStore, StorageClient};
use super::types::{AttachmentState, TransitionEvent, TransitionOutcome};
use crate::config::RegistryConfig;
use crate::errors::StampError;
use crate::registry::StampRegistryClient;
use crate::relay::FileRelay;
use crate::telemetry::generate_correlation_id;

pub struct StampAttachmentOrchestrator<R, S, H> {
    records: Arc<R>,
    registry: StampRegistryClient<R>,
    relay: FileRelay<S>,
    hooks: H,
}

impl<R, S, H> StampAttachmentOrchestrator<R, S, H>
where
    R: RecordStore,
    S: StorageClient,
    H: HostHooks,
{
    pub fn new(
        records: Arc<R>,
        storage: Arc<S>,
        hooks: H,
        registry_config: &RegistryConfig,
        registry_url: String,
    ) -> Self {
        Self {
            records: records.clone(),
            registry: StampRegistryClient::new(records, registry_config, registry_url),
            relay: FileRelay::new(storage),
            hooks,
        }
    }

    /// Run one stamp-attachment workflow for a transition event.
    ///
    /// Never returns an `Err`: every failure is folded into the
    /// outcome so the host's transition hook has exactly one value to
    /// branch on.
    pub async fn handle_transition(&self, event: TransitionEvent) -> TransitionOutcome {
        let correlation_id = generate_correlation_id();
        let mut state = AttachmentState::Idle;

        // Idle → FieldMatched / NoMatchingField: the transition is only
        // stamp-relevant if the record carries a field named after the
        // destination step.
        if !event.record.contains_field(&event.destination_step) {
            debug!(
                correlation.id = %correlation_id,
                step = %event.destination_step,
                "no matching record field; passing transition through"
            );
            return TransitionOutcome::Passthrough(event);
        }
        self.advance(&correlation_id, &mut state, AttachmentState::FieldMatched);

        // FieldMatched → StampFound / StampNotFound
        let stamp = match self.registry.lookup_stamp(&event.actor).await {
            Ok(stamp) => stamp,
            Err(error) => return self.veto(&correlation_id, error),
        };
        self.advance(&correlation_id, &mut state, AttachmentState::StampFound);

        // StampFound → FileRelayed / TransferFailure
        let token = match self
            .relay
            .relay(&stamp.stamp_file.file_key, &stamp.stamp_file.name)
            .await
        {
            Ok(token) => token,
            Err(error) => return self.veto(&correlation_id, error),
        };
        self.advance(&correlation_id, &mut state, AttachmentState::FileRelayed);

        // FileRelayed → RecordUpdated: commit exactly one file
        // reference, the freshly minted token, to the step's field.
        if let Err(source) = self
            .records
            .update_record_field(
                event.app_id,
                event.record_id,
                &event.destination_step,
                std::slice::from_ref(&token),
            )
            .await
        {
            warn!(
                correlation.id = %correlation_id,
                file_key = %token.file_key,
                "record update failed; relayed token is orphaned in destination storage"
            );
            return self.veto(&correlation_id, StampError::RecordUpdate { source });
        }
        self.advance(&correlation_id, &mut state, AttachmentState::RecordUpdated);

        // RecordUpdated → Done: the update's effect is not guaranteed
        // to reach the rendered view incrementally, so ask the host
        // for a full refresh.
        self.hooks.refresh_view(event.app_id, event.record_id).await;
        self.advance(&correlation_id, &mut state, AttachmentState::Done);

        info!(
            correlation.id = %correlation_id,
            record_id = event.record_id,
            step = %event.destination_step,
            actor = %event.actor.code,
            file_key = %token.file_key,
            "approval stamp attached"
        );
        TransitionOutcome::Attached { event, token }
    }

    fn advance(&self, correlation_id: &str, state: &mut AttachmentState, next: AttachmentState) {
        debug!(
            correlation.id = %correlation_id,
            from = ?state,
            to = ?next,
            "attachment state transition"
        );
        *state = next;
    }

    fn veto(&self, correlation_id: &str, error: StampError) -> TransitionOutcome {
        let message = error.user_message();
        error!(
            correlation.id = %correlation_id,
            error = %error,
            "vetoing process transition"
        );
        TransitionOutcome::Veto { error, message }
    }
}
