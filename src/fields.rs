//! Field-to-step resolution.
//!
//! An app's approval process names its destination steps; a record's
//! form schema names its attachable fields. A field whose variable
//! name exactly equals a destination step name is a stamp field: it
//! receives the actor's stamp image when that step is reached.

use std::collections::HashSet;
use tracing::debug;

use crate::errors::StampError;
use crate::platform::{FieldDescriptor, ProcessDefinition};
use crate::workflow::traits::ProcessSource;

/// Filter a form schema down to the fields associated with process
/// steps. Signals `ProcessUndefined` when process management is
/// disabled for the app - callers must treat that as non-fatal to
/// record viewing but fatal to any stamp feature.
pub fn resolve_step_fields(
    process: &ProcessDefinition,
    fields: &[FieldDescriptor],
) -> Result<Vec<FieldDescriptor>, StampError> {
    if !process.enabled {
        return Err(StampError::ProcessUndefined);
    }

    let steps: HashSet<&str> = process.destination_steps().collect();
    let resolved: Vec<FieldDescriptor> = fields
        .iter()
        .filter(|field| steps.contains(field.var.as_str()))
        .cloned()
        .collect();
    debug!(candidates = fields.len(), resolved = resolved.len(), "resolved step fields");
    Ok(resolved)
}

/// Record-view entry point: fetch the app's process definition and
/// resolve its stamp fields so the host can decorate them.
pub async fn inspect_record_view<P>(
    process_source: &P,
    app_id: u64,
    schema: &[FieldDescriptor],
) -> Result<Vec<FieldDescriptor>, StampError>
where
    P: ProcessSource + ?Sized,
{
    let definition = process_source.fetch_definition(app_id).await?;
    resolve_step_fields(&definition, schema)
}
