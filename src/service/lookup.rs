use serde_json::Value;
use tracing::error;

use crate::db::DocumentStore;
use crate::error::{LookupContext, StepifyError};
use crate::models::Document;

/// Resolve `id` to a live document. Missing and soft-deleted ids fail the same way.
pub fn get_or_not_found<T, S>(store: &S, id: &str, context: LookupContext) -> Result<T, StepifyError>
where
    T: Document,
    S: DocumentStore,
{
    match store.find_live_by_id::<T>(id)? {
        Some(doc) => Ok(doc),
        None => {
            let err = StepifyError::not_found(T::KIND, id, context);
            error!("{err}");
            Err(err)
        }
    }
}

/// Delete a live document: flag it `deleted` when the store supports soft
/// delete, remove it otherwise. Deleting twice fails `NotFound`.
pub fn soft_delete<T, S>(store: &S, id: &str) -> Result<(), StepifyError>
where
    T: Document,
    S: DocumentStore,
{
    get_or_not_found::<T, S>(store, id, LookupContext::Deleting)?;

    let changed = if store.soft_delete_supported() {
        store.patch_field(T::COLLECTION, id, "deleted", Value::Bool(true))?
    } else {
        store.remove(T::COLLECTION, id)?
    };

    // Lost a race with another delete between the lookup and the write.
    if changed == 0 {
        return Err(StepifyError::not_found(T::KIND, id, LookupContext::Deleting));
    }
    Ok(())
}
