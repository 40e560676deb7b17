//! # Shallow-Merge Patching
//!
//! Update semantics for domain records: a patch is a JSON object whose
//! top-level keys replace the record's top-level keys, last write wins.
//! There is no deep merge and no key removal — a key absent from the patch
//! stays untouched, a key present replaces wholesale (including `null`,
//! which clears optional fields).
//!
//! [`apply_to_record`] projects the merged document back into the typed
//! record. Patch keys the record type does not carry are dropped in that
//! projection; the record id is immutable.

use serde_json::Value;

use crate::error::PatchError;
use crate::resource::Resource;

/// Merge `patch` into `target`, top-level keys only.
///
/// # Errors
///
/// Returns [`PatchError::NotAnObject`] unless both documents are JSON
/// objects.
pub fn shallow_merge(target: &mut Value, patch: &Value) -> Result<(), PatchError> {
    let patch_map = patch.as_object().ok_or(PatchError::NotAnObject)?;
    let target_map = target.as_object_mut().ok_or(PatchError::NotAnObject)?;

    for (key, value) in patch_map {
        target_map.insert(key.clone(), value.clone());
    }
    Ok(())
}

/// Apply a shallow-merge patch to a typed record, returning the patched
/// record and leaving the original untouched.
///
/// # Errors
///
/// - [`PatchError::NotAnObject`] if the patch is not a JSON object.
/// - [`PatchError::IdImmutable`] if the patch carries an `id` differing
///   from the record's.
/// - [`PatchError::Codec`] if the merged document no longer deserializes
///   as `R` (for example, a string patched over a numeric field).
pub fn apply_to_record<R: Resource>(record: &R, patch: &Value) -> Result<R, PatchError> {
    let patch_map = patch.as_object().ok_or(PatchError::NotAnObject)?;

    let mut doc = serde_json::to_value(record)?;
    if let Some(patched_id) = patch_map.get("id") {
        if doc.get("id") != Some(patched_id) {
            return Err(PatchError::IdImmutable);
        }
    }

    shallow_merge(&mut doc, patch)?;
    serde_json::from_value(doc).map_err(PatchError::Codec)
}
