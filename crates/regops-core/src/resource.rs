//! # The Resource Seam
//!
//! [`Resource`] is the one trait the generic layers share. The REST client
//! derives endpoint paths from it, the store derives its persistence key
//! from it, and both manipulate records purely through identity and
//! lifecycle — domain attributes never leak below the domain crate.

use serde::{de::DeserializeOwned, Serialize};

use crate::identity::RecordId;
use crate::lifecycle::Lifecycle;

/// One REST-backed, soft-deletable record type.
///
/// Implementations are plain data: a record id, a tenant id, the
/// [`Lifecycle`] envelope, and whatever domain attributes the module
/// defines. The associated `Create` type carries only the client-settable
/// fields accepted by the create endpoint; everything else (id, tenant,
/// stamps, derived fields) is stamped server-side.
pub trait Resource:
    Clone + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// GRC module path segment, e.g. `risk`.
    const MODULE: &'static str;

    /// Resource path segment under the module, e.g. `risks`.
    const RESOURCE: &'static str;

    /// Client-settable payload accepted by the create endpoint.
    type Create: Serialize + Send + Sync;

    /// The record's unique id within its tenant.
    fn record_id(&self) -> RecordId;

    /// The shared lifecycle envelope.
    fn lifecycle(&self) -> &Lifecycle;

    /// Mutable access to the lifecycle envelope. Used by the store when a
    /// backend answers a delete/restore with a bare success and the local
    /// copy must be moved between collections.
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Collection path relative to the API root: `api/<module>/<resource>`.
    fn resource_path() -> String {
        format!("api/{}/{}", Self::MODULE, Self::RESOURCE)
    }

    /// Fixed key under which this resource's client state persists locally,
    /// one key per domain.
    fn storage_key() -> String {
        format!("{}-{}-storage", Self::MODULE, Self::RESOURCE)
    }
}
