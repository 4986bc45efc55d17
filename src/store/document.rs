//! The contract an entity type fulfils to live in a [`DocumentStore`].
//!
//! [`DocumentStore`]: super::DocumentStore

use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

/// An entity kind managed by a document store.
///
/// The store assigns the identifier at creation time and treats it as
/// immutable afterwards; `set_id` exists so the store can restore it after a
/// closure-based mutation.
pub trait Document:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Create payload, validated by the store before an entity is built.
    type Create: Validate + Send;
    /// Partial update payload, merged over the existing entity.
    type Update: Validate + Send;

    /// Collection name, used in `NotFound` errors and log fields.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Build a full entity from a validated create payload.
    fn from_create(id: String, create: Self::Create) -> Self;

    /// Merge a partial update into this entity. Must never touch the id.
    fn merge(&mut self, update: Self::Update);
}
