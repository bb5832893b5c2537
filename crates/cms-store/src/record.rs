//! Persisted record trait

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// An entity that can be persisted in a [`RecordStore`](crate::RecordStore).
///
/// Records are stored in their `serde` form, one table per [`Record::KIND`].
/// Filters address the serialized field names, so a record's field names are
/// part of its storage contract.
///
/// # Examples
///
/// ```
/// use cms_store::Record;
/// use serde::{Deserialize, Serialize};
/// use uuid::Uuid;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Tag {
///     id: Uuid,
///     space_id: Uuid,
///     label: String,
/// }
///
/// impl Record for Tag {
///     const KIND: &'static str = "tag";
///
///     fn id(&self) -> Uuid {
///         self.id
///     }
///
///     fn unique_keys() -> &'static [&'static [&'static str]] {
///         &[&["space_id", "label"]]
///     }
/// }
///
/// assert_eq!(Tag::KIND, "tag");
/// ```
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Table name for this record type
    const KIND: &'static str;

    /// Primary key
    fn id(&self) -> Uuid;

    /// Field groups that must be unique across the table.
    ///
    /// Each inner slice is one composite key. Backends reject a create or
    /// update that would make two records agree on every field of a key.
    fn unique_keys() -> &'static [&'static [&'static str]] {
        &[]
    }
}
