//! Record - The trait a type implements to be storable.

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be stored as records.
///
/// A record kind registers itself with the store by declaring a shape name;
/// the store partitions its collections by that name, so two structurally
/// different types must not share one. Every record must serialize to a JSON
/// object carrying an unsigned integer identifier field (key [`ID_FIELD`]).
/// The identifier is assigned by the store on [`set`] and is 1-based; the
/// value the caller puts there is overwritten.
///
/// The identifier field is an unenforced structural contract: a type without
/// it fails at the point the store first reads or assigns it, not before.
///
/// [`ID_FIELD`]: Record::ID_FIELD
/// [`set`]: crate::Store::set
///
/// ## Example
///
/// ```
/// use recbox::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Player {
///     id: u64,
///     name: String,
/// }
///
/// impl Record for Player {
///     const SHAPE: &'static str = "players";
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The shape name for this record kind (e.g., "players", "game_views").
    /// The sole partition key: one collection per shape name.
    const SHAPE: &'static str;

    /// Serialized key of the surrogate identifier field.
    const ID_FIELD: &'static str = "id";
}
