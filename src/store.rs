//! Store - per-shape collections, surrogate IDs, and predicate filtering.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;

use crate::error::StoreError;
use crate::field;
use crate::predicate::Predicate;
use crate::record::Record;
use crate::snapshot;

/// Named attribute values for [`Store::update_attr`].
pub type AttrMap = HashMap<String, Value>;

/// Embedded, in-process, typed record store.
///
/// Records are partitioned by their [`Record::SHAPE`] name into ordered
/// collections; collections are created lazily on first write. Each stored
/// record carries a 1-based surrogate identifier assigned at [`set`] time,
/// which always equals its position in the collection (slot index `id - 1`).
///
/// One reader/writer lock guards the whole store: `set`, `update`, and
/// `update_attr` serialize against everything, `get`, `get_all`, and `count`
/// run concurrently with each other. Clone-friendly (cloning shares the same
/// underlying storage).
///
/// [`set`]: Store::set
///
/// ## Example
///
/// ```
/// use recbox::{Predicate, Record, Store};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// struct Player {
///     id: u64,
///     name: String,
/// }
///
/// impl Record for Player {
///     const SHAPE: &'static str = "players";
/// }
///
/// # fn main() -> Result<(), recbox::StoreError> {
/// let store = Store::new();
/// let mut player = Player { id: 0, name: "lee".into() };
/// store.set(&mut player)?;
/// assert_eq!(player.id, 1);
///
/// let found: Player = store.get(&[Predicate::field("id", Predicate::eq(1))])?;
/// assert_eq!(found, player);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Store {
    shapes: Arc<RwLock<HashMap<String, Vec<Value>>>>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Create a new empty store.
    pub fn new() -> Self {
        Store {
            shapes: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a snapshot of `record`, assigning its surrogate identifier.
    ///
    /// The next identifier is `collection length + 1` (1-based, never reused)
    /// and is stamped into the caller's record before the snapshot is taken,
    /// so the caller observes the assignment. A record type without the
    /// identifier field fails here with `FieldNotFound`.
    pub fn set<R: Record>(&self, record: &mut R) -> Result<(), StoreError> {
        let mut shapes = self
            .shapes
            .write()
            .map_err(|_| StoreError::LockPoisoned("set"))?;
        let id = shapes.get(R::SHAPE).map_or(0, Vec::len) as u64 + 1; // ids start from 1
        field::write_into(record, R::ID_FIELD, Value::from(id))?;
        let stored = snapshot::to_stored(record)?;
        shapes.entry(R::SHAPE.to_string()).or_default().push(stored);
        Ok(())
    }

    /// Copy out the first record (lowest identifier) matching all predicates.
    ///
    /// Fails with `NotFound` when nothing matches; callers wanting a unique
    /// result must supply predicates selective enough to pin one record.
    pub fn get<R: Record>(&self, predicates: &[Predicate]) -> Result<R, StoreError> {
        let shapes = self
            .shapes
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;
        let records = shapes.get(R::SHAPE).map(Vec::as_slice).unwrap_or(&[]);
        let chosen = filter(records, predicates)?;
        match chosen.first() {
            Some(first) => snapshot::from_stored(first),
            None => Err(StoreError::NotFound),
        }
    }

    /// Copy out every record matching all predicates, in collection order.
    ///
    /// Zero matches yields an empty vector, not an error.
    pub fn get_all<R: Record>(&self, predicates: &[Predicate]) -> Result<Vec<R>, StoreError> {
        let shapes = self
            .shapes
            .read()
            .map_err(|_| StoreError::LockPoisoned("get all"))?;
        let records = shapes.get(R::SHAPE).map(Vec::as_slice).unwrap_or(&[]);
        let chosen = filter(records, predicates)?;
        chosen.into_iter().map(snapshot::from_stored).collect()
    }

    /// Count the records matching all predicates, copying nothing.
    pub fn count<R: Record>(&self, predicates: &[Predicate]) -> Result<usize, StoreError> {
        let shapes = self
            .shapes
            .read()
            .map_err(|_| StoreError::LockPoisoned("count"))?;
        let records = shapes.get(R::SHAPE).map(Vec::as_slice).unwrap_or(&[]);
        Ok(filter(records, predicates)?.len())
    }

    /// Replace the single record matching all predicates with `record`.
    ///
    /// Fails with `NotFound` on zero matches and `UpdateMultiRecords` on more
    /// than one. The matched record's identifier is stamped onto `record`
    /// (overwriting whatever the caller set) before its snapshot replaces the
    /// stored one, so the identifier survives every update.
    pub fn update<R: Record>(
        &self,
        record: &mut R,
        predicates: &[Predicate],
    ) -> Result<(), StoreError> {
        let mut shapes = self
            .shapes
            .write()
            .map_err(|_| StoreError::LockPoisoned("update"))?;
        let collection = match shapes.get_mut(R::SHAPE) {
            Some(collection) => collection,
            None => return Err(StoreError::NotFound),
        };
        let id = {
            let chosen = filter(collection.as_slice(), predicates)?;
            single_match(&chosen)?;
            field::read_id(chosen[0], R::ID_FIELD)?
        };
        field::write_into(record, R::ID_FIELD, Value::from(id))?;
        collection[(id - 1) as usize] = snapshot::to_stored(record)?;
        Ok(())
    }

    /// Overwrite named fields on the single record matching all predicates.
    ///
    /// Same match resolution and errors as [`update`], but the starting point
    /// is the matched *stored* record: each entry in `attrs` overwrites the
    /// named field on a copy of it (`FieldNotFound` if the shape lacks the
    /// field), the original identifier is re-stamped, and the copy is checked
    /// against `R` before it replaces the stored record. The shape is
    /// resolved from the type parameter alone:
    ///
    /// ```ignore
    /// store.update_attr::<Player>(&attrs, &predicates)?;
    /// ```
    ///
    /// [`update`]: Store::update
    pub fn update_attr<R: Record>(
        &self,
        attrs: &AttrMap,
        predicates: &[Predicate],
    ) -> Result<(), StoreError> {
        let mut shapes = self
            .shapes
            .write()
            .map_err(|_| StoreError::LockPoisoned("update attr"))?;
        let collection = match shapes.get_mut(R::SHAPE) {
            Some(collection) => collection,
            None => return Err(StoreError::NotFound),
        };
        let (id, mut patched) = {
            let chosen = filter(collection.as_slice(), predicates)?;
            single_match(&chosen)?;
            let id = field::read_id(chosen[0], R::ID_FIELD)?;
            (id, chosen[0].clone())
        };
        for (name, value) in attrs {
            field::write(&mut patched, name, value.clone())?;
        }
        field::stamp_id(&mut patched, R::ID_FIELD, id)?;
        // The patched record must still conform to the shape; nothing is
        // written back otherwise.
        snapshot::from_stored::<R>(&patched)?;
        collection[(id - 1) as usize] = patched;
        Ok(())
    }
}

/// Narrow `records` to those satisfying every predicate (logical AND).
///
/// Each non-pass predicate runs as a full additional pass over the records
/// still selected; `pass` predicates are skipped. The whole call
/// short-circuits to an empty result the moment the candidate set empties,
/// and any evaluation error aborts immediately, wrapped as `Filter`.
fn filter<'a>(records: &'a [Value], predicates: &[Predicate]) -> Result<Vec<&'a Value>, StoreError> {
    let mut chosen_count = records.len();
    let mut unchosen = vec![false; records.len()];
    for predicate in predicates {
        if predicate.is_pass() {
            continue;
        }
        for (i, record) in records.iter().enumerate() {
            if unchosen[i] {
                continue;
            }
            let chosen = predicate
                .eval(record)
                .map_err(|e| StoreError::Filter(Box::new(e)))?;
            if !chosen {
                unchosen[i] = true;
                chosen_count -= 1;
                if chosen_count == 0 {
                    return Ok(Vec::new());
                }
            }
        }
    }
    Ok(records
        .iter()
        .zip(unchosen)
        .filter(|(_, unchosen)| !unchosen)
        .map(|(record, _)| record)
        .collect())
}

fn single_match(chosen: &[&Value]) -> Result<(), StoreError> {
    match chosen.len() {
        0 => Err(StoreError::NotFound),
        1 => Ok(()),
        _ => Err(StoreError::UpdateMultiRecords),
    }
}
