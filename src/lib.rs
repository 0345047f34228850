//! recbox - embedded, in-process, typed record store.
//!
//! Callers register record shapes by implementing [`Record`]; the store
//! partitions records by shape name, assigns 1-based surrogate identifiers,
//! and supports filtered reads ([`Store::get`], [`Store::get_all`]), counting
//! ([`Store::count`]), full-record update ([`Store::update`]), and partial
//! attribute update ([`Store::update_attr`]). Filters are built from the
//! [`Predicate`] combinators or custom `(record) -> (bool, error)` functions.
//!
//! Nothing persists beyond the process: no files, no wire format, no CLI.
//! There is no delete and no indexing; filtering is a linear scan.

mod error;
pub mod field;
mod predicate;
mod record;
mod snapshot;
mod store;

pub use error::StoreError;
pub use predicate::Predicate;
pub use record::Record;
pub use store::{AttrMap, Store};
