//! Predicate - boolean tests over one record.
//!
//! A predicate is evaluated against one stored record at a time and answers
//! "is this record selected?", or fails with an error. Store operations apply
//! predicates with AND semantics; see [`Store`](crate::Store).

use serde::Serialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::field;

type CustomFn = dyn Fn(&Value) -> Result<bool, StoreError> + Send + Sync;

/// A boolean test over one record, possibly failing with an error.
///
/// Built from the reference combinators ([`eq`], [`one_of`], [`field`]) or a
/// custom function ([`test`]). The absent predicate is a first-class value:
/// [`Predicate::pass`] selects everything and is skipped entirely during
/// filtering, so conditional filter chains degrade gracefully when a
/// sub-filter is intentionally omitted.
///
/// [`eq`]: Predicate::eq
/// [`one_of`]: Predicate::one_of
/// [`field`]: Predicate::field
/// [`test`]: Predicate::test
pub struct Predicate(Test);

enum Test {
    Pass,
    Eq(Value),
    In(Vec<Value>),
    Field(String, Box<Predicate>),
    Custom(Box<CustomFn>),
    /// A capture value that could not be serialized. The failure is reported
    /// at evaluation time, never as a panic.
    Invalid(String),
}

impl Predicate {
    /// The absent predicate: selects every record.
    pub fn pass() -> Predicate {
        Predicate(Test::Pass)
    }

    /// Selects records equal to the captured value.
    pub fn eq<V: Serialize>(value: V) -> Predicate {
        match serde_json::to_value(value) {
            Ok(value) => Predicate(Test::Eq(value)),
            Err(e) => Predicate(Test::Invalid(e.to_string())),
        }
    }

    /// Selects records equal to any of the captured candidates, tested in
    /// list order with short-circuit on first match.
    pub fn one_of<V, I>(values: I) -> Predicate
    where
        V: Serialize,
        I: IntoIterator<Item = V>,
    {
        let mut candidates = Vec::new();
        for value in values {
            match serde_json::to_value(value) {
                Ok(value) => candidates.push(value),
                Err(e) => return Predicate(Test::Invalid(e.to_string())),
            }
        }
        Predicate(Test::In(candidates))
    }

    /// Scopes `inner` to the named field: reads the field off the record
    /// (failing if absent), then delegates the extracted value to `inner`.
    ///
    /// Composing over [`Predicate::pass`] yields `pass` again rather than an
    /// adapter that reads a field for nothing.
    pub fn field(name: impl Into<String>, inner: Predicate) -> Predicate {
        if inner.is_pass() {
            return Predicate::pass();
        }
        Predicate(Test::Field(name.into(), Box::new(inner)))
    }

    /// A custom predicate conforming to the `(record) -> (bool, error)` contract.
    pub fn test<F>(f: F) -> Predicate
    where
        F: Fn(&Value) -> Result<bool, StoreError> + Send + Sync + 'static,
    {
        Predicate(Test::Custom(Box::new(f)))
    }

    /// Whether this is the absent predicate.
    pub fn is_pass(&self) -> bool {
        matches!(self.0, Test::Pass)
    }

    /// Evaluate against one record.
    pub fn eval(&self, record: &Value) -> Result<bool, StoreError> {
        match &self.0 {
            Test::Pass => Ok(true),
            Test::Eq(expected) => Ok(record == expected),
            Test::In(candidates) => Ok(candidates.iter().any(|c| c == record)),
            Test::Field(name, inner) => {
                let extracted = field::read(record, name)?;
                inner.eval(&extracted)
            }
            Test::Custom(f) => f(record),
            Test::Invalid(msg) => Err(StoreError::UnexpectedType(msg.clone())),
        }
    }
}
