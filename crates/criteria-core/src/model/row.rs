use crate::value::Value;
use std::collections::{BTreeMap, HashMap};

///
/// FieldPresence
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence {
    Present(Value),
    Missing,
}

///
/// Row
/// Record accessor used by the evaluator.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence;
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> FieldPresence {
        match self.get(name) {
            Some(value) => FieldPresence::Present(value.clone()),
            None => FieldPresence::Missing,
        }
    }
}

impl<S: std::hash::BuildHasher> Row for HashMap<String, Value, S> {
    fn field(&self, name: &str) -> FieldPresence {
        match self.get(name) {
            Some(value) => FieldPresence::Present(value.clone()),
            None => FieldPresence::Missing,
        }
    }
}
