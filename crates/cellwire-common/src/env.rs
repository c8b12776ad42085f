use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Value;

/// A snapshot of the name bindings visible to a cell during evaluation.
///
/// Environments move through the resolver as values: a node's resolved
/// environment is cloned out of the request cache, merged into an
/// accumulator, handed to the execution host, and the updated snapshot is
/// cached. Nothing mutates a cached environment in place.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: FxHashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Copy every binding from `other` into `self`, overwriting bindings that
    /// are already present. This is the whole conflict policy of the merge
    /// step: callers control precedence by the order they call this in.
    pub fn merge_from(&mut self, other: &Environment) {
        for (name, value) in &other.bindings {
            self.bindings.insert(name.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (&'a str, Value)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }
}
