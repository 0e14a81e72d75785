//! Unstructured manifest objects
//!
//! A [`ManifestObject`] is a Kubernetes object kept as a JSON mapping so that
//! rendered manifests of any kind can flow through the same apply path. The
//! identity (`kind`, `namespace`, `name`) is read from the standard fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApplyError;

/// Identity of an object within a rendered manifest set
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
    pub kind: String,
    /// Empty for cluster-scoped objects
    pub namespace: String,
    pub name: String,
}

impl ObjectId {
    pub fn new(kind: impl Into<String>, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "({}) {}", self.kind, self.name)
        } else {
            write!(f, "({}) {}/{}", self.kind, self.namespace, self.name)
        }
    }
}

/// A Kubernetes object with an opaque body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestObject {
    object: Map<String, Value>,
}

impl ManifestObject {
    /// Wraps a JSON value, which must be a mapping
    pub fn from_value(value: Value) -> Result<Self, ApplyError> {
        match value {
            Value::Object(object) => Ok(Self { object }),
            other => Err(ApplyError::NotAnObject(type_name(&other))),
        }
    }

    pub fn api_version(&self) -> &str {
        self.nested_str(&["apiVersion"]).unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.nested_str(&["kind"]).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.nested_str(&["metadata", "name"]).unwrap_or_default()
    }

    /// Namespace, or "" for cluster-scoped objects
    pub fn namespace(&self) -> &str {
        self.nested_str(&["metadata", "namespace"]).unwrap_or_default()
    }

    pub fn id(&self) -> ObjectId {
        ObjectId::new(self.kind(), self.namespace(), self.name())
    }

    /// Looks up a value by walking nested mappings
    pub fn nested(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.object.get(*first)?, |value, key| value.as_object()?.get(*key))
    }

    pub fn nested_str(&self, path: &[&str]) -> Option<&str> {
        self.nested(path)?.as_str()
    }

    /// A mapping of strings, e.g. labels or a node selector.
    /// Non-string values make the whole lookup fail.
    pub fn nested_string_map(&self, path: &[&str]) -> Option<BTreeMap<String, String>> {
        self.nested(path)?
            .as_object()?
            .iter()
            .map(|(k, v)| Some((k.clone(), v.as_str()?.to_string())))
            .collect()
    }

    /// Sets a value, creating intermediate mappings as needed.
    /// Intermediate non-mapping values are replaced.
    pub fn set_nested(&mut self, path: &[&str], value: Value) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut current = &mut self.object;
        for key in parents {
            let entry = current
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.to_string(), value);
    }

    /// Removes a value, returning it if it was present
    pub fn remove_nested(&mut self, path: &[&str]) -> Option<Value> {
        let (last, parents) = path.split_last()?;
        let mut current = &mut self.object;
        for key in parents {
            current = current.get_mut(*key)?.as_object_mut()?;
        }
        current.remove(*last)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.object
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.object)
    }

    /// Serializes the object as a single YAML document
    pub fn to_yaml(&self) -> Result<String, ApplyError> {
        Ok(serde_yaml::to_string(&self.object)?)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
