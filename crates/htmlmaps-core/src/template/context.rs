//! View context: the data a render call looks values up in

use crate::map::Frame;
use crate::template::error::TemplateError;
use serde_json::Value;
use std::sync::Arc;

/// Data bindings for a render call
///
/// Wraps a JSON value (normally a mapping) plus a chain of loop bindings.
/// [`TemplateContext::with_binding`] extends the chain without touching the
/// original, so sibling loop iterations never observe each other's bindings.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    data: Arc<Value>,
    scope: Option<Arc<Binding>>,
}

#[derive(Debug)]
struct Binding {
    name: String,
    value: Value,
    parent: Option<Arc<Binding>>,
}

/// A dotted path stopped resolving at `segment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    /// Index of the first unresolved segment
    pub index: usize,
    /// That segment's name
    pub segment: String,
}

impl TemplateContext {
    /// Create a context from a JSON value
    pub fn new(data: Value) -> Self {
        Self {
            data: Arc::new(data),
            scope: None,
        }
    }

    /// Context with no values at all
    pub fn empty() -> Self {
        Self::new(Value::Object(serde_json::Map::new()))
    }

    /// Get the underlying data (without loop bindings)
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// A copy of this context with `name` bound to `value`
    pub fn with_binding(&self, name: impl Into<String>, value: Value) -> Self {
        Self {
            data: Arc::clone(&self.data),
            scope: Some(Arc::new(Binding {
                name: name.into(),
                value,
                parent: self.scope.clone(),
            })),
        }
    }

    /// Top-level name lookup; loop bindings shadow the data, innermost first
    pub fn get(&self, name: &str) -> Option<&Value> {
        let mut scope = self.scope.as_deref();
        while let Some(binding) = scope {
            if binding.name == name {
                return Some(&binding.value);
            }
            scope = binding.parent.as_deref();
        }
        match &*self.data {
            Value::Object(map) => map.get(name),
            _ => None,
        }
    }

    /// Resolve a dotted path
    ///
    /// Fails at the first segment that is absent, `null`, or reached through
    /// a value that is not a mapping.
    pub fn lookup(&self, path: &[String]) -> Result<&Value, LookupError> {
        let missing = |index: usize| LookupError {
            index,
            segment: path.get(index).cloned().unwrap_or_default(),
        };

        let (first, rest) = path.split_first().ok_or_else(|| missing(0))?;
        let mut current = self.get(first).ok_or_else(|| missing(0))?;

        for (offset, part) in rest.iter().enumerate() {
            current = match current {
                Value::Object(map) => map.get(part.as_str()),
                _ => None,
            }
            .ok_or_else(|| missing(offset + 1))?;
        }

        if current.is_null() {
            return Err(missing(path.len() - 1));
        }
        Ok(current)
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Value> for TemplateContext {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

/// Join a parsed path back into its dotted form
pub(crate) fn dotted(path: &[String]) -> String {
    path.join(".")
}

/// Human-readable kind of a value, for error messages
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

/// Stringify a value for placeholder output
pub(crate) fn stringify_value(
    value: &Value,
    path: &[String],
    at: &Frame,
) -> Result<String, TemplateError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Array(_) => Err(TemplateError::SequenceInPlaceholder {
            path: dotted(path),
            at: at.clone(),
        }),
        Value::Object(_) => Err(TemplateError::MappingInPlaceholder {
            path: dotted(path),
            at: at.clone(),
        }),
    }
}
