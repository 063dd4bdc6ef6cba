//! A single normalized query result row.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One query result row with nested fields rebuilt from dotted column paths.
///
/// Values are kept exactly as supplied by the upstream API, except that the
/// strings `"true"` and `"false"` become booleans. Numeric coercion happens in
/// the accessors, so every consumer reads numbers the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedRow(Map<String, Value>);

impl NormalizedRow {
    /// Create an empty row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object
    #[must_use]
    pub const fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Borrow the underlying nested object
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Assign `value` at a dotted `path`, creating intermediate objects.
    ///
    /// An intermediate segment that currently holds a scalar is replaced by
    /// an object, so later columns win.
    pub fn insert_path(&mut self, path: &str, value: Value) {
        let mut segments = path.split('.').peekable();
        let mut current = &mut self.0;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                current.insert(segment.to_string(), value);
                return;
            }
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => return,
            };
        }
    }

    /// Look up the raw value at a dotted path
    #[must_use]
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.0.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// String value at a path (numbers and booleans are not stringified)
    #[must_use]
    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.value_at(path).and_then(Value::as_str)
    }

    /// Numeric value at a path, accepting JSON numbers and numeric strings
    #[must_use]
    pub fn f64_at(&self, path: &str) -> Option<f64> {
        match self.value_at(path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Numeric value at a path, defaulting to zero
    #[must_use]
    pub fn f64_or_zero(&self, path: &str) -> f64 {
        self.f64_at(path).unwrap_or(0.0)
    }

    /// Boolean value at a path
    #[must_use]
    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.value_at(path).and_then(Value::as_bool)
    }

    /// Value at a path rendered as an identifier string (strings or numbers)
    #[must_use]
    pub fn id_at(&self, path: &str) -> Option<String> {
        match self.value_at(path)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Micro-currency amount at a path converted to currency units
    #[must_use]
    pub fn micros_at(&self, path: &str) -> f64 {
        self.f64_or_zero(path) / MICROS_PER_UNIT
    }

    /// Whether the string at `path` equals `expected` (ASCII case-insensitive)
    #[must_use]
    pub fn is(&self, path: &str, expected: &str) -> bool {
        self.str_at(path)
            .is_some_and(|s| s.eq_ignore_ascii_case(expected))
    }
}

/// Micro-currency units per currency unit
pub const MICROS_PER_UNIT: f64 = 1_000_000.0;
