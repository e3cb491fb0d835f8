// ── Schema checks ──
//
// Structural validation of decoded JSON before anything is materialized.
// A `Checker` is a small fixed vocabulary (scalars, nullable, lists, maps,
// field maps). Failures name the path to the offending value and what was
// expected versus found, e.g. `interface_set[0].vlan.vid: expected int, got string("0")`.

pub mod v2_0;

use std::fmt;

use serde_json::{Map, Value};

/// Shape failure at `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub path: String,
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "expected {}, got {}", self.expected, self.got)
        } else {
            write!(f, "{}: expected {}, got {}", self.path, self.expected, self.got)
        }
    }
}

impl std::error::Error for SchemaError {}

/// Render a JSON value the way schema errors report it.
pub fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "nothing".into(),
        Some(Value::Bool(b)) => format!("bool({b})"),
        Some(Value::Number(n)) if n.is_f64() => format!("float({n})"),
        Some(Value::Number(n)) => format!("int({n})"),
        Some(Value::String(s)) => format!("string({s:?})"),
        Some(Value::Array(_)) => "list".into(),
        Some(Value::Object(_)) => "map".into(),
    }
}

/// Integer value of a float with no fractional part, e.g. `1024.0`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::as_conversions,
    clippy::float_cmp
)]
pub(crate) fn integral_value(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9.2e18;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < LIMIT).then_some(f as i64)
}

// ── Checker ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub enum Checker {
    /// Anything, including null.
    Any,
    String,
    /// Integral JSON number. Floats without a fractional part count.
    Int,
    /// Any JSON number.
    Float,
    Bool,
    /// `null`, or a value satisfying the inner checker.
    Nullable(Box<Checker>),
    List(Box<Checker>),
    /// Object whose every value satisfies the inner checker.
    StringMap(Box<Checker>),
    Fields(FieldMap),
}

impl Checker {
    pub fn nullable(inner: Checker) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn list(inner: Checker) -> Self {
        Self::List(Box::new(inner))
    }

    pub fn string_map(inner: Checker) -> Self {
        Self::StringMap(Box::new(inner))
    }

    pub fn nullable_string() -> Self {
        Self::nullable(Self::String)
    }

    pub fn string_list() -> Self {
        Self::list(Self::String)
    }

    /// Validate `value`, reporting failures relative to the root.
    pub fn check(&self, value: &Value) -> Result<(), SchemaError> {
        self.check_at(Some(value), &mut String::new())
    }

    fn check_at(&self, value: Option<&Value>, path: &mut String) -> Result<(), SchemaError> {
        let fail = |expected: &'static str, path: &str| SchemaError {
            path: path.to_owned(),
            expected,
            got: describe(value),
        };

        match (self, value) {
            (Self::Any, _) => Ok(()),
            (Self::Nullable(_), None | Some(Value::Null)) => Ok(()),
            (Self::Nullable(inner), v) => inner.check_at(v, path),
            (Self::String, Some(Value::String(_))) | (Self::Bool, Some(Value::Bool(_))) => Ok(()),
            (Self::Int, Some(Value::Number(n)))
                if n.is_i64() || n.is_u64() || n.as_f64().and_then(integral_value).is_some() =>
            {
                Ok(())
            }
            (Self::Float, Some(Value::Number(_))) => Ok(()),
            (Self::List(inner), Some(Value::Array(items))) => {
                for (i, item) in items.iter().enumerate() {
                    let len = path.len();
                    path.push_str(&format!("[{i}]"));
                    inner.check_at(Some(item), path)?;
                    path.truncate(len);
                }
                Ok(())
            }
            (Self::StringMap(inner), Some(Value::Object(map))) => {
                for (key, item) in map {
                    let len = path.len();
                    push_key(path, key);
                    inner.check_at(Some(item), path)?;
                    path.truncate(len);
                }
                Ok(())
            }
            (Self::Fields(fields), Some(Value::Object(map))) => fields.check_map(map, path),
            (Self::String, _) => Err(fail("string", path)),
            (Self::Int, _) => Err(fail("int", path)),
            (Self::Float, _) => Err(fail("float", path)),
            (Self::Bool, _) => Err(fail("bool", path)),
            (Self::List(_), _) => Err(fail("list", path)),
            (Self::StringMap(_) | Self::Fields(_), _) => Err(fail("map", path)),
        }
    }
}

fn push_key(path: &mut String, key: &str) {
    if !path.is_empty() {
        path.push('.');
    }
    path.push_str(key);
}

// ── FieldMap ────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Field {
    name: &'static str,
    checker: Checker,
    required: bool,
}

/// Named fields of an object. Fields not listed are ignored.
///
/// A missing optional field passes; a present one must satisfy its checker.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: Vec<Field>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn required(mut self, name: &'static str, checker: Checker) -> Self {
        self.fields.push(Field {
            name,
            checker,
            required: true,
        });
        self
    }

    #[must_use]
    pub fn optional(mut self, name: &'static str, checker: Checker) -> Self {
        self.fields.push(Field {
            name,
            checker,
            required: false,
        });
        self
    }

    fn check_map(&self, map: &Map<String, Value>, path: &mut String) -> Result<(), SchemaError> {
        for field in &self.fields {
            let value = map.get(field.name);
            if value.is_none() && !field.required {
                continue;
            }
            let len = path.len();
            push_key(path, field.name);
            field.checker.check_at(value, path)?;
            path.truncate(len);
        }
        Ok(())
    }
}

impl From<FieldMap> for Checker {
    fn from(fields: FieldMap) -> Self {
        Self::Fields(fields)
    }
}
