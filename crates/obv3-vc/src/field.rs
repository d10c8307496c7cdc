//! # Field Tables
//!
//! Every entity describes its JSON-LD fields once, as a static slice of
//! [`FieldSpec`]. The same table drives both construction from a raw mapping
//! (`JsonLd::from_json_ld`) and validation of a raw mapping, so the two
//! cannot disagree about what a valid document is.
//!
//! Checks never stop at the first problem. Each returns all messages for its
//! field, prefixed with the field's path (`issuer.name`, `evidence[1].id`).
//!
//! `null` is treated as absent. Fields not named in a table are ignored.

use obv3_core::{Email, Timestamp, Uri};
use serde_json::Value;

use crate::jsonld::JsonLd;

/// Check a present, non-null field value. Returns path-prefixed messages.
pub type FieldCheck = fn(&Value, &str) -> Vec<String>;

/// One row of an entity's field table.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub check: FieldCheck,
}

impl FieldSpec {
    pub const fn required(name: &'static str, check: FieldCheck) -> Self {
        Self {
            name,
            required: true,
            check,
        }
    }

    pub const fn optional(name: &'static str, check: FieldCheck) -> Self {
        Self {
            name,
            required: false,
            check,
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Join a parent path and a field name. The root path is `""`.
pub fn join_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

fn at(path: &str, message: impl std::fmt::Display) -> String {
    if path.is_empty() {
        message.to_string()
    } else {
        format!("{path}: {message}")
    }
}

/// Run a field table against a mapping rooted at `path`.
pub fn check_fields(fields: &[FieldSpec], value: &Value, path: &str) -> Vec<String> {
    let Some(map) = value.as_object() else {
        return vec![at(path, format!("expected a JSON object, found {}", kind(value)))];
    };
    let mut errors = Vec::new();
    for spec in fields {
        let field_path = join_path(path, spec.name);
        match map.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    errors.push(at(&field_path, "required field is missing"));
                }
            }
            Some(v) => errors.extend((spec.check)(v, &field_path)),
        }
    }
    errors
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Scalar checks
// ---------------------------------------------------------------------------

pub fn check_string(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(_) => Vec::new(),
        other => vec![at(path, format!("expected a string, found {}", kind(other)))],
    }
}

pub fn check_non_empty_string(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => vec![at(path, "must not be empty")],
        Value::String(_) => Vec::new(),
        other => vec![at(path, format!("expected a string, found {}", kind(other)))],
    }
}

pub fn check_uri(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(s) => match Uri::new(s.as_str()) {
            Ok(_) => Vec::new(),
            Err(e) => vec![at(path, e)],
        },
        other => vec![at(path, format!("expected a URI string, found {}", kind(other)))],
    }
}

pub fn check_email(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(s) => match Email::new(s.as_str()) {
            Ok(_) => Vec::new(),
            Err(e) => vec![at(path, e)],
        },
        other => vec![at(path, format!("expected an email string, found {}", kind(other)))],
    }
}

pub fn check_timestamp(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(s) => match Timestamp::parse(s) {
            Ok(_) => Vec::new(),
            Err(e) => vec![at(path, e)],
        },
        other => vec![at(path, format!("expected an ISO 8601 string, found {}", kind(other)))],
    }
}

pub fn check_u32(value: &Value, path: &str) -> Vec<String> {
    match value.as_u64() {
        Some(n) if n <= u64::from(u32::MAX) => Vec::new(),
        _ => vec![at(path, "expected a non-negative integer")],
    }
}

pub fn check_bool(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::Bool(_) => Vec::new(),
        other => vec![at(path, format!("expected a boolean, found {}", kind(other)))],
    }
}

pub fn check_object(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::Object(_) => Vec::new(),
        other => vec![at(path, format!("expected an object, found {}", kind(other)))],
    }
}

pub fn check_string_list(value: &Value, path: &str) -> Vec<String> {
    let Value::Array(items) = value else {
        return vec![at(path, format!("expected an array of strings, found {}", kind(value)))];
    };
    items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| check_string(item, &format!("{path}[{i}]")))
        .collect()
}

/// `type` as a single string or an array of strings.
pub fn type_values(value: &Value) -> Option<Vec<&str>> {
    match value {
        Value::String(s) => Some(vec![s.as_str()]),
        Value::Array(items) => items.iter().map(Value::as_str).collect(),
        _ => None,
    }
}

/// `type` must contain every literal in `T::REQUIRED_TYPES`.
pub fn check_type<T: JsonLd>(value: &Value, path: &str) -> Vec<String> {
    let Some(types) = type_values(value) else {
        return vec![at(path, "expected a string or an array of strings")];
    };
    T::REQUIRED_TYPES
        .iter()
        .filter(|required| !types.contains(*required))
        .map(|required| at(path, format!("must include \"{required}\"")))
        .collect()
}

// ---------------------------------------------------------------------------
// Nested entity checks
// ---------------------------------------------------------------------------

/// An embedded entity, checked against its own table.
pub fn check_entity<T: JsonLd>(value: &Value, path: &str) -> Vec<String> {
    check_fields(T::FIELDS, value, path)
}

/// An entity-or-reference field: a URI string or an embedded object.
pub fn check_entity_ref<T: JsonLd>(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::String(_) => check_uri(value, path),
        Value::Object(_) => check_entity::<T>(value, path),
        other => vec![at(
            path,
            format!(
                "expected an embedded {} object or a URI reference, found {}",
                T::ENTITY,
                kind(other)
            ),
        )],
    }
}

/// An ordered array of embedded entities.
pub fn check_entity_list<T: JsonLd>(value: &Value, path: &str) -> Vec<String> {
    let Value::Array(items) = value else {
        return vec![at(
            path,
            format!("expected an array of {} objects, found {}", T::ENTITY, kind(value)),
        )];
    };
    items
        .iter()
        .enumerate()
        .flat_map(|(i, item)| check_entity::<T>(item, &format!("{path}[{i}]")))
        .collect()
}
