//! # Validation Engine
//!
//! Validates a typed entity or a raw JSON-LD mapping and reports the full
//! picture instead of failing on the first problem:
//!
//! 1. **Structural**: the entity's field table (required fields, JSON
//!    types, URI / email / timestamp formats, mandated `type` literals).
//! 2. **Semantic**: cross-field rules such as date ordering, recognized
//!    schema validators and non-empty proof values. Only run when the
//!    structure is sound.
//! 3. **Warnings**: advisory findings that never affect `is_valid`, such as
//!    a missing `@context` or plain `http://` identifiers.
//!
//! Signatures are not checked here; see [`Signable::is_valid`](crate::Signable::is_valid).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::achievement::Achievement;
use crate::credential::OpenBadgeCredential;
use crate::endorsement::EndorsementCredential;
use crate::field::join_path;
use crate::jsonld::JsonLd;
use crate::profile::Profile;

/// Keys whose string values are checked for plain `http://`.
const URL_KEYS: &[&str] = &["id", "url", "targetUrl"];

/// The verdict and every message behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Fold another result into this one.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
        self
    }
}

/// What to validate: an already-typed entity or raw input.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a, T> {
    Typed(&'a T),
    Raw(&'a Value),
}

impl<'a, T> From<&'a Value> for Candidate<'a, T> {
    fn from(value: &'a Value) -> Self {
        Self::Raw(value)
    }
}

macro_rules! impl_typed_candidate {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for Candidate<'a, $ty> {
                fn from(entity: &'a $ty) -> Self {
                    Self::Typed(entity)
                }
            }
        )*
    };
}

impl_typed_candidate!(Profile, Achievement, OpenBadgeCredential, EndorsementCredential);

/// Validate `candidate` as a `T`.
pub fn validate<'a, T: JsonLd + 'a>(candidate: impl Into<Candidate<'a, T>>) -> ValidationResult {
    match candidate.into() {
        Candidate::Typed(entity) => validate_typed(entity),
        Candidate::Raw(value) => validate_raw::<T>(value),
    }
}

fn validate_typed<T: JsonLd>(entity: &T) -> ValidationResult {
    let doc = match entity.to_json_ld() {
        Ok(doc) => doc,
        Err(e) => return ValidationResult::from_errors(e.messages(), Vec::new()),
    };
    let errors = T::structural_errors(&doc);
    let mut warnings = insecure_url_warnings(&doc, "");
    if !errors.is_empty() {
        return ValidationResult::from_errors(errors, warnings);
    }
    warnings.extend(entity.warnings());
    ValidationResult::from_errors(entity.semantic_errors(), warnings)
}

fn validate_raw<T: JsonLd>(value: &Value) -> ValidationResult {
    let mut warnings = context_warnings::<T>(value);
    warnings.extend(insecure_url_warnings(value, ""));
    match T::from_json_ld(value) {
        Ok(entity) => {
            warnings.extend(entity.warnings());
            ValidationResult::from_errors(entity.semantic_errors(), warnings)
        }
        Err(e) => ValidationResult::from_errors(e.messages(), warnings),
    }
}

pub fn validate_profile<'a>(candidate: impl Into<Candidate<'a, Profile>>) -> ValidationResult {
    validate::<Profile>(candidate)
}

pub fn validate_achievement<'a>(
    candidate: impl Into<Candidate<'a, Achievement>>,
) -> ValidationResult {
    validate::<Achievement>(candidate)
}

pub fn validate_credential<'a>(
    candidate: impl Into<Candidate<'a, OpenBadgeCredential>>,
) -> ValidationResult {
    validate::<OpenBadgeCredential>(candidate)
}

pub fn validate_endorsement<'a>(
    candidate: impl Into<Candidate<'a, EndorsementCredential>>,
) -> ValidationResult {
    validate::<EndorsementCredential>(candidate)
}

/// `@context` must be present and name every context `T` is written with.
fn context_warnings<T: JsonLd>(value: &Value) -> Vec<String> {
    let Some(context) = value.get("@context") else {
        return vec!["@context: missing".to_string()];
    };
    let present: Vec<&str> = match context {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    };
    T::CONTEXT
        .uris()
        .iter()
        .filter(|uri| !present.contains(uri))
        .map(|uri| format!("@context: does not include \"{uri}\""))
        .collect()
}

/// Every `id` / `url` value that uses plain `http://`, at any depth.
fn insecure_url_warnings(value: &Value, path: &str) -> Vec<String> {
    match value {
        Value::Object(map) => map
            .iter()
            .flat_map(|(key, child)| {
                let child_path = join_path(path, key);
                match child {
                    Value::String(s)
                        if URL_KEYS.contains(&key.as_str()) && s.starts_with("http://") =>
                    {
                        vec![format!("{child_path}: uses insecure http:// URL")]
                    }
                    _ => insecure_url_warnings(child, &child_path),
                }
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .flat_map(|(i, item)| insecure_url_warnings(item, &format!("{path}[{i}]")))
            .collect(),
        _ => Vec::new(),
    }
}
