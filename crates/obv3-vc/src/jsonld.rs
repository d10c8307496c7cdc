//! # JSON-LD Conversion
//!
//! [`JsonLd`] ties an entity's serde representation to its field table.
//!
//! - `to_json_ld()` emits `@context` first, then the entity's fields in
//!   model order. Absent optional fields are omitted, never `null`.
//!   `type` is always an array.
//! - `from_json_ld()` runs the field table over the raw mapping, collects
//!   every error, and only then deserializes. `@context` is ignored on
//!   input since it is synthesized on output.
//!
//! For any valid entity `x`, `from_json_ld(&x.to_json_ld()?)? == x`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use obv3_core::Uri;

use crate::achievement::Achievement;
use crate::credential::OpenBadgeCredential;
use crate::endorsement::EndorsementCredential;
use crate::error::VcError;
use crate::field::{check_fields, FieldSpec};
use crate::profile::Profile;

/// W3C Verifiable Credentials Data Model v1 context.
pub const VC_CONTEXT_V1: &str = "https://www.w3.org/2018/credentials/v1";

/// OpenBadges v3 context.
pub const OB_CONTEXT_V3: &str = "https://w3id.org/openbadges/v3";

/// Fields whose content is free-form and passed through untouched.
const FREE_FORM_FIELDS: &[&str] = &["publicKey"];

/// Which `@context` an entity carries at the top of its document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextKind {
    /// `[VC v1, OB v3]`
    Credential,
    /// `OB v3`
    Entity,
}

impl ContextKind {
    pub fn uris(&self) -> &'static [&'static str] {
        match self {
            Self::Credential => &[VC_CONTEXT_V1, OB_CONTEXT_V3],
            Self::Entity => &[OB_CONTEXT_V3],
        }
    }

    pub fn value(&self) -> Value {
        match self {
            Self::Credential => Value::Array(
                self.uris()
                    .iter()
                    .map(|uri| Value::String((*uri).to_string()))
                    .collect(),
            ),
            Self::Entity => Value::String(OB_CONTEXT_V3.to_string()),
        }
    }
}

/// A badge entity with a JSON-LD form and a field table.
pub trait JsonLd: Serialize + DeserializeOwned + Clone + PartialEq {
    /// Entity name used in error messages.
    const ENTITY: &'static str;
    /// Literals that `type` must contain.
    const REQUIRED_TYPES: &'static [&'static str];
    /// The field table shared by construction and validation.
    const FIELDS: &'static [FieldSpec];
    const CONTEXT: ContextKind = ContextKind::Entity;

    /// The entity's own identifier, when it has one.
    fn entity_id(&self) -> Option<&Uri>;

    /// Cross-field rules checked after structural validation passes.
    fn semantic_errors(&self) -> Vec<String> {
        Vec::new()
    }

    /// Advisory findings. Never affect validity.
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Every structural error in a raw mapping, path-prefixed.
    fn structural_errors(value: &Value) -> Vec<String> {
        check_fields(Self::FIELDS, value, "")
    }

    fn to_json_ld(&self) -> Result<Value, VcError> {
        let body = serde_json::to_value(self)?;
        let Value::Object(fields) = body else {
            return Ok(body);
        };
        let mut doc = Map::with_capacity(fields.len() + 1);
        doc.insert("@context".to_string(), Self::CONTEXT.value());
        doc.extend(fields);
        Ok(Value::Object(doc))
    }

    /// Build an entity from a raw mapping.
    ///
    /// # Errors
    ///
    /// `VcError::Structural` listing every missing or malformed field.
    fn from_json_ld(value: &Value) -> Result<Self, VcError> {
        let errors = Self::structural_errors(value);
        if !errors.is_empty() {
            return Err(VcError::Structural {
                entity: Self::ENTITY,
                errors,
            });
        }
        let mut body = without_nulls(value.clone());
        if let Some(map) = body.as_object_mut() {
            map.remove("@context");
        }
        serde_json::from_value(body).map_err(|e| VcError::Structural {
            entity: Self::ENTITY,
            errors: vec![e.to_string()],
        })
    }

    /// A validated copy with one top-level field replaced. `Value::Null`
    /// removes the field.
    fn with_field(&self, name: &str, value: Value) -> Result<Self, VcError> {
        let mut doc = self.to_json_ld()?;
        if let Some(map) = doc.as_object_mut() {
            if value.is_null() {
                map.remove(name);
            } else {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_json_ld(&doc)
    }

    /// Structural then semantic checks on a typed instance.
    ///
    /// # Errors
    ///
    /// `VcError::Structural` or `VcError::Semantic` with all messages.
    fn ensure_valid(&self) -> Result<(), VcError> {
        let errors = Self::structural_errors(&self.to_json_ld()?);
        if !errors.is_empty() {
            return Err(VcError::Structural {
                entity: Self::ENTITY,
                errors,
            });
        }
        let errors = self.semantic_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(VcError::Semantic { errors })
        }
    }
}

/// Drop `null` members from objects, recursively, outside free-form fields.
fn without_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| {
                    if FREE_FORM_FIELDS.contains(&k.as_str()) {
                        (k, v)
                    } else {
                        (k, without_nulls(v))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(without_nulls).collect()),
        other => other,
    }
}

/// `type` may arrive as one string or an array; it is always stored as a list.
pub(crate) fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

pub(crate) fn type_list(literals: &[&str]) -> Vec<String> {
    literals.iter().map(|s| (*s).to_string()).collect()
}

pub fn json_ld_to_profile(value: &Value) -> Result<Profile, VcError> {
    Profile::from_json_ld(value)
}

pub fn json_ld_to_achievement(value: &Value) -> Result<Achievement, VcError> {
    Achievement::from_json_ld(value)
}

pub fn json_ld_to_credential(value: &Value) -> Result<OpenBadgeCredential, VcError> {
    OpenBadgeCredential::from_json_ld(value)
}

pub fn json_ld_to_endorsement(value: &Value) -> Result<EndorsementCredential, VcError> {
    EndorsementCredential::from_json_ld(value)
}
