//! # Entity-or-Reference Fields
//!
//! `issuer`, `achievement` and `parentOrg` hold either the full related
//! entity or just its identifier. Both forms are kept exactly as given:
//! nothing is fetched, and a reference is never checked against a referent.
//!
//! On the wire the embedded form is the entity's object and the reference
//! form is the bare URI string.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use obv3_core::Uri;

use crate::error::VcError;
use crate::jsonld::JsonLd;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityRef<T> {
    /// Identifier of an entity held elsewhere.
    Reference(Uri),
    /// The entity itself, owned by the referring document.
    Embedded(Box<T>),
}

impl<T> EntityRef<T> {
    pub fn embedded(entity: T) -> Self {
        Self::Embedded(Box::new(entity))
    }

    pub fn reference(id: Uri) -> Self {
        Self::Reference(id)
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Self::Embedded(_))
    }

    pub fn as_embedded(&self) -> Option<&T> {
        match self {
            Self::Embedded(entity) => Some(&**entity),
            Self::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Uri> {
        match self {
            Self::Reference(id) => Some(id),
            Self::Embedded(_) => None,
        }
    }
}

impl<T: JsonLd> EntityRef<T> {
    /// The referenced identifier, taken from the embedded entity if needed.
    pub fn id(&self) -> Option<&Uri> {
        match self {
            Self::Reference(id) => Some(id),
            Self::Embedded(entity) => entity.entity_id(),
        }
    }

    /// The same relation in reference form. `None` if the embedded entity
    /// has no identifier.
    pub fn to_reference(&self) -> Option<Self> {
        self.id().cloned().map(Self::Reference)
    }

    /// Parse the raw value of the field named `field`.
    ///
    /// # Errors
    ///
    /// `VcError::ReferenceFormat` if the value is neither a URI string nor
    /// an object, or is a string that is not a URI. An object that fails
    /// the entity's own checks yields `VcError::Structural`.
    pub fn from_value(value: &Value, field: &str) -> Result<Self, VcError> {
        match value {
            Value::String(s) => Uri::new(s.as_str()).map(Self::Reference).map_err(|e| {
                VcError::ReferenceFormat {
                    field: field.to_string(),
                    reason: e.to_string(),
                }
            }),
            Value::Object(_) => T::from_json_ld(value).map(Self::embedded),
            _ => Err(VcError::ReferenceFormat {
                field: field.to_string(),
                reason: format!(
                    "expected an embedded {} object or a URI reference",
                    T::ENTITY
                ),
            }),
        }
    }
}

impl<T> From<Uri> for EntityRef<T> {
    fn from(id: Uri) -> Self {
        Self::Reference(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Profile;
    use serde_json::json;

    fn issuer() -> Profile {
        Profile::new(Uri::new("https://example.org/issuers/1").unwrap(), "Org")
    }

    #[test]
    fn both_forms_expose_the_same_id() {
        let embedded = EntityRef::embedded(issuer());
        let by_ref: EntityRef<Profile> = Uri::new("https://example.org/issuers/1").unwrap().into();
        assert_eq!(embedded.id(), by_ref.id());
        assert_eq!(embedded.to_reference(), Some(by_ref));
    }

    #[test]
    fn serialization_shapes() {
        let embedded = serde_json::to_value(EntityRef::embedded(issuer())).unwrap();
        assert_eq!(embedded["name"], "Org");
        assert_eq!(embedded["id"], "https://example.org/issuers/1");
        let by_ref = serde_json::to_value(EntityRef::<Profile>::reference(
            Uri::new("https://example.org/issuers/1").unwrap(),
        ))
        .unwrap();
        assert_eq!(by_ref, json!("https://example.org/issuers/1"));
    }

    #[test]
    fn from_value_distinguishes_forms() {
        let r = EntityRef::<Profile>::from_value(&json!("did:example:issuer"), "issuer").unwrap();
        assert_eq!(r.as_reference().map(Uri::as_str), Some("did:example:issuer"));

        let e = EntityRef::<Profile>::from_value(
            &json!({"id": "https://example.org/issuers/1", "name": "Org"}),
            "issuer",
        )
        .unwrap();
        assert!(e.is_embedded());
    }

    #[test]
    fn from_value_rejects_other_shapes() {
        for bad in [json!(42), json!(["a"]), json!("not a uri")] {
            match EntityRef::<Profile>::from_value(&bad, "issuer") {
                Err(VcError::ReferenceFormat { field, .. }) => assert_eq!(field, "issuer"),
                other => panic!("expected ReferenceFormat for {bad}, got {other:?}"),
            }
        }
        assert!(matches!(
            EntityRef::<Profile>::from_value(&json!({"id": "https://example.org/x"}), "issuer"),
            Err(VcError::Structural { .. })
        ));
    }
}
