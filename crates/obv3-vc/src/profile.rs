//! # Profile
//!
//! The issuing person or organization, plus the [`Image`] and [`Address`]
//! sub-records it owns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use obv3_core::{Email, Timestamp, Uri};

use crate::field::{
    check_email, check_entity, check_entity_ref, check_non_empty_string, check_object,
    check_string, check_timestamp, check_type, check_u32, check_uri, FieldSpec,
};
use crate::jsonld::{one_or_many, type_list, JsonLd};
use crate::reference::EntityRef;

fn image_types() -> Vec<String> {
    type_list(Image::REQUIRED_TYPES)
}

fn address_types() -> Vec<String> {
    type_list(Address::REQUIRED_TYPES)
}

fn profile_types() -> Vec<String> {
    type_list(Profile::REQUIRED_TYPES)
}

/// An image with an identifying URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: Uri,
    #[serde(rename = "type", default = "image_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Image {
    pub fn new(id: Uri) -> Self {
        Self {
            id,
            types: image_types(),
            caption: None,
            width: None,
            height: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

impl JsonLd for Image {
    const ENTITY: &'static str = "Image";
    const REQUIRED_TYPES: &'static [&'static str] = &["Image"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::optional("caption", check_string),
        FieldSpec::optional("width", check_u32),
        FieldSpec::optional("height", check_u32),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }
}

/// A postal address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "type", default = "address_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_office_box_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            types: address_types(),
            address_country: None,
            address_country_code: None,
            address_region: None,
            address_locality: None,
            street_address: None,
            post_office_box_number: None,
            postal_code: None,
        }
    }
}

impl JsonLd for Address {
    const ENTITY: &'static str = "Address";
    const REQUIRED_TYPES: &'static [&'static str] = &["Address"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::optional("addressCountry", check_string),
        FieldSpec::optional("addressCountryCode", check_string),
        FieldSpec::optional("addressRegion", check_string),
        FieldSpec::optional("addressLocality", check_string),
        FieldSpec::optional("streetAddress", check_string),
        FieldSpec::optional("postOfficeBoxNumber", check_string),
        FieldSpec::optional("postalCode", check_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        None
    }
}

/// An issuer profile.
///
/// Referenced from achievements and credentials as `issuer`, embedded or
/// by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uri,
    #[serde(rename = "type", default = "profile_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    /// Free-form key description published by the issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_org: Option<EntityRef<Profile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
}

impl Profile {
    pub fn new(id: Uri, name: impl Into<String>) -> Self {
        Self {
            id,
            types: profile_types(),
            name: name.into(),
            description: None,
            url: None,
            email: None,
            telephone: None,
            image: None,
            address: None,
            public_key: None,
            parent_org: None,
            created: None,
            updated: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: Uri) -> Self {
        self.url = Some(url);
        self
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_telephone(mut self, telephone: impl Into<String>) -> Self {
        self.telephone = Some(telephone.into());
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_parent_org(mut self, parent: impl Into<EntityRef<Profile>>) -> Self {
        self.parent_org = Some(parent.into());
        self
    }
}

impl From<Profile> for EntityRef<Profile> {
    fn from(profile: Profile) -> Self {
        EntityRef::embedded(profile)
    }
}

impl JsonLd for Profile {
    const ENTITY: &'static str = "Profile";
    const REQUIRED_TYPES: &'static [&'static str] = &["Profile"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::required("name", check_non_empty_string),
        FieldSpec::optional("description", check_string),
        FieldSpec::optional("url", check_uri),
        FieldSpec::optional("email", check_email),
        FieldSpec::optional("telephone", check_string),
        FieldSpec::optional("image", check_entity::<Image>),
        FieldSpec::optional("address", check_entity::<Address>),
        FieldSpec::optional("publicKey", check_object),
        FieldSpec::optional("parentOrg", check_entity_ref::<Profile>),
        FieldSpec::optional("created", check_timestamp),
        FieldSpec::optional("updated", check_timestamp),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }

    fn semantic_errors(&self) -> Vec<String> {
        match (self.created, self.updated) {
            (Some(created), Some(updated)) if updated < created => {
                vec!["updated: must not be before created".to_string()]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn uri(s: &str) -> Uri {
        Uri::new(s).unwrap()
    }

    #[test]
    fn to_json_ld_has_single_context_and_type_array() {
        let doc = Profile::new(uri("https://example.org/issuers/1"), "Org")
            .to_json_ld()
            .unwrap();
        assert_eq!(doc["@context"], json!("https://w3id.org/openbadges/v3"));
        assert_eq!(doc["type"], json!(["Profile"]));
        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["@context", "id", "type", "name"]);
    }

    #[test]
    fn missing_name_is_reported() {
        let err = Profile::from_json_ld(&json!({"id": "https://example.org/issuers/1"}))
            .unwrap_err();
        assert!(err.messages().iter().any(|m| m.contains("name")));
    }

    #[test]
    fn every_bad_field_is_reported() {
        let err = Profile::from_json_ld(&json!({
            "id": "issuers/1",
            "type": ["Organization"],
            "name": "",
            "email": "nobody",
            "image": {"caption": "logo"}
        }))
        .unwrap_err();
        let messages = err.messages();
        assert_eq!(messages.len(), 5, "{messages:?}");
        assert!(messages[0].starts_with("id: invalid URI"));
        assert_eq!(messages[1], "type: must include \"Profile\"");
        assert_eq!(messages[2], "name: must not be empty");
        assert!(messages[3].starts_with("email: invalid email"));
        assert_eq!(messages[4], "image.id: required field is missing");
    }

    #[test]
    fn type_may_be_a_single_string() {
        let p = Profile::from_json_ld(&json!({
            "id": "https://example.org/issuers/1",
            "type": "Profile",
            "name": "Org"
        }))
        .unwrap();
        assert_eq!(p.types, vec!["Profile"]);
    }

    #[test]
    fn full_profile_roundtrips() {
        let p = Profile::new(uri("https://example.org/issuers/1"), "Org")
            .with_description("An issuing body")
            .with_url(uri("https://example.org"))
            .with_email(Email::new("badges@example.org").unwrap())
            .with_telephone("+1 555 0100")
            .with_image(Image::new(uri("https://example.org/logo.png")).with_size(64, 64))
            .with_address(Address {
                address_country: Some("France".to_string()),
                postal_code: Some("75001".to_string()),
                ..Address::default()
            })
            .with_parent_org(uri("https://example.org/issuers/0"));
        let back = Profile::from_json_ld(&p.to_json_ld().unwrap()).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn parent_org_accepts_embedded_profile() {
        let parent = Profile::new(uri("https://example.org/issuers/0"), "Parent");
        let p = Profile::new(uri("https://example.org/issuers/1"), "Child").with_parent_org(parent);
        let doc = p.to_json_ld().unwrap();
        assert_eq!(doc["parentOrg"]["name"], "Parent");
        assert!(doc["parentOrg"].get("@context").is_none());
    }

    #[test]
    fn updated_before_created_is_semantic() {
        let mut p = Profile::new(uri("https://example.org/issuers/1"), "Org");
        p.created = Some(Timestamp::parse("2024-02-01T00:00:00Z").unwrap());
        p.updated = Some(Timestamp::parse("2024-01-01T00:00:00Z").unwrap());
        assert_eq!(p.semantic_errors().len(), 1);
    }
}
