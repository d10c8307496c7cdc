//! # Achievement
//!
//! A badge definition ([`Achievement`]) with its [`Criteria`] and
//! [`Alignment`]s, and the recipient record ([`AchievementSubject`]) that
//! binds it to someone.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use obv3_core::{Timestamp, Uri};

use crate::field::{
    check_entity, check_entity_list, check_entity_ref, check_non_empty_string, check_string,
    check_string_list, check_timestamp, check_type, check_uri, join_path, FieldSpec,
};
use crate::jsonld::{one_or_many, type_list, JsonLd};
use crate::profile::{Image, Profile};
use crate::reference::EntityRef;

fn alignment_types() -> Vec<String> {
    type_list(Alignment::REQUIRED_TYPES)
}

fn achievement_types() -> Vec<String> {
    type_list(Achievement::REQUIRED_TYPES)
}

fn subject_types() -> Vec<String> {
    type_list(AchievementSubject::REQUIRED_TYPES)
}

/// How the achievement is earned: a criteria page, a narrative, or both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl Criteria {
    pub fn narrative(text: impl Into<String>) -> Self {
        Self {
            id: None,
            narrative: Some(text.into()),
        }
    }

    pub fn url(id: Uri) -> Self {
        Self {
            id: Some(id),
            narrative: None,
        }
    }
}

impl JsonLd for Criteria {
    const ENTITY: &'static str = "Criteria";
    const REQUIRED_TYPES: &'static [&'static str] = &[];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", check_uri),
        FieldSpec::optional("narrative", check_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        self.id.as_ref()
    }
}

/// Criteria must say something: an `id`, a `narrative`, or both.
fn check_criteria(value: &Value, path: &str) -> Vec<String> {
    let mut errors = check_entity::<Criteria>(value, path);
    if let Some(map) = value.as_object() {
        let present = |k: &str| map.get(k).is_some_and(|v| !v.is_null());
        if errors.is_empty() && !present("id") && !present("narrative") {
            errors.push(format!("{path}: must have an id or a narrative"));
        }
    }
    errors
}

/// A link from the achievement to a competency framework entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    #[serde(rename = "type", default = "alignment_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    pub target_name: String,
    pub target_url: Uri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_framework: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<String>,
}

impl Alignment {
    pub fn new(target_name: impl Into<String>, target_url: Uri) -> Self {
        Self {
            types: alignment_types(),
            target_name: target_name.into(),
            target_url,
            target_description: None,
            target_framework: None,
            target_code: None,
            target_type: None,
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>, code: impl Into<String>) -> Self {
        self.target_framework = Some(framework.into());
        self.target_code = Some(code.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.target_description = Some(description.into());
        self
    }
}

impl JsonLd for Alignment {
    const ENTITY: &'static str = "Alignment";
    const REQUIRED_TYPES: &'static [&'static str] = &["Alignment"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::required("targetName", check_non_empty_string),
        FieldSpec::required("targetUrl", check_uri),
        FieldSpec::optional("targetDescription", check_string),
        FieldSpec::optional("targetFramework", check_string),
        FieldSpec::optional("targetCode", check_string),
        FieldSpec::optional("targetType", check_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        None
    }
}

/// The definition of a badge: what it represents and who issues it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: Uri,
    #[serde(rename = "type", default = "achievement_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    pub name: String,
    pub issuer: EntityRef<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Criteria>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Vec<Alignment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Timestamp>,
}

impl Achievement {
    pub fn new(id: Uri, name: impl Into<String>, issuer: impl Into<EntityRef<Profile>>) -> Self {
        Self {
            id,
            types: achievement_types(),
            name: name.into(),
            issuer: issuer.into(),
            description: None,
            criteria: None,
            image: None,
            tags: None,
            alignment: None,
            created: None,
            updated: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    pub fn with_image(mut self, image: Image) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Append one alignment, keeping earlier ones in order.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment.get_or_insert_with(Vec::new).push(alignment);
        self
    }
}

impl From<Achievement> for EntityRef<Achievement> {
    fn from(achievement: Achievement) -> Self {
        EntityRef::embedded(achievement)
    }
}

impl JsonLd for Achievement {
    const ENTITY: &'static str = "Achievement";
    const REQUIRED_TYPES: &'static [&'static str] = &["Achievement"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::required("name", check_non_empty_string),
        FieldSpec::required("issuer", check_entity_ref::<Profile>),
        FieldSpec::optional("description", check_string),
        FieldSpec::optional("criteria", check_criteria),
        FieldSpec::optional("image", check_entity::<Image>),
        FieldSpec::optional("tags", check_string_list),
        FieldSpec::optional("alignment", check_entity_list::<Alignment>),
        FieldSpec::optional("created", check_timestamp),
        FieldSpec::optional("updated", check_timestamp),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }

    fn semantic_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let (Some(created), Some(updated)) = (self.created, self.updated) {
            if updated < created {
                errors.push("updated: must not be before created".to_string());
            }
        }
        if let EntityRef::Embedded(issuer) = &self.issuer {
            errors.extend(
                issuer
                    .semantic_errors()
                    .into_iter()
                    .map(|e| join_path("issuer", &e)),
            );
        }
        errors
    }
}

/// The recipient of a credential and the achievement awarded to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementSubject {
    /// DID or URI of the recipient.
    pub id: Uri,
    #[serde(rename = "type", default = "subject_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub achievement: EntityRef<Achievement>,
}

impl AchievementSubject {
    pub fn new(id: Uri, achievement: impl Into<EntityRef<Achievement>>) -> Self {
        Self {
            id,
            types: subject_types(),
            name: None,
            achievement: achievement.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl JsonLd for AchievementSubject {
    const ENTITY: &'static str = "AchievementSubject";
    const REQUIRED_TYPES: &'static [&'static str] = &["AchievementSubject"];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::optional("name", check_string),
        FieldSpec::required("achievement", check_entity_ref::<Achievement>),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }

    fn semantic_errors(&self) -> Vec<String> {
        match &self.achievement {
            EntityRef::Embedded(achievement) => achievement
                .semantic_errors()
                .into_iter()
                .map(|e| join_path("achievement", &e))
                .collect(),
            EntityRef::Reference(_) => Vec::new(),
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

    fn issuer() -> Profile {
        Profile::new(uri("https://example.org/issuers/1"), "Org")
    }

    fn badge() -> Achievement {
        Achievement::new(uri("https://example.org/badges/1"), "Badge", issuer())
    }

    #[test]
    fn missing_issuer_is_reported() {
        let err = Achievement::from_json_ld(&json!({
            "id": "https://example.org/badges/1",
            "name": "Badge"
        }))
        .unwrap_err();
        assert_eq!(err.messages(), vec!["issuer: required field is missing"]);
    }

    #[test]
    fn issuer_may_be_embedded_or_referenced() {
        let embedded = badge().to_json_ld().unwrap();
        assert_eq!(embedded["issuer"]["name"], "Org");

        let by_ref = Achievement::new(
            uri("https://example.org/badges/1"),
            "Badge",
            uri("https://example.org/issuers/1"),
        );
        let doc = by_ref.to_json_ld().unwrap();
        assert_eq!(doc["issuer"], json!("https://example.org/issuers/1"));

        assert!(Achievement::from_json_ld(&embedded).is_ok());
        assert_eq!(Achievement::from_json_ld(&doc).unwrap(), by_ref);
    }

    #[test]
    fn nested_issuer_errors_carry_the_path() {
        let err = Achievement::from_json_ld(&json!({
            "id": "https://example.org/badges/1",
            "name": "Badge",
            "issuer": {"id": "https://example.org/issuers/1"}
        }))
        .unwrap_err();
        assert_eq!(err.messages(), vec!["issuer.name: required field is missing"]);
    }

    #[test]
    fn bad_issuer_shape_is_reported() {
        let err = Achievement::from_json_ld(&json!({
            "id": "https://example.org/badges/1",
            "name": "Badge",
            "issuer": 7
        }))
        .unwrap_err();
        assert!(err.messages()[0].starts_with("issuer: expected an embedded Profile object"));
    }

    #[test]
    fn empty_criteria_is_rejected() {
        let err = badge()
            .with_field("criteria", json!({}))
            .unwrap_err();
        assert_eq!(err.messages(), vec!["criteria: must have an id or a narrative"]);
    }

    #[test]
    fn alignment_entries_are_checked_by_index() {
        let err = badge()
            .with_field(
                "alignment",
                json!([
                    {"targetName": "A", "targetUrl": "https://example.org/a"},
                    {"targetName": "B"}
                ]),
            )
            .unwrap_err();
        assert_eq!(err.messages(), vec!["alignment[1].targetUrl: required field is missing"]);
    }

    #[test]
    fn full_achievement_roundtrips_in_order() {
        let a = badge()
            .with_description("Awarded for things")
            .with_criteria(Criteria::narrative("Do the things"))
            .with_image(Image::new(uri("https://example.org/badge.png")))
            .with_tags(["rust", "badges"])
            .with_alignment(Alignment::new("Skill", uri("https://example.org/skills/1")))
            .with_alignment(
                Alignment::new("Other", uri("https://example.org/skills/2"))
                    .with_framework("Frame", "F-2"),
            );
        let doc = a.to_json_ld().unwrap();
        assert_eq!(doc["tags"], json!(["rust", "badges"]));
        assert_eq!(doc["alignment"][1]["targetCode"], "F-2");
        assert_eq!(Achievement::from_json_ld(&doc).unwrap(), a);
    }

    #[test]
    fn subject_accepts_did_and_reference() {
        let s = AchievementSubject::new(uri("did:example:1"), uri("https://example.org/badges/1"));
        let doc = s.to_json_ld().unwrap();
        assert_eq!(doc["type"], json!(["AchievementSubject"]));
        assert_eq!(doc["achievement"], json!("https://example.org/badges/1"));
        assert_eq!(AchievementSubject::from_json_ld(&doc).unwrap(), s);
    }

    #[test]
    fn subject_surfaces_nested_semantic_errors() {
        let mut a = badge();
        a.created = Some(Timestamp::parse("2024-02-01T00:00:00Z").unwrap());
        a.updated = Some(Timestamp::parse("2024-01-01T00:00:00Z").unwrap());
        let s = AchievementSubject::new(uri("did:example:1"), a);
        assert_eq!(
            s.semantic_errors(),
            vec!["achievement.updated: must not be before created"]
        );
    }
}
