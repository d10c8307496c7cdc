//! # OpenBadge Credential
//!
//! The issuance record binding an [`Achievement`](crate::Achievement) to a
//! recipient, with its [`Evidence`] and optional [`CredentialSchema`].
//!
//! Date ordering, schema type and proof content are semantic rules shared
//! with [`EndorsementCredential`](crate::EndorsementCredential) through
//! [`credential_semantic_errors`].

use serde::{Deserialize, Serialize};

use obv3_core::{Timestamp, Uri};

use crate::achievement::AchievementSubject;
use crate::error::VcError;
use crate::field::{
    check_bool, check_entity, check_entity_list, check_entity_ref, check_non_empty_string,
    check_string, check_timestamp, check_type, check_uri, join_path, FieldSpec,
};
use crate::jsonld::{one_or_many, type_list, ContextKind, JsonLd};
use crate::profile::Profile;
use crate::proof::Proof;
use crate::reference::EntityRef;
use crate::schema::is_recognized_schema_type;
use crate::signing::Signable;

fn evidence_types() -> Vec<String> {
    vec!["Evidence".to_string()]
}

fn credential_types() -> Vec<String> {
    type_list(OpenBadgeCredential::REQUIRED_TYPES)
}

/// Supporting material for an award. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uri>,
    #[serde(rename = "type", default = "evidence_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl Default for Evidence {
    fn default() -> Self {
        Self {
            id: None,
            types: evidence_types(),
            name: None,
            description: None,
            narrative: None,
            genre: None,
        }
    }
}

impl Evidence {
    pub fn with_id(mut self, id: Uri) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.narrative = Some(narrative.into());
        self
    }
}

impl JsonLd for Evidence {
    const ENTITY: &'static str = "Evidence";
    // `type` is free here; a missing "Evidence" is only a warning.
    const REQUIRED_TYPES: &'static [&'static str] = &[];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::optional("name", check_string),
        FieldSpec::optional("description", check_string),
        FieldSpec::optional("narrative", check_string),
        FieldSpec::optional("genre", check_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        self.id.as_ref()
    }

    fn warnings(&self) -> Vec<String> {
        if self.types.iter().any(|t| t == "Evidence") {
            Vec::new()
        } else {
            vec!["type: should include \"Evidence\"".to_string()]
        }
    }
}

/// The schema a verifier should check the credential against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSchema {
    pub id: Uri,
    /// Validator name, e.g. `JsonSchemaValidator2019`.
    #[serde(rename = "type")]
    pub schema_type: String,
}

impl CredentialSchema {
    pub fn json_schema(id: Uri) -> Self {
        Self {
            id,
            schema_type: "JsonSchemaValidator2019".to_string(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        is_recognized_schema_type(&self.schema_type)
    }
}

impl JsonLd for CredentialSchema {
    const ENTITY: &'static str = "CredentialSchema";
    const REQUIRED_TYPES: &'static [&'static str] = &[];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::required("type", check_non_empty_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }

    fn semantic_errors(&self) -> Vec<String> {
        if self.is_recognized() {
            Vec::new()
        } else {
            vec![format!(
                "type: unrecognized schema validator \"{}\"",
                self.schema_type
            )]
        }
    }
}

/// Rules every credential kind obeys, path-prefixed from the document root.
pub(crate) fn credential_semantic_errors(
    issuer: &EntityRef<Profile>,
    issuance_date: Timestamp,
    expiration_date: Option<Timestamp>,
    schema: Option<&CredentialSchema>,
    proof: Option<&Proof>,
) -> Vec<String> {
    let mut errors = Vec::new();
    if let EntityRef::Embedded(profile) = issuer {
        errors.extend(nested("issuer", profile.semantic_errors()));
    }
    if let Some(expiration) = expiration_date {
        if expiration <= issuance_date {
            errors.push(format!(
                "expirationDate: {expiration} must be after issuanceDate {issuance_date}"
            ));
        }
    }
    if let Some(schema) = schema {
        errors.extend(nested("credentialSchema", schema.semantic_errors()));
    }
    if let Some(proof) = proof {
        errors.extend(nested("proof", proof.semantic_errors()));
    }
    errors
}

/// Same check as [`credential_semantic_errors`] for the schema alone.
pub(crate) fn check_schema(schema: Option<&CredentialSchema>) -> Result<(), VcError> {
    match schema {
        Some(schema) if !schema.is_recognized() => Err(VcError::Schema(format!(
            "credentialSchema.type \"{}\" is not a recognized validator",
            schema.schema_type
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn nested(parent: &str, messages: Vec<String>) -> Vec<String> {
    messages.into_iter().map(|m| join_path(parent, &m)).collect()
}

pub(crate) fn evidence_warnings(evidence: Option<&[Evidence]>) -> Vec<String> {
    evidence
        .into_iter()
        .flatten()
        .enumerate()
        .flat_map(|(i, e)| nested(&format!("evidence[{i}]"), e.warnings()))
        .collect()
}

/// An issued badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenBadgeCredential {
    pub id: Uri,
    #[serde(rename = "type", default = "credential_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    pub issuer: EntityRef<Profile>,
    pub issuance_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    pub credential_subject: AchievementSubject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<Evidence>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_schema: Option<CredentialSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revoked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revocation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl OpenBadgeCredential {
    pub fn new(
        id: Uri,
        issuer: impl Into<EntityRef<Profile>>,
        issuance_date: Timestamp,
        credential_subject: AchievementSubject,
    ) -> Self {
        Self {
            id,
            types: credential_types(),
            issuer: issuer.into(),
            issuance_date,
            expiration_date: None,
            credential_subject,
            name: None,
            description: None,
            evidence: None,
            credential_schema: None,
            revoked: None,
            revocation_reason: None,
            proof: None,
        }
    }

    pub fn with_expiration_date(mut self, expiration_date: Timestamp) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append one evidence record, keeping earlier ones in order.
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.get_or_insert_with(Vec::new).push(evidence);
        self
    }

    pub fn with_credential_schema(mut self, schema: CredentialSchema) -> Self {
        self.credential_schema = Some(schema);
        self
    }

    /// A revoked copy. Revocation changes the signed content, so a
    /// credential signed before revocation no longer verifies.
    pub fn revoked(&self, reason: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.revoked = Some(true);
        copy.revocation_reason = Some(reason.into());
        copy
    }

    /// # Errors
    ///
    /// `VcError::Schema` if `credentialSchema.type` is not recognized.
    pub fn validate_schema(&self) -> Result<(), VcError> {
        check_schema(self.credential_schema.as_ref())
    }
}

impl JsonLd for OpenBadgeCredential {
    const ENTITY: &'static str = "OpenBadgeCredential";
    const REQUIRED_TYPES: &'static [&'static str] = &["VerifiableCredential", "OpenBadgeCredential"];
    const CONTEXT: ContextKind = ContextKind::Credential;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::required("issuer", check_entity_ref::<Profile>),
        FieldSpec::required("issuanceDate", check_timestamp),
        FieldSpec::optional("expirationDate", check_timestamp),
        FieldSpec::required("credentialSubject", check_entity::<AchievementSubject>),
        FieldSpec::optional("name", check_string),
        FieldSpec::optional("description", check_string),
        FieldSpec::optional("evidence", check_entity_list::<Evidence>),
        FieldSpec::optional("credentialSchema", check_entity::<CredentialSchema>),
        FieldSpec::optional("revoked", check_bool),
        FieldSpec::optional("revocationReason", check_string),
        FieldSpec::optional("proof", check_entity::<Proof>),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }

    fn semantic_errors(&self) -> Vec<String> {
        let mut errors = credential_semantic_errors(
            &self.issuer,
            self.issuance_date,
            self.expiration_date,
            self.credential_schema.as_ref(),
            self.proof.as_ref(),
        );
        errors.extend(nested(
            "credentialSubject",
            self.credential_subject.semantic_errors(),
        ));
        errors
    }

    fn warnings(&self) -> Vec<String> {
        let mut warnings = evidence_warnings(self.evidence.as_deref());
        if self.revocation_reason.is_some() && self.revoked != Some(true) {
            warnings.push("revocationReason: set on a credential that is not revoked".to_string());
        }
        warnings
    }
}

impl Signable for OpenBadgeCredential {
    fn proof(&self) -> Option<&Proof> {
        self.proof.as_ref()
    }

    fn proof_mut(&mut self) -> &mut Option<Proof> {
        &mut self.proof
    }

    fn issuance_date(&self) -> Timestamp {
        self.issuance_date
    }

    fn expiration_date(&self) -> Option<Timestamp> {
        self.expiration_date
    }

    fn is_revoked(&self) -> bool {
        self.revoked == Some(true)
    }
}
