//! # Endorsement Credential
//!
//! A third party's signed statement about a badge, a credential, an issuer
//! or another endorsement. The subject names its target by `id` only.

use serde::{Deserialize, Serialize};

use obv3_core::{Timestamp, Uri};

use crate::credential::{
    check_schema, credential_semantic_errors, evidence_warnings, nested, CredentialSchema,
    Evidence,
};
use crate::error::VcError;
use crate::field::{
    check_entity, check_entity_list, check_entity_ref, check_string, check_timestamp, check_type,
    check_uri, FieldSpec,
};
use crate::jsonld::{one_or_many, type_list, ContextKind, JsonLd};
use crate::profile::Profile;
use crate::proof::Proof;
use crate::reference::EntityRef;
use crate::signing::Signable;

fn endorsement_types() -> Vec<String> {
    type_list(EndorsementCredential::REQUIRED_TYPES)
}

/// The endorsed entity and what is said about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndorsementSubject {
    pub id: Uri,
    /// The endorsed entity's own type, e.g. `["Achievement"]`.
    #[serde(rename = "type", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endorsement_comment: Option<String>,
}

impl EndorsementSubject {
    pub fn new<I, S>(id: Uri, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            types: types.into_iter().map(Into::into).collect(),
            endorsement_comment: None,
        }
    }

    /// Endorse `target`, taking its id and type.
    pub fn of<T: JsonLd>(target: &T) -> Option<Self> {
        target
            .entity_id()
            .map(|id| Self::new(id.clone(), T::REQUIRED_TYPES.iter().copied()))
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.endorsement_comment = Some(comment.into());
        self
    }
}

impl JsonLd for EndorsementSubject {
    const ENTITY: &'static str = "EndorsementSubject";
    const REQUIRED_TYPES: &'static [&'static str] = &[];
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::required("type", check_type::<Self>),
        FieldSpec::optional("endorsementComment", check_string),
    ];

    fn entity_id(&self) -> Option<&Uri> {
        Some(&self.id)
    }

    fn semantic_errors(&self) -> Vec<String> {
        if self.types.is_empty() {
            vec!["type: must name the endorsed entity's type".to_string()]
        } else {
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndorsementCredential {
    pub id: Uri,
    #[serde(rename = "type", default = "endorsement_types", deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    pub issuer: EntityRef<Profile>,
    pub issuance_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<Timestamp>,
    pub credential_subject: EndorsementSubject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<Vec<Evidence>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_schema: Option<CredentialSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

impl EndorsementCredential {
    pub fn new(
        id: Uri,
        issuer: impl Into<EntityRef<Profile>>,
        issuance_date: Timestamp,
        credential_subject: EndorsementSubject,
    ) -> Self {
        Self {
            id,
            types: endorsement_types(),
            issuer: issuer.into(),
            issuance_date,
            expiration_date: None,
            credential_subject,
            name: None,
            description: None,
            evidence: None,
            credential_schema: None,
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

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.get_or_insert_with(Vec::new).push(evidence);
        self
    }

    pub fn with_credential_schema(mut self, schema: CredentialSchema) -> Self {
        self.credential_schema = Some(schema);
        self
    }

    /// # Errors
    ///
    /// `VcError::Schema` if `credentialSchema.type` is not recognized.
    pub fn validate_schema(&self) -> Result<(), VcError> {
        check_schema(self.credential_schema.as_ref())
    }
}

impl JsonLd for EndorsementCredential {
    const ENTITY: &'static str = "EndorsementCredential";
    const REQUIRED_TYPES: &'static [&'static str] =
        &["VerifiableCredential", "EndorsementCredential"];
    const CONTEXT: ContextKind = ContextKind::Credential;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", check_uri),
        FieldSpec::optional("type", check_type::<Self>),
        FieldSpec::required("issuer", check_entity_ref::<Profile>),
        FieldSpec::required("issuanceDate", check_timestamp),
        FieldSpec::optional("expirationDate", check_timestamp),
        FieldSpec::required("credentialSubject", check_entity::<EndorsementSubject>),
        FieldSpec::optional("name", check_string),
        FieldSpec::optional("description", check_string),
        FieldSpec::optional("evidence", check_entity_list::<Evidence>),
        FieldSpec::optional("credentialSchema", check_entity::<CredentialSchema>),
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
        evidence_warnings(self.evidence.as_deref())
    }
}

impl Signable for EndorsementCredential {
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
}
