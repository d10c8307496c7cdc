//! # Credential Schemas
//!
//! `credentialSchema.type` names the validator a verifier is expected to
//! run. Only the JSON Schema validators below are recognized.
//!
//! [`validate_against_schema`] checks a document against a JSON Schema the
//! caller already holds. Schemas are never fetched: any `$ref` that leaves
//! the given schema fails to resolve.

use jsonschema::{Retrieve, Uri};
use serde_json::Value;

use crate::error::VcError;
use crate::validate::ValidationResult;

/// Values accepted in `credentialSchema.type`.
pub const RECOGNIZED_SCHEMA_TYPES: &[&str] =
    &["JsonSchemaValidator2019", "1EdTechJsonSchemaValidator2019"];

pub fn is_recognized_schema_type(schema_type: &str) -> bool {
    RECOGNIZED_SCHEMA_TYPES.contains(&schema_type)
}

/// Refuses every external reference.
struct NoRemoteRetriever;

impl Retrieve for NoRemoteRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("remote schema reference not fetched: {}", uri.as_str()).into())
    }
}

/// Validate `document` against `schema`, one error per violation, each
/// prefixed with the JSON pointer of the offending instance.
///
/// # Errors
///
/// `VcError::Schema` if `schema` cannot be compiled, including when it
/// references another document.
pub fn validate_against_schema(document: &Value, schema: &Value) -> Result<ValidationResult, VcError> {
    let mut options = jsonschema::options();
    options.with_retriever(NoRemoteRetriever);
    let validator = options
        .build(schema)
        .map_err(|e| VcError::Schema(format!("schema could not be compiled: {e}")))?;

    let errors: Vec<String> = validator
        .iter_errors(document)
        .map(|e| {
            let path = e.instance_path.to_string();
            if path.is_empty() {
                e.to_string()
            } else {
                format!("{path}: {e}")
            }
        })
        .collect();

    tracing::debug!(violations = errors.len(), "checked document against JSON Schema");
    Ok(ValidationResult::from_errors(errors, Vec::new()))
}
