//! Generic access to record instances.
//!
//! Records cross this crate's boundary as FHIR JSON (`serde_json::Value`).
//! The [`FieldAccess`] capability is the only thing the validator needs from
//! a record type; the free functions below cover the handful of FHIR shapes
//! the propagation pipeline reads (references, identifiers, codings, names).

use serde_json::Value;

/// Capability to look up a top-level field by name.
///
/// Lookups never fail: an unknown field name, an unsupported instance shape
/// or an explicit JSON `null` all resolve to `None`, so a misconfigured
/// constraint degrades to a validation failure instead of a server error.
pub trait FieldAccess {
    fn field(&self, name: &str) -> Option<&Value>;
}

impl FieldAccess for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        match self.as_object()?.get(name) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }
}

/// The record's declared type, e.g. `"List"`.
pub fn resource_type(resource: &Value) -> Option<&str> {
    resource.get("resourceType")?.as_str()
}

/// Relative reference string of a reference-typed field, e.g. `"Patient/X.1"`.
pub fn reference_str<'a>(resource: &'a Value, field: &str) -> Option<&'a str> {
    resource.get(field)?.get("reference")?.as_str()
}

/// Trailing id segment of a relative reference: `"Patient/HOSP1.A1"` → `"HOSP1.A1"`.
pub fn id_part(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Whether any coding of the resource's `code` concept carries `code`.
pub fn has_code(resource: &Value, code: &str) -> bool {
    codings(resource.get("code")).any(|coding| coding.get("code").and_then(Value::as_str) == Some(code))
}

/// Whether the resource carries an identifier with the given system and value.
pub fn has_identifier(resource: &Value, system: &str, value: &str) -> bool {
    identifiers(resource).any(|identifier| {
        identifier.get("system").and_then(Value::as_str) == Some(system)
            && identifier.get("value").and_then(Value::as_str) == Some(value)
    })
}

/// Value of the first identifier declared under `system`.
pub fn identifier_value<'a>(resource: &'a Value, system: &str) -> Option<&'a str> {
    identifiers(resource)
        .find(|identifier| identifier.get("system").and_then(Value::as_str) == Some(system))?
        .get("value")?
        .as_str()
}

/// Code of the first `type[].coding[]` entry declared under `system`.
///
/// This is how an encounter's modality is keyed.
pub fn type_coding_value<'a>(resource: &'a Value, system: &str) -> Option<&'a str> {
    resource
        .get("type")?
        .as_array()?
        .iter()
        .flat_map(|concept| codings(Some(concept)))
        .find(|coding| coding.get("system").and_then(Value::as_str) == Some(system))?
        .get("code")?
        .as_str()
}

/// Text of the record's primary human name.
///
/// Patient-style records carry `name` as an array, practitioner-style
/// records as a single object; both shapes resolve here.
pub fn primary_name_text(resource: &Value) -> Option<&str> {
    let name = resource.get("name")?;
    let primary = match name {
        Value::Array(entries) => entries.first()?,
        other => other,
    };
    primary.get("text")?.as_str()
}

fn identifiers(resource: &Value) -> impl Iterator<Item = &Value> {
    resource
        .get("identifier")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn codings(concept: Option<&Value>) -> impl Iterator<Item = &Value> {
    concept
        .and_then(|concept| concept.get("coding"))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
