use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{OrderBridgeError, Result};
use crate::model;
use crate::provider::RecordProvider;

/// Fixed prefix of every composed order id. Wire contract with the order
/// station; existing downstream records depend on it.
pub const EXTERNAL_ID_PREFIX: &str = "DXOD.";

/// Coding system under which an encounter declares its modality.
pub const ENCOUNTER_CODING_SYSTEM: &str = "http://www.datacom.com.tw/TWRCore/Encounter";

const PATIENT_PREFIX_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderPriority {
    Routine,
}

impl OrderPriority {
    pub fn code(&self) -> &'static str {
        match self {
            OrderPriority::Routine => "routine",
        }
    }
}

/// Cross-record pointer rewritten to an externally dereferenceable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteReference {
    pub url: String,
    pub display: Option<String>,
}

/// Diagnostic order derived from a list record, built fresh per propagation
/// attempt and never persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedOrder {
    pub external_id: String,
    pub subject: AbsoluteReference,
    pub orderer: AbsoluteReference,
    pub encounter: AbsoluteReference,
    pub priority: OrderPriority,
}

/// Derives a [`ComposedOrder`] from a source list record.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderComposer;

impl OrderComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose an order from the list record's subject, source and encounter
    /// references. The subject and orderer each require one read of the
    /// referenced person record to resolve the display name.
    pub async fn compose(
        &self,
        source_list: &Value,
        base_url: &Url,
        provider: &dyn RecordProvider,
    ) -> Result<ComposedOrder> {
        let subject_ref = required_reference(source_list, "subject")?;
        let orderer_ref = required_reference(source_list, "source")?;
        let encounter_ref = required_reference(source_list, "encounter")?;

        let external_id = compose_external_id(model::id_part(subject_ref), model::id_part(encounter_ref))?;

        let subject = resolve_person(provider, subject_ref, base_url).await?;
        let orderer = resolve_person(provider, orderer_ref, base_url).await?;
        let encounter = AbsoluteReference {
            url: absolutize(base_url, encounter_ref),
            display: None,
        };

        Ok(ComposedOrder {
            external_id,
            subject,
            orderer,
            encounter,
            // Always routine: the order station schedules these itself.
            priority: OrderPriority::Routine,
        })
    }

    /// Whether any coding of the list's `code` concept marks it as an
    /// outpatient visit list.
    pub fn is_outpatient(list: &Value) -> bool {
        model::has_code(list, "OPD")
    }

    /// Whether the list declares the EMR as its creator.
    pub fn is_from_emr(list: &Value) -> bool {
        model::has_identifier(list, "Creator", "EMR")
    }

    /// Trigger guard for propagation. Skips lists the EMR created for
    /// non-outpatient visits.
    pub fn should_propagate(list: &Value) -> bool {
        !(!Self::is_outpatient(list) && Self::is_from_emr(list))
    }
}

/// Composite external id: fixed prefix, patient identifier with the
/// 5-character institutional prefix (and its separating dot) stripped, the
/// `".ECNT"` separator, and the trailing dot-segment of the encounter
/// identifier. Deterministic per (patient, encounter) pair.
pub fn compose_external_id(patient_id: &str, encounter_id: &str) -> Result<String> {
    let local = patient_id.get(PATIENT_PREFIX_LEN..).ok_or_else(|| {
        OrderBridgeError::compose(format!(
            "patient identifier '{patient_id}' is shorter than its institutional prefix"
        ))
    })?;
    let local = local.strip_prefix('.').unwrap_or(local);
    if local.is_empty() {
        return Err(OrderBridgeError::compose(format!(
            "patient identifier '{patient_id}' has no local part"
        )));
    }

    let serial = encounter_id.rsplit('.').next().unwrap_or(encounter_id);

    Ok(format!("{EXTERNAL_ID_PREFIX}{local}.ECNT{serial}"))
}

/// Modality code of the related encounter, from its type coding under the
/// fixed system URL.
pub fn modality_from(encounter: &Value) -> Result<String> {
    model::type_coding_value(encounter, ENCOUNTER_CODING_SYSTEM)
        .map(str::to_string)
        .ok_or_else(|| {
            OrderBridgeError::compose(format!(
                "encounter carries no modality coding under {ENCOUNTER_CODING_SYSTEM}"
            ))
        })
}

async fn resolve_person(
    provider: &dyn RecordProvider,
    reference: &str,
    base_url: &Url,
) -> Result<AbsoluteReference> {
    let person = provider
        .read(reference)
        .await
        .map_err(|err| OrderBridgeError::reference(format!("cannot read {reference}: {err}")))?;

    Ok(AbsoluteReference {
        url: absolutize(base_url, reference),
        display: model::primary_name_text(&person).map(str::to_string),
    })
}

fn required_reference<'a>(source: &'a Value, field: &str) -> Result<&'a str> {
    model::reference_str(source, field).ok_or_else(|| {
        OrderBridgeError::reference(format!("list record has no {field} reference"))
    })
}

fn absolutize(base_url: &Url, reference: &str) -> String {
    format!("{}/{}", base_url.as_str().trim_end_matches('/'), reference)
}
