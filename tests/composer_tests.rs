mod common;

use common::*;
use fhir_orderbridge::order::composer::{compose_external_id, modality_from};
use fhir_orderbridge::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;

fn base_url() -> Url {
    Url::parse("http://records.example/fhir").unwrap()
}

#[tokio::test]
async fn composes_an_order_with_absolute_references_and_displays() {
    let provider = seeded_provider().await;
    let order = OrderComposer::new()
        .compose(&sample_list(), &base_url(), &provider)
        .await
        .unwrap();

    assert_eq!(order.external_id, "DXOD.A123456.ECNT0007");
    assert_eq!(
        order.subject.url,
        "http://records.example/fhir/Patient/HOSP1.A123456"
    );
    assert_eq!(order.subject.display.as_deref(), Some("Chen, Mei"));
    assert_eq!(
        order.orderer.url,
        "http://records.example/fhir/Practitioner/DR.77"
    );
    assert_eq!(order.orderer.display.as_deref(), Some("Dr. Wu"));
    assert_eq!(
        order.encounter.url,
        "http://records.example/fhir/Encounter/E.2024.0007"
    );
    assert_eq!(order.encounter.display, None);
    assert_eq!(order.priority, OrderPriority::Routine);
}

#[tokio::test]
async fn missing_subject_reference_is_a_resolution_error() {
    let provider = seeded_provider().await;
    let mut list = sample_list();
    list.as_object_mut().unwrap().remove("subject");

    let err = OrderComposer::new()
        .compose(&list, &base_url(), &provider)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderBridgeError::ReferenceResolution { .. }));
}

#[tokio::test]
async fn unresolvable_practitioner_is_a_resolution_error() {
    let provider = seeded_provider().await;
    provider.remove("Practitioner/DR.77").await;

    let err = OrderComposer::new()
        .compose(&sample_list(), &base_url(), &provider)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderBridgeError::ReferenceResolution { .. }));
}

#[test]
fn external_id_matches_the_wire_contract() {
    assert_eq!(
        compose_external_id("HOSP1.A123456", "E.2024.0007").unwrap(),
        "DXOD.A123456.ECNT0007"
    );
}

#[test]
fn modality_comes_from_the_fixed_coding_system() {
    assert_eq!(modality_from(&sample_encounter()).unwrap(), "CT");

    let other_system = json!({
        "resourceType": "Encounter",
        "type": [{"coding": [{"system": "http://other.example", "code": "MR"}]}],
    });
    assert!(modality_from(&other_system).is_err());
}

#[test]
fn propagation_guard_matches_the_production_rule() {
    let opd_emr = sample_list();
    assert!(OrderComposer::is_outpatient(&opd_emr));
    assert!(OrderComposer::is_from_emr(&opd_emr));
    assert!(OrderComposer::should_propagate(&opd_emr));

    // An EMR-created list for a non-outpatient visit is the one case skipped.
    let mut ward_emr = sample_list();
    ward_emr["code"] = json!({"coding": [{"code": "IPD"}]});
    assert!(!OrderComposer::should_propagate(&ward_emr));

    let mut ward_external = ward_emr.clone();
    ward_external["identifier"] = json!([{"system": "Creator", "value": "HIS"}]);
    assert!(OrderComposer::should_propagate(&ward_external));
}
