use fhir_orderbridge::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn registry_keeps_declaration_order_and_deduplicates() {
    let registry = ConstraintRegistry::load([
        "List.subject",
        "List.encounter",
        "List.subject",
        "Patient.name",
    ]);

    let rule = registry.rules_for("List").unwrap();
    assert_eq!(
        rule.fields().collect::<Vec<_>>(),
        vec!["subject", "encounter"]
    );
    assert_eq!(registry.rules_for("Patient").unwrap().len(), 1);
}

#[test]
fn malformed_entries_are_skipped() {
    let registry = ConstraintRegistry::load(["nodot", ".leading", "trailing.", "List.subject"]);
    assert_eq!(registry.len(), 1);
    assert!(registry.rules_for("List").is_some());
}

#[test]
fn unconfigured_type_is_unconstrained() {
    let registry = ConstraintRegistry::load(["List.subject"]);
    assert!(registry.rules_for("Observation").is_none());
}

#[test]
fn loading_identical_entries_twice_yields_equal_registries() {
    let entries = ["List.subject", "List.encounter", "Patient.name"];
    assert_eq!(
        ConstraintRegistry::load(entries),
        ConstraintRegistry::load(entries)
    );
}

#[test]
fn registry_from_properties_ignores_values_and_comments() {
    let text = "# required fields\nList.subject=anything\nList.encounter\n";
    let registry = ConstraintRegistry::from_properties(text);
    let rule = registry.rules_for("List").unwrap();
    assert_eq!(
        rule.fields().collect::<Vec<_>>(),
        vec!["subject", "encounter"]
    );
}

#[test]
fn all_required_fields_present_passes() {
    let validator = ConstraintValidator::new(ConstraintRegistry::load([
        "List.subject",
        "List.entry",
    ]));
    let list = json!({
        "resourceType": "List",
        "subject": {"reference": "Patient/p1"},
        "entry": [{"item": {"reference": "Observation/o1"}}],
    });

    let outcome = validator.validate_resource("List", &list);
    assert!(outcome.passed);
    assert_eq!(outcome.failing_field, None);
    assert_eq!(outcome.header_message(), NO_ISSUES_MARKER);
    assert_eq!(outcome.severity(), ValidationSeverity::Information);
}

#[test]
fn first_violation_wins_in_declared_order() {
    let validator = ConstraintValidator::new(ConstraintRegistry::load([
        "List.subject",
        "List.encounter",
    ]));
    // Both fields are missing; only the first declared one is reported.
    let outcome = validator.validate_resource("List", &json!({"resourceType": "List"}));

    assert!(!outcome.passed);
    assert_eq!(outcome.failing_field.as_deref(), Some("subject"));
    assert_eq!(
        outcome.message.as_deref(),
        Some("List constraint conflict: subject cannot be null.")
    );
    assert_eq!(outcome.severity(), ValidationSeverity::Error);
}

#[test]
fn a_later_field_is_reported_once_earlier_ones_pass() {
    let validator = ConstraintValidator::new(ConstraintRegistry::load([
        "List.subject",
        "List.encounter",
    ]));
    let list = json!({
        "resourceType": "List",
        "subject": {"reference": "Patient/p1"},
    });

    let outcome = validator.validate_resource("List", &list);
    assert_eq!(outcome.failing_field.as_deref(), Some("encounter"));
}

#[test]
fn explicit_null_counts_as_absent() {
    let validator = ConstraintValidator::new(ConstraintRegistry::load(["List.subject"]));
    let outcome =
        validator.validate_resource("List", &json!({"resourceType": "List", "subject": null}));

    assert_eq!(
        outcome.message.as_deref(),
        Some("List constraint conflict: subject cannot be null.")
    );
}

#[test]
fn empty_collection_field_fails_with_its_own_message() {
    let validator = ConstraintValidator::new(ConstraintRegistry::load(["List.entry"]));
    let outcome =
        validator.validate_resource("List", &json!({"resourceType": "List", "entry": []}));

    assert!(!outcome.passed);
    assert_eq!(
        outcome.message.as_deref(),
        Some("List constraint conflict: entry cannot be empty.")
    );
}

#[test]
fn unknown_field_name_degrades_to_a_validation_failure() {
    // A configuration typo must never take the request down with it.
    let validator = ConstraintValidator::new(ConstraintRegistry::load(["List.subjcet"]));
    let outcome = validator.validate_resource(
        "List",
        &json!({"resourceType": "List", "subject": {"reference": "Patient/p1"}}),
    );

    assert!(!outcome.passed);
    assert_eq!(outcome.failing_field.as_deref(), Some("subjcet"));
}

#[test]
fn non_object_instances_fail_instead_of_erroring() {
    let validator = ConstraintValidator::new(ConstraintRegistry::load(["List.subject"]));
    let outcome = validator.validate_resource("List", &json!("not an object"));
    assert!(!outcome.passed);
}
