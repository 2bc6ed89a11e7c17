use serde_json::Value;

use crate::constraint::{ConstraintRegistry, ResourceValidator, ValidationOutcome};
use crate::model::FieldAccess;

/// Checks a record instance against the required-field rule declared for its
/// type. First violation wins: fields are checked in declaration order and
/// the remaining fields are not inspected once one fails.
#[derive(Debug, Clone, Default)]
pub struct ConstraintValidator {
    registry: ConstraintRegistry,
}

impl ConstraintValidator {
    pub fn new(registry: ConstraintRegistry) -> Self {
        Self { registry }
    }

    pub fn from_properties(text: &str) -> Self {
        Self::new(ConstraintRegistry::from_properties(text))
    }

    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// Validate any instance exposing the [`FieldAccess`] capability. A type
    /// with no declared rule passes trivially.
    pub fn validate<A>(&self, type_name: &str, instance: &A) -> ValidationOutcome
    where
        A: FieldAccess + ?Sized,
    {
        let Some(rule) = self.registry.rules_for(type_name) else {
            return ValidationOutcome::pass();
        };

        for field in rule.fields() {
            match instance.field(field) {
                None => {
                    return ValidationOutcome::fail(
                        field,
                        format!("{type_name} constraint conflict: {field} cannot be null."),
                    );
                }
                Some(Value::Array(items)) if items.is_empty() => {
                    return ValidationOutcome::fail(
                        field,
                        format!("{type_name} constraint conflict: {field} cannot be empty."),
                    );
                }
                Some(_) => {}
            }
        }

        ValidationOutcome::pass()
    }
}

impl ResourceValidator for ConstraintValidator {
    fn validate_resource(&self, resource_type: &str, resource: &Value) -> ValidationOutcome {
        self.validate(resource_type, resource)
    }
}
