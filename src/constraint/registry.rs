use std::collections::HashMap;

use indexmap::IndexSet;

use crate::core::parse_properties;

/// Required-field rule for one record type. Fields keep declaration order;
/// duplicate declarations are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintRule {
    type_name: String,
    fields: IndexSet<String>,
}

impl ConstraintRule {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Mapping from record-type name to its required-field rule.
///
/// Built once at startup from configuration entries of the form
/// `TypeName.fieldName`; read-only afterwards, safe for unsynchronized
/// concurrent reads. Loading the same entries twice yields value-equal
/// registries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintRegistry {
    rules: HashMap<String, ConstraintRule>,
}

impl ConstraintRegistry {
    /// Build a registry from configuration entries. Entries that cannot
    /// declare a constraint (no `.`, or an empty type or field segment) are
    /// skipped; unusable configuration is ignored rather than rejected.
    pub fn load<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules: HashMap<String, ConstraintRule> = HashMap::new();

        for entry in entries {
            let entry = entry.as_ref();
            let mut segments = entry.split('.');
            let (Some(type_name), Some(field)) = (segments.next(), segments.next()) else {
                tracing::debug!(entry, "skipping constraint entry without a field segment");
                continue;
            };
            if type_name.is_empty() || field.is_empty() {
                tracing::debug!(entry, "skipping constraint entry with an empty segment");
                continue;
            }

            rules
                .entry(type_name.to_string())
                .or_insert_with(|| ConstraintRule {
                    type_name: type_name.to_string(),
                    fields: IndexSet::new(),
                })
                .fields
                .insert(field.to_string());
            tracing::info!(entry, "constraint registered");
        }

        Self { rules }
    }

    /// Build a registry from properties text, taking every key as an entry
    /// (values are ignored).
    pub fn from_properties(text: &str) -> Self {
        Self::load(parse_properties(text).into_iter().map(|(key, _)| key))
    }

    /// The rule declared for `type_name`, or `None` when the type is
    /// unconstrained.
    pub fn rules_for(&self, type_name: &str) -> Option<&ConstraintRule> {
        self.rules.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
