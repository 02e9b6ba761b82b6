// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Variable schema and classification of dataset fields by display type.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::equality::sequences_equal;
use crate::record::Record;

/// Declared display type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    /// Numeric counts.
    Integer,
    /// Categorical values, possibly comma-delimited.
    Tag,
    /// Yes/no flags.
    Boolean,
    /// Free-form text.
    Text,
}

impl VariableType {
    /// Every type, in table order.
    pub const ALL: [Self; 4] = [Self::Integer, Self::Tag, Self::Boolean, Self::Text];
}

/// One schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    /// Field identifier as it appears in records.
    pub id: String,
    /// Human-readable label.
    #[serde(default)]
    pub name: Option<String>,
    /// Declared type.
    #[serde(rename = "type")]
    pub kind: VariableType,
}

impl VariableDescriptor {
    /// Descriptor without a display name.
    pub fn new(id: impl Into<String>, kind: VariableType) -> Self {
        Self {
            id: id.into(),
            name: None,
            kind,
        }
    }

    /// Attach a display name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, or the identifier when no name is set.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Entry of a type-partitioned schema: a bare id or an id with a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaEntry {
    /// Field id only.
    Id(String),
    /// Field id and label.
    Named {
        /// Field id.
        id: String,
        /// Display name.
        #[serde(default)]
        name: Option<String>,
    },
}

/// Schema with one list of fields per declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionedSchema {
    /// Integer fields.
    #[serde(default)]
    pub integer: Vec<SchemaEntry>,
    /// Tag fields.
    #[serde(default)]
    pub tag: Vec<SchemaEntry>,
    /// Boolean fields.
    #[serde(default)]
    pub boolean: Vec<SchemaEntry>,
    /// Free-text fields.
    #[serde(default)]
    pub text: Vec<SchemaEntry>,
}

/// A schema file: either a flat descriptor list or partitioned by type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariableSchema {
    /// Descriptors carrying their own `type`.
    Flat(Vec<VariableDescriptor>),
    /// Lists keyed by type.
    Partitioned(PartitionedSchema),
}

impl VariableSchema {
    /// Descriptors in display order.
    pub fn into_descriptors(self) -> Vec<VariableDescriptor> {
        match self {
            Self::Flat(list) => list,
            Self::Partitioned(parts) => list_all_variables(&parts),
        }
    }
}

/// Flatten a partitioned schema, type by type in table order.
pub fn list_all_variables(schema: &PartitionedSchema) -> Vec<VariableDescriptor> {
    let parts = [
        (VariableType::Integer, &schema.integer),
        (VariableType::Tag, &schema.tag),
        (VariableType::Boolean, &schema.boolean),
        (VariableType::Text, &schema.text),
    ];
    parts
        .into_iter()
        .flat_map(|(kind, entries)| {
            entries.iter().map(move |entry| match entry {
                SchemaEntry::Id(id) => VariableDescriptor::new(id.clone(), kind),
                SchemaEntry::Named { id, name } => VariableDescriptor {
                    id: id.clone(),
                    name: name.clone(),
                    kind,
                },
            })
        })
        .collect()
}

/// Fields of one type that carry data somewhere in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedVariableGroup {
    /// Shared type.
    #[serde(rename = "type")]
    pub kind: VariableType,
    /// Field ids in schema order.
    pub names: Vec<String>,
}

/// Number of records with a non-empty value for `field`.
pub fn count_rows_with_data(dataset: &[Record], field: &str) -> usize {
    dataset.iter().filter(|r| r.has_value(field)).count()
}

/// Whether any record has a non-empty value for `field`.
pub fn is_column_not_empty(dataset: &[Record], field: &str) -> bool {
    dataset.iter().any(|r| r.has_value(field))
}

/// Replace missing or empty values of `field` with `empty_value`.
///
/// Returns how many records were filled.
pub fn replace_undefined_values(dataset: &mut [Record], field: &str, empty_value: &Value) -> usize {
    let mut filled = 0;
    for record in dataset.iter_mut().filter(|r| !r.has_value(field)) {
        record
            .source_variables
            .insert(field.to_owned(), empty_value.clone());
        filled += 1;
    }
    filled
}

/// Group schema fields by type, keeping only fields with data.
///
/// Groups come out in [`VariableType::ALL`] order; names inside a group keep
/// the order of their first appearance in `variables`. Repeated ids are the
/// same field and only the first declaration counts.
pub fn classify(variables: &[VariableDescriptor], dataset: &[Record]) -> Vec<ClassifiedVariableGroup> {
    let mut seen = HashSet::new();
    let mut groups: Vec<ClassifiedVariableGroup> = Vec::new();

    for variable in variables {
        if variable.id.is_empty() {
            warn!("ignoring schema entry with an empty id");
            continue;
        }
        if !seen.insert(variable.id.as_str()) {
            continue;
        }
        if !is_column_not_empty(dataset, &variable.id) {
            debug!(field = %variable.id, "no data; left out of classification");
            continue;
        }
        match groups.iter_mut().find(|g| g.kind == variable.kind) {
            Some(group) => group.names.push(variable.id.clone()),
            None => groups.push(ClassifiedVariableGroup {
                kind: variable.kind,
                names: vec![variable.id.clone()],
            }),
        }
    }

    groups.sort_by_key(|g| g.kind);
    groups
}

/// Schema plus the groups derived from it for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Schema fields.
    pub variables: Vec<VariableDescriptor>,
    /// Fields with data, by type.
    pub groups: Vec<ClassifiedVariableGroup>,
}

impl Classification {
    /// Classify `variables` against `dataset`.
    pub fn new(variables: Vec<VariableDescriptor>, dataset: &[Record]) -> Self {
        let groups = classify(&variables, dataset);
        Self { variables, groups }
    }

    /// Field ids of one type, if the group exists.
    pub fn group(&self, kind: VariableType) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|g| g.kind == kind)
            .map(|g| g.names.as_slice())
    }

    /// Label for a field id: the schema's display name, or the id itself.
    pub fn label_for<'a>(&'a self, id: &'a str) -> &'a str {
        self.variables
            .iter()
            .find(|v| v.id == id)
            .map_or(id, VariableDescriptor::label)
    }
}

/// Single-slot cache of the last classification.
///
/// Keyed by layer id, caller-supplied dataset version, and the schema's field
/// ids; any change in those recomputes.
#[derive(Debug, Default)]
pub struct ClassifierCache {
    key: Option<CacheKey>,
    value: Classification,
}

#[derive(Debug)]
struct CacheKey {
    layer: String,
    dataset_version: u64,
    ids: Vec<String>,
}

impl ClassifierCache {
    /// Classification for the given inputs, reusing the previous result when
    /// the key matches.
    pub fn classify(
        &mut self,
        layer: &str,
        dataset_version: u64,
        variables: &[VariableDescriptor],
        dataset: &[Record],
    ) -> &Classification {
        let ids: Vec<&str> = variables.iter().map(|v| v.id.as_str()).collect();
        let hit = self.key.as_ref().is_some_and(|key| {
            key.layer == layer
                && key.dataset_version == dataset_version
                && sequences_equal(&key.ids, &ids)
                && sequences_equal(&self.value.variables, variables)
        });
        if hit {
            debug!(layer, dataset_version, "classification cache hit");
        } else {
            self.value = Classification::new(variables.to_vec(), dataset);
            self.key = Some(CacheKey {
                layer: layer.to_owned(),
                dataset_version,
                ids: ids.into_iter().map(str::to_owned).collect(),
            });
        }
        &self.value
    }
}
