//! Blueprints and cycle policies.
//!
//! A [`Blueprint`] is the per-template configuration of a page. Only the
//! parts the navigator consumes are modelled: the optional [`CyclePolicy`]
//! and the `read` option consulted by [`BlueprintAccess`](crate::BlueprintAccess).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::page::DEFAULT_TEMPLATE;
use crate::sort::SortSpec;

/// Wildcard value that disables a cycle filter dimension.
pub const ALL: &str = "all";

/// Page blueprint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Blueprint {
    /// Display title of the blueprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Navigation cycle for `next_cycle` / `prev_cycle`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<CyclePolicy>,
    /// Page options.
    pub options: BlueprintOptions,
}

/// Page options declared by a blueprint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BlueprintOptions {
    /// Whether pages using this blueprint may be read.
    pub read: bool,
}

impl Default for BlueprintOptions {
    fn default() -> Self {
        Self { read: true }
    }
}

/// Declarative override for cycle navigation.
///
/// Absent `status` / `template` restrict the cycle to the page's own status
/// and template. Defining `status` (even as a wildcard) widens the base
/// collection to children and drafts of the parent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CyclePolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<FilterSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<FilterSet>,
    #[serde(
        rename = "sortBy",
        alias = "sort_by",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort_by: Option<SortSpec>,
}

impl CyclePolicy {
    /// Policy that cycles over every readable sibling regardless of status
    /// or template.
    #[must_use]
    pub fn all() -> Self {
        Self {
            status: Some(FilterSet::all()),
            template: Some(FilterSet::all()),
            sort_by: None,
        }
    }
}

/// Set of accepted values for one cycle filter dimension.
///
/// Deserialises permissively: a string is a one-element set, a sequence
/// contributes its elements, and anything else becomes the one-element set
/// of its JSON rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterSet {
    values: Vec<String>,
}

impl FilterSet {
    /// The wildcard set.
    #[must_use]
    pub fn all() -> Self {
        Self::one(ALL)
    }

    /// Single-value set.
    #[must_use]
    pub fn one(value: impl Into<String>) -> Self {
        Self {
            values: vec![value.into()],
        }
    }

    /// Whether the set contains the [`ALL`] wildcard.
    #[must_use]
    pub fn is_all(&self) -> bool {
        self.contains(ALL)
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coerce an arbitrary value into a set.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => items.iter().map(render_value).collect(),
            other => Self::one(render_value(other)),
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl<S: Into<String>> FromIterator<S> for FilterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl Serialize for FilterSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.values)
    }
}

impl Serialize for SortSpec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Blueprint registry keyed by template name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Blueprints {
    by_template: HashMap<String, Blueprint>,
}

impl Blueprints {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blueprint, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, template: impl Into<String>, blueprint: Blueprint) -> Self {
        self.insert(template, blueprint);
        self
    }

    pub fn insert(&mut self, template: impl Into<String>, blueprint: Blueprint) {
        self.by_template.insert(template.into(), blueprint);
    }

    /// Blueprint for a template, falling back to the `default` blueprint.
    #[must_use]
    pub fn get(&self, template: &str) -> Option<&Blueprint> {
        self.by_template
            .get(template)
            .or_else(|| self.by_template.get(DEFAULT_TEMPLATE))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Blueprint)> {
        self.by_template.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_template.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_template.is_empty()
    }
}
