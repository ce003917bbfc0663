//! Render context: the variables a template sees

use crate::domain::{ContentObject, SimilarObject, TagCount, WeightedTag};
use crate::error::{Result, TagCloudError};
use serde::Serialize;
use std::collections::BTreeMap;

/// A value stored in the render context
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Object(ContentObject),
    Objects(Vec<ContentObject>),
    Tags(Vec<TagCount>),
    Cloud(Vec<WeightedTag>),
    Similar(Vec<SimilarObject>),
    /// Already rendered markup, inserted without escaping
    Html(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Object(_) => "object",
            Value::Objects(_) => "object list",
            Value::Tags(_) => "tag list",
            Value::Cloud(_) => "tag cloud",
            Value::Similar(_) => "similar object list",
            Value::Html(_) => "markup",
        }
    }
}

/// Variables of one render
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    vars: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Look up a variable that must be present
    pub fn lookup(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| {
            TagCloudError::Lookup(format!("Variable '{}' is not in the context", name))
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

/// Split a `name=value` binding as given on the command line
pub fn parse_binding(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((name, value)) if is_identifier(name.trim()) => Ok((name.trim(), value.trim())),
        _ => Err(TagCloudError::Config(format!(
            "Invalid binding '{}' (expected name=value)",
            raw
        ))),
    }
}

/// Whether `name` can be used as a context variable
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
