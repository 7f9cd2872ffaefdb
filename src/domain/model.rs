use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw object from the API's `data` array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn from_object(obj: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }

    /// Scalar field as text. Null, missing, and structured values read as `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Like [`Record::text`], but `false`, `0`, `0.0`, and `""` also read as `None`.
    pub fn truthy_text(&self, key: &str) -> Option<String> {
        match self.data.get(key)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            serde_json::Value::Bool(true) => Some("True".to_string()),
            _ => None,
        }
    }

    /// Whether `key` mentions `needle`, either as a string or inside a string array.
    pub fn mentions(&self, key: &str, needle: &str) -> bool {
        match self.data.get(key) {
            Some(serde_json::Value::String(s)) => s.contains(needle),
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .any(|s| s.contains(needle)),
            _ => false,
        }
    }
}

/// Output record; field order is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub name: String,
    pub avatar: String,
    pub homepage: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorRules {
    pub exclusion_marker: String,
    pub avatar_base: String,
    pub encode_spaces: bool,
    pub homepage_template: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    pub mentors: Vec<Mentor>,
    pub excluded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub fetched: usize,
    pub excluded: usize,
    pub skipped: usize,
    pub kept: usize,
    pub output_path: String,
}
