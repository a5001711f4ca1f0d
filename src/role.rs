//! Slide roles and field content

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The three fixed positions of a carousel, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideRole {
    Hook,
    Body,
    Reward,
}

impl SlideRole {
    pub const ALL: [SlideRole; 3] = [SlideRole::Hook, SlideRole::Body, SlideRole::Reward];

    /// Zero-based position in the carousel
    pub fn index(self) -> usize {
        match self {
            SlideRole::Hook => 0,
            SlideRole::Body => 1,
            SlideRole::Reward => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// One-based slide number used in filenames and node ids
    pub fn number(self) -> usize {
        self.index() + 1
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlideRole::Hook => "hook",
            SlideRole::Body => "body",
            SlideRole::Reward => "reward",
        }
    }
}

impl fmt::Display for SlideRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single editable field: free text or a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Text view; lists are joined with line breaks.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join("\n"),
        }
    }

    /// List view; text is split on line breaks, blank lines dropped.
    pub fn as_list(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => s
                .split('\n')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            FieldValue::List(items) => items.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Field name → value. Ordered so serialized content is stable.
pub type Content = BTreeMap<String, FieldValue>;

/// Read accessors used by the renderers.
pub trait ContentExt {
    fn text(&self, field: &str) -> String;
    fn items(&self, field: &str) -> Vec<String>;
}

impl ContentExt for Content {
    fn text(&self, field: &str) -> String {
        self.get(field).map(FieldValue::as_text).unwrap_or_default()
    }

    fn items(&self, field: &str) -> Vec<String> {
        self.get(field).map(FieldValue::as_list).unwrap_or_default()
    }
}
