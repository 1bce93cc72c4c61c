//! Project record domain model.
//!
//! # Responsibility
//! - Define the canonical project record shared by store, factory and navigator.
//! - Keep the set of recognized details closed and validated.
//!
//! # Invariants
//! - `id` is assigned once at construction and never changes.
//! - `label` and `title` are always present.
//! - Detail mutation either applies fully or leaves the record untouched.
//! - `tags` only ever holds a list; every other detail only holds a string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric project identity, sequential per factory.
pub type ProjectId = u64;

/// Closed set of details a project record recognizes.
///
/// Declaration order is the serialization order of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetailKey {
    Label,
    Title,
    Description,
    Url,
    Image,
    Tags,
    Date,
}

impl DetailKey {
    /// Every recognized detail, in record order.
    ///
    /// A record is complete only when each of these is present.
    pub const ALL: [DetailKey; 7] = [
        Self::Label,
        Self::Title,
        Self::Description,
        Self::Url,
        Self::Image,
        Self::Tags,
        Self::Date,
    ];

    /// Canonical key name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Title => "title",
            Self::Description => "description",
            Self::Url => "url",
            Self::Image => "image",
            Self::Tags => "tags",
            Self::Date => "date",
        }
    }

    /// Parses a key name, accepting the markup aliases `link` and `img`.
    ///
    /// Returns `None` for unrecognized keys.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "label" => Some(Self::Label),
            "title" => Some(Self::Title),
            "description" => Some(Self::Description),
            "url" | "link" => Some(Self::Url),
            "image" | "img" => Some(Self::Image),
            "tags" => Some(Self::Tags),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Whether this detail carries a list of strings instead of one string.
    pub fn is_list(self) -> bool {
        matches!(self, Self::Tags)
    }
}

impl AsRef<str> for DetailKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for DetailKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value shape of one detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Text(String),
    List(Vec<String>),
}

impl DetailValue {
    /// Converts a loosely typed JSON value.
    ///
    /// Only strings and arrays whose every element is a string are accepted.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items.as_slice()),
        }
    }

    /// Empty strings count as absent; lists are always present.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::List(_) => true,
        }
    }
}

impl From<&str> for DetailValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DetailValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for DetailValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for DetailValue {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(str::to_string).collect())
    }
}

/// Detail lookup and mutation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailError {
    UnknownDetail(String),
    InvalidDetailValue {
        key: DetailKey,
        reason: &'static str,
    },
}

impl Display for DetailError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownDetail(key) => write!(f, "unknown project detail: `{key}`"),
            Self::InvalidDetailValue { key, reason } => {
                write!(f, "invalid value for project detail `{key}`: {reason}")
            }
        }
    }
}

impl Error for DetailError {}

/// One project entry of the page catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectRecord {
    label: String,
    title: String,
    description: Option<String>,
    url: Option<String>,
    image: Option<String>,
    tags: Option<Vec<String>>,
    date: Option<String>,
    id: ProjectId,
}

impl ProjectRecord {
    /// Creates a record with only the always-present details set.
    pub fn new(id: ProjectId, label: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            title: title.into(),
            description: None,
            url: None,
            image: None,
            tags: None,
            date: None,
            id,
        }
    }

    /// Rebuilds a record from its JSON form (see [`ProjectRecord::to_json`]).
    ///
    /// # Errors
    /// - Fails when `value` is not an object carrying `id`, `label` and
    ///   `title`, has unknown fields, or has wrongly shaped details.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|value| value == tag))
    }

    /// Returns the value of a recognized detail, `None` for unknown or unset ones.
    pub fn get_detail(&self, key: &str) -> Option<DetailValue> {
        DetailKey::parse(key).and_then(|detail| self.detail(detail))
    }

    /// Typed variant of [`ProjectRecord::get_detail`].
    pub fn detail(&self, key: DetailKey) -> Option<DetailValue> {
        let text = |value: &Option<String>| value.clone().map(DetailValue::Text);
        match key {
            DetailKey::Label => Some(DetailValue::Text(self.label.clone())),
            DetailKey::Title => Some(DetailValue::Text(self.title.clone())),
            DetailKey::Description => text(&self.description),
            DetailKey::Url => text(&self.url),
            DetailKey::Image => text(&self.image),
            DetailKey::Tags => self.tags.clone().map(DetailValue::List),
            DetailKey::Date => text(&self.date),
        }
    }

    /// Sets one detail by name.
    ///
    /// # Errors
    /// - `UnknownDetail` when `key` is not recognized.
    /// - `InvalidDetailValue` when the value shape does not match the key.
    ///
    /// The record is unchanged whenever an error is returned.
    pub fn set_detail(
        &mut self,
        key: &str,
        value: impl Into<DetailValue>,
    ) -> Result<(), DetailError> {
        let detail =
            DetailKey::parse(key).ok_or_else(|| DetailError::UnknownDetail(key.to_string()))?;
        self.set(detail, value.into())
    }

    /// Sets one detail from a loosely typed JSON value.
    ///
    /// Accepts strings and lists of strings only.
    pub fn set_detail_value(&mut self, key: &str, value: &Value) -> Result<(), DetailError> {
        let detail =
            DetailKey::parse(key).ok_or_else(|| DetailError::UnknownDetail(key.to_string()))?;
        let value = DetailValue::from_json(value).ok_or(DetailError::InvalidDetailValue {
            key: detail,
            reason: "expected a string or a list of strings",
        })?;
        self.set(detail, value)
    }

    /// Typed variant of [`ProjectRecord::set_detail`].
    pub fn set(&mut self, key: DetailKey, value: DetailValue) -> Result<(), DetailError> {
        match (key, value) {
            (DetailKey::Tags, DetailValue::List(items)) => self.tags = Some(items),
            (DetailKey::Tags, DetailValue::Text(_)) => {
                return Err(DetailError::InvalidDetailValue {
                    key,
                    reason: "expected a list of strings",
                });
            }
            (_, DetailValue::List(_)) => {
                return Err(DetailError::InvalidDetailValue {
                    key,
                    reason: "expected a string",
                });
            }
            (DetailKey::Label, DetailValue::Text(text)) => self.label = text,
            (DetailKey::Title, DetailValue::Text(text)) => self.title = text,
            (DetailKey::Description, DetailValue::Text(text)) => self.description = Some(text),
            (DetailKey::Url, DetailValue::Text(text)) => self.url = Some(text),
            (DetailKey::Image, DetailValue::Text(text)) => self.image = Some(text),
            (DetailKey::Date, DetailValue::Text(text)) => self.date = Some(text),
        }
        Ok(())
    }

    /// Required details that are currently unset, in record order.
    pub fn missing_details(&self) -> Vec<DetailKey> {
        DetailKey::ALL
            .into_iter()
            .filter(|key| self.detail(*key).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_details().is_empty()
    }

    /// Deterministic JSON encoding of all details, for logs and debugging.
    pub fn to_json(&self) -> String {
        // Plain strings and integers only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
