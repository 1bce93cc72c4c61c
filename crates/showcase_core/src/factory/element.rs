//! Element attribute bags as handed over by the page bootstrap.
//!
//! # Responsibility
//! - Hold the `data-*` attributes and inner markup of one project element.
//! - Turn either supported attribute form into detail fields.
//!
//! # Invariants
//! - Attribute names are stored lowercase and trimmed.
//! - The JSON form takes precedence over discrete attributes.
//! - A canonical detail name takes precedence over its alias (`link`, `img`).

use crate::factory::project_factory::FactoryError;
use crate::model::project::{DetailError, DetailKey, DetailValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute carrying the whole detail set as one JSON object.
pub const PROJECT_DETAILS_ATTR: &str = "data-project-details";
/// Short alias of [`PROJECT_DETAILS_ATTR`].
pub const PROJECT_ATTR: &str = "data-project";

const DISCRETE_ATTRS: &[(&str, DetailKey)] = &[
    ("data-label", DetailKey::Label),
    ("data-title", DetailKey::Title),
    ("data-description", DetailKey::Description),
    ("data-link", DetailKey::Url),
    ("data-url", DetailKey::Url),
    ("data-image", DetailKey::Image),
    ("data-tags", DetailKey::Tags),
    ("data-date", DetailKey::Date),
];

static IMG_SRC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<img\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid img src regex")
});

/// Attribute bag of one page element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementSource {
    attributes: BTreeMap<String, String>,
    inner_html: Option<String>,
}

impl ElementSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_inner_html(mut self, html: impl Into<String>) -> Self {
        self.inner_html = Some(html.into());
        self
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes
            .insert(name.trim().to_ascii_lowercase(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.trim().to_ascii_lowercase().as_str())
            .map(String::as_str)
    }

    pub fn inner_html(&self) -> Option<&str> {
        self.inner_html.as_deref()
    }

    /// Whether the element is marked as a project in either form.
    pub fn has_marker(&self) -> bool {
        self.details_json().is_some()
            || DISCRETE_ATTRS
                .iter()
                .any(|(name, _)| self.attributes.contains_key(*name))
    }

    /// First `<img src>` found in the inner markup.
    pub fn first_image_src(&self) -> Option<String> {
        let html = self.inner_html.as_deref()?;
        IMG_SRC_RE
            .captures(html)
            .and_then(|captures| (1..=3).find_map(|group| captures.get(group)))
            .map(|src| src.as_str().trim().to_string())
            .filter(|src| !src.is_empty())
    }

    /// Extracts detail fields from whichever attribute form is present.
    ///
    /// Tags given as a single string are split on `tag_separator`.
    ///
    /// # Errors
    /// - `MissingMarker` when neither form is present.
    /// - `MalformedDetails` when the JSON form is not a JSON object.
    /// - `Detail(InvalidDetailValue)` when a JSON detail is neither a string
    ///   nor a list of strings.
    pub fn detail_fields(
        &self,
        tag_separator: char,
    ) -> Result<Vec<(DetailKey, DetailValue)>, FactoryError> {
        let mut fields = if let Some(raw) = self.details_json() {
            json_fields(raw)?
        } else if self.has_marker() {
            self.discrete_fields()
        } else {
            return Err(FactoryError::MissingMarker);
        };

        for (key, value) in &mut fields {
            if *key == DetailKey::Tags {
                if let DetailValue::Text(raw) = value {
                    *value = DetailValue::List(split_tags(raw, tag_separator));
                }
            }
        }
        Ok(fields)
    }

    fn details_json(&self) -> Option<&str> {
        self.attribute(PROJECT_DETAILS_ATTR)
            .or_else(|| self.attribute(PROJECT_ATTR))
    }

    fn discrete_fields(&self) -> Vec<(DetailKey, DetailValue)> {
        DISCRETE_ATTRS
            .iter()
            .filter(|(name, key)| {
                !shadowed_alias(name.trim_start_matches("data-"), *key, |canonical| {
                    self.attributes.contains_key(format!("data-{canonical}").as_str())
                })
            })
            .filter_map(|(name, key)| {
                self.attributes
                    .get(*name)
                    .map(|value| (*key, DetailValue::Text(value.clone())))
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ElementSource
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut element = Self::new();
        for (name, value) in iter {
            element.set_attribute(name.as_ref(), value);
        }
        element
    }
}

/// Whether `name` is an alias of `key` whose canonical name is also present.
fn shadowed_alias(name: &str, key: DetailKey, has_canonical: impl Fn(&str) -> bool) -> bool {
    name != key.as_str() && has_canonical(key.as_str())
}

/// Splits a separated tag string, trimming entries and dropping empty ones.
pub fn split_tags(raw: &str, separator: char) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn json_fields(raw: &str) -> Result<Vec<(DetailKey, DetailValue)>, FactoryError> {
    let parsed: Value =
        serde_json::from_str(raw).map_err(|err| FactoryError::MalformedDetails(err.to_string()))?;
    let Value::Object(object) = parsed else {
        return Err(FactoryError::MalformedDetails(
            "expected a JSON object".to_string(),
        ));
    };

    let mut fields = Vec::new();
    for (name, value) in &object {
        let Some(key) = DetailKey::parse(name) else {
            continue;
        };
        if value.is_null()
            || shadowed_alias(name, key, |canonical| object.contains_key(canonical))
        {
            continue;
        }
        let value = DetailValue::from_json(value).ok_or(DetailError::InvalidDetailValue {
            key,
            reason: "expected a string or a list of strings",
        })?;
        fields.push((key, value));
    }
    fields.sort_by_key(|(key, _)| *key);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::{split_tags, ElementSource};
    use crate::factory::project_factory::FactoryError;
    use crate::model::project::{DetailKey, DetailValue};

    #[test]
    fn split_tags_trims_and_drops_empty_entries() {
        assert_eq!(
            split_tags(" rust, web ,,cli ", ','),
            vec!["rust".to_string(), "web".to_string(), "cli".to_string()]
        );
        assert!(split_tags("", ',').is_empty());
    }

    #[test]
    fn attribute_names_are_case_insensitive() {
        let element = ElementSource::new().with_attribute("Data-Title", "Demo");
        assert_eq!(element.attribute("data-title"), Some("Demo"));
        assert!(element.has_marker());
    }

    #[test]
    fn first_image_src_reads_single_and_double_quotes() {
        let element = ElementSource::new()
            .with_inner_html(r#"<p>hi</p><IMG class="cover" src='shots/one.png'><img src="two.png">"#);
        assert_eq!(element.first_image_src().as_deref(), Some("shots/one.png"));
        assert_eq!(ElementSource::new().first_image_src(), None);
    }

    #[test]
    fn detail_fields_requires_marker() {
        let element = ElementSource::new().with_attribute("class", "project");
        assert_eq!(
            element.detail_fields(','),
            Err(FactoryError::MissingMarker)
        );
    }

    #[test]
    fn json_form_wins_over_discrete_attributes() {
        let element = ElementSource::new()
            .with_attribute("data-title", "Discrete")
            .with_attribute(
                "data-project-details",
                r#"{"title":"Json","tags":"a, b","extra":1,"date":null}"#,
            );
        let fields = element.detail_fields(',').expect("fields");
        assert_eq!(
            fields,
            vec![
                (DetailKey::Title, DetailValue::Text("Json".into())),
                (DetailKey::Tags, DetailValue::List(vec!["a".into(), "b".into()])),
            ]
        );
    }

    #[test]
    fn canonical_names_win_over_aliases() {
        let element = ElementSource::new().with_attribute(
            "data-project-details",
            r#"{"image":"a.png","img":"b.png","url":"u","link":"l"}"#,
        );
        assert_eq!(
            element.detail_fields(',').expect("fields"),
            vec![
                (DetailKey::Url, DetailValue::Text("u".into())),
                (DetailKey::Image, DetailValue::Text("a.png".into())),
            ]
        );

        let element = ElementSource::new()
            .with_attribute("data-url", "canonical")
            .with_attribute("data-link", "alias");
        assert_eq!(
            element.detail_fields(',').expect("fields"),
            vec![(DetailKey::Url, DetailValue::Text("canonical".into()))]
        );
    }

    #[test]
    fn aliases_apply_when_canonical_name_is_absent() {
        let element =
            ElementSource::new().with_attribute("data-project-details", r#"{"img":"b.png"}"#);
        assert_eq!(
            element.detail_fields(',').expect("fields"),
            vec![(DetailKey::Image, DetailValue::Text("b.png".into()))]
        );
    }

    #[test]
    fn first_image_src_reads_unquoted_values() {
        let element = ElementSource::new().with_inner_html("<div><img alt=x src=pic.png></div>");
        assert_eq!(element.first_image_src().as_deref(), Some("pic.png"));
    }

    #[test]
    fn json_form_rejects_non_object_payloads() {
        let element = ElementSource::new().with_attribute("data-project", "[1, 2]");
        assert!(matches!(
            element.detail_fields(','),
            Err(FactoryError::MalformedDetails(_))
        ));
    }
}
