//! Project factory.
//!
//! # Responsibility
//! - Build project records from detail fields or page element attributes.
//! - Assign sequential ids and fallback labels/titles.
//! - Register built projects in a store.
//!
//! # Invariants
//! - Ids start at 0 and increase by one per built record, per factory.
//! - A failed build does not consume an id.
//! - Unrecognized keys are ignored; empty strings count as absent.

use crate::factory::element::{split_tags, ElementSource};
use crate::model::project::{DetailError, DetailKey, DetailValue, ProjectId, ProjectRecord};
use crate::store::project_store::{ProjectHandle, ProjectStore};
use log::{debug, warn};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEFAULT_LABEL_PREFIX: &str = "new-project";
const DEFAULT_TAG_SEPARATOR: char = ',';

/// Factory build options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FactoryOptions {
    /// Prefix of generated labels/titles; the id is appended.
    pub default_label_prefix: String,
    /// Separator for tags given as one string.
    pub tag_separator: char,
    /// Reject records missing any of `DetailKey::ALL` instead of only logging.
    pub require_complete: bool,
    /// Use the first `<img src>` of the element markup when no image is set.
    pub recover_image_from_markup: bool,
}

impl Default for FactoryOptions {
    fn default() -> Self {
        Self {
            default_label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            tag_separator: DEFAULT_TAG_SEPARATOR,
            require_complete: false,
            recover_image_from_markup: true,
        }
    }
}

/// Project build errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// Element carries neither the JSON details attribute nor discrete ones.
    MissingMarker,
    /// JSON details attribute could not be decoded into an object.
    MalformedDetails(String),
    /// Record lacks required details while `require_complete` is set.
    IncompleteRecord { missing: Vec<DetailKey> },
    /// A detail value has the wrong shape.
    Detail(DetailError),
}

impl Display for FactoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMarker => write!(f, "element has no project details marker"),
            Self::MalformedDetails(message) => {
                write!(f, "malformed project details attribute: {message}")
            }
            Self::IncompleteRecord { missing } => {
                let names = missing
                    .iter()
                    .map(|key| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "project is missing required details: {names}")
            }
            Self::Detail(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FactoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Detail(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DetailError> for FactoryError {
    fn from(value: DetailError) -> Self {
        Self::Detail(value)
    }
}

/// Builds project records with a per-instance id sequence.
#[derive(Debug, Default)]
pub struct ProjectFactory {
    counter: ProjectId,
    options: FactoryOptions,
}

impl ProjectFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FactoryOptions) -> Self {
        Self {
            counter: 0,
            options,
        }
    }

    pub fn options(&self) -> &FactoryOptions {
        &self.options
    }

    /// Id the next successfully built record will receive.
    pub fn next_id(&self) -> ProjectId {
        self.counter
    }

    /// Builds a record from named detail fields.
    ///
    /// # Contract
    /// - Missing `label`/`title` default to `<prefix><id>`.
    /// - Missing optional details stay unset.
    /// - Tags given as one string are split on the configured separator.
    ///
    /// # Errors
    /// - `Detail(InvalidDetailValue)` when a string detail is given a list.
    /// - `IncompleteRecord` when `require_complete` is set and details are missing.
    pub fn create<I, K>(&mut self, fields: I) -> Result<ProjectRecord, FactoryError>
    where
        I: IntoIterator<Item = (K, DetailValue)>,
        K: AsRef<str>,
    {
        let id = self.counter;
        let fallback = format!("{}{id}", self.options.default_label_prefix);
        let mut record = ProjectRecord::new(id, fallback.clone(), fallback);

        for (name, value) in fields {
            let Some(key) = DetailKey::parse(name.as_ref()) else {
                debug!(
                    "event=detail_ignored module=factory status=skip key={}",
                    name.as_ref()
                );
                continue;
            };
            let value = match value {
                DetailValue::Text(text) if text.is_empty() => continue,
                DetailValue::Text(text) if key.is_list() => {
                    DetailValue::List(split_tags(&text, self.options.tag_separator))
                }
                other => other,
            };
            record.set(key, value)?;
        }

        let missing = record.missing_details();
        if !missing.is_empty() {
            if self.options.require_complete {
                warn!(
                    "event=project_build module=factory status=error reason=incomplete missing={}",
                    missing.len()
                );
                return Err(FactoryError::IncompleteRecord { missing });
            }
            warn!(
                "event=project_build module=factory status=ok reason=incomplete id={} missing={}",
                id,
                missing.len()
            );
        }

        self.counter += 1;
        Ok(record)
    }

    /// Builds a record from a page element's attributes.
    ///
    /// # Errors
    /// - `MissingMarker` when the element is not marked as a project.
    /// - `MalformedDetails` when the JSON details attribute is unreadable.
    /// - Any error of [`ProjectFactory::create`].
    pub fn from_element(&mut self, element: &ElementSource) -> Result<ProjectRecord, FactoryError> {
        let mut fields = element.detail_fields(self.options.tag_separator)?;

        if self.options.recover_image_from_markup
            && !fields.iter().any(|(key, value)| {
                *key == DetailKey::Image && value.as_text().is_some_and(|text| !text.is_empty())
            })
        {
            if let Some(src) = element.first_image_src() {
                debug!("event=image_recovered module=factory status=ok");
                fields.push((DetailKey::Image, DetailValue::Text(src)));
            }
        }

        self.create(fields)
    }

    /// Builds a record from an element and appends it to `store`.
    pub fn build_and_register(
        &mut self,
        store: &ProjectStore,
        element: &ElementSource,
    ) -> Result<ProjectHandle, FactoryError> {
        let record = self.from_element(element)?;
        Ok(store.insert(record))
    }
}

#[cfg(test)]
mod tests {
    use super::{FactoryError, FactoryOptions, ProjectFactory};
    use crate::model::project::{DetailKey, DetailValue};

    #[test]
    fn failed_build_does_not_consume_id() {
        let mut factory = ProjectFactory::new();
        let err = factory
            .create([("title", DetailValue::from(vec!["not", "a string"]))])
            .expect_err("list title must fail");
        assert!(matches!(err, FactoryError::Detail(_)));
        assert_eq!(factory.next_id(), 0);

        let record = factory
            .create(Vec::<(&str, DetailValue)>::new())
            .expect("empty fields build");
        assert_eq!(record.id(), 0);
        assert_eq!(record.label(), "new-project0");
        assert_eq!(record.title(), "new-project0");
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let mut factory = ProjectFactory::new();
        let record = factory
            .create([
                ("label", DetailValue::from("")),
                ("description", DetailValue::from("")),
            ])
            .expect("build");
        assert_eq!(record.label(), "new-project0");
        assert_eq!(record.description(), None);
    }

    #[test]
    fn require_complete_rejects_partial_records() {
        let mut factory = ProjectFactory::with_options(FactoryOptions {
            require_complete: true,
            ..FactoryOptions::default()
        });
        let err = factory
            .create([("title", DetailValue::from("Demo"))])
            .expect_err("partial record must fail");
        assert_eq!(
            err,
            FactoryError::IncompleteRecord {
                missing: vec![
                    DetailKey::Description,
                    DetailKey::Url,
                    DetailKey::Image,
                    DetailKey::Tags,
                    DetailKey::Date,
                ],
            }
        );
        assert_eq!(factory.next_id(), 0);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: FactoryOptions =
            serde_json::from_str(r#"{"tag_separator":";"}"#).expect("options");
        assert_eq!(options.tag_separator, ';');
        assert_eq!(options.default_label_prefix, "new-project");
        assert!(options.recover_image_from_markup);
    }
}
