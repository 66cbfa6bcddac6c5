//! Field rules for the labels section.
//!
//! Rules see the whole row list, since key uniqueness is checked against
//! sibling rows of the same kind. Per field the first failing rule wins:
//! missing key, then reserved prefix and character set, then uniqueness.

use std::fmt;

use serde::Serialize;

use crate::types::{FormValues, LabelEntry};

pub mod messages {
    pub const AWS_TAG_KEY_RESERVED: &str = "AWS Tag keys cannot start with \"aws\"";
    pub const AWS_TAG_KEY_CHARSET: &str = "A valid AWS Tag key must consist of alphanumeric characters or any of the following: '_', '.', ':', '/', '=', '+', '-', '@'";
    pub const AWS_TAG_VALUE_CHARSET: &str = "A valid AWS Tag value must consist of alphanumeric characters or any of the following: '_', '.', ':', '/', '=', '+', '-', '@'";
    pub const AWS_TAG_KEY_DUPLICATE: &str = "Each AWS Tag must have a different key.";
    pub const AWS_TAG_KEY_UNDEFINED: &str = "AWS Tag key has to be defined";

    pub const LABEL_KEY_CHARSET: &str = "A valid label key must consist of alphanumeric characters or any of the following: '_', '.', '-', '/'";
    pub const LABEL_VALUE_CHARSET: &str = "A valid label value must not contain control characters";
    pub const LABEL_KEY_DUPLICATE: &str = "Each label must have a different key.";
    pub const LABEL_KEY_UNDEFINED: &str = "Label key has to be defined";
}

const AWS_TAG_RESERVED_PREFIX: &str = "aws";

/// Address of a validated field, rendered the way the form names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    LabelKey(usize),
    LabelValue(usize),
}

impl FieldPath {
    pub fn index(&self) -> usize {
        match self {
            Self::LabelKey(i) | Self::LabelValue(i) => *i,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelKey(i) => write!(f, "labels[{i}].key"),
            Self::LabelValue(i) => write!(f, "labels[{i}].value"),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FieldPath,
    pub message: &'static str,
}

/// Every failing field of a form, in row order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error_for(&self, field: FieldPath) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }
}

fn is_aws_tag_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '/' | '=' | '+' | '-' | '@')
}

fn is_label_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-' | '/')
}

fn key_undefined(entry: &LabelEntry) -> &'static str {
    if entry.is_aws_tag {
        messages::AWS_TAG_KEY_UNDEFINED
    } else {
        messages::LABEL_KEY_UNDEFINED
    }
}

/// Stateless rule set over [`FormValues`]. Safe to re-run on every edit.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldValidator;

impl FieldValidator {
    pub fn new() -> Self {
        Self
    }

    /// Check one field. Accepted fields return their value.
    pub fn validate_at(&self, values: &FormValues, field: FieldPath) -> Result<String, FieldError> {
        let entries = &values.labels;
        let Some(entry) = entries.get(field.index()) else {
            // Rows past the end have nothing to reject.
            return Ok(String::new());
        };

        let rule = match field {
            FieldPath::LabelKey(index) => check_key(entries, index, entry),
            FieldPath::LabelValue(_) => check_value(entry),
        };

        rule.map_err(|message| FieldError { field, message })
    }

    /// Check every label field.
    pub fn validate(&self, values: &FormValues) -> ValidationReport {
        let errors = (0..values.labels.len())
            .flat_map(|i| [FieldPath::LabelKey(i), FieldPath::LabelValue(i)])
            .filter_map(|field| self.validate_at(values, field).err())
            .collect::<Vec<_>>();

        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "label fields rejected");
        }
        ValidationReport::from_errors(errors)
    }
}

fn check_key(
    entries: &[LabelEntry],
    index: usize,
    entry: &LabelEntry,
) -> Result<String, &'static str> {
    let key = entry.key.as_str();

    if key.is_empty() {
        return if entry.value.is_empty() {
            Ok(String::new())
        } else {
            Err(key_undefined(entry))
        };
    }

    if entry.is_aws_tag {
        let reserved = key
            .get(..AWS_TAG_RESERVED_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(AWS_TAG_RESERVED_PREFIX));
        if reserved {
            return Err(messages::AWS_TAG_KEY_RESERVED);
        }
        if !key.chars().all(is_aws_tag_char) {
            return Err(messages::AWS_TAG_KEY_CHARSET);
        }
    } else if !key.chars().all(is_label_key_char) {
        return Err(messages::LABEL_KEY_CHARSET);
    }

    let shared = entries
        .iter()
        .enumerate()
        .any(|(i, other)| i != index && other.is_aws_tag == entry.is_aws_tag && other.key == key);
    if shared {
        return Err(if entry.is_aws_tag {
            messages::AWS_TAG_KEY_DUPLICATE
        } else {
            messages::LABEL_KEY_DUPLICATE
        });
    }

    Ok(key.to_string())
}

fn check_value(entry: &LabelEntry) -> Result<String, &'static str> {
    let value = entry.value.as_str();

    if !value.is_empty() && entry.key.is_empty() {
        return Err(key_undefined(entry));
    }

    let ok = if entry.is_aws_tag {
        value.chars().all(is_aws_tag_char)
    } else {
        !value.chars().any(char::is_control)
    };

    if !ok {
        return Err(if entry.is_aws_tag {
            messages::AWS_TAG_VALUE_CHARSET
        } else {
            messages::LABEL_VALUE_CHARSET
        });
    }

    Ok(value.to_string())
}
