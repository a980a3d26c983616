//! Request validation.
//!
//! The inbound body is parsed into a generic [`serde_json::Value`] first and
//! then checked against an explicit [`ObjectSchema`]. Validation never stops at
//! the first problem: every failing field is reported so the caller can point
//! the user at exactly what is wrong.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::types::{AssetKey, Description, EmojiRequest};

pub const MAX_DESCRIPTION_LENGTH: usize = 200;

pub const SVG_KEY_FIELD: &str = "svgKey";
pub const DESCRIPTION_FIELD: &str = "description";

const SVG_KEY_FORMAT_MESSAGE: &str =
    "Invalid SVG key format. Expected format: 'category/emoji-id' (e.g. 'activities/1f3a0')";

/// `<category>/<id>`: ASCII letters, then an alphanumeric id that may be split by
/// hyphens and may end in 4-hex-digit codepoint groups.
static SVG_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^[a-z]+/[a-z0-9-]+(?:-[a-z0-9]+)*(?:-[0-9a-f]{4})*$")
        .expect("svg key pattern is valid")
});

static EMOJI_REQUEST_SCHEMA: Lazy<ObjectSchema> = Lazy::new(|| {
    ObjectSchema::new(vec![
        FieldSchema::string(SVG_KEY_FIELD).matches(SVG_KEY_PATTERN.clone(), SVG_KEY_FORMAT_MESSAGE),
        FieldSchema::string(DESCRIPTION_FIELD)
            .min_chars(1)
            .max_chars(MAX_DESCRIPTION_LENGTH),
    ])
});

/// Validate a raw request body into an [`EmojiRequest`].
///
/// Accepted values are passed through as-is: no trimming, no case folding.
pub fn validate_request(body: &Value) -> Result<EmojiRequest, ValidationErrors> {
    let mut fields = EMOJI_REQUEST_SCHEMA.validate(body)?;

    let svg_key = fields.remove(SVG_KEY_FIELD).unwrap_or_default();
    let description = fields.remove(DESCRIPTION_FIELD).unwrap_or_default();

    Ok(EmojiRequest {
        svg_key: AssetKey::new_unchecked(svg_key),
        description: Description::new_unchecked(description),
    })
}

/// Parse a standalone key, e.g. one taken from a URL path.
pub fn parse_asset_key(key: &str) -> Option<AssetKey> {
    is_valid_asset_key(key).then(|| AssetKey::new_unchecked(key.to_string()))
}

pub fn is_valid_asset_key(key: &str) -> bool {
    SVG_KEY_PATTERN.is_match(key)
}

/// A single constraint on a string field.
#[derive(Debug, Clone)]
pub enum Check {
    MinChars(usize),
    MaxChars(usize),
    Matches { pattern: Regex, message: &'static str },
}

impl Check {
    fn violation(&self, value: &str) -> Option<String> {
        match self {
            Check::MinChars(min) => (value.chars().count() < *min)
                .then(|| format!("String must contain at least {min} character(s)")),
            Check::MaxChars(max) => (value.chars().count() > *max)
                .then(|| format!("String must contain at most {max} character(s)")),
            Check::Matches { pattern, message } => {
                (!pattern.is_match(value)).then(|| message.to_string())
            }
        }
    }
}

/// A required string field and the checks it must pass.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: &'static str,
    checks: Vec<Check>,
}

impl FieldSchema {
    pub fn string(name: &'static str) -> Self {
        Self {
            name,
            checks: Vec::new(),
        }
    }

    pub fn min_chars(mut self, min: usize) -> Self {
        self.checks.push(Check::MinChars(min));
        self
    }

    pub fn max_chars(mut self, max: usize) -> Self {
        self.checks.push(Check::MaxChars(max));
        self
    }

    pub fn matches(mut self, pattern: Regex, message: &'static str) -> Self {
        self.checks.push(Check::Matches { pattern, message });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn validate(&self, value: Option<&Value>) -> Result<String, Vec<String>> {
        let text = match value {
            None => return Err(vec!["Required".to_string()]),
            Some(Value::String(text)) => text,
            Some(other) => {
                return Err(vec![format!(
                    "Expected string, received {}",
                    received_type(other)
                )])
            }
        };

        let violations: Vec<String> = self
            .checks
            .iter()
            .filter_map(|check| check.violation(text))
            .collect();

        if violations.is_empty() {
            Ok(text.clone())
        } else {
            Err(violations)
        }
    }
}

/// An object with a fixed set of required string fields. Unknown keys are
/// ignored.
#[derive(Debug, Clone)]
pub struct ObjectSchema {
    fields: Vec<FieldSchema>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn validate(&self, body: &Value) -> Result<HashMap<&'static str, String>, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let Some(object) = body.as_object() else {
            errors.add_form_error(format!(
                "Expected object, received {}",
                received_type(body)
            ));
            return Err(errors);
        };

        let mut accepted = HashMap::with_capacity(self.fields.len());
        for field in &self.fields {
            match field.validate(object.get(field.name)) {
                Ok(value) => {
                    accepted.insert(field.name, value);
                }
                Err(messages) => errors.add_field_errors(field.name, messages),
            }
        }

        if errors.is_empty() {
            Ok(accepted)
        } else {
            Err(errors)
        }
    }
}

fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Every violation found in one request body.
///
/// Serializes as `{"_errors": [..], "<field>": {"_errors": [..]}}`, listing
/// only the fields that failed, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    form_errors: Vec<String>,
    field_errors: Vec<(&'static str, Vec<String>)>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    pub fn form_errors(&self) -> &[String] {
        &self.form_errors
    }

    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.field_errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, messages)| messages.as_slice())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.field_errors.iter().map(|(name, _)| *name)
    }

    fn add_form_error(&mut self, message: String) {
        self.form_errors.push(message);
    }

    fn add_field_errors(&mut self, field: &'static str, messages: Vec<String>) {
        self.field_errors.push((field, messages));
    }

    fn summary(&self) -> String {
        self.form_errors
            .iter()
            .cloned()
            .chain(
                self.field_errors
                    .iter()
                    .map(|(name, messages)| format!("{name}: {}", messages.join(", "))),
            )
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid request body: {}", self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Messages<'a>(&'a [String]);

        impl Serialize for Messages<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("_errors", self.0)?;
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(1 + self.field_errors.len()))?;
        map.serialize_entry("_errors", &self.form_errors)?;
        for (name, messages) in &self.field_errors {
            map.serialize_entry(name, &Messages(messages))?;
        }
        map.end()
    }
}
