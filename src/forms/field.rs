//! Field descriptors and their per-request bindings
//!
//! A [`FieldDescriptor`] is declared once per edit page. Each request turns the
//! descriptors into [`FieldBinding`]s that carry the submitted input, the
//! converted value and the validation errors for that request.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::i18n::Messages;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Number,
    Checkbox,
    /// Single choice; `numeric` stores the chosen value as an integer
    Select { numeric: bool },
}

impl FieldKind {
    /// HTML input type used when rendering
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextArea => "textarea",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select { .. } => "select",
        }
    }
}

#[derive(Clone, Debug)]
pub enum Validator {
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
    Email,
    Range { min: i64, max: i64 },
}

impl Validator {
    /// Check a converted, non-null value; returns the localized error on failure
    fn check(&self, value: &Value, label: &str, messages: &Messages) -> Option<String> {
        match (self, value) {
            (Validator::MinLength(min), Value::String(s)) if s.chars().count() < *min => Some(
                messages.format(
                    "StringValidator.minimum",
                    &[("label", label), ("min", min.to_string().as_str())],
                ),
            ),
            (Validator::MaxLength(max), Value::String(s)) if s.chars().count() > *max => Some(
                messages.format(
                    "StringValidator.maximum",
                    &[("label", label), ("max", max.to_string().as_str())],
                ),
            ),
            (Validator::Pattern(regex), Value::String(s)) if !regex.is_match(s) => {
                Some(messages.format("PatternValidator", &[("label", label)]))
            }
            (Validator::Email, Value::String(s)) if !looks_like_email(s) => Some(
                messages.format("EmailAddressValidator", &[("label", label), ("value", s.as_str())]),
            ),
            (Validator::Range { min, max }, Value::Number(n)) => match n.as_i64() {
                Some(v) if v >= *min && v <= *max => None,
                _ => Some(messages.format(
                    "RangeValidator",
                    &[
                        ("label", label),
                        ("min", min.to_string().as_str()),
                        ("max", max.to_string().as_str()),
                    ],
                )),
            },
            _ => None,
        }
    }
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$";

fn looks_like_email(s: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            label: label.into(),
        }
    }
}

/// Declaration of one editable property
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub path: String,
    /// Message key of the field label
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub validators: Vec<Validator>,
    /// Foldable section holding the field, if any
    pub section: Option<String>,
}

impl FieldDescriptor {
    pub fn new(path: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        let mut validators = Vec::new();
        if kind == FieldKind::Email {
            validators.push(Validator::Email);
        }
        Self {
            path: path.into(),
            label: label.into(),
            kind,
            required: false,
            validators,
            section: None,
        }
    }

    pub fn text(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(path, label, FieldKind::Text)
    }

    pub fn text_area(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(path, label, FieldKind::TextArea)
    }

    pub fn email(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(path, label, FieldKind::Email)
    }

    pub fn number(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(path, label, FieldKind::Number)
    }

    pub fn checkbox(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(path, label, FieldKind::Checkbox)
    }

    pub fn select(path: impl Into<String>, label: impl Into<String>, numeric: bool) -> Self {
        Self::new(path, label, FieldKind::Select { numeric })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.validators.push(Validator::MinLength(min));
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.validators.push(Validator::MaxLength(max));
        self
    }

    pub fn pattern(mut self, regex: Regex) -> Self {
        self.validators.push(Validator::Pattern(regex));
        self
    }

    pub fn range(mut self, min: i64, max: i64) -> Self {
        self.validators.push(Validator::Range { min, max });
        self
    }

    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Markup id of the input element
    pub fn markup_id(&self) -> String {
        self.path.replace('.', "_")
    }

    /// Markup id of the container wrapping input, label and errors
    pub fn border_id(&self) -> String {
        format!("{}-border", self.markup_id())
    }
}

/// A descriptor bound to the current request
#[derive(Clone, Debug)]
pub struct FieldBinding {
    pub descriptor: FieldDescriptor,
    /// Value currently held by the model
    pub value: Value,
    /// Raw submitted input, kept for re-rendering after errors
    pub input: Option<String>,
    /// Converted input, set only when processing succeeded
    pub converted: Option<Value>,
    pub errors: Vec<String>,
    pub choices: Vec<Choice>,
    submitted: bool,
}

impl FieldBinding {
    pub fn new(descriptor: FieldDescriptor, value: Value) -> Self {
        Self {
            descriptor,
            value,
            input: None,
            converted: None,
            errors: Vec::new(),
            choices: Vec::new(),
            submitted: false,
        }
    }

    pub fn with_choices(mut self, choices: Vec<Choice>) -> Self {
        self.choices = choices;
        self
    }

    pub fn path(&self) -> &str {
        &self.descriptor.path
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Convert and validate the raw input; errors are recorded on the binding
    pub fn process(&mut self, raw: Option<&str>, messages: &Messages) {
        self.submitted = true;
        self.input = raw.map(str::to_string);
        self.converted = None;
        self.errors.clear();

        let label = messages.get(&self.descriptor.label);
        let label = label.as_str();
        let converted = match self.convert(raw, label, messages) {
            Ok(value) => value,
            Err(message) => {
                self.errors.push(message);
                return;
            }
        };

        if converted.is_null() {
            if self.descriptor.required {
                self.errors
                    .push(messages.format("Required", &[("label", label)]));
            } else {
                self.converted = Some(converted);
            }
            return;
        }

        let errors: Vec<String> = self
            .descriptor
            .validators
            .iter()
            .filter_map(|validator| validator.check(&converted, label, messages))
            .collect();

        if errors.is_empty() {
            self.converted = Some(converted);
        } else {
            self.errors = errors;
        }
    }

    fn convert(&self, raw: Option<&str>, label: &str, messages: &Messages) -> Result<Value, String> {
        let trimmed = raw.map(str::trim).filter(|s| !s.is_empty());

        match self.descriptor.kind {
            FieldKind::Checkbox => Ok(Value::Bool(matches!(
                trimmed.map(str::to_lowercase).as_deref(),
                Some("on") | Some("true") | Some("1") | Some("yes")
            ))),
            FieldKind::Text | FieldKind::TextArea | FieldKind::Email => {
                Ok(trimmed.map_or(Value::Null, |s| Value::String(s.to_string())))
            }
            FieldKind::Number => match trimmed {
                None => Ok(Value::Null),
                Some(s) => s
                    .parse::<i64>()
                    .map(Value::from)
                    .map_err(|_| messages.format("ConversionError.number", &[("label", label), ("value", s)])),
            },
            FieldKind::Select { numeric } => match trimmed {
                None => Ok(Value::Null),
                Some(s) => {
                    if !self.choices.iter().any(|choice| choice.value == s) {
                        return Err(messages.format("ChoiceValidator", &[("label", label), ("value", s)]));
                    }
                    if numeric {
                        s.parse::<i64>().map(Value::from).map_err(|_| {
                            messages.format("ConversionError.number", &[("label", label), ("value", s)])
                        })
                    } else {
                        Ok(Value::String(s.to_string()))
                    }
                }
            },
        }
    }

    /// Text shown in the input: the raw input after a submit, otherwise the model value
    pub fn display_value(&self) -> String {
        if self.submitted && self.descriptor.kind != FieldKind::Checkbox {
            return self.input.clone().unwrap_or_default();
        }
        match &self.value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_checked(&self) -> bool {
        match (&self.converted, &self.value) {
            (Some(Value::Bool(b)), _) if self.submitted => *b,
            (_, Value::Bool(b)) => *b,
            _ => false,
        }
    }
}
