//! Declarative field-level validation for commands.
//!
//! Every command body implements [`Validate`] by chaining checks on a
//! [`Validator`]. All violations are collected before returning, keyed by
//! the camelCase field name used on the wire.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Field name → messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages recorded for `field`, empty when the field passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, messages)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

/// Implemented by every request body that carries user input.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").expect("hex color pattern is valid")
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Collects violations across chained checks.
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value must contain at least one non-whitespace character.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.add(field, format!("{} is required", field));
        }
        self
    }

    /// Character count must lie in `min..=max`. Blank values are left to
    /// [`Validator::required`].
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) -> &mut Self {
        let len = value.chars().count();
        if !value.trim().is_empty() && (len < min || len > max) {
            self.errors.add(
                field,
                format!("{} must be between {} and {} characters", field, min, max),
            );
        }
        self
    }

    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.errors
                    .add(field, format!("{} must be at most {} characters", field, max));
            }
        }
        self
    }

    pub fn range<T>(&mut self, field: &str, value: T, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + fmt::Display,
    {
        if value < min || value > max {
            self.errors
                .add(field, format!("{} must be between {} and {}", field, min, max));
        }
        self
    }

    pub fn optional_range<T>(&mut self, field: &str, value: Option<T>, min: T, max: T) -> &mut Self
    where
        T: PartialOrd + fmt::Display,
    {
        if let Some(value) = value {
            self.range(field, value, min, max);
        }
        self
    }

    /// `#RRGGBB` or `#RGB`.
    pub fn hex_color(&mut self, field: &str, value: &str) -> &mut Self {
        if !hex_color_regex().is_match(value) {
            self.errors.add(
                field,
                format!("{} must be a hex color such as #1A2B3C", field),
            );
        }
        self
    }

    pub fn optional_hex_color(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.hex_color(field, value);
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !email_regex().is_match(value) {
            self.errors
                .add(field, format!("{} must be a valid email address", field));
        }
        self
    }

    /// Record `message` against `field` unless `condition` holds.
    pub fn ensure(&mut self, condition: bool, field: &str, message: &str) -> &mut Self {
        if !condition {
            self.errors.add(field, message);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        let errors = std::mem::take(&mut self.errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
