//! Field-by-field extraction from an external JSON payload.
//!
//! [`FieldReader`] pulls typed values out of a `serde_json` object,
//! recording a message under the external field name for every failure
//! instead of stopping at the first one.

use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use validator::{ValidateLength, ValidateUrl};

use crate::error::FieldErrors;
use crate::types::{DbId, Timestamp};

pub const MSG_BLANK: &str = "Invalid value for this field.";
pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_INTEGER: &str = "A valid integer is required.";
pub const MSG_STRING: &str = "Not a valid string.";
pub const MSG_BOOLEAN: &str = "Must be a valid boolean.";
pub const MSG_URL: &str = "Enter a valid URL.";
pub const MSG_NUMBER: &str = "A valid number is required.";
pub const MSG_CURRENCY: &str = "Ensure this field is a 3-letter currency code.";
pub const MSG_DATETIME: &str = "Datetime has wrong format. Use one of these formats instead: \
    YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

/// Smallest accepted identifier.
pub const MIN_ID: DbId = 1;

const URL_SCHEMES: [&str; 4] = ["http://", "https://", "ftp://", "ftps://"];

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Reject every top-level value that is a blank string.
///
/// Runs before any type-specific validation.
pub fn reject_blank_values(data: &Map<String, Value>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for (field, value) in data {
        if matches!(value, Value::String(s) if s.trim().is_empty()) {
            errors.add(field.as_str(), MSG_BLANK);
        }
    }
    errors.into_result()
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct FieldReader<'a> {
    data: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    pub fn new(data: &'a Map<String, Value>) -> Self {
        Self {
            data,
            errors: FieldErrors::new(),
        }
    }

    /// Consume the reader, returning every recorded failure.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    fn fail(&mut self, field: &str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Required, non-null value. Records the matching message otherwise.
    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.data.get(field) {
            None => {
                self.fail(field, MSG_REQUIRED);
                None
            }
            Some(Value::Null) => {
                self.fail(field, MSG_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Optional value that may not be null when present.
    fn optional(&mut self, field: &str) -> Option<&'a Value> {
        match self.data.get(field) {
            None => None,
            Some(Value::Null) => {
                self.fail(field, MSG_NULL);
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Optional value where null means "not set".
    fn nullable(&self, field: &str) -> Option<&'a Value> {
        self.data.get(field).filter(|v| !v.is_null())
    }

    // -----------------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------------

    /// Required identifier, at least [`MIN_ID`].
    pub fn id(&mut self, field: &str) -> Option<DbId> {
        let value = self.required(field)?;
        let Some(id) = coerce_integer(value) else {
            self.fail(field, MSG_INTEGER);
            return None;
        };
        if id < MIN_ID {
            self.fail(
                field,
                format!("Ensure this value is greater than or equal to {MIN_ID}."),
            );
            return None;
        }
        Some(id)
    }

    pub fn required_text(&mut self, field: &str, max_len: Option<u64>) -> Option<String> {
        let value = self.required(field)?;
        self.text_value(field, value, max_len)
    }

    pub fn optional_text(&mut self, field: &str, max_len: Option<u64>) -> Option<String> {
        let value = self.optional(field)?;
        self.text_value(field, value, max_len)
    }

    fn text_value(&mut self, field: &str, value: &Value, max_len: Option<u64>) -> Option<String> {
        let Some(text) = coerce_text(value) else {
            self.fail(field, MSG_STRING);
            return None;
        };
        if let Some(max) = max_len {
            if !text.validate_length(None, Some(max), None) {
                self.fail(
                    field,
                    format!("Ensure this field has no more than {max} characters."),
                );
                return None;
            }
        }
        Some(text)
    }

    /// Boolean with a default used when the field is absent.
    pub fn flag(&mut self, field: &str, default: bool) -> bool {
        let Some(value) = self.optional(field) else {
            return default;
        };
        match coerce_bool(value) {
            Some(flag) => flag,
            None => {
                self.fail(field, MSG_BOOLEAN);
                default
            }
        }
    }

    /// Required absolute URL.
    pub fn url(&mut self, field: &str) -> Option<String> {
        let text = self.required_text(field, None)?;
        let has_scheme = URL_SCHEMES
            .iter()
            .any(|scheme| text.to_ascii_lowercase().starts_with(scheme));
        if !has_scheme || !text.validate_url() {
            self.fail(field, MSG_URL);
            return None;
        }
        Some(text)
    }

    /// Optional decimal bounded by total digits and decimal places.
    ///
    /// Accepts a numeric string or a JSON number.
    pub fn decimal(&mut self, field: &str, max_digits: u32, decimal_places: u32) -> Option<Decimal> {
        let value = self.optional(field)?;
        let parsed = match value {
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            _ => None,
        };
        let Some(amount) = parsed else {
            self.fail(field, MSG_NUMBER);
            return None;
        };
        match check_decimal_bounds(amount, max_digits, decimal_places) {
            Ok(amount) => Some(amount),
            Err(message) => {
                self.fail(field, message);
                None
            }
        }
    }

    /// Optional ISO 4217-style code, normalized to upper case.
    pub fn currency(&mut self, field: &str) -> Option<String> {
        let code = self.optional_text(field, None)?;
        let code = code.trim().to_ascii_uppercase();
        if !code.validate_length(None, None, Some(3)) || !code.chars().all(|c| c.is_ascii_alphabetic())
        {
            self.fail(field, MSG_CURRENCY);
            return None;
        }
        Some(code)
    }

    /// Optional timestamp; null is accepted and means "unset".
    pub fn optional_datetime(&mut self, field: &str) -> Option<Timestamp> {
        let value = self.nullable(field)?;
        match value.as_str().and_then(parse_datetime) {
            Some(ts) => Some(ts),
            None => {
                self.fail(field, MSG_DATETIME);
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Relationships
    // -----------------------------------------------------------------------

    /// Required primary key of a related row. Existence is checked later,
    /// against the database.
    pub fn reference(&mut self, field: &str) -> Option<DbId> {
        let value = self.required(field)?;
        self.pk_value(field, value)
    }

    /// Optional primary key; null is accepted and means "no relation".
    pub fn optional_reference(&mut self, field: &str) -> Option<DbId> {
        let value = self.nullable(field)?;
        self.pk_value(field, value)
    }

    /// List of primary keys, de-duplicated in first-seen order.
    ///
    /// When `required` is false an absent or null field yields an empty list.
    pub fn reference_list(&mut self, field: &str, required: bool) -> Option<Vec<DbId>> {
        let value = if required {
            self.required(field)?
        } else {
            match self.nullable(field) {
                Some(value) => value,
                None => return Some(Vec::new()),
            }
        };
        let Value::Array(items) = value else {
            self.fail(
                field,
                format!(
                    "Expected a list of items but got type \"{}\".",
                    json_type_name(value)
                ),
            );
            return None;
        };

        let mut ids: Vec<DbId> = Vec::with_capacity(items.len());
        let mut valid = true;
        for item in items {
            match self.pk_value(field, item) {
                Some(id) if !ids.contains(&id) => ids.push(id),
                Some(_) => {}
                None => valid = false,
            }
        }
        valid.then_some(ids)
    }

    fn pk_value(&mut self, field: &str, value: &Value) -> Option<DbId> {
        match value {
            Value::Bool(_) => None,
            other => coerce_integer(other),
        }
        .or_else(|| {
            self.fail(
                field,
                format!(
                    "Incorrect type. Expected pk value, received {}.",
                    json_type_name(value)
                ),
            );
            None
        })
    }
}

// ---------------------------------------------------------------------------
// Coercions
// ---------------------------------------------------------------------------

/// 2^63. `i64::MIN` is exactly `-2^63` and `i64::MAX` rounds up to it as `f64`.
const I64_FLOAT_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= -I64_FLOAT_BOUND && *f < I64_FLOAT_BOUND)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_datetime(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn check_decimal_bounds(
    amount: Decimal,
    max_digits: u32,
    decimal_places: u32,
) -> Result<Decimal, String> {
    let normalized = amount.normalize();
    if normalized.scale() > decimal_places {
        return Err(format!(
            "Ensure that there are no more than {decimal_places} decimal places."
        ));
    }
    let whole = normalized.trunc().abs();
    let whole_digits = if whole.is_zero() {
        0
    } else {
        whole.to_string().len() as u32
    };
    let max_whole = max_digits - decimal_places;
    if whole_digits > max_whole {
        return Err(format!(
            "Ensure that there are no more than {max_whole} digits before the decimal point."
        ));
    }
    Ok(normalized)
}
