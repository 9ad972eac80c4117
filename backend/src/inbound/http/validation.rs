//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose details name the
//! offending field and a stable machine-readable code.

use serde_json::json;

use crate::domain::{ComplaintValidationError, Error, RATING_MAX, RATING_MIN, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    /// Required field absent from the body.
    MissingField,
    /// Field present but blank.
    EmptyField,
    /// Field present but malformed.
    InvalidValue,
    /// Numeric field outside its allowed range.
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::InvalidValue => "invalid_value",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {}", field.as_str()),
    )
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ErrorCode::EmptyField,
        format!("{} must not be empty", field.as_str()),
    )
}

pub(crate) fn out_of_range_error(field: FieldName, value: i64) -> Error {
    Error::invalid_request(format!(
        "{} must be between {RATING_MIN} and {RATING_MAX}",
        field.as_str()
    ))
    .with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::OutOfRange.as_str(),
        "value": value,
        "min": RATING_MIN,
        "max": RATING_MAX,
    }))
}

/// Unwrap a required body field, reporting it as missing when absent.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Map a user value constructor failure onto the field it came from.
pub(crate) fn user_field_error(field: FieldName, err: &UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyId
        | UserValidationError::EmptySecret
        | UserValidationError::EmptyDisplayName
        | UserValidationError::EmptyEmail => empty_field_error(field),
        UserValidationError::InvalidId => {
            field_error(field, ErrorCode::InvalidValue, err.to_string())
        }
    }
}

/// Map a complaint value constructor failure onto the field it came from.
pub(crate) fn complaint_field_error(field: FieldName, err: &ComplaintValidationError) -> Error {
    match err {
        ComplaintValidationError::EmptyId | ComplaintValidationError::EmptyTitle => {
            empty_field_error(field)
        }
        ComplaintValidationError::RatingOutOfRange { value } => out_of_range_error(field, *value),
        ComplaintValidationError::InvalidId => {
            field_error(field, ErrorCode::InvalidValue, err.to_string())
        }
    }
}
