// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::byte_codec::MalformedInputError;
use crate::path::{FieldPath, PathSegment};
use crate::timestamp::TimestampError;

/// Why a single value could not be converted.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CoercionError {
    /// The wire string is not a valid RFC 3339 timestamp, or it is out of
    /// range.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(#[source] TimestampError),

    /// The wire value is not a decimal integer.
    ///
    /// Long inputs are truncated to their first 64 characters.
    #[error("invalid integer {0:?}, expected decimal digits with an optional leading `-`")]
    InvalidInteger(String),

    /// The wire string is not valid base64.
    #[error("invalid base64 data: {0}")]
    MalformedInput(#[source] MalformedInputError),

    /// The value does not have the shape required by the schema, for example,
    /// a string where a sequence is expected.
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

/// A failure to convert a record between its wire and domain representations.
///
/// The error identifies the field that failed, using a path relative to the
/// value passed to the transform. A transform that fails returns no partial
/// output.
///
/// # Example
/// ```
/// # use google_cloud_wire::{RecordSchema, to_domain};
/// # use serde_json::json;
/// let schema = RecordSchema::new().integer("count");
/// let err = to_domain(&json!({"count": "not-a-number"}), &schema).unwrap_err();
/// assert!(err.is_invalid_integer());
/// assert_eq!(err.path().to_string(), "count");
/// ```
#[derive(Debug)]
pub struct FieldCoercionError {
    path: FieldPath,
    kind: CoercionError,
}

impl FieldCoercionError {
    pub(crate) fn new(kind: CoercionError) -> Self {
        Self {
            path: FieldPath::default(),
            kind,
        }
    }

    pub(crate) fn shape(expected: &'static str, found: &'static str) -> Self {
        Self::new(CoercionError::UnexpectedShape { expected, found })
    }

    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.prepend(segment);
        self
    }

    /// The location of the failing field.
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// The reason for the failure.
    pub fn kind(&self) -> &CoercionError {
        &self.kind
    }

    /// Consumes the error, returning the reason for the failure.
    pub fn into_kind(self) -> CoercionError {
        self.kind
    }

    /// A timestamp field did not contain a valid timestamp.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self.kind, CoercionError::InvalidTimestamp(_))
    }

    /// An integer field did not contain a valid decimal integer.
    pub fn is_invalid_integer(&self) -> bool {
        matches!(self.kind, CoercionError::InvalidInteger(_))
    }

    /// A bytes field did not contain valid base64 data.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self.kind, CoercionError::MalformedInput(_))
    }

    /// A field did not have the shape required by its schema.
    pub fn is_unexpected_shape(&self) -> bool {
        matches!(self.kind, CoercionError::UnexpectedShape { .. })
    }
}

impl std::fmt::Display for FieldCoercionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_root() {
            return write!(f, "cannot coerce value: {}", self.kind);
        }
        write!(f, "cannot coerce field `{}`: {}", self.path, self.kind)
    }
}

impl std::error::Error for FieldCoercionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl From<CoercionError> for FieldCoercionError {
    fn from(value: CoercionError) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn predicates() {
        let e = FieldCoercionError::new(CoercionError::InvalidInteger("abc".into()));
        assert!(e.is_invalid_integer());
        assert!(!e.is_invalid_timestamp());
        assert!(!e.is_malformed_input());
        assert!(!e.is_unexpected_shape());

        let e = FieldCoercionError::new(CoercionError::InvalidTimestamp(
            TimestampError::OutOfRange,
        ));
        assert!(e.is_invalid_timestamp());

        let e = FieldCoercionError::new(CoercionError::MalformedInput(
            MalformedInputError::InvalidPadding,
        ));
        assert!(e.is_malformed_input());

        let e = FieldCoercionError::shape("a sequence", "a string");
        assert!(e.is_unexpected_shape());
    }

    #[test]
    fn fmt_with_path() {
        let e = FieldCoercionError::new(CoercionError::InvalidInteger("not-a-number".into()))
            .within(PathSegment::Field("count".into()))
            .within(PathSegment::Index(2))
            .within(PathSegment::Field("packages".into()));
        let fmt = format!("{e}");
        assert!(fmt.contains("`packages[2].count`"), "{fmt}");
        assert!(fmt.contains("not-a-number"), "{fmt}");
    }

    #[test]
    fn fmt_root() {
        let e = FieldCoercionError::shape("a record", "a string");
        let fmt = format!("{e}");
        assert!(fmt.contains("cannot coerce value"), "{fmt}");
        assert!(fmt.contains("expected a record, found a string"), "{fmt}");
    }

    #[test]
    fn source() {
        let e = FieldCoercionError::new(CoercionError::MalformedInput(
            MalformedInputError::InvalidPadding,
        ));
        let source = e.source().and_then(|e| e.downcast_ref::<CoercionError>());
        assert!(
            matches!(source, Some(CoercionError::MalformedInput(_))),
            "{source:?}"
        );
        let leaf = source
            .and_then(|e| e.source())
            .and_then(|e| e.downcast_ref::<MalformedInputError>());
        assert_eq!(leaf, Some(&MalformedInputError::InvalidPadding));
    }
}
