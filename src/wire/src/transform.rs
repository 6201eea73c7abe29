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

//! Convert records between their wire and domain representations.
//!
//! The conversion is driven by a [RecordSchema]. Only the fields named in the
//! schema are coerced, all other fields are copied verbatim. Fields absent in
//! the input are absent in the output, they are never defaulted.

use crate::byte_codec;
use crate::error::{CoercionError, FieldCoercionError};
use crate::path::PathSegment;
use crate::schema::{Coercion, RecordSchema};
use crate::timestamp::Timestamp;
use crate::value::{DomainValue, Record, WireValue, wire_kind_name};
use num_bigint::BigInt;

type Result<T> = std::result::Result<T, FieldCoercionError>;

/// Converts a domain record to its wire representation.
///
/// # Example
/// ```
/// # use google_cloud_wire::{DomainValue, RecordSchema, Timestamp, to_wire};
/// # use num_bigint::BigInt;
/// # use serde_json::json;
/// let schema = RecordSchema::new().integer("count").timestamp("createTime");
/// let input = DomainValue::record([
///     ("count", DomainValue::from(BigInt::from(1234567890123456789_i64))),
///     ("createTime", DomainValue::from(Timestamp::try_from("2024-01-15T10:30:00Z")?)),
/// ]);
/// let got = to_wire(&input, &schema)?;
/// assert_eq!(got, json!({
///     "count": "1234567890123456789",
///     "createTime": "2024-01-15T10:30:00.000Z",
/// }));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn to_wire(value: &DomainValue, schema: &RecordSchema) -> Result<WireValue> {
    record_to_wire(value, schema).inspect_err(|e| {
        tracing::debug!(path = %e.path(), error = %e.kind(), "cannot convert record to wire format");
    })
}

/// Converts a wire record to its domain representation.
///
/// # Example
/// ```
/// # use google_cloud_wire::{DomainValue, RecordSchema, to_domain};
/// # use num_bigint::BigInt;
/// # use serde_json::json;
/// let schema = RecordSchema::new().integer("count");
/// let got = to_domain(&json!({"count": "1234567890123456789", "name": "abc"}), &schema)?;
/// assert_eq!(got, DomainValue::record([
///     ("count", DomainValue::from(BigInt::from(1234567890123456789_i64))),
///     ("name", DomainValue::from("abc")),
/// ]));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn to_domain(value: &WireValue, schema: &RecordSchema) -> Result<DomainValue> {
    record_to_domain(value, schema).inspect_err(|e| {
        tracing::debug!(path = %e.path(), error = %e.kind(), "cannot convert record to domain format");
    })
}

impl Coercion {
    /// Converts a single domain value to its wire representation.
    ///
    /// Use this for values that are not records, for example, a top-level
    /// sequence of timestamps.
    pub fn to_wire(&self, value: &DomainValue) -> Result<WireValue> {
        if value.is_null() {
            return Ok(WireValue::Null);
        }
        match (self, value) {
            (Self::None, v) => Ok(untyped_to_wire(v)),
            (Self::Timestamp, DomainValue::Timestamp(t)) => Ok(WireValue::String(t.to_string())),
            (Self::Integer, DomainValue::Integer(i)) => Ok(WireValue::String(i.to_string())),
            (Self::Bytes, DomainValue::Bytes(b)) => Ok(WireValue::String(byte_codec::encode(b))),
            (Self::Record(schema), v) => record_to_wire(v, schema),
            (Self::Sequence(inner), DomainValue::Sequence(s)) => s
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    inner
                        .to_wire(v)
                        .map_err(|e| e.within(PathSegment::Index(i)))
                })
                .collect::<Result<Vec<_>>>()
                .map(WireValue::Array),
            (Self::Map(inner), DomainValue::Record(m)) => m
                .iter()
                .map(|(k, v)| {
                    inner
                        .to_wire(v)
                        .map(|v| (k.clone(), v))
                        .map_err(|e| e.within(PathSegment::Key(k.clone())))
                })
                .collect::<Result<serde_json::Map<_, _>>>()
                .map(WireValue::Object),
            (c, v) => Err(FieldCoercionError::shape(c.domain_name(), v.kind_name())),
        }
    }

    /// Converts a single wire value to its domain representation.
    pub fn to_domain(&self, value: &WireValue) -> Result<DomainValue> {
        if value.is_null() {
            return Ok(DomainValue::Null);
        }
        match (self, value) {
            (Self::None, v) => Ok(DomainValue::from_wire_verbatim(v)),
            (Self::Timestamp, WireValue::String(s)) => Timestamp::try_from(s.as_str())
                .map(DomainValue::Timestamp)
                .map_err(|e| FieldCoercionError::from(CoercionError::InvalidTimestamp(e))),
            (Self::Integer, WireValue::String(s)) => parse_integer(s)
                .map(DomainValue::Integer)
                .map_err(FieldCoercionError::from),
            (Self::Integer, WireValue::Number(n)) => number_to_integer(n)
                .map(DomainValue::Integer)
                .map_err(FieldCoercionError::from),
            (Self::Bytes, WireValue::String(s)) => byte_codec::decode(s)
                .map(DomainValue::Bytes)
                .map_err(|e| FieldCoercionError::from(CoercionError::MalformedInput(e))),
            (Self::Record(schema), v) => record_to_domain(v, schema),
            (Self::Sequence(inner), WireValue::Array(a)) => a
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    inner
                        .to_domain(v)
                        .map_err(|e| e.within(PathSegment::Index(i)))
                })
                .collect::<Result<Vec<_>>>()
                .map(DomainValue::Sequence),
            (Self::Map(inner), WireValue::Object(m)) => m
                .iter()
                .map(|(k, v)| {
                    inner
                        .to_domain(v)
                        .map(|v| (k.clone(), v))
                        .map_err(|e| e.within(PathSegment::Key(k.clone())))
                })
                .collect::<Result<Record>>()
                .map(DomainValue::Record),
            (c, v) => Err(FieldCoercionError::shape(c.wire_name(), wire_kind_name(v))),
        }
    }

    fn domain_name(&self) -> &'static str {
        match self {
            Self::None => "any value",
            Self::Timestamp => "a timestamp",
            Self::Integer => "an integer",
            Self::Bytes => "bytes",
            Self::Record(_) => "a record",
            Self::Sequence(_) => "a sequence",
            Self::Map(_) => "a map",
        }
    }

    fn wire_name(&self) -> &'static str {
        match self {
            Self::None => "any value",
            Self::Timestamp => "an RFC 3339 string",
            Self::Integer => "a decimal string",
            Self::Bytes => "a base64 string",
            Self::Record(_) => "a record",
            Self::Sequence(_) => "a sequence",
            Self::Map(_) => "a map",
        }
    }
}

fn record_to_wire(value: &DomainValue, schema: &RecordSchema) -> Result<WireValue> {
    let DomainValue::Record(fields) = value else {
        return Err(FieldCoercionError::shape("a record", value.kind_name()));
    };
    fields
        .iter()
        .map(|(name, v)| {
            let v = match schema.coercion(name) {
                None => untyped_to_wire(v),
                Some(c) => c
                    .to_wire(v)
                    .map_err(|e| e.within(PathSegment::Field(name.clone())))?,
            };
            Ok((name.clone(), v))
        })
        .collect::<Result<serde_json::Map<_, _>>>()
        .map(WireValue::Object)
}

fn record_to_domain(value: &WireValue, schema: &RecordSchema) -> Result<DomainValue> {
    let WireValue::Object(fields) = value else {
        return Err(FieldCoercionError::shape("a record", wire_kind_name(value)));
    };
    fields
        .iter()
        .map(|(name, v)| {
            let v = match schema.coercion(name) {
                None => DomainValue::from_wire_verbatim(v),
                Some(c) => c
                    .to_domain(v)
                    .map_err(|e| e.within(PathSegment::Field(name.clone())))?,
            };
            Ok((name.clone(), v))
        })
        .collect::<Result<Record>>()
        .map(DomainValue::Record)
}

// Fields without a schema are copied as-is. A domain value may still hold
// rich leaves in those fields (e.g. an application added them), those use
// their natural wire representation.
fn untyped_to_wire(value: &DomainValue) -> WireValue {
    match value {
        DomainValue::Null => WireValue::Null,
        DomainValue::Bool(b) => WireValue::Bool(*b),
        DomainValue::Number(n) => WireValue::Number(n.clone()),
        DomainValue::String(s) => WireValue::String(s.clone()),
        DomainValue::Integer(i) => WireValue::String(i.to_string()),
        DomainValue::Timestamp(t) => WireValue::String(t.to_string()),
        DomainValue::Bytes(b) => WireValue::String(byte_codec::encode(b)),
        DomainValue::Sequence(s) => WireValue::Array(s.iter().map(untyped_to_wire).collect()),
        DomainValue::Record(r) => WireValue::Object(
            r.iter()
                .map(|(k, v)| (k.clone(), untyped_to_wire(v)))
                .collect(),
        ),
    }
}

/// Parses the wire representation of an arbitrary-precision integer.
///
/// Only an optional `-` followed by ASCII digits is accepted.
pub(crate) fn parse_integer(text: &str) -> std::result::Result<BigInt, CoercionError> {
    let invalid = || invalid_integer(text);
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse::<BigInt>().map_err(|_| invalid())
}

// JSON numbers are accepted for integer fields, as long as they have no
// fractional part. Large values are usually strings, because JSON numbers
// lose precision beyond 2^53.
pub(crate) fn number_to_integer(
    number: &serde_json::Number,
) -> std::result::Result<BigInt, CoercionError> {
    if let Some(i) = number.as_i64() {
        return Ok(BigInt::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Ok(BigInt::from(u));
    }
    Err(invalid_integer(&number.to_string()))
}

const MAX_INVALID_INTEGER_CHARS: usize = 64;

// Keeps error messages and log lines bounded for arbitrarily large inputs.
fn invalid_integer(text: &str) -> CoercionError {
    let mut shown = text
        .chars()
        .take(MAX_INVALID_INTEGER_CHARS)
        .collect::<String>();
    if shown.len() < text.len() {
        shown.push_str("...");
    }
    CoercionError::InvalidInteger(shown)
}
