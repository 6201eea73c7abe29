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

use crate::timestamp::Timestamp;
use bytes::Bytes;
use num_bigint::BigInt;
use std::collections::BTreeMap;

/// The JSON representation of a value, as sent and received over HTTP.
pub type WireValue = serde_json::Value;

/// The fields of a [DomainValue::Record].
pub type Record = BTreeMap<String, DomainValue>;

/// The in-memory representation of a value, as used by applications.
///
/// This mirrors [WireValue], but the leaves can also hold arbitrary-precision
/// integers, timestamps, and raw bytes. On the wire these are all strings.
///
/// # Example
/// ```
/// # use google_cloud_wire::{DomainValue, Timestamp};
/// # use num_bigint::BigInt;
/// let value = DomainValue::record([
///     ("name", DomainValue::from("projects/p/instances/i")),
///     ("count", DomainValue::from(BigInt::from(1234567890123456789_i64))),
///     ("createTime", DomainValue::from(Timestamp::from_millis(1705314600000)?)),
/// ]);
/// assert!(value.get("count").and_then(DomainValue::as_integer).is_some());
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum DomainValue {
    /// An explicit `null`, distinct from an absent field.
    Null,
    /// A JSON boolean.
    Bool(bool),
    /// A JSON number that does not need a coercion.
    Number(serde_json::Number),
    /// A string that does not need a coercion.
    String(String),
    /// An arbitrary-precision integer, a decimal string on the wire.
    Integer(BigInt),
    /// An absolute instant, an RFC 3339 string on the wire.
    Timestamp(Timestamp),
    /// Raw bytes, a base64 string on the wire.
    Bytes(Bytes),
    /// A list of values.
    Sequence(Vec<DomainValue>),
    /// A record or a string-keyed map.
    Record(Record),
}

impl DomainValue {
    /// Creates a record from `(name, value)` pairs.
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DomainValue>,
    {
        Self::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Creates a sequence from a list of values.
    pub fn sequence<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<DomainValue>,
    {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }

    /// Lifts a wire value without applying any coercions.
    ///
    /// Strings remain strings, even if they look like timestamps or numbers.
    pub fn from_wire_verbatim(value: &WireValue) -> Self {
        match value {
            WireValue::Null => Self::Null,
            WireValue::Bool(b) => Self::Bool(*b),
            WireValue::Number(n) => Self::Number(n.clone()),
            WireValue::String(s) => Self::String(s.clone()),
            WireValue::Array(a) => Self::Sequence(a.iter().map(Self::from_wire_verbatim).collect()),
            WireValue::Object(o) => Self::Record(
                o.iter()
                    .map(|(k, v)| (k.clone(), Self::from_wire_verbatim(v)))
                    .collect(),
            ),
        }
    }

    /// Returns the field named `name` if this is a record.
    pub fn get(&self, name: &str) -> Option<&DomainValue> {
        self.as_record().and_then(|r| r.get(name))
    }

    /// Returns true for [DomainValue::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The value, if this is a [DomainValue::Bool].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value, if this is a [DomainValue::Number].
    pub fn as_number(&self) -> Option<&serde_json::Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The value, if this is a [DomainValue::String].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The value, if this is a [DomainValue::Integer].
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// The value, if this is a [DomainValue::Timestamp].
    pub fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// The value, if this is a [DomainValue::Bytes].
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The elements, if this is a [DomainValue::Sequence].
    pub fn as_sequence(&self) -> Option<&[DomainValue]> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// The fields, if this is a [DomainValue::Record].
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// A short description of the variant, used in error messages.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "a boolean",
            Self::Number(_) => "a number",
            Self::String(_) => "a string",
            Self::Integer(_) => "an integer",
            Self::Timestamp(_) => "a timestamp",
            Self::Bytes(_) => "bytes",
            Self::Sequence(_) => "a sequence",
            Self::Record(_) => "a record",
        }
    }
}

/// A short description of the wire value variant, used in error messages.
pub(crate) fn wire_kind_name(value: &WireValue) -> &'static str {
    match value {
        WireValue::Null => "null",
        WireValue::Bool(_) => "a boolean",
        WireValue::Number(_) => "a number",
        WireValue::String(_) => "a string",
        WireValue::Array(_) => "a sequence",
        WireValue::Object(_) => "a record",
    }
}

impl From<bool> for DomainValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for DomainValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<i64> for DomainValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for DomainValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<serde_json::Number> for DomainValue {
    fn from(value: serde_json::Number) -> Self {
        Self::Number(value)
    }
}

impl From<BigInt> for DomainValue {
    fn from(value: BigInt) -> Self {
        Self::Integer(value)
    }
}

impl From<Timestamp> for DomainValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Bytes> for DomainValue {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<u8>> for DomainValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(value))
    }
}

impl From<Vec<DomainValue>> for DomainValue {
    fn from(value: Vec<DomainValue>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Record> for DomainValue {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl<T: Into<DomainValue>> From<Option<T>> for DomainValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}
