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

//! Implement custom serializers for arbitrary-precision integers.
//!
//! The integers are serialized as decimal strings, but can be deserialized
//! from strings or (integral) JSON numbers.

use crate::transform::parse_integer;
use serde::de::Unexpected::Other;

pub struct BigInt;

impl<'de> serde_with::DeserializeAs<'de, num_bigint::BigInt> for BigInt {
    fn deserialize_as<D>(deserializer: D) -> Result<num_bigint::BigInt, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_any(BigIntVisitor)
    }
}

impl serde_with::SerializeAs<num_bigint::BigInt> for BigInt {
    fn serialize_as<S>(source: &num_bigint::BigInt, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(source)
    }
}

const EXPECTING: &str = "an integer, as a decimal string or a JSON number";

struct BigIntVisitor;

impl serde::de::Visitor<'_> for BigIntVisitor {
    type Value = num_bigint::BigInt;

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        parse_integer(value).map_err(|_| E::invalid_value(Other(value), &EXPECTING))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }

    fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }

    fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value.into())
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(E::invalid_value(
            serde::de::Unexpected::Float(value),
            &EXPECTING,
        ))
    }

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str(EXPECTING)
    }
}
