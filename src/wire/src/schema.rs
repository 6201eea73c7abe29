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

use std::collections::HashMap;
use std::sync::Arc;

/// The conversion applied to one field when crossing the wire boundary.
///
/// Leaf coercions convert a string on the wire to a richer domain type.
/// Composite coercions describe how to recurse into nested values.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Coercion {
    /// The value is copied verbatim in both directions.
    #[default]
    None,
    /// RFC 3339 string on the wire, [Timestamp][crate::Timestamp] in memory.
    Timestamp,
    /// Decimal string on the wire, [BigInt][num_bigint::BigInt] in memory.
    Integer,
    /// Base64 string on the wire, [Bytes][bytes::Bytes] in memory.
    Bytes,
    /// A nested record with its own schema.
    Record(Arc<RecordSchema>),
    /// A sequence, each element converted with the inner coercion.
    Sequence(Box<Coercion>),
    /// A string-keyed map, each value converted with the inner coercion.
    ///
    /// Keys are never converted.
    Map(Box<Coercion>),
}

impl Coercion {
    /// A nested record.
    pub fn record(schema: RecordSchema) -> Self {
        Self::Record(Arc::new(schema))
    }

    /// A sequence whose elements use `inner`.
    pub fn sequence_of(inner: Coercion) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// A map whose values use `inner`.
    pub fn map_of(inner: Coercion) -> Self {
        Self::Map(Box::new(inner))
    }
}

/// The fields of a record that need a coercion.
///
/// Fields not listed in the schema are passed through verbatim.
///
/// # Example
/// ```
/// # use google_cloud_wire::{Coercion, RecordSchema};
/// let package = RecordSchema::new().integer("count");
/// let software = RecordSchema::new()
///     .sequence("pypiPackages", Coercion::record(package))
///     .map("checksums", Coercion::Bytes);
/// let schema = RecordSchema::new()
///     .timestamp("createTime")
///     .record("softwareConfig", software);
/// assert_eq!(schema.fields().count(), 2);
/// assert_eq!(schema.coercion("createTime"), Some(&Coercion::Timestamp));
/// assert_eq!(schema.coercion("name"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSchema {
    fields: Vec<(String, Coercion)>,
    // Position of each name in `fields`.
    index: HashMap<String, usize>,
}

impl RecordSchema {
    /// Creates a schema with no coerced fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the coercion for `name`, replacing any previous coercion.
    pub fn field<T: Into<String>>(mut self, name: T, coercion: Coercion) -> Self {
        let name = name.into();
        match self.index.get(&name) {
            Some(&i) => self.fields[i].1 = coercion,
            None => {
                self.index.insert(name.clone(), self.fields.len());
                self.fields.push((name, coercion));
            }
        }
        self
    }

    /// A timestamp field.
    pub fn timestamp<T: Into<String>>(self, name: T) -> Self {
        self.field(name, Coercion::Timestamp)
    }

    /// An arbitrary-precision integer field.
    pub fn integer<T: Into<String>>(self, name: T) -> Self {
        self.field(name, Coercion::Integer)
    }

    /// A bytes field.
    pub fn bytes<T: Into<String>>(self, name: T) -> Self {
        self.field(name, Coercion::Bytes)
    }

    /// A nested record field.
    pub fn record<T: Into<String>>(self, name: T, schema: RecordSchema) -> Self {
        self.field(name, Coercion::record(schema))
    }

    /// A sequence field, with `element` applied to each element.
    pub fn sequence<T: Into<String>>(self, name: T, element: Coercion) -> Self {
        self.field(name, Coercion::sequence_of(element))
    }

    /// A map field, with `value` applied to each value.
    pub fn map<T: Into<String>>(self, name: T, value: Coercion) -> Self {
        self.field(name, Coercion::map_of(value))
    }

    /// The coercion for `name`, if the schema describes it.
    pub fn coercion(&self, name: &str) -> Option<&Coercion> {
        self.index.get(name).map(|&i| &self.fields[i].1)
    }

    /// The fields described by the schema, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Coercion)> {
        self.fields.iter().map(|(n, c)| (n.as_str(), c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let schema = RecordSchema::new()
            .timestamp("a")
            .integer("b")
            .bytes("c")
            .record("d", RecordSchema::new())
            .sequence("e", Coercion::Integer)
            .map("f", Coercion::Timestamp)
            .field("g", Coercion::None);
        let names = schema.fields().map(|(n, _)| n).collect::<Vec<_>>();
        assert_eq!(names, ["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(schema.coercion("a"), Some(&Coercion::Timestamp));
        assert_eq!(schema.coercion("b"), Some(&Coercion::Integer));
        assert_eq!(schema.coercion("c"), Some(&Coercion::Bytes));
        assert_eq!(
            schema.coercion("d"),
            Some(&Coercion::record(RecordSchema::new()))
        );
        assert_eq!(
            schema.coercion("e"),
            Some(&Coercion::sequence_of(Coercion::Integer))
        );
        assert_eq!(
            schema.coercion("f"),
            Some(&Coercion::map_of(Coercion::Timestamp))
        );
        assert_eq!(schema.coercion("g"), Some(&Coercion::None));
        assert_eq!(schema.coercion("h"), None);
    }

    #[test]
    fn replace() {
        let schema = RecordSchema::new().timestamp("a").integer("a");
        assert_eq!(schema.fields().count(), 1);
        assert_eq!(schema.coercion("a"), Some(&Coercion::Integer));
    }

    #[test]
    fn replace_keeps_position() {
        let schema = RecordSchema::new()
            .timestamp("a")
            .integer("b")
            .bytes("a")
            .integer("c");
        let fields = schema.fields().collect::<Vec<_>>();
        assert_eq!(
            fields,
            [
                ("a", &Coercion::Bytes),
                ("b", &Coercion::Integer),
                ("c", &Coercion::Integer),
            ]
        );
    }

    #[test]
    fn many_fields() {
        let schema = (0..500).fold(RecordSchema::new(), |s, i| s.integer(format!("f{i}")));
        assert_eq!(schema.fields().count(), 500);
        assert_eq!(schema.coercion("f0"), Some(&Coercion::Integer));
        assert_eq!(schema.coercion("f499"), Some(&Coercion::Integer));
        assert_eq!(schema.coercion("f500"), None);
        let schema = schema.timestamp("f250");
        assert_eq!(schema.fields().count(), 500);
        assert_eq!(schema.coercion("f250"), Some(&Coercion::Timestamp));
        assert_eq!(schema.fields().nth(250), Some(("f250", &Coercion::Timestamp)));
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RecordSchema>();
        assert_send_sync::<Coercion>();
    }
}
