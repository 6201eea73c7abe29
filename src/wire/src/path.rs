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

/// One step in a [FieldPath].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field in a record.
    Field(String),
    /// A position in a sequence.
    Index(usize),
    /// A key in a string-keyed map.
    Key(String),
}

/// The location of a field within a (possibly nested) record.
///
/// Formats using dots for record fields, brackets for sequence positions, and
/// quoted brackets for map keys.
///
/// # Example
/// ```
/// # use google_cloud_wire::FieldPath;
/// let path = FieldPath::default()
///     .field("config")
///     .field("pypiPackages")
///     .index(2)
///     .field("count");
/// assert_eq!(path.to_string(), "config.pypiPackages[2].count");
///
/// let path = FieldPath::default().field("labels").key("env");
/// assert_eq!(path.to_string(), r#"labels["env"]"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Returns a new path extended with a record field.
    pub fn field<T: Into<String>>(mut self, name: T) -> Self {
        self.0.push(PathSegment::Field(name.into()));
        self
    }

    /// Returns a new path extended with a sequence position.
    pub fn index(mut self, index: usize) -> Self {
        self.0.push(PathSegment::Index(index));
        self
    }

    /// Returns a new path extended with a map key.
    pub fn key<T: Into<String>>(mut self, key: T) -> Self {
        self.0.push(PathSegment::Key(key.into()));
        self
    }

    /// The individual steps, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns true for the path of the top-level value.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    // Used while unwinding a failed transform: the error is created at the
    // leaf and each enclosing level prepends its own segment.
    pub(crate) fn prepend(&mut self, segment: PathSegment) {
        self.0.insert(0, segment);
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => write!(f, "{name}")?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}
