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

//! JSON wire codec for Google Cloud APIs.
//!
//! **WARNING:** this crate is under active development. We expect multiple
//! breaking changes in the upcoming releases. Testing is also incomplete, we do
//! **not** recommend that you use this crate in production. We welcome feedback
//! about the APIs, documentation, missing features, bugs, etc.
//!
//! Google Cloud APIs exchange JSON payloads. In JSON, binary data, large
//! integers, and timestamps are all strings. Applications prefer richer types:
//! raw bytes, arbitrary-precision integers, and absolute instants. This crate
//! converts between the two representations:
//!
//! - [byte_codec] converts raw bytes to and from base64 text.
//! - [to_wire] and [to_domain] convert whole records, guided by a
//!   [RecordSchema] that names the fields requiring a conversion.
//! - The types in [internal] provide the same conversions for statically
//!   typed records, using [serde_with].
//!
//! # Example
//! ```
//! # use google_cloud_wire::{Coercion, DomainValue, RecordSchema, to_domain, to_wire};
//! # use serde_json::json;
//! let schema = RecordSchema::new()
//!     .timestamp("createTime")
//!     .integer("sizeBytes")
//!     .sequence("checksums", Coercion::Bytes);
//! let wire = json!({
//!     "name": "projects/p/buckets/b",
//!     "createTime": "2024-01-15T10:30:00.000Z",
//!     "sizeBytes": "18446744073709551616",
//!     "checksums": ["//4="],
//! });
//! let domain = to_domain(&wire, &schema)?;
//! assert!(domain.get("createTime").and_then(DomainValue::as_timestamp).is_some());
//! assert_eq!(to_wire(&domain, &schema)?, wire);
//! # Ok::<(), google_cloud_wire::FieldCoercionError>(())
//! ```

pub mod byte_codec;
pub use byte_codec::MalformedInputError;
pub mod error;
pub use error::{CoercionError, FieldCoercionError};
mod path;
pub use path::{FieldPath, PathSegment};
mod schema;
pub use schema::{Coercion, RecordSchema};
mod timestamp;
pub use timestamp::{Timestamp, TimestampError};
mod transform;
pub use transform::{to_domain, to_wire};
mod value;
pub use value::{DomainValue, Record, WireValue};

#[cfg_attr(not(feature = "_internal-semver"), doc(hidden))]
pub mod internal;
