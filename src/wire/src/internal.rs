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

//! Implementation details provided by the `google-cloud-wire` crate.
//!
//! These types are intended for developers of the Google Cloud client
//! libraries for Rust, mostly to write statically typed records with
//! [serde_with]. They are undocumented and may change at any time.

mod base64;
pub use self::base64::*;
mod bigint;
pub use bigint::*;
