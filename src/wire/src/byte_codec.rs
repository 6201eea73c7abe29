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

//! Convert raw byte buffers to and from base64 text.
//!
//! Google Cloud APIs represent `bytes` fields as base64 strings in their JSON
//! payloads. These functions use the standard [RFC 4648] alphabet (`+` and
//! `/`), not the URL-safe variant.
//!
//! # Example
//! ```
//! # use google_cloud_wire::byte_codec::{decode, encode};
//! let text = encode([0xFF, 0xFE]);
//! assert_eq!(text, "//4=");
//! assert_eq!(decode(&text)?.as_ref(), &[0xFF, 0xFE]);
//! # Ok::<(), google_cloud_wire::byte_codec::MalformedInputError>(())
//! ```
//!
//! [RFC 4648]: https://www.rfc-editor.org/rfc/rfc4648#section-4

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use bytes::Bytes;

/// The input text is not valid base64.
///
/// # Example
/// ```
/// # use google_cloud_wire::byte_codec::{decode, MalformedInputError};
/// let err = decode("not base64!").unwrap_err();
/// assert!(matches!(err, MalformedInputError::InvalidCharacter { .. }));
/// ```
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedInputError {
    /// The input contains a character outside the base64 alphabet, or a
    /// padding character somewhere other than the end.
    #[error("invalid base64 character {byte:#04x} at offset {offset}")]
    InvalidCharacter { offset: usize, byte: u8 },

    /// The number of base64 symbols cannot be produced by any input.
    ///
    /// A single symbol left over after the last complete 4-symbol group
    /// cannot encode a full byte.
    #[error("invalid base64 length, found {0} symbols")]
    InvalidLength(usize),

    /// The padding is present but incorrect.
    #[error("invalid base64 padding")]
    InvalidPadding,

    /// The last symbol encodes bits that are not part of any byte.
    ///
    /// Accepting these would allow multiple texts to decode to the same
    /// bytes, and `encode()` would not reproduce the input.
    #[error("non-zero trailing bits in the base64 symbol at offset {offset}")]
    NonCanonicalTrailingBits { offset: usize },
}

impl From<base64::DecodeError> for MalformedInputError {
    fn from(value: base64::DecodeError) -> Self {
        use base64::DecodeError as E;
        match value {
            E::InvalidByte(offset, byte) => Self::InvalidCharacter { offset, byte },
            E::InvalidLength(len) => Self::InvalidLength(len),
            E::InvalidLastSymbol(offset, _) => Self::NonCanonicalTrailingBits { offset },
            E::InvalidPadding => Self::InvalidPadding,
        }
    }
}

/// Encodes `input` as base64 text, with `=` padding and no line breaks.
///
/// The empty input encodes to the empty string.
pub fn encode<T: AsRef<[u8]>>(input: T) -> String {
    STANDARD.encode(input)
}

/// Decodes base64 `text` into raw bytes.
///
/// This is the exact inverse of [encode]. The trailing `=` padding may be
/// omitted, but if present it must be complete.
pub fn decode<T: AsRef<[u8]>>(text: T) -> Result<Bytes, MalformedInputError> {
    let text = text.as_ref();
    let decoded = match text.last() {
        Some(b'=') => STANDARD.decode(text)?,
        _ => STANDARD_NO_PAD.decode(text)?,
    };
    Ok(Bytes::from(decoded))
}
