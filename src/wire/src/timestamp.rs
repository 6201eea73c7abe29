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

use time::format_description::well_known::Rfc3339;

/// An absolute point in time, as used in Google Cloud API payloads.
///
/// # Examples
/// ```
/// # use google_cloud_wire::{Timestamp, TimestampError};
/// let ts = Timestamp::try_from("2024-01-15T10:30:00.250Z")?;
/// assert_eq!(ts.seconds(), 1705314600);
/// assert_eq!(ts.nanos(), 250_000_000);
/// assert_eq!(ts.to_string(), "2024-01-15T10:30:00.250Z");
/// # Ok::<(), TimestampError>(())
/// ```
///
/// A Timestamp represents a point in time independent of any time zone or local
/// calendar, encoded as a count of seconds and fractions of seconds at
/// nanosecond resolution. The count is relative to an epoch at UTC midnight on
/// January 1, 1970, in the proleptic Gregorian calendar.
///
/// The range is from 0001-01-01T00:00:00Z to 9999-12-31T23:59:59.999999999Z. By
/// restricting to that range, we ensure that we can convert to and from [RFC
/// 3339](https://www.ietf.org/rfc/rfc3339.txt) date strings.
///
/// # JSON Mapping
///
/// On the wire a Timestamp is always a string in the form
/// `{year}-{month}-{day}T{hour}:{min}:{sec}.{millis}Z`, with exactly three
/// fractional digits and the `Z` (UTC) suffix. Any sub-millisecond precision
/// is truncated when formatting.
///
/// When parsing, any RFC 3339 string is accepted, including strings with
/// numeric UTC offsets and between zero and nine fractional digits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp {
    /// Seconds since the Unix epoch. Must be from 0001-01-01T00:00:00Z to
    /// 9999-12-31T23:59:59Z inclusive.
    seconds: i64,

    /// Non-negative fractions of a second at nanosecond resolution. Negative
    /// second values with fractions must still have non-negative nanos values
    /// that count forward in time. Must be from 0 to 999,999,999 inclusive.
    nanos: i32,
}

/// Represent failures in converting or creating [Timestamp] instances.
///
/// # Examples
/// ```
/// # use google_cloud_wire::{Timestamp, TimestampError};
/// let ts = Timestamp::new(Timestamp::MAX_SECONDS + 2, 0);
/// assert!(matches!(ts, Err(TimestampError::OutOfRange)));
///
/// let ts = Timestamp::try_from("invalid");
/// assert!(matches!(ts, Err(TimestampError::Parse(_))));
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum TimestampError {
    /// One of the components (seconds and/or nanoseconds) was out of range.
    #[error("seconds and/or nanoseconds out of range")]
    OutOfRange,

    /// The string is not an RFC 3339 timestamp.
    #[error("cannot parse timestamp, source={0}")]
    Parse(#[source] BoxedError),
}

type BoxedError = Box<dyn std::error::Error + Send + Sync>;
type Error = TimestampError;

const NS: i128 = 1_000_000_000;

impl Timestamp {
    const NS: i32 = 1_000_000_000;
    const NS_PER_MILLI: i32 = 1_000_000;

    // Obtained via: `date +%s --date='0001-01-01T00:00:00Z'`
    /// The minimum value for the `seconds` component. Corresponds to '0001-01-01T00:00:00Z'.
    pub const MIN_SECONDS: i64 = -62135596800;

    // Obtained via: `date +%s --date='9999-12-31T23:59:59Z'`
    /// The maximum value for the `seconds` component. Corresponds to '9999-12-31T23:59:59Z'.
    pub const MAX_SECONDS: i64 = 253402300799;

    /// The minimum value for the `nanos` component.
    pub const MIN_NANOS: i32 = 0;

    /// The maximum value for the `nanos` component.
    pub const MAX_NANOS: i32 = Self::NS - 1;

    /// Creates a new [Timestamp] from the seconds and nanoseconds.
    ///
    /// If either value is out of range it returns an error.
    ///
    /// # Examples
    /// ```
    /// # use google_cloud_wire::{Timestamp, TimestampError};
    /// let ts = Timestamp::new(1705314600, 0)?;
    /// assert_eq!(ts.to_string(), "2024-01-15T10:30:00.000Z");
    ///
    /// let ts = Timestamp::new(1705314600, 2_000_000_000);
    /// assert!(matches!(ts, Err(TimestampError::OutOfRange)));
    /// # Ok::<(), TimestampError>(())
    /// ```
    pub fn new(seconds: i64, nanos: i32) -> Result<Self, Error> {
        if !(Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            return Err(Error::OutOfRange);
        }
        if !(Self::MIN_NANOS..=Self::MAX_NANOS).contains(&nanos) {
            return Err(Error::OutOfRange);
        }
        Ok(Self { seconds, nanos })
    }

    /// Create a normalized, clamped [Timestamp].
    ///
    /// # Examples
    /// ```
    /// # use google_cloud_wire::Timestamp;
    /// let ts = Timestamp::clamp(1705314600, 2_000_000_000);
    /// // extra nanoseconds are carried as seconds
    /// assert_eq!(ts.to_string(), "2024-01-15T10:30:02.000Z");
    /// ```
    ///
    /// The function effectively adds the nanoseconds part (with carry) to the
    /// seconds part, with saturation to the valid range.
    pub fn clamp(seconds: i64, nanos: i32) -> Self {
        let (seconds, nanos) = match nanos.cmp(&0_i32) {
            std::cmp::Ordering::Equal => (seconds, nanos),
            std::cmp::Ordering::Greater => (
                seconds.saturating_add((nanos / Self::NS) as i64),
                nanos % Self::NS,
            ),
            std::cmp::Ordering::Less => (
                seconds.saturating_sub(1 - (nanos / Self::NS) as i64),
                Self::NS + nanos % Self::NS,
            ),
        };
        if seconds < Self::MIN_SECONDS {
            return Self {
                seconds: Self::MIN_SECONDS,
                nanos: 0,
            };
        } else if seconds > Self::MAX_SECONDS {
            return Self {
                seconds: Self::MAX_SECONDS,
                nanos: 0,
            };
        }
        Self { seconds, nanos }
    }

    /// Creates a [Timestamp] from milliseconds since the Unix epoch.
    ///
    /// # Examples
    /// ```
    /// # use google_cloud_wire::{Timestamp, TimestampError};
    /// let ts = Timestamp::from_millis(-1)?;
    /// assert_eq!(ts.to_string(), "1969-12-31T23:59:59.999Z");
    /// # Ok::<(), TimestampError>(())
    /// ```
    pub fn from_millis(millis: i64) -> Result<Self, Error> {
        let seconds = millis.div_euclid(1000);
        let nanos = millis.rem_euclid(1000) as i32 * Self::NS_PER_MILLI;
        Self::new(seconds, nanos)
    }

    /// Seconds of UTC time since the Unix epoch (1970-01-01T00:00:00Z).
    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Non-negative fractions of a second at nanosecond resolution.
    pub fn nanos(&self) -> i32 {
        self.nanos
    }

    /// Milliseconds since the Unix epoch, rounded towards the past.
    pub fn millis(&self) -> i64 {
        self.seconds * 1000 + (self.nanos / Self::NS_PER_MILLI) as i64
    }

    /// Drops any sub-millisecond precision.
    ///
    /// This is the value observed after a round trip through the wire format.
    ///
    /// # Examples
    /// ```
    /// # use google_cloud_wire::{Timestamp, TimestampError};
    /// let ts = Timestamp::new(12, 345_678_901)?;
    /// assert_eq!(ts.truncate_to_millis(), Timestamp::new(12, 345_000_000)?);
    /// # Ok::<(), TimestampError>(())
    /// ```
    pub fn truncate_to_millis(self) -> Self {
        Self {
            seconds: self.seconds,
            nanos: self.nanos - self.nanos % Self::NS_PER_MILLI,
        }
    }
}

const EXPECT_OFFSET_DATE_TIME_CONVERTS: &str = concat!(
    "converting Timestamp to time::OffsetDateTime should always succeed. ",
    "The Timestamp values are always in range. ",
    "If this is not the case, please file a bug at https://github.com/googleapis/google-cloud-rust/issues"
);

/// Formats the timestamp using its wire representation.
impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let odt = time::OffsetDateTime::from_unix_timestamp_nanos(
            self.seconds as i128 * NS + self.nanos as i128,
        )
        .expect(EXPECT_OFFSET_DATE_TIME_CONVERTS);
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            odt.year(),
            u8::from(odt.month()),
            odt.day(),
            odt.hour(),
            odt.minute(),
            odt.second(),
            odt.millisecond()
        )
    }
}

/// Converts a [Timestamp] to its wire representation.
impl From<Timestamp> for String {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.to_string()
    }
}

/// Parses an RFC 3339 string into a [Timestamp].
///
/// # Example
/// ```
/// # use google_cloud_wire::{Timestamp, TimestampError};
/// let ts = Timestamp::try_from("2024-01-15T12:30:00+02:00")?;
/// assert_eq!(ts.to_string(), "2024-01-15T10:30:00.000Z");
/// # Ok::<(), TimestampError>(())
/// ```
impl TryFrom<&str> for Timestamp {
    type Error = TimestampError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let odt = time::OffsetDateTime::parse(value, &Rfc3339)
            .map_err(|e| TimestampError::Parse(e.into()))?;
        let nanos_since_epoch = odt.unix_timestamp_nanos();
        let seconds = (nanos_since_epoch / NS) as i64;
        let nanos = (nanos_since_epoch % NS) as i32;
        if nanos < 0 {
            return Timestamp::new(seconds - 1, Self::NS + nanos);
        }
        Timestamp::new(seconds, nanos)
    }
}

impl TryFrom<&String> for Timestamp {
    type Error = TimestampError;
    fn try_from(value: &String) -> Result<Self, Self::Error> {
        Timestamp::try_from(value.as_str())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = TimestampError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timestamp::try_from(s)
    }
}

/// Implement [`serde`](::serde) serialization for timestamps.
impl serde::ser::Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.collect_str(self)
    }
}

struct TimestampVisitor;

impl serde::de::Visitor<'_> for TimestampVisitor {
    type Value = Timestamp;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string with a timestamp in RFC 3339 format")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Timestamp::try_from(value).map_err(E::custom)
    }
}

/// Implement [`serde`](::serde) deserialization for timestamps.
impl<'de> serde::de::Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(TimestampVisitor)
    }
}

/// Convert from [time::OffsetDateTime] to [Timestamp].
///
/// This conversion may fail if the [time::OffsetDateTime] value is out of range.
///
/// # Examples
/// ```
/// # use google_cloud_wire::Timestamp;
/// use time::macros::datetime;
/// let dt = datetime!(2024-01-15 10:30:00 UTC);
/// let ts = Timestamp::try_from(dt)?;
/// assert_eq!(ts.to_string(), "2024-01-15T10:30:00.000Z");
/// # Ok::<(), anyhow::Error>(())
/// ```
impl TryFrom<time::OffsetDateTime> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: time::OffsetDateTime) -> Result<Self, Self::Error> {
        let seconds = value.unix_timestamp();
        let nanos = (value.unix_timestamp_nanos() - seconds as i128 * NS) as i32;
        Self::new(seconds, nanos)
    }
}

/// Convert from [Timestamp] to [OffsetDateTime][time::OffsetDateTime].
impl TryFrom<Timestamp> for time::OffsetDateTime {
    type Error = time::error::ComponentRange;
    fn try_from(value: Timestamp) -> Result<Self, Self::Error> {
        let ts = time::OffsetDateTime::from_unix_timestamp(value.seconds())?;
        Ok(ts + time::Duration::nanoseconds(value.nanos() as i64))
    }
}

/// Converts from [chrono::DateTime] to [Timestamp].
///
/// This conversion may fail if the [chrono::DateTime] value is out of range.
#[cfg(feature = "chrono")]
#[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
impl TryFrom<chrono::DateTime<chrono::Utc>> for Timestamp {
    type Error = TimestampError;

    fn try_from(value: chrono::DateTime<chrono::Utc>) -> Result<Self, Self::Error> {
        // chrono represents leap seconds with nanos >= 1_000_000_000.
        let nanos = i32::try_from(value.timestamp_subsec_nanos()).map_err(|_| Error::OutOfRange)?;
        Timestamp::new(value.timestamp(), nanos)
    }
}

/// Converts from [Timestamp] to [chrono::DateTime].
#[cfg(feature = "chrono")]
#[cfg_attr(docsrs, doc(cfg(feature = "chrono")))]
impl TryFrom<Timestamp> for chrono::DateTime<chrono::Utc> {
    type Error = TimestampError;
    fn try_from(value: Timestamp) -> Result<Self, Self::Error> {
        chrono::DateTime::from_timestamp(value.seconds, value.nanos as u32).ok_or(Error::OutOfRange)
    }
}
