//! Simple wrappers to make many errors hard to make

#![warn(unused_crate_dependencies)]

use std::{fmt::Display, time::Duration};

/// Intended to be similar to Duration but always clear that it is in Seconds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, PartialOrd, Ord,
)]
pub struct Seconds(u64);

/// A point in wall clock time with second resolution, only works with
/// date/time after the unix epoch
///
/// Serialized as an RFC 3339 string so persisted records stay human readable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn now() -> Self {
        Self(
            web_time::SystemTime::UNIX_EPOCH
                .elapsed()
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        )
    }

    pub const fn from_secs_since_unix_epoch(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs_since_unix_epoch(&self) -> Seconds {
        self.0.into()
    }

    /// Returns None if the value is before the unix epoch
    pub fn from_utc_datetime(value: chrono::DateTime<chrono::Utc>) -> Option<Self> {
        u64::try_from(value.timestamp()).ok().map(Self)
    }

    pub fn as_utc_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        i64::try_from(self.0)
            .ok()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC)
    }

    pub fn as_rfc3339(&self) -> String {
        self.as_utc_datetime()
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    pub fn display_as_locale_datetime(&self) -> String {
        chrono::DateTime::<chrono::Local>::from(self.as_utc_datetime())
            .format("%c")
            .to_string()
    }

    /// Returns the number of seconds since `past_time` or None if `past_time`
    /// is in the future
    pub fn seconds_since(self, past_time: Self) -> Option<Seconds> {
        if self.0 < past_time.0 {
            None
        } else {
            Some(self - past_time)
        }
    }

    /// Returns the number of seconds since this timestamp or None if this
    /// timestamp is in the future
    pub fn elapsed(self) -> Option<Seconds> {
        Self::now().seconds_since(self)
    }
}

impl std::ops::Add<Seconds> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Seconds) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub<Seconds> for Timestamp {
    type Output = Self;

    /// Saturates at the unix epoch
    fn sub(self, rhs: Seconds) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Sub for Timestamp {
    type Output = Seconds;

    fn sub(self, rhs: Self) -> Self::Output {
        Seconds::new(self.0.saturating_sub(rhs.0))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_rfc3339())
    }
}

impl serde::Serialize for Timestamp {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_rfc3339())
    }
}

impl<'de> serde::Deserialize<'de> for Timestamp {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let parsed = chrono::DateTime::parse_from_rfc3339(&raw).map_err(serde::de::Error::custom)?;
        Self::from_utc_datetime(parsed.with_timezone(&chrono::Utc))
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp before unix epoch: {raw}")))
    }
}

impl Seconds {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn from_mins(mins: u64) -> Self {
        Self(mins * 60)
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self(hours * 60 * 60)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns true if this represents zero seconds
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_sub(&self, other: Seconds) -> Seconds {
        Self(self.0.saturating_sub(other.0))
    }
}

impl From<u64> for Seconds {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Seconds> for Duration {
    fn from(value: Seconds) -> Self {
        Duration::from_secs(value.0)
    }
}

impl std::ops::Add for Seconds {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Display for Seconds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}
