//! # Temporal Types — UTC Timestamps
//!
//! `Timestamp` is the single representation of `issuanceDate`,
//! `expirationDate`, `created` and `updated` across the entity model.
//!
//! Values are held in UTC and truncated to whole seconds. They always render
//! as `YYYY-MM-DDTHH:MM:SSZ`, so one instant has exactly one textual form and
//! therefore one canonical byte sequence. Years are confined to 0000..=9999,
//! the range that four-digit form can express; every constructor enforces it.
//!
//! Input is accepted more liberally than it is produced: [`Timestamp::parse`]
//! takes RFC 3339 with any offset (converted to UTC) as well as a naive
//! ISO 8601 date-time, which is taken to be UTC. Badge documents in the wild
//! carry all of these forms.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// `0000-01-01T00:00:00Z`.
const MIN_EPOCH_SECS: i64 = -62_167_219_200;
/// `9999-12-31T23:59:59Z`.
const MAX_EPOCH_SECS: i64 = 253_402_300_799;

/// A UTC timestamp with seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// # Errors
    ///
    /// `ValidationError::InvalidTimestamp` if the year is outside 0000..=9999.
    pub fn from_utc(dt: DateTime<Utc>) -> Result<Self, ValidationError> {
        if !(MIN_EPOCH_SECS..=MAX_EPOCH_SECS).contains(&dt.timestamp()) {
            return Err(out_of_range(dt.to_string()));
        }
        Ok(Self(truncate_to_seconds(dt)))
    }

    /// Parse an ISO 8601 date-time.
    ///
    /// Accepted forms:
    /// - RFC 3339 with `Z` or a numeric offset (`2024-03-01T10:00:00+02:00`)
    /// - naive date-time without offset, assumed UTC (`2024-03-01T10:00:00`)
    ///
    /// Fractional seconds are accepted and discarded.
    ///
    /// # Errors
    ///
    /// `ValidationError::InvalidTimestamp` if neither form parses, or if the
    /// instant in UTC falls outside years 0000..=9999.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        let dt = match DateTime::parse_from_rfc3339(trimmed) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(_) => NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
                .map_err(|e| ValidationError::InvalidTimestamp {
                    value: s.to_string(),
                    reason: e.to_string(),
                })?
                .and_utc(),
        };
        Self::from_utc(dt).map_err(|_| out_of_range(s.to_string()))
    }

    pub fn from_epoch_secs(secs: i64) -> Result<Self, ValidationError> {
        if !(MIN_EPOCH_SECS..=MAX_EPOCH_SECS).contains(&secs) {
            return Err(out_of_range(secs.to_string()));
        }
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| out_of_range(secs.to_string()))
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Shift by a signed number of seconds. Saturates at `0000-01-01T00:00:00Z`
    /// and `9999-12-31T23:59:59Z`.
    pub fn plus_seconds(&self, secs: i64) -> Self {
        let shifted = self
            .epoch_secs()
            .saturating_add(secs)
            .clamp(MIN_EPOCH_SECS, MAX_EPOCH_SECS);
        DateTime::from_timestamp(shifted, 0).map(Self).unwrap_or(*self)
    }

    /// Render as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = ValidationError;

    fn try_from(dt: DateTime<Utc>) -> Result<Self, Self::Error> {
        Self::from_utc(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

fn out_of_range(value: String) -> ValidationError {
    ValidationError::InvalidTimestamp {
        value,
        reason: "year outside 0000..=9999".to_string(),
    }
}
