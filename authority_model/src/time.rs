//! Timestamps and clocks.
//!
//! Every record carries a [`Timestamp`]. New timestamps come from a [`Clock`]
//! so that callers (and tests) control what "now" means.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cell::Cell;
use std::str::FromStr;

/// Naive ISO-8601 layout without an offset, read as UTC.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Sub-second digits kept; matches the precision of the string form.
const SUBSEC_DIGITS: u16 = 6;

/// A UTC instant with microsecond precision, serialized as an ISO-8601 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from(Utc::now())
    }

    /// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Self::from(dt.with_timezone(&Utc))),
            Err(_) => {
                let naive = NaiveDateTime::parse_from_str(s, NAIVE_FORMAT)?;
                Ok(Self::from(naive.and_utc()))
            }
        }
    }

    /// Get the underlying chrono value.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt.trunc_subsecs(SUBSEC_DIGITS))
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Micros, true))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }
}

/// Source of "now" for newly created records.
pub trait Clock: std::fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A deterministic clock for tests and replays.
///
/// Returns the configured instant; a stepping clock moves forward by `step`
/// after every reading so successive records get distinct timestamps.
#[derive(Debug, Clone)]
pub struct FixedClock {
    current: Cell<DateTime<Utc>>,
    step: chrono::Duration,
}

impl FixedClock {
    /// A clock frozen at `instant`.
    pub fn new(instant: impl Into<Timestamp>) -> Self {
        Self::stepping(instant, chrono::Duration::zero())
    }

    /// A clock starting at `instant` that advances by `step` per reading.
    pub fn stepping(instant: impl Into<Timestamp>, step: chrono::Duration) -> Self {
        Self {
            current: Cell::new(instant.into().0),
            step,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        let now = self.current.get();
        self.current.set(now + self.step);
        Timestamp::from(now)
    }
}
