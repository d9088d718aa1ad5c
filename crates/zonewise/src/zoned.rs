//! Timestamps bound to an IANA zone.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Offset, Utc};
use chrono_tz::{OffsetComponents, Tz};
use serde::Serialize;

use crate::error::{Result, ZoneError};

/// Format used by [`ZonedTimestamp`]'s `Display` impl.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// An instant expressed in a specific zone.
///
/// The UTC offset, DST flag and abbreviation are all read from the zone's
/// rule table for this instant; nothing is cached or recomputed here.
#[derive(Debug, Clone, Copy)]
pub struct ZonedTimestamp(DateTime<Tz>);

/// Serializable snapshot of a [`ZonedTimestamp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZonedSummary {
    /// The instant in the zone (RFC 3339 with offset).
    pub local: String,
    /// The instant in UTC (RFC 3339).
    pub utc: String,
    /// The IANA zone name.
    pub timezone: String,
    /// The UTC offset at this instant (e.g., "-04:00").
    pub utc_offset: String,
    /// Zone abbreviation at this instant (e.g., "EDT").
    pub abbreviation: String,
    /// Whether Daylight Saving Time is active at this instant.
    pub dst_active: bool,
}

impl ZonedTimestamp {
    pub(crate) fn new(inner: DateTime<Tz>) -> Self {
        Self(inner)
    }

    /// The IANA name of the zone this timestamp is expressed in.
    pub fn zone(&self) -> &'static str {
        self.0.timezone().name()
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Tz> {
        self.0
    }

    /// Wall-clock reading in this zone.
    pub fn naive_local(&self) -> NaiveDateTime {
        self.0.naive_local()
    }

    /// Calendar date in this zone.
    pub fn date_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Seconds east of UTC, DST included.
    pub fn offset_seconds(&self) -> i32 {
        self.0.offset().fix().local_minus_utc()
    }

    /// The UTC offset as `±HH:MM`.
    pub fn utc_offset(&self) -> String {
        let offset_secs = self.offset_seconds();
        let sign = if offset_secs >= 0 { "+" } else { "-" };
        let abs_secs = offset_secs.unsigned_abs();
        let hours = abs_secs / 3600;
        let minutes = (abs_secs % 3600) / 60;
        format!("{sign}{hours:02}:{minutes:02}")
    }

    /// Whether the zone's DST component is non-zero at this instant.
    pub fn is_dst(&self) -> bool {
        self.0.offset().dst_offset() != Duration::zero()
    }

    /// Zone abbreviation (`EST`, `JST`, ...) or a numeric offset for zones
    /// the tzdb gives no letters to.
    pub fn abbreviation(&self) -> String {
        self.0.format("%Z").to_string()
    }

    /// Format with a strftime-style pattern.
    ///
    /// Returns [`ZoneError::InvalidFormat`] if `pattern` holds a specifier
    /// chrono does not understand.
    pub fn format(&self, pattern: &str) -> Result<String> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(pattern)).map_err(|_| ZoneError::InvalidFormat {
            input: self.0.to_rfc3339(),
            format: pattern.to_string(),
        })?;
        Ok(out)
    }

    pub fn summary(&self) -> ZonedSummary {
        ZonedSummary {
            local: self.0.to_rfc3339(),
            utc: self.to_utc().to_rfc3339(),
            timezone: self.zone().to_string(),
            utc_offset: self.utc_offset(),
            abbreviation: self.abbreviation(),
            dst_active: self.is_dst(),
        }
    }
}

/// Equal when both the instant and the zone match.
impl PartialEq for ZonedTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.0.timezone() == other.0.timezone()
    }
}

impl Eq for ZonedTimestamp {}

impl fmt::Display for ZonedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl From<ZonedTimestamp> for DateTime<Tz> {
    fn from(ts: ZonedTimestamp) -> Self {
        ts.0
    }
}

impl From<DateTime<Tz>> for ZonedTimestamp {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt)
    }
}
