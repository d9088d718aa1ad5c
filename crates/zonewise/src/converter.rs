//! Zone lookup and DST-aware conversion.
//!
//! [`TimezoneConverter`] loads the zone list once at construction and keeps
//! it as an immutable, sorted table. Lookups (`validate_timezone`,
//! `search_timezones`, `list_common_timezones`) read that table; conversions
//! resolve zones through the backend at the point of use, so a bad zone name
//! surfaces as [`ZoneError::InvalidTimezone`] carrying the backend's own
//! diagnostic.
//!
//! # Example
//!
//! ```
//! use chrono::{Datelike, Timelike};
//! use zonewise::TimezoneConverter;
//!
//! let converter = TimezoneConverter::new().unwrap();
//! let tokyo = converter
//!     .convert_time("2023-06-15 20:00:00", "UTC", "Asia/Tokyo", zonewise::DEFAULT_TIME_FORMAT)
//!     .unwrap();
//! // UTC+9 rolls the date forward
//! assert_eq!(tokyo.as_datetime().hour(), 5);
//! assert_eq!(tokyo.as_datetime().day(), 16);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::{debug, warn};

use crate::backend::{Tzdb, ZoneBackend};
use crate::dst::Disambiguation;
use crate::error::{Result, ZoneError};
use crate::zoned::ZonedTimestamp;

/// Input format used when the caller does not supply one.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Well-known zones, in presentation order.
pub const COMMON_TIMEZONES: [&str; 16] = [
    "UTC",
    "US/Eastern",
    "US/Central",
    "US/Mountain",
    "US/Pacific",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Asia/Kolkata",
    "Australia/Sydney",
    "America/New_York",
    "America/Chicago",
    "America/Denver",
    "America/Los_Angeles",
];

/// Options for [`TimezoneConverter::convert_time_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// strftime-style pattern the input text must match.
    pub format: String,
    /// How to read a source-zone local time that falls in a DST gap or overlap.
    pub disambiguation: Disambiguation,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: DEFAULT_TIME_FORMAT.to_string(),
            disambiguation: Disambiguation::default(),
        }
    }
}

impl ConvertOptions {
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Default::default()
        }
    }
}

/// Validates, lists, searches and converts between IANA zones.
///
/// The zone table is loaded once and never mutated, so a converter can be
/// shared across threads behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct TimezoneConverter<B = Tzdb> {
    backend: B,
    zones: Vec<String>,
}

impl TimezoneConverter<Tzdb> {
    /// Load the zone table from the bundled IANA database.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::NoZoneDatabase`] if no zones are available.
    pub fn new() -> Result<Self> {
        Self::with_backend(Tzdb)
    }
}

impl<B: ZoneBackend> TimezoneConverter<B> {
    /// Load the zone table from `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::NoZoneDatabase`] if the backend lists no zones.
    /// Nothing else can be done without a zone table, so callers should treat
    /// this as fatal.
    pub fn with_backend(backend: B) -> Result<Self> {
        let mut zones = backend.zone_names();
        if zones.is_empty() {
            return Err(ZoneError::NoZoneDatabase);
        }
        zones.sort();
        zones.dedup();
        debug!(zones = zones.len(), "loaded timezone database");
        Ok(Self { backend, zones })
    }

    /// Every known zone identifier, sorted.
    pub fn available_zones(&self) -> &[String] {
        &self.zones
    }

    /// Exact, case-sensitive membership test. No trimming is applied.
    pub fn validate_timezone(&self, name: &str) -> bool {
        self.zones
            .binary_search_by(|zone| zone.as_str().cmp(name))
            .is_ok()
    }

    /// The current instant expressed in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidTimezone`] if `zone` cannot be resolved.
    pub fn get_current_time(&self, zone: &str) -> Result<ZonedTimestamp> {
        self.time_at(zone, Utc::now())
    }

    /// `instant` expressed in `zone`.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidTimezone`] if `zone` cannot be resolved.
    pub fn time_at(&self, zone: &str, instant: DateTime<Utc>) -> Result<ZonedTimestamp> {
        let tz = self.resolve(zone)?;
        Ok(ZonedTimestamp::new(instant.with_timezone(&tz)))
    }

    /// Convert `text`, read as wall-clock time in `from_zone`, to `to_zone`.
    ///
    /// The naive time is anchored in the source zone's civil time, not UTC:
    /// `"2023-06-15 12:00:00"` from `"US/Eastern"` means noon Eastern. The
    /// target's offset is the one in force on that date.
    ///
    /// # Errors
    ///
    /// - [`ZoneError::InvalidFormat`] if `text` does not match `format`
    /// - [`ZoneError::InvalidTimezone`] if either zone cannot be resolved
    pub fn convert_time(
        &self,
        text: &str,
        from_zone: &str,
        to_zone: &str,
        format: &str,
    ) -> Result<ZonedTimestamp> {
        let options = ConvertOptions::with_format(format);
        self.convert_time_with(text, from_zone, to_zone, &options)
    }

    /// [`convert_time`](Self::convert_time) with an explicit DST policy.
    ///
    /// # Errors
    ///
    /// As for `convert_time`, plus [`ZoneError::AmbiguousLocalTime`] and
    /// [`ZoneError::NonexistentLocalTime`] under [`Disambiguation::Reject`].
    pub fn convert_time_with(
        &self,
        text: &str,
        from_zone: &str,
        to_zone: &str,
        options: &ConvertOptions,
    ) -> Result<ZonedTimestamp> {
        let naive = parse_naive(text, &options.format)?;
        let from_tz = self.resolve(from_zone)?;
        let to_tz = self.resolve(to_zone)?;

        let source = options.disambiguation.localize(from_tz, &naive)?;
        let converted = source.with_timezone(&to_tz);

        debug!(
            input = text,
            from = from_zone,
            to = to_zone,
            result = %converted.to_rfc3339(),
            "converted time"
        );
        Ok(ZonedTimestamp::new(converted))
    }

    /// The curated zone list, minus any zone this database lacks, in curated
    /// order.
    pub fn list_common_timezones(&self) -> Vec<&'static str> {
        COMMON_TIMEZONES
            .iter()
            .copied()
            .filter(|zone| {
                let present = self.validate_timezone(zone);
                if !present {
                    warn!(zone, "common timezone missing from database");
                }
                present
            })
            .collect()
    }

    /// Case-insensitive substring search, in sorted order. An empty term
    /// matches every zone.
    pub fn search_timezones(&self, term: &str) -> Vec<&str> {
        let needle = term.to_lowercase();
        self.zones
            .iter()
            .filter(|zone| zone.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    fn resolve(&self, zone: &str) -> Result<Tz> {
        self.backend
            .resolve(zone)
            .map_err(|reason| ZoneError::InvalidTimezone {
                zone: zone.to_string(),
                reason,
            })
    }
}

/// Parse `text` with `format`. A format with no time fields reads midnight;
/// a format with no date fields reads on 1900-01-01, as `strptime` does.
fn parse_naive(text: &str, format: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .or_else(|| {
            // Date fields the format sets must agree with the 1900-01-01 default.
            let dated_text = format!("1900-01-01 {text}");
            let dated_format = format!("%Y-%m-%d {format}");
            NaiveDateTime::parse_from_str(&dated_text, &dated_format).ok()
        })
        .ok_or_else(|| ZoneError::InvalidFormat {
            input: text.to_string(),
            format: format.to_string(),
        })
}
