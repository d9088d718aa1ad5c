//! # zonewise
//!
//! Timezone validation, lookup and DST-aware conversion over the IANA
//! timezone database.
//!
//! Offsets, DST rules and zone names all come from the database compiled into
//! `chrono-tz`; nothing here recomputes them. A timestamp written in one zone's
//! civil time is converted to another zone using the rules in force on that
//! date, so summer and winter dates get different offsets and late-evening
//! conversions roll the calendar date over.
//!
//! ## Modules
//!
//! - [`converter`]: [`TimezoneConverter`], which validates, lists, searches and converts
//! - [`zoned`]: [`ZonedTimestamp`], an instant bound to a zone
//! - [`dst`]: [`Disambiguation`] policies for DST gaps and overlaps
//! - [`backend`]: [`ZoneBackend`] and the bundled [`Tzdb`]
//! - [`error`]: Error types

pub mod backend;
pub mod converter;
pub mod dst;
pub mod error;
pub mod zoned;

pub use backend::{Tzdb, ZoneBackend};
pub use converter::{ConvertOptions, TimezoneConverter, COMMON_TIMEZONES, DEFAULT_TIME_FORMAT};
pub use dst::Disambiguation;
pub use error::{Result, ZoneError};
pub use zoned::{ZonedSummary, ZonedTimestamp, DISPLAY_FORMAT};
