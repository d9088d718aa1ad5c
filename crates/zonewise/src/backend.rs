//! Timezone database backends.
//!
//! A [`ZoneBackend`] supplies two things: the set of zone identifiers it
//! knows about, and the DST-aware rule set for one of them. The converter
//! never computes offsets itself; every offset comes from the [`Tz`] that a
//! backend hands back.

use chrono_tz::{Tz, TZ_VARIANTS};

/// Source of zone identifiers and their historical offset rules.
pub trait ZoneBackend {
    /// Every identifier this backend can resolve, in no particular order.
    fn zone_names(&self) -> Vec<String>;

    /// Resolve an identifier to its rule set.
    ///
    /// The error string is the backend's own diagnostic and ends up in
    /// [`ZoneError::InvalidTimezone`](crate::ZoneError::InvalidTimezone).
    fn resolve(&self, name: &str) -> Result<Tz, String>;
}

/// The IANA timezone database compiled into `chrono-tz`.
///
/// Includes the `backward` link names (`US/Eastern`, `US/Pacific`, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct Tzdb;

impl ZoneBackend for Tzdb {
    fn zone_names(&self) -> Vec<String> {
        TZ_VARIANTS.iter().map(|tz| tz.name().to_string()).collect()
    }

    fn resolve(&self, name: &str) -> Result<Tz, String> {
        name.parse::<Tz>().map_err(|e| e.to_string())
    }
}
