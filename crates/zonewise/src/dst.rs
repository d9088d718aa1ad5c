//! DST transition policies.
//!
//! A local civil time does not always name exactly one instant. When clocks
//! spring forward, the skipped wall-clock hour never occurs (a gap). When
//! clocks fall back, the repeated hour occurs twice (an overlap).
//! [`Disambiguation`] decides what to do in either case.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, ZoneError};

/// How to pick an instant for a local time that is ambiguous or nonexistent.
///
/// | Policy       | Overlap         | Gap                                      |
/// | ------------ | --------------- | ---------------------------------------- |
/// | `Compatible` | earlier instant | read with the pre-transition offset      |
/// | `Earlier`    | earlier instant | read with the post-transition offset     |
/// | `Later`      | later instant   | read with the pre-transition offset      |
/// | `Reject`     | error           | error                                    |
///
/// Reading a gap time with the pre-transition offset pushes it forward by the
/// length of the gap (02:30 in a 02:00 -> 03:00 spring-forward becomes 03:30).
/// Reading it with the post-transition offset pulls it back (01:30).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disambiguation {
    #[default]
    Compatible,
    Earlier,
    Later,
    Reject,
}

impl Disambiguation {
    /// Attach `tz` to a naive local time, resolving gaps and overlaps
    /// according to this policy.
    pub fn localize(self, tz: Tz, local: &NaiveDateTime) -> Result<DateTime<Tz>> {
        match tz.from_local_datetime(local) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(earlier, later) => match self {
                Disambiguation::Compatible | Disambiguation::Earlier => Ok(earlier),
                Disambiguation::Later => Ok(later),
                Disambiguation::Reject => Err(ZoneError::AmbiguousLocalTime {
                    local: local.to_string(),
                    zone: tz.name().to_string(),
                }),
            },
            LocalResult::None => {
                // chrono also reports None when the offset pushes `local` past
                // the representable range, so a gap needs both readings.
                let forward =
                    offset_before(tz, local).and_then(|secs| read_with_offset(tz, local, secs));
                let backward =
                    offset_after(tz, local).and_then(|secs| read_with_offset(tz, local, secs));
                let (Some(forward), Some(backward)) = (forward, backward) else {
                    return Err(ZoneError::OutOfRange {
                        local: local.to_string(),
                        zone: tz.name().to_string(),
                    });
                };
                match self {
                    Disambiguation::Compatible | Disambiguation::Later => Ok(forward),
                    Disambiguation::Earlier => Ok(backward),
                    Disambiguation::Reject => Err(ZoneError::NonexistentLocalTime {
                        local: local.to_string(),
                        zone: tz.name().to_string(),
                    }),
                }
            }
        }
    }
}

impl fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Disambiguation::Compatible => "compatible",
            Disambiguation::Earlier => "earlier",
            Disambiguation::Later => "later",
            Disambiguation::Reject => "reject",
        };
        f.write_str(name)
    }
}

impl FromStr for Disambiguation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compatible" => Ok(Disambiguation::Compatible),
            "earlier" => Ok(Disambiguation::Earlier),
            "later" => Ok(Disambiguation::Later),
            "reject" => Ok(Disambiguation::Reject),
            other => Err(format!(
                "unknown disambiguation '{other}' (expected compatible, earlier, later or reject)"
            )),
        }
    }
}

// Assumes the neighbouring transitions are more than a day away from the gap,
// so sampling one day on either side lands on the offsets it separates.

/// UTC offset (seconds) in force just before the transition around `local`.
fn offset_before(tz: Tz, local: &NaiveDateTime) -> Option<i32> {
    let sample = local.checked_sub_signed(Duration::days(1))?;
    Some(tz.offset_from_utc_datetime(&sample).fix().local_minus_utc())
}

/// UTC offset (seconds) in force just after the transition around `local`.
fn offset_after(tz: Tz, local: &NaiveDateTime) -> Option<i32> {
    let sample = local.checked_add_signed(Duration::days(1))?;
    Some(tz.offset_from_utc_datetime(&sample).fix().local_minus_utc())
}

/// Treat `local` as wall-clock time at a fixed offset and express the
/// resulting instant in `tz`. `None` when the instant is out of range.
fn read_with_offset(tz: Tz, local: &NaiveDateTime, offset_secs: i32) -> Option<DateTime<Tz>> {
    let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset_secs)))?;
    Some(tz.from_utc_datetime(&utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike, Utc};

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    // March 12, 2023: US spring forward (2:00 AM -> 3:00 AM)
    fn gap() -> NaiveDateTime {
        naive(2023, 3, 12, 2, 30)
    }

    // November 5, 2023: US fall back (2:00 AM -> 1:00 AM)
    fn overlap() -> NaiveDateTime {
        naive(2023, 11, 5, 1, 30)
    }

    #[test]
    fn test_unambiguous_time_ignores_policy() {
        let local = naive(2023, 6, 15, 12, 0);
        for policy in [
            Disambiguation::Compatible,
            Disambiguation::Earlier,
            Disambiguation::Later,
            Disambiguation::Reject,
        ] {
            let dt = policy.localize(Tz::America__New_York, &local).unwrap();
            assert_eq!(dt.with_timezone(&Utc).hour(), 16);
        }
    }

    #[test]
    fn test_gap_compatible_shifts_forward() {
        let dt = Disambiguation::Compatible
            .localize(Tz::America__New_York, &gap())
            .unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.with_timezone(&Utc).hour(), 7);
    }

    #[test]
    fn test_gap_later_matches_compatible() {
        let compatible = Disambiguation::Compatible
            .localize(Tz::America__New_York, &gap())
            .unwrap();
        let later = Disambiguation::Later
            .localize(Tz::America__New_York, &gap())
            .unwrap();
        assert_eq!(compatible, later);
    }

    #[test]
    fn test_gap_earlier_shifts_backward() {
        let dt = Disambiguation::Earlier
            .localize(Tz::America__New_York, &gap())
            .unwrap();
        assert_eq!(dt.hour(), 1);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.with_timezone(&Utc).hour(), 6);
    }

    #[test]
    fn test_gap_reject_errors() {
        let err = Disambiguation::Reject
            .localize(Tz::America__New_York, &gap())
            .unwrap_err();
        assert!(matches!(err, ZoneError::NonexistentLocalTime { .. }));
        assert!(err.to_string().contains("America/New_York"));
    }

    #[test]
    fn test_overlap_compatible_takes_earlier() {
        let dt = Disambiguation::Compatible
            .localize(Tz::America__New_York, &overlap())
            .unwrap();
        // First pass through 01:30 is still EDT (UTC-4)
        assert_eq!(dt.with_timezone(&Utc).hour(), 5);
    }

    #[test]
    fn test_overlap_later_takes_later() {
        let dt = Disambiguation::Later
            .localize(Tz::America__New_York, &overlap())
            .unwrap();
        // Second pass through 01:30 is EST (UTC-5)
        assert_eq!(dt.with_timezone(&Utc).hour(), 6);
    }

    #[test]
    fn test_overlap_reject_errors() {
        let err = Disambiguation::Reject
            .localize(Tz::America__New_York, &overlap())
            .unwrap_err();
        assert!(matches!(err, ZoneError::AmbiguousLocalTime { .. }));
    }

    #[test]
    fn test_southern_hemisphere_gap() {
        // October 1, 2023: Sydney springs forward 2:00 AM -> 3:00 AM
        let local = naive(2023, 10, 1, 2, 15);
        let dt = Disambiguation::Compatible
            .localize(Tz::Australia__Sydney, &local)
            .unwrap();
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 15);
    }

    // ── Range edges ─────────────────────────────────────────────────────

    #[test]
    fn test_last_representable_hour_west_of_utc_is_out_of_range() {
        // 23:00 at UTC-5 would be 04:00 UTC on a day chrono cannot represent
        let local = NaiveDate::MAX.and_hms_opt(23, 0, 0).unwrap();
        for policy in [
            Disambiguation::Compatible,
            Disambiguation::Earlier,
            Disambiguation::Later,
            Disambiguation::Reject,
        ] {
            let err = policy.localize(Tz::America__New_York, &local).unwrap_err();
            assert!(matches!(err, ZoneError::OutOfRange { .. }), "{policy}: {err}");
        }
    }

    #[test]
    fn test_first_representable_hours_east_of_utc_are_out_of_range() {
        for hour in [0, 1] {
            let local = NaiveDate::MIN.and_hms_opt(hour, 0, 0).unwrap();
            let err = Disambiguation::Compatible
                .localize(Tz::Asia__Tokyo, &local)
                .unwrap_err();
            assert_eq!(
                err,
                ZoneError::OutOfRange {
                    local: local.to_string(),
                    zone: "Asia/Tokyo".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_range_edge_in_utc_is_single() {
        let local = NaiveDate::MAX.and_hms_opt(23, 0, 0).unwrap();
        let dt = Disambiguation::Reject.localize(Tz::UTC, &local).unwrap();
        assert_eq!(dt.naive_utc(), local);
    }

    // ── Parsing and serialization ───────────────────────────────────────

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Disambiguation::Compatible).unwrap(),
            "compatible"
        );
        assert_eq!(serde_json::to_string(&Disambiguation::Reject).unwrap(), "\"reject\"");
        for policy in [Disambiguation::Earlier, Disambiguation::Later] {
            assert_eq!(serde_json::to_value(policy).unwrap(), policy.to_string());
        }
    }

    #[test]
    fn test_parse_and_display_roundtrip() {
        for name in ["compatible", "earlier", "later", "reject"] {
            let policy: Disambiguation = name.parse().unwrap();
            assert_eq!(policy.to_string(), name);
        }
        assert_eq!(
            "LATER".parse::<Disambiguation>().unwrap(),
            Disambiguation::Later
        );
        assert!("sometimes".parse::<Disambiguation>().is_err());
    }
}
