use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Timelike};
use proptest::prelude::*;
use zonewise::{TimezoneConverter, ZoneError, DEFAULT_TIME_FORMAT};

fn converter() -> &'static TimezoneConverter {
    static CONVERTER: OnceLock<TimezoneConverter> = OnceLock::new();
    CONVERTER.get_or_init(|| TimezoneConverter::new().unwrap())
}

fn zone_index() -> impl Strategy<Value = usize> {
    0..converter().available_zones().len()
}

/// Timestamps in the default format, restricted to real calendar dates.
fn timestamp_text() -> impl Strategy<Value = String> {
    (1971i32..2037, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60, 0u32..60).prop_map(
        |(y, mo, d, h, mi, s)| format!("{y:04}-{mo:02}-{d:02} {h:02}:{mi:02}:{s:02}"),
    )
}

#[test]
fn every_loaded_zone_validates() {
    let c = converter();
    for zone in c.available_zones() {
        assert!(c.validate_timezone(zone), "{zone} failed validation");
    }
}

#[test]
fn every_loaded_zone_reports_current_time() {
    let c = converter();
    for zone in c.available_zones() {
        let now = c.get_current_time(zone).unwrap();
        assert_eq!(now.zone(), zone.as_str());
    }
}

#[test]
fn common_list_is_subset_with_utc() {
    let c = converter();
    let common = c.list_common_timezones();
    assert!(common.contains(&"UTC"));
    for zone in common {
        assert!(c.available_zones().iter().any(|z| z == zone));
    }
}

#[test]
fn converter_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TimezoneConverter>();

    let handles: Vec<_> = ["UTC", "Asia/Tokyo", "Europe/London"]
        .into_iter()
        .map(|zone| {
            std::thread::spawn(move || {
                converter()
                    .convert_time("2023-06-15 12:00:00", "UTC", zone, DEFAULT_TIME_FORMAT)
                    .map(|ts| ts.zone())
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

proptest! {
    #[test]
    fn same_zone_conversion_keeps_civil_time(idx in zone_index(), text in timestamp_text()) {
        let c = converter();
        let zone = &c.available_zones()[idx];
        let naive = NaiveDateTime::parse_from_str(&text, DEFAULT_TIME_FORMAT).unwrap();
        let result = c.convert_time(&text, zone, zone, DEFAULT_TIME_FORMAT).unwrap();

        // Times inside a DST gap are shifted forward; everything else is untouched.
        let tz = result.as_datetime().timezone();
        if tz.from_local_datetime(&naive).earliest().is_some() {
            prop_assert_eq!(result.naive_local(), naive);
        }
        prop_assert_eq!(result.zone(), zone.as_str());
    }

    #[test]
    fn conversion_preserves_the_instant(
        from in zone_index(),
        to in zone_index(),
        text in timestamp_text(),
    ) {
        let c = converter();
        let zones = c.available_zones();
        let forward = c.convert_time(&text, &zones[from], &zones[to], DEFAULT_TIME_FORMAT).unwrap();
        let via_utc = c.convert_time(&text, &zones[from], "UTC", DEFAULT_TIME_FORMAT).unwrap();
        prop_assert_eq!(forward.to_utc(), via_utc.to_utc());
    }

    #[test]
    fn utc_to_utc_is_identity(text in timestamp_text()) {
        let result = converter().convert_time(&text, "UTC", "UTC", DEFAULT_TIME_FORMAT).unwrap();
        prop_assert_eq!(result.format(DEFAULT_TIME_FORMAT).unwrap(), text);
    }

    #[test]
    fn search_ignores_case(term in "[a-zA-Z/_]{0,6}") {
        let c = converter();
        let base = c.search_timezones(&term);
        prop_assert_eq!(&base, &c.search_timezones(&term.to_uppercase()));
        prop_assert_eq!(&base, &c.search_timezones(&term.to_lowercase()));
    }

    #[test]
    fn search_results_are_ordered_subset(term in "[a-z]{1,3}") {
        let c = converter();
        let results = c.search_timezones(&term);
        prop_assert!(results.windows(2).all(|w| w[0] < w[1]));
        for zone in &results {
            prop_assert!(c.validate_timezone(zone));
            prop_assert!(zone.to_lowercase().contains(&term));
        }
    }

    #[test]
    fn non_matching_text_is_invalid_format(text in "[a-z ]{1,20}") {
        let err = converter().convert_time(&text, "UTC", "UTC", DEFAULT_TIME_FORMAT).unwrap_err();
        let is_format_error = matches!(err, ZoneError::InvalidFormat { .. });
        prop_assert!(is_format_error);
    }

    #[test]
    fn tokyo_is_nine_hours_ahead(h in 0u32..24) {
        let text = NaiveDate::from_ymd_opt(2023, 6, 15)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
            .format(DEFAULT_TIME_FORMAT)
            .to_string();
        let tokyo = converter().convert_time(&text, "UTC", "Asia/Tokyo", DEFAULT_TIME_FORMAT).unwrap();
        prop_assert_eq!(tokyo.as_datetime().hour(), (h + 9) % 24);
    }
}
