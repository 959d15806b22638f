use chrono::NaiveDate;
use fuelprices::{DateRange, Error};
use fuelprices::models::DataType;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn no_bounds_ends_today() {
    let today = d(2024, 6, 30);
    assert_eq!(
        DateRange::resolve(None, None, 30, today).unwrap(),
        (d(2024, 5, 31), today)
    );
}

#[test]
fn single_bound_extends_max_days() {
    let today = d(2024, 6, 30);
    assert_eq!(
        DateRange::resolve(None, Some(d(2024, 3, 10)), 9, today).unwrap(),
        (d(2024, 3, 1), d(2024, 3, 10))
    );
    assert_eq!(
        DateRange::resolve(Some(d(2024, 3, 1)), None, 9, today).unwrap(),
        (d(2024, 3, 1), d(2024, 3, 10))
    );
}

#[test]
fn long_span_is_clamped_keeping_the_end() {
    let today = d(2024, 6, 30);
    assert_eq!(
        DateRange::resolve(Some(d(2020, 1, 1)), Some(d(2024, 1, 10)), 9, today).unwrap(),
        (d(2024, 1, 1), d(2024, 1, 10))
    );
    assert_eq!(
        DateRange::resolve(Some(d(2024, 1, 5)), Some(d(2024, 1, 10)), 9, today).unwrap(),
        (d(2024, 1, 5), d(2024, 1, 10))
    );
}

#[test]
fn reversed_bounds_are_rejected() {
    assert!(matches!(
        DateRange::resolve(Some(d(2024, 2, 1)), Some(d(2024, 1, 1)), 9, d(2024, 6, 30)),
        Err(Error::InvalidRange(_))
    ));
}

#[test]
fn huge_max_days_is_an_error_not_a_crash() {
    let today = d(2024, 6, 30);
    for (start, end) in [
        (None, None),
        (None, Some(today)),
        (Some(today), None),
    ] {
        assert!(matches!(
            DateRange::resolve(start, end, 200_000_000, today),
            Err(Error::InvalidRange(_))
        ));
    }
    assert!(matches!(
        DateRange::resolve(None, None, i64::MAX, today),
        Err(Error::InvalidRange(_))
    ));
    // clamped by the actual span, so still fine
    assert_eq!(
        DateRange::resolve(Some(d(2024, 1, 1)), Some(d(2024, 1, 10)), i64::MAX, today).unwrap(),
        (d(2024, 1, 1), d(2024, 1, 10))
    );
}

#[test]
fn date_range_payload_allows_nulls() {
    let r: DateRange =
        serde_json::from_str(r#"{"start_date": "2012-01-01", "end_date": null}"#).unwrap();
    assert_eq!(r.start_date, Some(d(2012, 1, 1)));
    assert_eq!(r.end_date, None);
    assert_eq!(DataType::DailyPrefecture.as_str(), "daily_prefecture");
}
