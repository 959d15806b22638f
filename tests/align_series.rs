use chrono::NaiveDate;
use fuelprices::align::{align, align_json, align_raw};
use fuelprices::models::{RawDailyRecord, RawObservation};
use fuelprices::{DailySeries, Error, FuelType, Observation};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const SPARSE: &str = r#"
[
  {"date": "2024-03-01", "data": [
      {"fuel_type": "UNLEADED_95", "price": 1.850},
      {"fuel_type": "DIESEL", "price": 1.620}
  ]},
  {"date": "2024-03-02", "data": []},
  {"date": "2024-03-04", "data": [
      {"fuel_type": "DIESEL", "price": "1.640"},
      {"fuel_type": "GAS", "price": 0.990, "number_of_stations": 412}
  ]}
]"#;

#[test]
fn aligns_sparse_records_on_a_common_axis() {
    let a = align_json(SPARSE).unwrap();
    assert_eq!(a.dates(), &[d(2024, 3, 1), d(2024, 3, 2), d(2024, 3, 4)]);
    for f in FuelType::ALL {
        assert_eq!(a.values(f).len(), 3, "column length of {f}");
    }
    assert_eq!(a.values(FuelType::Unleaded95), &[Some(1.850), None, None]);
    assert_eq!(a.values(FuelType::Diesel), &[Some(1.620), None, Some(1.640)]);
    assert_eq!(a.values(FuelType::Gas), &[None, None, Some(0.990)]);
    assert_eq!(a.values(FuelType::Super), &[None, None, None]);
    assert!(a.has_data(FuelType::Gas));
    assert!(!a.has_data(FuelType::DieselHeating));
}

#[test]
fn columns_follow_registry_order() {
    let a = align_json(SPARSE).unwrap();
    let order: Vec<FuelType> = a.columns().map(|(f, _)| f).collect();
    assert_eq!(order, FuelType::ALL.to_vec());
}

#[test]
fn empty_series_is_not_an_error() {
    let a = align_json("[]").unwrap();
    assert!(a.is_empty());
    for f in FuelType::ALL {
        assert!(a.values(f).is_empty());
    }
    assert_eq!(a, align(&DailySeries::default()));
}

#[test]
fn record_without_observations_is_all_absent() {
    let a = align_json(r#"[{"date": "2024-01-05", "data": []}]"#).unwrap();
    assert_eq!(a.len(), 1);
    assert!(FuelType::ALL.iter().all(|f| a.value(*f, 0).is_none()));
}

#[test]
fn unknown_fuel_type_rejects_the_whole_payload() {
    let json = r#"[
      {"date": "2024-01-01", "data": [{"fuel_type": "DIESEL", "price": 1.6}]},
      {"date": "2024-01-02", "data": [{"fuel_type": "KEROSENE", "price": 1.1}]}
    ]"#;
    match align_json(json) {
        Err(Error::UnknownFuelType(name)) => assert_eq!(name, "KEROSENE"),
        other => panic!("expected UnknownFuelType, got {other:?}"),
    }
}

#[test]
fn malformed_records_are_rejected() {
    let cases = [
        // missing date
        r#"[{"data": []}]"#,
        // missing data
        r#"[{"date": "2024-01-01"}]"#,
        // unparsable date
        r#"[{"date": "01/02/2024", "data": []}]"#,
        // duplicate date
        r#"[{"date": "2024-01-01", "data": []}, {"date": "2024-01-01", "data": []}]"#,
        // decreasing dates
        r#"[{"date": "2024-01-02", "data": []}, {"date": "2024-01-01", "data": []}]"#,
        // duplicate fuel type within a record
        r#"[{"date": "2024-01-01", "data": [
            {"fuel_type": "GAS", "price": 1.0}, {"fuel_type": "GAS", "price": 1.1}]}]"#,
        // zero price
        r#"[{"date": "2024-01-01", "data": [{"fuel_type": "GAS", "price": 0}]}]"#,
        // negative price
        r#"[{"date": "2024-01-01", "data": [{"fuel_type": "GAS", "price": -1.2}]}]"#,
        // missing price
        r#"[{"date": "2024-01-01", "data": [{"fuel_type": "GAS"}]}]"#,
        // missing fuel type
        r#"[{"date": "2024-01-01", "data": [{"price": 1.2}]}]"#,
        // decimal comma
        r#"[{"date": "2024-01-01", "data": [{"fuel_type": "GAS", "price": "1,75"}]}]"#,
        // price of the wrong type
        r#"[{"date": "2024-01-01", "data": [{"fuel_type": "GAS", "price": true}]}]"#,
        // data that is not a list
        r#"[{"date": "2024-01-01", "data": "x"}]"#,
    ];
    for json in cases {
        match align_json(json) {
            Err(Error::MalformedRecord(_)) => {}
            other => panic!("expected MalformedRecord for {json}, got {other:?}"),
        }
    }
}

#[test]
fn invalid_json_is_a_json_error() {
    assert!(matches!(align_json("{not json"), Err(Error::Json(_))));
    assert!(matches!(align_json(r#"[{"date": "2024-01-01""#), Err(Error::Json(_))));
}

#[test]
fn observations_only_hold_positive_prices() {
    assert!(Observation::new(FuelType::Gas, 0.99).is_ok());
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            Observation::new(FuelType::Gas, bad),
            Err(Error::MalformedRecord(_))
        ));
    }
}

#[test]
fn raw_records_align_like_json() {
    let raw = vec![RawDailyRecord {
        date: Some("2024-02-29".into()),
        data: Some(vec![RawObservation {
            fuel_type: Some("SUPER".into()),
            price: Some(2.01),
            number_of_stations: None,
        }]),
    }];
    let a = align_raw(&raw).unwrap();
    assert_eq!(a.dates(), &[d(2024, 2, 29)]);
    assert_eq!(a.value(FuelType::Super, 0), Some(2.01));
}

#[test]
fn aligning_does_not_touch_the_input() {
    let series = DailySeries::from_json(SPARSE).unwrap();
    let before = series.clone();
    let first = align(&series);
    let second = align(&series);
    assert_eq!(series, before);
    assert_eq!(first, second);
}
