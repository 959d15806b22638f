use fuelprices::{Dashboard, Direction, Error, FuelType};

const WINDOW: &str = r#"[
  {"date": "2024-04-01", "data": [
      {"fuel_type": "UNLEADED_95", "price": 1.880},
      {"fuel_type": "DIESEL", "price": 1.700},
      {"fuel_type": "GAS", "price": 0.990}
  ]},
  {"date": "2024-04-02", "data": [
      {"fuel_type": "UNLEADED_95", "price": 1.880},
      {"fuel_type": "DIESEL", "price": 1.750}
  ]}
]"#;

const REGIONS: &str = r#"{
  "country": [
    {"fuel_type": "UNLEADED_95", "price": 1.880, "number_of_stations": 4000},
    {"fuel_type": "DIESEL", "price": 1.750, "number_of_stations": 3900}
  ],
  "prefectures": [
    {"prefecture": "ATTICA", "data": [
        {"fuel_type": "UNLEADED_95", "price": 1.870},
        {"fuel_type": "DIESEL", "price": 1.740}
    ]}
  ]
}"#;

fn loaded() -> Dashboard {
    let mut d = Dashboard::new();
    d.load_series_json(WINDOW).unwrap();
    d.load_snapshot_json(REGIONS).unwrap();
    d
}

#[test]
fn latest_rows_carry_price_and_evolution() {
    let d = loaded();
    let rows = d.latest();
    assert_eq!(rows.len(), FuelType::ALL.len());

    let diesel = &rows[FuelType::Diesel as usize];
    assert_eq!(diesel.price_text, "1.750 €");
    assert_eq!(diesel.evolution.direction, Direction::Up);
    assert_eq!(diesel.evolution_text, "+2.86%");

    let unleaded = &rows[FuelType::Unleaded95 as usize];
    assert_eq!(unleaded.evolution_text, "0.00%");

    // not reported on the last date
    let gas = &rows[FuelType::Gas as usize];
    assert_eq!(gas.price, None);
    assert_eq!(gas.price_text, "-");
    assert!(gas.evolution.is_unknown());
    assert!(gas.visible);
}

#[test]
fn one_toggle_updates_every_view() {
    let mut d = loaded();
    assert!(d.toggle(FuelType::Diesel));

    let chart = d.chart();
    let diesel_line = chart
        .iter()
        .find(|s| s.fuel_type == FuelType::Diesel)
        .unwrap();
    assert!(!diesel_line.visible);
    assert!(diesel_line.enabled);

    assert!(!d.latest()[FuelType::Diesel as usize].visible);

    let regions = d.regions().unwrap();
    assert_eq!(regions.columns, vec![FuelType::Unleaded95]);
    assert_eq!(regions.rows[0].cells, vec!["1.870 €"]);
}

#[test]
fn chart_lines_keep_gaps() {
    let d = loaded();
    let gas = d
        .chart()
        .into_iter()
        .find(|s| s.fuel_type == FuelType::Gas)
        .unwrap();
    assert_eq!(gas.values, vec![Some(0.990), None]);
    assert_eq!(gas.color, FuelType::Gas.color());
}

#[test]
fn disabled_fuel_types_are_not_drawn() {
    let d = loaded();
    let visible: Vec<FuelType> = d
        .chart()
        .into_iter()
        .filter(|s| s.visible)
        .map(|s| s.fuel_type)
        .collect();
    assert_eq!(
        visible,
        vec![FuelType::Unleaded95, FuelType::Diesel, FuelType::Gas]
    );
}

#[test]
fn bad_payload_keeps_previous_state() {
    let mut d = loaded();
    d.toggle(FuelType::Gas);
    let series = d.series().clone();
    let visibility = d.visibility().clone();

    let err = d
        .load_series_json(r#"[{"date": "2024-04-03", "data": [{"fuel_type": "KEROSENE", "price": 1.0}]}]"#)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownFuelType(_)));
    assert_eq!(d.series(), &series);
    assert_eq!(d.visibility(), &visibility);

    assert!(d.load_snapshot_json("{}").is_err());
    assert_eq!(d.snapshot().unwrap().rows.len(), 1);
}

#[test]
fn empty_window_disables_everything() {
    let mut d = loaded();
    d.load_series_json("[]").unwrap();
    assert!(d.visibility().visible_fuel_types().is_empty());
    assert!(d.latest().iter().all(|r| r.date.is_none() && r.evolution.is_unknown()));
}
