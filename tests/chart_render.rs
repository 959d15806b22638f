use fuelprices::chart::{ChartOptions, find_font, render_chart};
use fuelprices::{Dashboard, FuelType};
use tempfile::tempdir;

fn dashboard() -> Dashboard {
    let mut d = Dashboard::new();
    d.load_series_json(
        r#"[
          {"date": "2024-01-01", "data": [{"fuel_type": "DIESEL", "price": 1.60}, {"fuel_type": "GAS", "price": 0.98}]},
          {"date": "2024-01-02", "data": [{"fuel_type": "DIESEL", "price": 1.62}]},
          {"date": "2024-01-05", "data": [{"fuel_type": "DIESEL", "price": 1.65}, {"fuel_type": "GAS", "price": 0.99}]}
        ]"#,
    )
    .unwrap();
    d
}

#[test]
fn nothing_visible_is_an_error() {
    let mut d = dashboard();
    d.toggle(FuelType::Diesel);
    d.toggle(FuelType::Gas);
    let dir = tempdir().unwrap();
    let err = render_chart(
        d.series(),
        d.visibility(),
        dir.path().join("c.svg"),
        &ChartOptions::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("no visible fuel type"));
}

#[test]
fn empty_window_is_an_error() {
    let d = Dashboard::new();
    let dir = tempdir().unwrap();
    assert!(
        render_chart(
            d.series(),
            d.visibility(),
            dir.path().join("c.svg"),
            &ChartOptions::default()
        )
        .is_err()
    );
}

#[test]
fn renders_svg_when_a_font_is_available() {
    if find_font(None).is_none() {
        eprintln!("skipping: no system font with Greek glyphs");
        return;
    }
    let d = dashboard();
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.svg");
    render_chart(d.series(), d.visibility(), &out, &ChartOptions::default()).unwrap();
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Diesel"));
}

#[test]
fn renders_png_when_a_font_is_available() {
    if find_font(None).is_none() {
        return;
    }
    let d = dashboard();
    let dir = tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let options = ChartOptions {
        width: 480,
        height: 320,
        ..ChartOptions::default()
    };
    render_chart(d.series(), d.visibility(), &out, &options).unwrap();
    assert!(std::fs::metadata(&out).unwrap().len() > 0);
}
