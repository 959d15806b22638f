use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const WINDOW: &str = r#"[
  {"date": "2024-04-01", "data": [
      {"fuel_type": "DIESEL", "price": 1.700},
      {"fuel_type": "SUPER", "price": 2.100}
  ]},
  {"date": "2024-04-02", "data": [
      {"fuel_type": "DIESEL", "price": 1.750},
      {"fuel_type": "SUPER", "price": 2.100}
  ]}
]"#;

const REGIONS: &str = r#"{
  "country": [{"fuel_type": "DIESEL", "price": "1.750", "number_of_stations": 3900}],
  "prefectures": [
    {"prefecture": "CHIOS", "data": [{"fuel_type": "DIESEL", "price": "1.820"}]},
    {"prefecture": "ATTICA", "data": [{"fuel_type": "DIESEL", "price": "1.740"}]}
  ]
}"#;

fn bin() -> Command {
    let mut cmd = Command::cargo_bin("fuelprices").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("latest").and(predicate::str::contains("regions")));
}

#[test]
fn latest_prints_visible_rows() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("daily.json");
    fs::write(&input, WINDOW).unwrap();

    bin()
        .args(["latest", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("02/04/2024")
                .and(predicate::str::contains("1.750 €"))
                .and(predicate::str::contains("+2.86%"))
                // hidden by default
                .and(predicate::str::contains("Super").not()),
        );

    bin()
        .args(["latest", "--show", "SUPER", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2.100 €"));
}

#[test]
fn unknown_fuel_type_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(
        &input,
        r#"[{"date": "2024-04-01", "data": [{"fuel_type": "KEROSENE", "price": 1.0}]}]"#,
    )
    .unwrap();
    bin()
        .args(["latest", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEROSENE"));
}

#[test]
fn regions_prints_table_in_greek_order() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("country.json");
    fs::write(&input, REGIONS).unwrap();

    let out = bin()
        .args(["regions", "--date", "2024-04-02", "--input"])
        .arg(&input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Νομός"));
    assert!(text.contains("Πανελλαδικά"));
    assert!(text.contains("(3.900)"));
    let attica = text.find("ΑΤΤΙΚΗΣ").unwrap();
    let chios = text.find("ΧΙΟΥ").unwrap();
    assert!(attica < chios);
}

#[test]
fn export_writes_csv() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("daily.json");
    let out = dir.path().join("out.csv");
    fs::write(&input, WINDOW).unwrap();

    bin()
        .args(["export", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 2 dates"));
    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("date,UNLEADED_95"));
}

#[test]
fn prefectures_lists_all_regions() {
    let out = bin().arg("prefectures").assert().success().get_output().stdout.clone();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 51);
    assert!(text.lines().next().unwrap().starts_with("AETOLIA_ACARNANIA"));
}
