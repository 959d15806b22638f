//! Presentation structures shared by the chart, the latest-values table and the
//! region table. All of them filter on [`VisibilityState::is_visible`], so one
//! toggle updates every view the same way.

use crate::align::AlignedSeries;
use crate::evolution::{EvolutionResult, evolution};
use crate::registry::{FuelType, Region};
use crate::snapshot::RegionSnapshotTable;
use crate::visibility::VisibilityState;
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};
use serde::Serialize;

/// Header of the region-name column.
pub const REGION_COLUMN_LABEL: &str = "Νομός";
/// Label of the national-average row.
pub const COUNTRY_ROW_LABEL: &str = "Πανελλαδικά";

/// Price with three decimals and the euro sign, e.g. `1.750 €`.
pub fn format_price(price: Option<f64>) -> Option<String> {
    price.map(|p| format!("{p:.3} €"))
}

/// Station count with Greek digit grouping, e.g. `12.345`.
pub fn format_stations(count: u32) -> String {
    count.to_formatted_string(&Locale::el)
}

/// One chart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub fuel_type: FuelType,
    pub label: &'static str,
    pub color: &'static str,
    pub enabled: bool,
    pub selected: bool,
    pub visible: bool,
    pub values: Vec<Option<f64>>,
}

/// Every fuel type in registry order with its visibility flags.
pub fn chart_series(series: &AlignedSeries, visibility: &VisibilityState) -> Vec<ChartSeries> {
    FuelType::ALL
        .into_iter()
        .map(|f| {
            let flags = visibility.flags(f);
            ChartSeries {
                fuel_type: f,
                label: f.label(),
                color: f.color(),
                enabled: flags.enabled,
                selected: flags.selected,
                visible: visibility.is_visible(f),
                values: series.values(f).to_vec(),
            }
        })
        .collect()
}

/// Only the lines that should be drawn.
pub fn visible_chart_series(
    series: &AlignedSeries,
    visibility: &VisibilityState,
) -> Vec<ChartSeries> {
    chart_series(series, visibility)
        .into_iter()
        .filter(|s| s.visible)
        .collect()
}

/// Row of the latest-values table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestRow {
    pub fuel_type: FuelType,
    pub label: &'static str,
    pub date: Option<NaiveDate>,
    pub price: Option<f64>,
    pub price_text: String,
    pub evolution: EvolutionResult,
    pub evolution_text: String,
    pub enabled: bool,
    pub selected: bool,
    pub visible: bool,
}

/// Price on the last date of the window and its evolution against the date
/// right before it.
pub fn latest_evolution(series: &AlignedSeries, fuel_type: FuelType) -> (Option<f64>, EvolutionResult) {
    let n = series.len();
    if n == 0 {
        return (None, EvolutionResult::UNKNOWN);
    }
    let current = series.value(fuel_type, n - 1);
    let previous = n.checked_sub(2).and_then(|i| series.value(fuel_type, i));
    (current, evolution(current, previous))
}

/// One row per fuel type in registry order. Rows carry their flags so the
/// caller can hide or grey them out.
pub fn latest_rows(series: &AlignedSeries, visibility: &VisibilityState) -> Vec<LatestRow> {
    let date = series.dates().last().copied();
    FuelType::ALL
        .into_iter()
        .map(|f| {
            let (price, evo) = latest_evolution(series, f);
            let flags = visibility.flags(f);
            LatestRow {
                fuel_type: f,
                label: f.label(),
                date,
                price,
                price_text: format_price(price).unwrap_or_else(|| "-".to_string()),
                evolution: evo,
                evolution_text: evo.to_string(),
                enabled: flags.enabled,
                selected: flags.selected,
                visible: visibility.is_visible(f),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTableRow {
    /// `None` for the national-average row.
    pub region: Option<Region>,
    pub label: &'static str,
    /// Formatted price per column, empty when the prefecture did not report it.
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTableView {
    pub columns: Vec<FuelType>,
    pub header: Vec<String>,
    pub country: RegionTableRow,
    /// Station counts behind the national averages, per column.
    pub stations: Vec<String>,
    pub rows: Vec<RegionTableRow>,
}

/// Region table restricted to the snapshot columns that are currently visible.
pub fn region_table(table: &RegionSnapshotTable, visibility: &VisibilityState) -> RegionTableView {
    let columns: Vec<FuelType> = table
        .columns
        .iter()
        .copied()
        .filter(|f| visibility.is_visible(*f))
        .collect();

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(REGION_COLUMN_LABEL.to_string());
    header.extend(columns.iter().map(|f| f.label().to_string()));

    let country_cells = columns
        .iter()
        .map(|f| {
            format_price(table.country_aggregate(*f).map(|c| c.price)).unwrap_or_default()
        })
        .collect();
    let stations = columns
        .iter()
        .map(|f| {
            table
                .country_aggregate(*f)
                .and_then(|c| c.number_of_stations)
                .map(format_stations)
                .unwrap_or_default()
        })
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| RegionTableRow {
            region: Some(row.region),
            label: row.region.label(),
            cells: columns
                .iter()
                .map(|f| format_price(row.price(*f)).unwrap_or_default())
                .collect(),
        })
        .collect();

    RegionTableView {
        columns,
        header,
        country: RegionTableRow {
            region: None,
            label: COUNTRY_ROW_LABEL,
            cells: country_cells,
        },
        stations,
        rows,
    }
}
