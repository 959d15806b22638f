//! Context object tying the current window, the current region snapshot and
//! the single visibility state together. The caller owns it; nothing here is
//! global.

use crate::align::{AlignedSeries, align_json};
use crate::error::Result;
use crate::registry::FuelType;
use crate::snapshot::{RegionSnapshotTable, build_snapshot_json};
use crate::view::{self, ChartSeries, LatestRow, RegionTableView};
use crate::visibility::VisibilityState;

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    visibility: VisibilityState,
    series: AlignedSeries,
    snapshot: Option<RegionSnapshotTable>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current window and rebuild the enabled flags.
    pub fn load_series(&mut self, series: AlignedSeries) {
        self.visibility.load(&series);
        self.series = series;
    }

    /// Parse and load a series payload. On error the previous window and
    /// visibility are left untouched.
    pub fn load_series_json(&mut self, json: &str) -> Result<()> {
        let series = align_json(json)?;
        self.load_series(series);
        Ok(())
    }

    pub fn load_snapshot(&mut self, table: RegionSnapshotTable) {
        self.snapshot = Some(table);
    }

    /// Parse and load a region payload, keeping the previous table on error.
    pub fn load_snapshot_json(&mut self, json: &str) -> Result<()> {
        let table = build_snapshot_json(json)?;
        self.load_snapshot(table);
        Ok(())
    }

    pub fn toggle(&mut self, fuel_type: FuelType) -> bool {
        self.visibility.toggle(fuel_type)
    }

    pub fn set_selected(&mut self, fuel_type: FuelType, selected: bool) -> bool {
        self.visibility.set_selected(fuel_type, selected)
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn series(&self) -> &AlignedSeries {
        &self.series
    }

    pub fn snapshot(&self) -> Option<&RegionSnapshotTable> {
        self.snapshot.as_ref()
    }

    pub fn chart(&self) -> Vec<ChartSeries> {
        view::chart_series(&self.series, &self.visibility)
    }

    pub fn latest(&self) -> Vec<LatestRow> {
        view::latest_rows(&self.series, &self.visibility)
    }

    pub fn regions(&self) -> Option<RegionTableView> {
        self.snapshot
            .as_ref()
            .map(|t| view::region_table(t, &self.visibility))
    }
}
