use crate::align::AlignedSeries;
use crate::models::{DailySeries, RegionPayload};
use crate::registry::FuelType;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save the aligned series as CSV: `date` followed by one column per fuel type
/// in registry order. Absent values are left empty.
pub fn save_csv<P: AsRef<Path>>(series: &AlignedSeries, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    let mut header = vec!["date"];
    header.extend(FuelType::ALL.iter().map(|f| f.name()));
    wtr.write_record(&header)?;
    for (i, date) in series.dates().iter().enumerate() {
        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        record.extend(FuelType::ALL.iter().map(|f| {
            series
                .value(*f, i)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the aligned series as pretty JSON.
pub fn save_json<P: AsRef<Path>>(series: &AlignedSeries, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(series)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Read and validate a daily series payload from disk.
pub fn load_daily_series<P: AsRef<Path>>(path: P) -> Result<DailySeries> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    DailySeries::from_json(&json).with_context(|| format!("parse {}", path.display()))
}

/// Read a region payload from disk.
pub fn load_region_payload<P: AsRef<Path>>(path: P) -> Result<RegionPayload> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    RegionPayload::from_json(&json).with_context(|| format!("parse {}", path.display()))
}
