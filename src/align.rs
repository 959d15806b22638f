//! Dense, fuel-type-indexed view of a sparse daily series.

use crate::error::Result;
use crate::models::{DailySeries, RawDailyRecord};
use crate::registry::FuelType;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// A common date axis plus one value column per fuel type.
///
/// Every column has exactly `dates.len()` entries and `None` marks a date on
/// which the fuel type was not reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedSeries {
    dates: Vec<NaiveDate>,
    per_fuel_type: BTreeMap<FuelType, Vec<Option<f64>>>,
}

impl AlignedSeries {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Column for one fuel type, in date order.
    pub fn values(&self, fuel_type: FuelType) -> &[Option<f64>] {
        self.per_fuel_type
            .get(&fuel_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn value(&self, fuel_type: FuelType, index: usize) -> Option<f64> {
        self.values(fuel_type).get(index).copied().flatten()
    }

    /// Columns in registry order.
    pub fn columns(&self) -> impl Iterator<Item = (FuelType, &[Option<f64>])> {
        self.per_fuel_type.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    /// True when the fuel type has at least one value in the window.
    pub fn has_data(&self, fuel_type: FuelType) -> bool {
        self.values(fuel_type).iter().any(Option::is_some)
    }
}

/// Align a validated series.
pub fn align(series: &DailySeries) -> AlignedSeries {
    let records = series.records();
    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();

    let mut per_fuel_type: BTreeMap<FuelType, Vec<Option<f64>>> = FuelType::ALL
        .into_iter()
        .map(|f| (f, vec![None; records.len()]))
        .collect();
    for (i, record) in records.iter().enumerate() {
        for o in record.observations() {
            if let Some(column) = per_fuel_type.get_mut(&o.fuel_type) {
                column[i] = Some(o.price);
            }
        }
    }

    log::debug!(
        "aligned {} dates ({} observations)",
        dates.len(),
        records.iter().map(|r| r.observations().len()).sum::<usize>()
    );
    AlignedSeries {
        dates,
        per_fuel_type,
    }
}

/// Validate and align a raw payload. Nothing is returned if any record fails.
pub fn align_raw(raw: &[RawDailyRecord]) -> Result<AlignedSeries> {
    let series = DailySeries::from_raw(raw)?;
    Ok(align(&series))
}

/// Parse, validate and align a JSON payload.
pub fn align_json(json: &str) -> Result<AlignedSeries> {
    let series = DailySeries::from_json(json)?;
    Ok(align(&series))
}
