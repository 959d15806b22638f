//! Per-prefecture table for one date.

use crate::error::{Error, Result};
use crate::models::{DailyRecord, DailySeries, Observation, RawObservation, RegionPayload};
use crate::registry::{FuelType, Region, compare_labels};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// National average for one fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryAggregate {
    pub fuel_type: FuelType,
    pub price: f64,
    pub number_of_stations: Option<u32>,
}

/// Prices of one prefecture, restricted to the table columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSnapshot {
    pub region: Region,
    pub per_fuel_type: BTreeMap<FuelType, f64>,
}

impl RegionSnapshot {
    pub fn price(&self, fuel_type: FuelType) -> Option<f64> {
        self.per_fuel_type.get(&fuel_type).copied()
    }
}

/// Region rows plus the columns they are restricted to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionSnapshotTable {
    /// Fuel types of the country aggregate, registry order.
    pub columns: Vec<FuelType>,
    /// Country aggregate, registry order.
    pub country: Vec<CountryAggregate>,
    /// One row per reported prefecture, Greek locale order.
    pub rows: Vec<RegionSnapshot>,
}

impl RegionSnapshotTable {
    pub fn row(&self, region: Region) -> Option<&RegionSnapshot> {
        self.rows.iter().find(|r| r.region == region)
    }

    pub fn country_aggregate(&self, fuel_type: FuelType) -> Option<&CountryAggregate> {
        self.country.iter().find(|c| c.fuel_type == fuel_type)
    }

    /// The country aggregate as a one-day series, for driving visibility when
    /// no longer window is loaded.
    pub fn country_series(&self, date: NaiveDate) -> Result<DailySeries> {
        let observations = self
            .country
            .iter()
            .map(|c| Observation::new(c.fuel_type, c.price))
            .collect::<Result<Vec<_>>>()?;
        DailySeries::new(vec![DailyRecord::new(date, observations)?])
    }
}

fn parse_observations(data: &[RawObservation], context: &str) -> Result<Vec<Observation>> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::with_capacity(data.len());
    for raw in data {
        let o = Observation::try_from(raw)?;
        if !seen.insert(o.fuel_type) {
            return Err(Error::malformed(format!(
                "duplicate fuel type {} in {context}",
                o.fuel_type
            )));
        }
        out.push(o);
    }
    Ok(out)
}

/// Build the region table. Columns are exactly the fuel types of the country
/// aggregate; region values for any other fuel type are dropped.
pub fn build_snapshot(payload: &RegionPayload) -> Result<RegionSnapshotTable> {
    let country_raw = payload
        .country
        .as_deref()
        .ok_or_else(|| Error::malformed("payload without country data"))?;
    let prefectures = payload
        .prefectures
        .as_deref()
        .ok_or_else(|| Error::malformed("payload without prefecture data"))?;

    // parse_observations keeps the input order, one observation per raw entry
    let mut country: Vec<CountryAggregate> = country_raw
        .iter()
        .zip(parse_observations(country_raw, "country data")?)
        .map(|(raw, o)| CountryAggregate {
            fuel_type: o.fuel_type,
            price: o.price,
            number_of_stations: raw.number_of_stations,
        })
        .collect();
    country.sort_by_key(|c| c.fuel_type);
    let columns: Vec<FuelType> = country.iter().map(|c| c.fuel_type).collect();
    let column_set: BTreeSet<FuelType> = columns.iter().copied().collect();

    let mut seen_regions = BTreeSet::new();
    let mut rows = Vec::with_capacity(prefectures.len());
    for record in prefectures {
        let region: Region = record
            .prefecture
            .as_deref()
            .ok_or_else(|| Error::malformed("prefecture record without prefecture"))?
            .parse()?;
        if !seen_regions.insert(region) {
            return Err(Error::malformed(format!("duplicate prefecture {region}")));
        }
        let data = record
            .data
            .as_deref()
            .ok_or_else(|| Error::malformed(format!("prefecture {region} without data")))?;
        let per_fuel_type: BTreeMap<FuelType, f64> =
            parse_observations(data, &format!("prefecture {region}"))?
                .into_iter()
                .filter(|o| column_set.contains(&o.fuel_type))
                .map(|o| (o.fuel_type, o.price))
                .collect();
        rows.push(RegionSnapshot {
            region,
            per_fuel_type,
        });
    }
    rows.sort_by(|a, b| compare_labels(a.region, b.region));

    log::debug!(
        "region snapshot: {} columns, {} prefectures",
        columns.len(),
        rows.len()
    );
    Ok(RegionSnapshotTable {
        columns,
        country,
        rows,
    })
}

pub fn build_snapshot_json(json: &str) -> Result<RegionSnapshotTable> {
    build_snapshot(&RegionPayload::from_json(json)?)
}
