use crate::error::{Error, Result};
use crate::registry::FuelType;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Date range as returned by `/dateRange/{data_type}`. Either bound may be null
/// when the service has no data for the type yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }

    /// Resolve optional bounds into a concrete, inclusive range of at most
    /// `max_days` days.
    ///
    /// - both missing: the `max_days` ending today
    /// - only one bound: extend `max_days` away from it
    /// - both present: keep `end`, clamp the span to `max_days`
    ///
    /// Reversed bounds or a bound pushed outside the calendar give
    /// [`Error::InvalidRange`].
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        max_days: i64,
        today: NaiveDate,
    ) -> Result<(NaiveDate, NaiveDate)> {
        let max_days = max_days.max(0) as u64;
        let back = |d: NaiveDate, days: u64| {
            d.checked_sub_days(Days::new(days)).ok_or_else(|| {
                Error::InvalidRange(format!("{days} days before {d} is out of range"))
            })
        };
        match (start, end) {
            (None, None) => Ok((back(today, max_days)?, today)),
            (None, Some(e)) => Ok((back(e, max_days)?, e)),
            (Some(s), None) => {
                let e = s.checked_add_days(Days::new(max_days)).ok_or_else(|| {
                    Error::InvalidRange(format!("{max_days} days after {s} is out of range"))
                })?;
                Ok((s, e))
            }
            (Some(s), Some(e)) if s > e => Err(Error::InvalidRange(format!(
                "start date {s} must be before end date {e}"
            ))),
            (Some(s), Some(e)) => {
                let days = ((e - s).num_days() as u64).min(max_days);
                Ok((back(e, days)?, e))
            }
        }
    }
}

/// Data sets published by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    WeeklyCountry,
    WeeklyPrefecture,
    DailyCountry,
    DailyPrefecture,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::WeeklyCountry => "weekly_country",
            DataType::WeeklyPrefecture => "weekly_prefecture",
            DataType::DailyCountry => "daily_country",
            DataType::DailyPrefecture => "daily_prefecture",
        }
    }
}

/// `{ name, description }` entries returned by `/fuelTypes` and `/prefectures`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDescription {
    pub name: String,
    pub description: String,
}

/// Serde helper: parse an optional price from a JSON number or a decimal string.
/// The service serializes decimals as strings (`"1.750"`), hand-written payloads
/// usually use numbers.
fn de_opt_price<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct PriceVisitor;

    impl<'de> Visitor<'de> for PriceVisitor {
        type Value = Option<f64>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number or a string holding a decimal number")
        }

        fn visit_f64<E>(self, v: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_u64<E>(self, v: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_i64<E>(self, v: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v as f64))
        }

        fn visit_str<E>(self, s: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<f64>().map(Some).map_err(E::custom)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(PriceVisitor)
}

/// Raw `{ fuel_type, price[, number_of_stations] }` entry. Fields are optional so
/// that a missing field is reported as a malformed record instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_price")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_stations: Option<u32>,
}

/// Raw `{ date, data }` entry of a daily (or weekly) series payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDailyRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<RawObservation>>,
}

/// Raw `{ prefecture, data }` entry of a region payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRegionRecord {
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<RawObservation>>,
}

/// Point-in-time payload of `/data/country/{date}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionPayload {
    #[serde(default)]
    pub country: Option<Vec<RawObservation>>,
    #[serde(default)]
    pub prefectures: Option<Vec<RawRegionRecord>>,
}

impl RegionPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::malformed(format!("invalid date {s:?}: {e}")))
}

pub(crate) fn validate_price(fuel_type: FuelType, price: f64) -> Result<f64> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(Error::malformed(format!(
            "price for {fuel_type} must be a positive number, got {price}"
        )))
    }
}

/// One fuel-type price on one date. Payloads reach it through
/// [`Observation::new`], which rejects non-positive prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub fuel_type: FuelType,
    pub price: f64,
}

impl Observation {
    pub fn new(fuel_type: FuelType, price: f64) -> Result<Self> {
        Ok(Self {
            fuel_type,
            price: validate_price(fuel_type, price)?,
        })
    }
}

impl TryFrom<&RawObservation> for Observation {
    type Error = Error;

    fn try_from(raw: &RawObservation) -> Result<Self> {
        let name = raw
            .fuel_type
            .as_deref()
            .ok_or_else(|| Error::malformed("observation without fuel_type"))?;
        let fuel_type: FuelType = name.parse()?;
        let price = raw
            .price
            .ok_or_else(|| Error::malformed(format!("observation for {fuel_type} without price")))?;
        Observation::new(fuel_type, price)
    }
}

/// Observations of one reporting date, at most one per fuel type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    observations: Vec<Observation>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, observations: Vec<Observation>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for o in &observations {
            if !seen.insert(o.fuel_type) {
                return Err(Error::malformed(format!(
                    "duplicate fuel type {} on {date}",
                    o.fuel_type
                )));
            }
        }
        Ok(Self { date, observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn price(&self, fuel_type: FuelType) -> Option<f64> {
        self.observations
            .iter()
            .find(|o| o.fuel_type == fuel_type)
            .map(|o| o.price)
    }
}

impl TryFrom<&RawDailyRecord> for DailyRecord {
    type Error = Error;

    fn try_from(raw: &RawDailyRecord) -> Result<Self> {
        let date = raw
            .date
            .as_deref()
            .ok_or_else(|| Error::malformed("record without date"))
            .and_then(parse_date)?;
        let data = raw
            .data
            .as_ref()
            .ok_or_else(|| Error::malformed(format!("record for {date} without data")))?;
        let observations = data
            .iter()
            .map(Observation::try_from)
            .collect::<Result<Vec<_>>>()?;
        DailyRecord::new(date, observations)
    }
}

/// Daily records, strictly increasing by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    records: Vec<DailyRecord>,
}

impl DailySeries {
    pub fn new(records: Vec<DailyRecord>) -> Result<Self> {
        for pair in records.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(Error::malformed(format!(
                    "dates must be strictly increasing: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }
        Ok(Self { records })
    }

    /// Validate a raw payload. The whole payload is rejected on the first error.
    pub fn from_raw(raw: &[RawDailyRecord]) -> Result<Self> {
        let records = raw
            .iter()
            .map(DailyRecord::try_from)
            .collect::<Result<Vec<_>>>()?;
        DailySeries::new(records)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawDailyRecord> = serde_json::from_str(json)?;
        DailySeries::from_raw(&raw)
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
