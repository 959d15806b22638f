//! Synchronous client for the **fuel prices HTTP API**.
//!
//! This is the acquisition side: it only fetches and decodes payloads. Validation
//! and alignment happen in [`crate::align`] and [`crate::snapshot`].
//!
//! ### Notes
//! - Decimal prices are served as strings (`"1.750"`); the payload types accept
//!   strings and numbers.
//! - Transient failures (network errors, HTTP 5xx) are retried three times with a
//!   short backoff. Other HTTP errors fail immediately.
//!
//! Typical usage:
//! ```no_run
//! # use fuelprices::{Client, align};
//! # use chrono::NaiveDate;
//! let client = Client::default();
//! let raw = client.fetch_daily_country(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//! )?;
//! let aligned = align::align_raw(&raw)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
use crate::models::{DataType, DateRange, NameDescription, RawDailyRecord, RegionPayload};
use crate::registry::Region;
use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default address of a locally running API server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Duration::from_secs(30))
    }
}

// Allow - and _ unescaped in path segments (identifiers, ISO dates)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

fn enc(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment.trim(), SAFE).to_string()
}

fn range_query(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "start_date={}&end_date={}",
        enc(&start.format("%Y-%m-%d").to_string()),
        enc(&end.format("%Y-%m-%d").to_string())
    )
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("fuelprices-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// GET `path` relative to the base URL and decode the JSON body.
    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut last_err: Option<anyhow::Error> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(&url).send() {
                Ok(r) if r.status().is_success() => {
                    return r.json().with_context(|| format!("decode json from {url}"));
                }
                Ok(r) if r.status().is_server_error() => {
                    log::warn!("GET {url} returned HTTP {}, retrying", r.status());
                    last_err = Some(anyhow::anyhow!("HTTP {}", r.status()));
                }
                Ok(r) => bail!("GET {url} failed with HTTP {}", r.status()),
                Err(e) => {
                    log::warn!("GET {url} failed: {e}, retrying");
                    last_err = Some(e.into());
                }
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        bail!("GET {url}: network error: {:?}", last_err);
    }

    /// Available data range for a data set.
    pub fn fetch_date_range(&self, data_type: DataType) -> Result<DateRange> {
        self.get_json(&format!("/dateRange/{}", enc(data_type.as_str())))
    }

    /// Daily country averages between `start` and `end` (inclusive).
    pub fn fetch_daily_country(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawDailyRecord>> {
        self.get_json(&format!("/data/daily/country?{}", range_query(start, end)))
    }

    /// Weekly country averages between `start` and `end` (inclusive).
    pub fn fetch_weekly_country(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<RawDailyRecord>> {
        self.get_json(&format!("/data/weekly/country?{}", range_query(start, end)))
    }

    /// Daily averages of one prefecture.
    pub fn fetch_daily_prefecture(
        &self,
        region: Region,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RawDailyRecord>> {
        self.get_json(&format!(
            "/data/daily/prefectures/{}?{}",
            enc(region.name()),
            range_query(start, end)
        ))
    }

    /// Country aggregate and per-prefecture prices of one date.
    pub fn fetch_country(&self, date: NaiveDate) -> Result<RegionPayload> {
        self.get_json(&format!(
            "/data/country/{}",
            enc(&date.format("%Y-%m-%d").to_string())
        ))
    }

    pub fn fetch_fuel_types(&self) -> Result<Vec<NameDescription>> {
        self.get_json("/fuelTypes")
    }

    pub fn fetch_prefectures(&self) -> Result<Vec<NameDescription>> {
        self.get_json("/prefectures")
    }
}
