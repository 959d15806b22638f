//! fuelprices
//!
//! Align, compare and chart Greek fuel-price observations. Pairs with the
//! `fuelprices` CLI.
//!
//! ### Features
//! - Turn a sparse daily series into one dense column per fuel type
//! - Latest price per fuel type with its evolution against the previous date
//! - One visibility state shared by the chart, the latest-values table and the
//!   per-prefecture table
//! - Per-prefecture table restricted to the fuel types of the national average
//! - CSV/JSON export, summary statistics and SVG/PNG charts
//!
//! ### Example
//! ```
//! use fuelprices::{Dashboard, FuelType};
//!
//! let mut dashboard = Dashboard::new();
//! dashboard.load_series_json(r#"[
//!     {"date": "2024-03-01", "data": [{"fuel_type": "DIESEL", "price": 1.700}]},
//!     {"date": "2024-03-02", "data": [{"fuel_type": "DIESEL", "price": 1.750}]}
//! ]"#)?;
//! let diesel = &dashboard.latest()[FuelType::Diesel as usize];
//! assert_eq!(diesel.evolution_text, "+2.86%");
//! assert!(!dashboard.visibility().is_enabled(FuelType::Gas));
//! # Ok::<(), fuelprices::Error>(())
//! ```

pub mod align;
pub mod api;
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod evolution;
pub mod models;
pub mod registry;
pub mod settings;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod view;
pub mod visibility;

pub use align::{AlignedSeries, align};
pub use api::Client;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use evolution::{Direction, EvolutionResult, evolution};
pub use models::{DailyRecord, DailySeries, DateRange, Observation};
pub use registry::{FuelType, Region};
pub use snapshot::{RegionSnapshot, RegionSnapshotTable, build_snapshot};
pub use visibility::VisibilityState;
