use crate::align::AlignedSeries;
use crate::registry::FuelType;
use serde::{Deserialize, Serialize};

/// Summary statistics for one fuel type over the loaded window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub fuel_type: FuelType,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute statistics per fuel type, in registry order. Absent entries are
/// counted as missing.
pub fn fuel_type_summary(series: &AlignedSeries) -> Vec<Summary> {
    let mut out = Vec::with_capacity(FuelType::ALL.len());
    for fuel_type in FuelType::ALL {
        let column = series.values(fuel_type);
        let mut vals: Vec<f64> = column.iter().flatten().copied().collect();
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(Summary {
            fuel_type,
            count,
            missing: column.len() - count,
            min,
            max,
            mean,
            median,
        });
    }
    out
}
