//! Human-readable rendering of load estimates.

use gridview_core::ULoad;
use serde::Serialize;

/// Placeholder shown while no estimate is available.
pub const TBD: &str = "TBD";

/// One chart record per load estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ULoadInfo {
    pub id: usize,
    pub value: String,
    pub confidence: String,
    /// Raw magnitude for the chart axis; absent on the placeholder record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// `{(12.50 [85%]), (3.00 [40%])}`, or `TBD` when there is nothing to show.
pub fn pretty_str(loads: Option<&[ULoad]>) -> String {
    pretty_str_with(loads, ULoad::DEFAULT_PRECISION)
}

pub fn pretty_str_with(loads: Option<&[ULoad]>, precision: usize) -> String {
    let loads = match loads {
        Some(loads) if !loads.is_empty() => loads,
        _ => return TBD.to_string(),
    };

    let parts: Vec<String> = loads
        .iter()
        .map(|ul| format!("({} [{}%])", ul.pretty_load_with(precision), ul.pretty_conf()))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

/// Chart records for a list of loads; a single `TBD` record when empty.
pub fn uloads_data(loads: Option<&[ULoad]>) -> Vec<ULoadInfo> {
    uloads_data_with(loads, ULoad::DEFAULT_PRECISION)
}

pub fn uloads_data_with(loads: Option<&[ULoad]>, precision: usize) -> Vec<ULoadInfo> {
    let loads = match loads {
        Some(loads) if !loads.is_empty() => loads,
        _ => {
            return vec![ULoadInfo {
                id: 0,
                value: TBD.to_string(),
                confidence: TBD.to_string(),
                y: None,
            }]
        }
    };

    loads
        .iter()
        .enumerate()
        .map(|(id, ul)| ULoadInfo {
            id,
            value: ul.pretty_load_with(precision),
            confidence: ul.pretty_conf(),
            y: Some(ul.load),
        })
        .collect()
}
