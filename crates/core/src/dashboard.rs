//! Chart series for the reporting dashboard.
//!
//! Pure shaping of the records returned by the read API
//! (`/api/getResponses`) into the two per-quarter series the dashboard
//! displays. No I/O happens here; fetching lives in the dashboard crate.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::QuarterKey;

/// Fields requested from the read API for the reporting-trends chart.
pub const TREND_FIELDS: &[&str] = &[
    "Quarter",
    "Year",
    "CasesNotReferredToPolice",
    "CasesReferredToPolice",
];

/// Fields requested from the read API for the reasons chart.
pub const REASON_FIELDS: &[&str] = &["NoReportReason", "Quarter", "Year"];

/// Reasons shown on the reasons chart, in legend order.
pub const NO_REPORT_REASONS: &[&str] = &[
    "Client decision -  I do not trust police",
    "Client decision - I am afraid to go to the authorities",
    "Client decision - I just want the abuse to stop",
    "Client decision - I need someone to talk to confidentially without making a report",
    "Client decision - Police did not believe me before",
    "Not enough evidence",
    "Other",
];

/// One record from the read API. Only the requested fields are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseRecord {
    pub quarter: u8,
    pub year: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases_not_referred_to_police: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cases_referred_to_police: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_report_reason: Option<IndexMap<String, u64>>,
}

impl ResponseRecord {
    pub fn key(&self) -> QuarterKey {
        QuarterKey::new(self.year, self.quarter)
    }
}

/// A point on the reporting-trends line chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    #[serde(rename = "Quarter")]
    pub quarter: String,
    #[serde(rename = "Cases Handled")]
    pub cases_handled: u64,
    #[serde(rename = "Cases Referred To Police")]
    pub cases_referred: u64,
    #[serde(rename = "Cases Not Referred To Police")]
    pub cases_not_referred: u64,
}

/// A group of bars on the reasons chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReasonsPoint {
    #[serde(rename = "Quarter")]
    pub quarter: String,
    #[serde(flatten)]
    pub reasons: IndexMap<String, u64>,
}

/// Stable sort by (year, quarter) ascending.
pub fn sort_by_quarter(records: &mut [ResponseRecord]) {
    records.sort_by_key(ResponseRecord::key);
}

/// Per-quarter totals of cases referred and not referred to police.
pub fn reporting_trends(records: &[ResponseRecord]) -> Result<Vec<TrendPoint>, CoreError> {
    let mut totals: BTreeMap<QuarterKey, TrendPoint> = BTreeMap::new();

    for record in records {
        let key = record.key();
        let point = totals.entry(key).or_insert_with(|| TrendPoint {
            quarter: key.label(),
            ..TrendPoint::default()
        });

        let referred = record.cases_referred_to_police.unwrap_or(0);
        let not_referred = record.cases_not_referred_to_police.unwrap_or(0);
        let overflow = || CoreError::Aggregation(format!("case totals overflow for {key}"));

        point.cases_handled = point
            .cases_handled
            .checked_add(referred)
            .and_then(|n| n.checked_add(not_referred))
            .ok_or_else(overflow)?;
        point.cases_referred = point
            .cases_referred
            .checked_add(referred)
            .ok_or_else(overflow)?;
        point.cases_not_referred = point
            .cases_not_referred
            .checked_add(not_referred)
            .ok_or_else(overflow)?;
    }

    Ok(totals.into_values().collect())
}

/// One point per record, in chronological order.
///
/// Every reason in [`NO_REPORT_REASONS`] is present (zero when absent), followed
/// by any other reasons the record carries.
pub fn reasons_not_reported(records: &[ResponseRecord]) -> Vec<ReasonsPoint> {
    let mut sorted = records.to_vec();
    sort_by_quarter(&mut sorted);

    sorted
        .into_iter()
        .map(|record| {
            let mut reasons: IndexMap<String, u64> = NO_REPORT_REASONS
                .iter()
                .map(|reason| (reason.to_string(), 0))
                .collect();
            if let Some(given) = &record.no_report_reason {
                for (reason, count) in given {
                    reasons.insert(reason.clone(), *count);
                }
            }
            ReasonsPoint {
                quarter: record.key().label(),
                reasons,
            }
        })
        .collect()
}
