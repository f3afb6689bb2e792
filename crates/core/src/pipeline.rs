//! Endpoint definitions and the parse → validate → flatten → aggregate
//! pipeline shared by every submission endpoint.

use indexmap::IndexMap;

use crate::aggregate::{aggregate, FlatRecord, QuarterGroup};
use crate::error::CoreError;
use crate::schema::{
    validated_submissions, Submission, SubmissionSchema, REPORTING_NUMBERS_SCHEMA,
    UNREPORTED_CASES_SCHEMA,
};

/// A field computed from a flattened record before aggregation.
pub struct DerivedField {
    pub name: &'static str,
    /// Returns `None` if the value cannot be represented.
    pub compute: fn(&IndexMap<String, u64>) -> Option<u64>,
}

impl std::fmt::Debug for DerivedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedField").field("name", &self.name).finish()
    }
}

/// Everything that distinguishes one submission endpoint from another.
#[derive(Debug)]
pub struct Endpoint {
    /// Route name, used for logging.
    pub name: &'static str,
    pub schema: &'static SubmissionSchema,
    pub derived: &'static [DerivedField],
}

impl Endpoint {
    /// Detail fields followed by derived fields, in output order.
    pub fn output_fields(&self) -> Vec<&'static str> {
        self.schema
            .detail_fields
            .iter()
            .copied()
            .chain(self.derived.iter().map(|d| d.name))
            .collect()
    }
}

/// Derived field on reporting numbers: cases reported plus cases supported.
pub const TOTAL_HANDLED: &str = "totalHandled";

fn total_handled(fields: &IndexMap<String, u64>) -> Option<u64> {
    let reported = fields.get("reported").copied().unwrap_or(0);
    let supported = fields.get("supported").copied().unwrap_or(0);
    reported.checked_add(supported)
}

pub static REPORTING_NUMBERS: Endpoint = Endpoint {
    name: "reportingNumbers",
    schema: &REPORTING_NUMBERS_SCHEMA,
    derived: &[DerivedField {
        name: TOTAL_HANDLED,
        compute: total_handled,
    }],
};

pub static UNREPORTED_CASES: Endpoint = Endpoint {
    name: "unreportedCases",
    schema: &UNREPORTED_CASES_SCHEMA,
    derived: &[],
};

/// Promote a submission's detail counts to the top level of a record.
pub fn flatten(submission: &Submission) -> FlatRecord {
    FlatRecord {
        key: submission.key,
        fields: submission
            .details
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect(),
    }
}

/// Attach every derived field of `endpoint` to `record`.
pub fn apply_derived(endpoint: &Endpoint, record: &mut FlatRecord) -> Result<(), CoreError> {
    for derived in endpoint.derived {
        let value = (derived.compute)(&record.fields).ok_or_else(|| {
            CoreError::Aggregation(format!("{} overflows for {}", derived.name, record.key))
        })?;
        record.fields.insert(derived.name.to_string(), value);
    }
    Ok(())
}

/// Run a raw request body through the full pipeline for `endpoint`.
pub fn process(body: &[u8], endpoint: &Endpoint) -> Result<Vec<QuarterGroup>, CoreError> {
    let payload: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| CoreError::MalformedBody(e.to_string()))?;
    process_value(&payload, endpoint)
}

/// Same as [`process`] for an already-parsed payload.
pub fn process_value(
    payload: &serde_json::Value,
    endpoint: &Endpoint,
) -> Result<Vec<QuarterGroup>, CoreError> {
    let submissions = validated_submissions(payload, endpoint.schema)?;

    let records = submissions
        .iter()
        .map(|submission| {
            let mut record = flatten(submission);
            apply_derived(endpoint, &mut record)?;
            Ok(record)
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    aggregate(&records, &endpoint.output_fields())
}
