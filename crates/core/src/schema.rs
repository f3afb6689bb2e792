//! Submission schemas and the payload validator.
//!
//! The two schemas are immutable `static` values. [`validate`] walks the
//! whole parsed payload, collects every violation, and reports the shallowest
//! one using the same human-readable wording as JSON Schema validators
//! (`-1 is less than the minimum of 0`, `[] is too short`, ...). A payload
//! that passes the structural checks must also carry each (year, quarter)
//! pair at most once.

use std::cmp::Ordering;
use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::CoreError;
use crate::types::QuarterKey;

/* --------------------------------------------------------------------------
Schema definitions
-------------------------------------------------------------------------- */

/// Top-level member holding the submissions.
pub const BODY_FIELD: &str = "body";

pub const QUARTER_FIELD: &str = "quarter";

pub const YEAR_FIELD: &str = "year";

/// Bounds for an integer member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerRule {
    pub minimum: Option<i64>,
    pub exclusive_minimum: Option<i64>,
    pub maximum: Option<i64>,
}

impl IntegerRule {
    const fn at_least(minimum: i64) -> Self {
        Self {
            minimum: Some(minimum),
            exclusive_minimum: None,
            maximum: None,
        }
    }

    const fn above(bound: i64) -> Self {
        Self {
            minimum: None,
            exclusive_minimum: Some(bound),
            maximum: None,
        }
    }

    const fn between(minimum: i64, maximum: i64) -> Self {
        Self {
            minimum: Some(minimum),
            exclusive_minimum: None,
            maximum: Some(maximum),
        }
    }

    /// `shown` is the value as it appeared in the payload (`5`, `5.0`).
    fn check(&self, value: i128, shown: &str) -> Result<(), String> {
        if let Some(min) = self.minimum {
            if value < i128::from(min) {
                return Err(format!("{shown} is less than the minimum of {min}"));
            }
        }
        if let Some(min) = self.exclusive_minimum {
            if value <= i128::from(min) {
                return Err(format!(
                    "{shown} is less than or equal to the minimum of {min}"
                ));
            }
        }
        if let Some(max) = self.maximum {
            if value > i128::from(max) {
                return Err(format!("{shown} is greater than the maximum of {max}"));
            }
        }
        Ok(())
    }
}

/// `quarter` is in `[1, 4]`.
pub const QUARTER_RULE: IntegerRule = IntegerRule::between(1, 4);

/// `year` is strictly positive.
pub const YEAR_RULE: IntegerRule = IntegerRule::above(0);

/// Every detail count is non-negative.
pub const COUNT_RULE: IntegerRule = IntegerRule::at_least(0);

/// Which of the two fixed schemas to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    ReportingNumbers,
    UnreportedCases,
}

impl SchemaKind {
    pub fn schema(self) -> &'static SubmissionSchema {
        match self {
            SchemaKind::ReportingNumbers => &REPORTING_NUMBERS_SCHEMA,
            SchemaKind::UnreportedCases => &UNREPORTED_CASES_SCHEMA,
        }
    }
}

/// Declarative shape of one submission kind.
///
/// Every submission is `{quarter, year, <details_key>: {<detail_fields>...}}`
/// where all members are required integers.
#[derive(Debug)]
pub struct SubmissionSchema {
    /// Name of the nested object carrying the counts.
    pub details_key: &'static str,
    /// Required count fields, in output order.
    pub detail_fields: &'static [&'static str],
}

pub static REPORTING_NUMBERS_SCHEMA: SubmissionSchema = SubmissionSchema {
    details_key: "reportingDetails",
    detail_fields: &["reported", "supported"],
};

pub static UNREPORTED_CASES_SCHEMA: SubmissionSchema = SubmissionSchema {
    details_key: "unreportedCases",
    detail_fields: &[
        "lackEvidence",
        "notTrustPolice",
        "policeNotBelieve",
        "afraid",
        "abuseStop",
        "talk",
        "clientOther",
        "other",
    ],
};

/* --------------------------------------------------------------------------
Validation
-------------------------------------------------------------------------- */

/// `(ok, message)` result of validating a payload. `message` is empty when
/// the payload is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationOutcome {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }

    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(CoreError::Validation(self.message))
        }
    }
}

/// One validated submission, with its counts keyed by detail field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub key: QuarterKey,
    pub details: IndexMap<&'static str, u64>,
}

/// Validate `payload` against the schema selected by `kind`.
///
/// Never fails: malformed input is reported through the outcome message.
pub fn validate(payload: &Value, kind: SchemaKind) -> ValidationOutcome {
    match parse_submissions(payload, kind.schema()) {
        Ok(_) => ValidationOutcome::valid(),
        Err(message) => ValidationOutcome::invalid(message),
    }
}

/// Validate `payload` and return its submissions in input order.
pub fn validated_submissions(
    payload: &Value,
    schema: &'static SubmissionSchema,
) -> Result<Vec<Submission>, CoreError> {
    parse_submissions(payload, schema).map_err(CoreError::Validation)
}

/// One step from a parent value to a child value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum PathSegment {
    Index(usize),
    Key(&'static str),
}

/// A schema violation and where in the payload it was found.
#[derive(Debug)]
struct Violation {
    path: Vec<PathSegment>,
    message: String,
}

impl Violation {
    fn at(path: &[PathSegment], message: String) -> Self {
        Self {
            path: path.to_vec(),
            message,
        }
    }

    /// Shallower violations win. At equal depth the later sibling wins; at
    /// the same location the one found first is kept.
    fn outranks(&self, other: &Violation) -> bool {
        match self.path.len().cmp(&other.path.len()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.path > other.path,
        }
    }
}

fn most_relevant(violations: Vec<Violation>) -> Option<Violation> {
    violations
        .into_iter()
        .reduce(|best, candidate| if candidate.outranks(&best) { candidate } else { best })
}

/// Walk the whole payload, then report the most relevant violation. The
/// uniqueness rule only runs on a structurally valid payload.
fn parse_submissions(
    payload: &Value,
    schema: &'static SubmissionSchema,
) -> Result<Vec<Submission>, String> {
    let mut violations = Vec::new();
    let submissions = collect_submissions(payload, schema, &mut violations);

    if let Some(violation) = most_relevant(violations) {
        return Err(violation.message);
    }

    check_unique_quarters(&submissions)?;
    Ok(submissions)
}

fn collect_submissions(
    payload: &Value,
    schema: &'static SubmissionSchema,
    violations: &mut Vec<Violation>,
) -> Vec<Submission> {
    let Some(root) = expect_object(payload, &[], violations) else {
        return Vec::new();
    };
    let Some(body) = root.get(BODY_FIELD) else {
        violations.push(Violation::at(&[], missing_property(BODY_FIELD)));
        return Vec::new();
    };

    let path = [PathSegment::Key(BODY_FIELD)];
    let Some(items) = body.as_array() else {
        violations.push(Violation::at(&path, not_of_type(body, "array")));
        return Vec::new();
    };
    if items.is_empty() {
        violations.push(Violation::at(&path, format!("{} is too short", render(body))));
        return Vec::new();
    }

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let item_path = child(&path, PathSegment::Index(index));
            collect_submission(item, &item_path, schema, violations)
        })
        .collect()
}

/// Check one submission. Every member is checked even after a failure so the
/// caller can pick the most relevant violation.
fn collect_submission(
    item: &Value,
    path: &[PathSegment],
    schema: &'static SubmissionSchema,
    violations: &mut Vec<Violation>,
) -> Option<Submission> {
    let obj = expect_object(item, path, violations)?;
    require_members(
        obj,
        &[QUARTER_FIELD, YEAR_FIELD, schema.details_key],
        path,
        violations,
    );

    let quarter = integer_member(obj, QUARTER_FIELD, &QUARTER_RULE, path, violations);
    let year = integer_member(obj, YEAR_FIELD, &YEAR_RULE, path, violations);
    let details = details_member(obj, schema, path, violations);

    Some(Submission {
        key: QuarterKey::new(year?, quarter?),
        details: details?,
    })
}

fn details_member(
    obj: &serde_json::Map<String, Value>,
    schema: &'static SubmissionSchema,
    path: &[PathSegment],
    violations: &mut Vec<Violation>,
) -> Option<IndexMap<&'static str, u64>> {
    let value = obj.get(schema.details_key)?;
    let path = child(path, PathSegment::Key(schema.details_key));
    let details = expect_object(value, &path, violations)?;
    require_members(details, schema.detail_fields, &path, violations);

    let mut counts = IndexMap::with_capacity(schema.detail_fields.len());
    let mut complete = true;
    for &field in schema.detail_fields {
        match integer_member(details, field, &COUNT_RULE, &path, violations) {
            Some(count) => {
                counts.insert(field, count);
            }
            None => complete = false,
        }
    }
    complete.then_some(counts)
}

fn check_unique_quarters(submissions: &[Submission]) -> Result<(), String> {
    let mut seen = HashSet::with_capacity(submissions.len());
    for submission in submissions {
        if !seen.insert(submission.key) {
            return Err(format!(
                "Data for {} Q{} appears more than once",
                submission.key.year, submission.key.quarter
            ));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

fn child(path: &[PathSegment], segment: PathSegment) -> Vec<PathSegment> {
    let mut path = path.to_vec();
    path.push(segment);
    path
}

fn expect_object<'a>(
    value: &'a Value,
    path: &[PathSegment],
    violations: &mut Vec<Violation>,
) -> Option<&'a serde_json::Map<String, Value>> {
    let obj = value.as_object();
    if obj.is_none() {
        violations.push(Violation::at(path, not_of_type(value, "object")));
    }
    obj
}

/// Records one violation per missing member, in `names` order.
fn require_members(
    obj: &serde_json::Map<String, Value>,
    names: &[&str],
    path: &[PathSegment],
    violations: &mut Vec<Violation>,
) {
    for name in names.iter().filter(|name| !obj.contains_key(**name)) {
        violations.push(Violation::at(path, missing_property(name)));
    }
}

/// Check an integer member against `rule`. An absent member yields `None`
/// without a violation; `require_members` reports it.
fn integer_member<T: TryFrom<i128>>(
    obj: &serde_json::Map<String, Value>,
    name: &'static str,
    rule: &IntegerRule,
    path: &[PathSegment],
    violations: &mut Vec<Violation>,
) -> Option<T> {
    let value = obj.get(name)?;
    let path = child(path, PathSegment::Key(name));

    let Some(int) = as_integer(value) else {
        violations.push(Violation::at(&path, not_of_type(value, "integer")));
        return None;
    };
    if let Err(message) = rule.check(int, &render(value)) {
        violations.push(Violation::at(&path, message));
        return None;
    }
    match T::try_from(int) {
        Ok(int) => Some(int),
        Err(_) => {
            violations.push(Violation::at(&path, format!("{} is out of range", render(value))));
            None
        }
    }
}

/// Integers, including floats with no fractional part (`1.0`).
fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i128)
            }),
        _ => None,
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

fn missing_property(name: &str) -> String {
    format!("'{name}' is a required property")
}

fn not_of_type(value: &Value, expected: &str) -> String {
    format!("{} is not of type '{expected}'", render(value))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
