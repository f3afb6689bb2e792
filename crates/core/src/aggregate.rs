//! Quarter aggregation: group flattened records by (year, quarter), sum the
//! requested fields, and emit groups in chronological order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::QuarterKey;

/// A submission with its detail counts promoted to the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    pub key: QuarterKey,
    pub fields: IndexMap<String, u64>,
}

/// Summed counts for one reporting period.
///
/// Serializes as `{"quarter": "Q1 2021", "<field>": <sum>, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuarterGroup {
    #[serde(rename = "quarter")]
    pub label: String,
    #[serde(flatten)]
    pub fields: IndexMap<String, u64>,
}

/// Group `records` by quarter and sum every field named in `fields_to_sum`.
///
/// Output is sorted ascending by (year, quarter); each group carries the
/// summed fields in `fields_to_sum` order. A field missing from a record
/// counts as zero. Fails only if a sum overflows `u64`.
pub fn aggregate(
    records: &[FlatRecord],
    fields_to_sum: &[&str],
) -> Result<Vec<QuarterGroup>, CoreError> {
    let mut groups: BTreeMap<QuarterKey, Vec<u64>> = BTreeMap::new();

    for record in records {
        let sums = groups
            .entry(record.key)
            .or_insert_with(|| vec![0; fields_to_sum.len()]);

        for (sum, field) in sums.iter_mut().zip(fields_to_sum) {
            let value = record.fields.get(*field).copied().unwrap_or(0);
            *sum = sum.checked_add(value).ok_or_else(|| {
                CoreError::Aggregation(format!("{field} overflows for {}", record.key))
            })?;
        }
    }

    Ok(groups
        .into_iter()
        .map(|(key, sums)| QuarterGroup {
            label: key.label(),
            fields: fields_to_sum
                .iter()
                .map(|field| field.to_string())
                .zip(sums)
                .collect(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn record(year: u64, quarter: u8, fields: &[(&str, u64)]) -> FlatRecord {
        FlatRecord {
            key: QuarterKey::new(year, quarter),
            fields: fields.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    fn labels(groups: &[QuarterGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    #[test]
    fn single_record_per_quarter_is_identity() {
        let records = vec![
            record(2021, 1, &[("reported", 6), ("supported", 7)]),
            record(2021, 2, &[("reported", 0), ("supported", 1)]),
        ];
        let groups = aggregate(&records, &["reported", "supported"]).unwrap();

        assert_eq!(labels(&groups), vec!["Q1 2021", "Q2 2021"]);
        assert_eq!(groups[0].fields["reported"], 6);
        assert_eq!(groups[0].fields["supported"], 7);
        assert_eq!(groups[1].fields["reported"], 0);
        assert_eq!(groups[1].fields["supported"], 1);
    }

    #[test]
    fn output_is_sorted_regardless_of_input_order() {
        let records = vec![
            record(2022, 1, &[("n", 1)]),
            record(2021, 4, &[("n", 2)]),
            record(2020, 3, &[("n", 3)]),
            record(2021, 1, &[("n", 4)]),
            record(2019, 4, &[("n", 5)]),
        ];
        let groups = aggregate(&records, &["n"]).unwrap();
        assert_eq!(
            labels(&groups),
            vec!["Q4 2019", "Q3 2020", "Q1 2021", "Q4 2021", "Q1 2022"]
        );
    }

    #[test]
    fn year_sorts_numerically_not_lexically() {
        let records = vec![record(10000, 1, &[("n", 1)]), record(999, 2, &[("n", 1)])];
        let groups = aggregate(&records, &["n"]).unwrap();
        assert_eq!(labels(&groups), vec!["Q2 999", "Q1 10000"]);
    }

    #[test]
    fn records_sharing_a_quarter_are_summed() {
        let records = vec![
            record(2021, 1, &[("reported", 6), ("supported", 7)]),
            record(2021, 2, &[("reported", 1), ("supported", 1)]),
            record(2021, 1, &[("reported", 4), ("supported", 3)]),
        ];
        let groups = aggregate(&records, &["reported", "supported"]).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "Q1 2021");
        assert_eq!(groups[0].fields["reported"], 10);
        assert_eq!(groups[0].fields["supported"], 10);
    }

    #[test]
    fn only_requested_fields_are_kept_in_requested_order() {
        let records = vec![record(2021, 1, &[("b", 2), ("ignored", 9), ("a", 1)])];
        let groups = aggregate(&records, &["a", "b", "c"]).unwrap();

        assert_eq!(
            groups[0].fields.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert_eq!(groups[0].fields["c"], 0);
    }

    #[test]
    fn input_is_not_mutated() {
        let records = vec![record(2021, 2, &[("n", 1)]), record(2021, 1, &[("n", 2)])];
        let before = records.clone();
        aggregate(&records, &["n"]).unwrap();
        assert_eq!(records, before);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(aggregate(&[], &["n"]).unwrap().is_empty());
    }

    #[test]
    fn overflow_is_an_aggregation_fault() {
        let records = vec![record(2021, 1, &[("n", u64::MAX)]), record(2021, 1, &[("n", 1)])];
        let err = aggregate(&records, &["n"]).unwrap_err();
        assert_matches!(err, CoreError::Aggregation(msg) if msg.contains("Q1 2021"));
    }

    #[test]
    fn serializes_label_as_quarter_with_flattened_fields() {
        let groups = aggregate(
            &[record(2021, 1, &[("reported", 6), ("supported", 7)])],
            &["reported", "supported"],
        )
        .unwrap();
        let json = serde_json::to_value(&groups[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"quarter": "Q1 2021", "reported": 6, "supported": 7})
        );
    }
}
