use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::checker::types::EligibilityRecord;

/// Per-address summary with category sums and a grand total.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedRow {
    pub address: String,
    pub categories: BTreeMap<String, f64>,
    pub total: f64,
}

/// Aggregated view of a check run. `categories` is the report-wide union of
/// category names in first-seen order; rows missing a category simply omit
/// the key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub categories: Vec<String>,
    pub rows: Vec<AggregatedRow>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Merge records into one row per distinct address. Fully recomputed on each
/// call; amounts are summed at full precision, rounding is left to display.
pub fn aggregate(records: &[EligibilityRecord]) -> Report {
    let mut categories = Vec::new();
    let mut seen_categories = HashSet::new();
    let mut address_order = Vec::new();
    let mut sums: HashMap<String, BTreeMap<String, f64>> = HashMap::new();

    for record in records {
        if !sums.contains_key(&record.address) {
            address_order.push(record.address.clone());
        }
        let row = sums.entry(record.address.clone()).or_default();
        for (name, amount) in &record.categories {
            if seen_categories.insert(name.clone()) {
                categories.push(name.clone());
            }
            // Missing category counts as 0 when merging
            *row.entry(name.clone()).or_insert(0.0) += amount;
        }
    }

    let rows = address_order
        .into_iter()
        .map(|address| {
            let categories = sums.remove(&address).unwrap_or_default();
            let total = categories.values().sum();
            AggregatedRow {
                address,
                categories,
                total,
            }
        })
        .collect();

    Report { categories, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(address: &str, categories: &[(&str, f64)]) -> EligibilityRecord {
        let categories: BTreeMap<String, f64> = categories
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        EligibilityRecord::succeeded(address, categories)
    }

    #[test]
    fn one_row_per_distinct_address() {
        let records = vec![
            record("0xAAA", &[("Community", 1.0)]),
            record("0xBBB", &[("Community", 2.0)]),
            record("0xAAA", &[("Community", 0.5)]),
        ];

        let report = aggregate(&records);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].address, "0xAAA");
        assert_eq!(report.rows[0].categories["Community"], 1.5);
        assert_eq!(report.rows[1].address, "0xBBB");
    }

    #[test]
    fn category_union_spans_all_records() {
        let records = vec![
            record("0xAAA", &[("Community", 1.0)]),
            record("0xBBB", &[("Early Adopter", 2.0), ("Community", 1.0)]),
            record("0xCCC", &[("Testnet", 4.0)]),
        ];

        let report = aggregate(&records);
        assert_eq!(
            report.categories,
            vec!["Community", "Early Adopter", "Testnet"]
        );
        // A category present in only one record still appears report-wide,
        // rows that never saw it just omit the key.
        assert!(!report.rows[0].categories.contains_key("Testnet"));
    }

    #[test]
    fn failed_record_still_produces_a_row() {
        let records = vec![
            record("0xAAA", &[("Community", 3.0)]),
            EligibilityRecord::failed("0xBBB", "HTTP 500"),
        ];

        let report = aggregate(&records);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].address, "0xBBB");
        assert_eq!(report.rows[1].total, 0.0);
        assert!(report.rows[1].categories.is_empty());
        // other rows unaffected
        assert_eq!(report.rows[0].total, 3.0);
    }

    #[test]
    fn total_sums_all_categories_at_full_precision() {
        let records = vec![record(
            "0xAAA",
            &[("A", 0.00005), ("B", 0.00005), ("C", 1.0)],
        )];

        let report = aggregate(&records);
        assert!((report.rows[0].total - 1.0001).abs() < 1e-12);
    }

    #[test]
    fn aggregation_is_idempotent_over_duplicated_input() {
        let records = vec![
            record("0xAAA", &[("Community", 1.0)]),
            record("0xBBB", &[("Community", 2.0)]),
        ];

        let once = aggregate(&records);
        let again = aggregate(&records);
        assert_eq!(once.categories, again.categories);
        assert_eq!(once.rows.len(), again.rows.len());
        for (a, b) in once.rows.iter().zip(again.rows.iter()) {
            assert_eq!(a.address, b.address);
            assert_eq!(a.total, b.total);
        }
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = aggregate(&[]);
        assert!(report.is_empty());
        assert!(report.categories.is_empty());
    }
}
