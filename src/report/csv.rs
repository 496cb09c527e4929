use chrono::Utc;
use std::path::Path;

use crate::error::Result;
use crate::report::aggregate::Report;

/// Default artifact name, stamped with the current date.
pub fn default_export_filename() -> String {
    format!("allocations-{}.csv", Utc::now().format("%Y-%m-%d"))
}

/// Render the aggregated report as CSV: header
/// `Address,<category...>,Total Allocation`, one row per address, amounts
/// with exactly 4 decimal places, `-` for categories absent from a row.
pub fn render_csv(report: &Report) -> String {
    let mut out = String::new();

    let mut header: Vec<String> = Vec::with_capacity(report.categories.len() + 2);
    header.push("Address".to_string());
    header.extend(report.categories.iter().map(|c| csv_field(c)));
    header.push("Total Allocation".to_string());
    out.push_str(&header.join(","));
    out.push('\n');

    for row in &report.rows {
        let mut cells: Vec<String> = Vec::with_capacity(report.categories.len() + 2);
        cells.push(csv_field(&row.address));
        for category in &report.categories {
            match row.categories.get(category) {
                Some(amount) => cells.push(format!("{amount:.4}")),
                None => cells.push("-".to_string()),
            }
        }
        cells.push(format!("{:.4}", row.total));
        out.push_str(&cells.join(","));
        out.push('\n');
    }

    out
}

/// Write the report to `path`.
pub fn write_csv(report: &Report, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, render_csv(report))?;
    Ok(())
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::aggregate::AggregatedRow;
    use std::collections::BTreeMap;

    fn sample_report() -> Report {
        let mut first = BTreeMap::new();
        first.insert("Community".to_string(), 12.34567);
        let second = BTreeMap::new();

        Report {
            categories: vec!["Community".to_string(), "Testnet".to_string()],
            rows: vec![
                AggregatedRow {
                    address: "0xAAA".to_string(),
                    categories: first,
                    total: 12.34567,
                },
                AggregatedRow {
                    address: "0xBBB".to_string(),
                    categories: second,
                    total: 0.0,
                },
            ],
        }
    }

    #[test]
    fn row_count_matches_report() {
        let csv = render_csv(&sample_report());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 rows
        assert_eq!(lines[0], "Address,Community,Testnet,Total Allocation");
    }

    #[test]
    fn amounts_have_exactly_four_decimals() {
        let csv = render_csv(&sample_report());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "0xAAA,12.3457,-,12.3457");
        assert_eq!(lines[2], "0xBBB,-,-,0.0000");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("Tranche A, early"), "\"Tranche A, early\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn filename_carries_current_date() {
        let name = default_export_filename();
        assert!(name.starts_with("allocations-"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn write_creates_the_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&sample_report(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Address,"));
        assert_eq!(contents.lines().count(), 3);
    }
}
