use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of one eligibility lookup, immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRecord {
    pub address: String,
    /// Reward-bucket name to allocation amount. Empty on failure.
    pub categories: BTreeMap<String, f64>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EligibilityRecord {
    pub fn succeeded(address: impl Into<String>, categories: BTreeMap<String, f64>) -> Self {
        Self {
            address: address.into(),
            categories,
            success: true,
            error: None,
        }
    }

    /// Placeholder for an address whose lookup failed; keeps the address in
    /// the output instead of silently dropping it.
    pub fn failed(address: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            categories: BTreeMap::new(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// One record per distinct input address, in batch order. Order within a
/// batch follows completion order and is not guaranteed.
pub type CheckResult = Vec<EligibilityRecord>;

/// Counts for a completed run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl CheckSummary {
    pub fn of(records: &[EligibilityRecord]) -> Self {
        let succeeded = records.iter().filter(|r| r.success).count();
        Self {
            total: records.len(),
            succeeded,
            failed: records.len() - succeeded,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_failures() {
        let records = vec![
            EligibilityRecord::succeeded("0xA", BTreeMap::new()),
            EligibilityRecord::failed("0xB", "HTTP 500"),
            EligibilityRecord::succeeded("0xC", BTreeMap::new()),
        ];

        let summary = CheckSummary::of(&records);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn success_rate_handles_empty_run() {
        assert_eq!(CheckSummary::default().success_rate(), 0.0);
    }
}
