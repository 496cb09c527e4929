use futures::future;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    checker::types::{CheckResult, EligibilityRecord},
    config::CheckerConfig,
    provider::EligibilityProvider,
};

/// Batch checker with concurrent fan-out per batch and rate limiting between
/// batches.
pub struct BatchChecker {
    provider: Arc<dyn EligibilityProvider>,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchChecker {
    pub fn new(provider: Arc<dyn EligibilityProvider>, cfg: &CheckerConfig) -> Self {
        Self {
            provider,
            batch_size: cfg.batch_size.max(1),
            batch_delay: Duration::from_millis(cfg.batch_delay_ms),
        }
    }

    /// Trim input lines, drop empties, deduplicate preserving first-seen
    /// order. Equality is exact string match.
    pub fn dedup_addresses(lines: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut addresses = Vec::new();
        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_string()) {
                addresses.push(trimmed.to_string());
            }
        }
        addresses
    }

    /// Number of batches a run over `address_count` distinct addresses takes.
    pub fn batch_count(&self, address_count: usize) -> usize {
        if address_count == 0 {
            0
        } else {
            (address_count + self.batch_size - 1) / self.batch_size
        }
    }

    /// Check raw address lines, producing one record per distinct address.
    pub async fn check_addresses(&self, lines: &[String]) -> CheckResult {
        self.check_addresses_with(lines, |_, _| {}).await
    }

    /// Same as [`check_addresses`](Self::check_addresses), invoking
    /// `on_batch(completed, total)` after each batch joins.
    pub async fn check_addresses_with<F>(&self, lines: &[String], mut on_batch: F) -> CheckResult
    where
        F: FnMut(usize, usize),
    {
        let addresses = Self::dedup_addresses(lines);
        if addresses.is_empty() {
            return Vec::new();
        }

        let batch_count = self.batch_count(addresses.len());
        info!(
            "Checking {} addresses in {} batches of up to {}",
            addresses.len(),
            batch_count,
            self.batch_size
        );

        let mut records = Vec::with_capacity(addresses.len());
        for (batch_num, chunk) in addresses.chunks(self.batch_size).enumerate() {
            debug!("Processing batch {}/{}", batch_num + 1, batch_count);

            let lookups = chunk.iter().map(|address| self.check_one(address));
            records.extend(future::join_all(lookups).await);
            on_batch(batch_num + 1, batch_count);

            // Delay between batches (except after last batch)
            if batch_num + 1 < batch_count {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        records
    }

    /// Single attempt per address. Failures stay inside the record so one bad
    /// address never aborts the rest of the run.
    async fn check_one(&self, address: &str) -> EligibilityRecord {
        match self.provider.fetch_eligibility(address).await {
            Ok(data) => EligibilityRecord::succeeded(address, data.categories),
            Err(e) => {
                warn!("Eligibility check failed for {}: {}", address, e);
                EligibilityRecord::failed(address, e.to_string())
            }
        }
    }
}
