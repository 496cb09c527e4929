use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{
    config::ProviderConfig,
    error::{CheckerError, Result},
    provider::types::{claim_query_input, decode_eligibility, EligibilityData},
};

/// Procedure pair invoked per address: claim lookup + eligibility lookup.
const CLAIM_PROCEDURES: &str = "claims.getClaim,eligibility.getEthAddressEligibility";

#[cfg(test)]
use mockall::automock;

/// Seam for the external eligibility service.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EligibilityProvider: Send + Sync {
    /// Single-attempt lookup; any transport failure or non-2xx status is an
    /// error the caller records against the address.
    async fn fetch_eligibility(&self, address: &str) -> Result<EligibilityData>;
}

#[derive(Clone)]
pub struct HttpEligibilityClient {
    cfg: ProviderConfig,
    client: reqwest::Client,
}

impl HttpEligibilityClient {
    pub fn new(cfg: ProviderConfig) -> Result<Self> {
        if cfg.base_url.trim().is_empty() {
            return Err(CheckerError::Config("provider.base_url is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .build()
            .map_err(|e| CheckerError::Config(format!("failed to build http client: {e}")))?;
        Ok(Self { cfg, client })
    }

    fn endpoint(&self) -> String {
        let base = self.cfg.base_url.trim_end_matches('/');
        format!("{base}/{CLAIM_PROCEDURES}")
    }
}

#[async_trait]
impl EligibilityProvider for HttpEligibilityClient {
    async fn fetch_eligibility(&self, address: &str) -> Result<EligibilityData> {
        let url = self.endpoint();
        let input = claim_query_input(address);

        debug!(address, "querying eligibility provider");
        let resp = self
            .client
            .get(&url)
            .query(&[("batch", "1"), ("input", input.as_str())])
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| CheckerError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CheckerError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(address, status = status.as_u16(), "provider returned non-success status");
            return Err(CheckerError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        decode_eligibility(&body)
    }
}
