//! Wire types for the eligibility provider.
//!
//! The provider exposes a batched remote-procedure convention: two sub-queries
//! (a claim lookup and an eligibility lookup) are keyed `"0"` and `"1"` in a
//! URL-encoded JSON envelope, and the response is a JSON array with one entry
//! per sub-query. The payload of interest sits at
//! `result.data.json.eligibilityData`. All decoding of that shape lives here
//! so upstream format drift has one point of change.

use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

use crate::error::{CheckerError, Result};

/// Decoded eligibility payload for a single address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EligibilityData {
    pub address: Option<String>,
    pub categories: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderReply {
    #[serde(default)]
    pub result: Option<ReplyResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyResult {
    #[serde(default)]
    pub data: Option<ReplyData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyData {
    #[serde(default)]
    pub json: Option<ReplyJson>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyJson {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "eligibilityData")]
    pub eligibility_data: BTreeMap<String, f64>,
}

/// Build the `input` envelope for one address: sub-query `"0"` is the claim
/// lookup, `"1"` the eligibility lookup, both keyed by the same address.
pub fn claim_query_input(address: &str) -> String {
    json!({
        "0": { "json": { "address": address } },
        "1": { "json": { "address": address } },
    })
    .to_string()
}

/// Decode a provider response body into eligibility data.
///
/// Sub-results that carry no `eligibilityData` (the claim lookup, usually)
/// contribute nothing; amount maps from multiple sub-results merge by
/// summation. Tolerates a bare object where an array is expected.
pub fn decode_eligibility(body: &str) -> Result<EligibilityData> {
    let replies: Vec<ProviderReply> = match serde_json::from_str(body) {
        Ok(replies) => replies,
        Err(_) => {
            let single: ProviderReply = serde_json::from_str(body)
                .map_err(|e| CheckerError::Decode(e.to_string()))?;
            vec![single]
        }
    };

    let mut data = EligibilityData::default();
    for reply in replies {
        let Some(payload) = reply.result.and_then(|r| r.data).and_then(|d| d.json) else {
            continue;
        };
        if data.address.is_none() {
            data.address = payload.address;
        }
        for (name, amount) in payload.eligibility_data {
            *data.categories.entry(name).or_insert(0.0) += amount;
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_input_encodes_address_twice() {
        let input = claim_query_input("0xABC");
        let value: serde_json::Value = serde_json::from_str(&input).unwrap();
        assert_eq!(value["0"]["json"]["address"], "0xABC");
        assert_eq!(value["1"]["json"]["address"], "0xABC");
    }

    #[test]
    fn decode_extracts_nested_eligibility_payload() {
        let body = r#"[
            {"result": {"data": {"json": {"address": "0xABC"}}}},
            {"result": {"data": {"json": {
                "address": "0xABC",
                "eligibilityData": {"Community": 12.5, "Early Adopter": 0.75}
            }}}}
        ]"#;

        let data = decode_eligibility(body).unwrap();
        assert_eq!(data.address.as_deref(), Some("0xABC"));
        assert_eq!(data.categories.get("Community"), Some(&12.5));
        assert_eq!(data.categories.get("Early Adopter"), Some(&0.75));
    }

    #[test]
    fn decode_merges_amounts_across_sub_results() {
        let body = r#"[
            {"result": {"data": {"json": {"eligibilityData": {"Community": 1.0}}}}},
            {"result": {"data": {"json": {"eligibilityData": {"Community": 2.0}}}}}
        ]"#;

        let data = decode_eligibility(body).unwrap();
        assert_eq!(data.categories.get("Community"), Some(&3.0));
    }

    #[test]
    fn decode_tolerates_missing_payload() {
        let data = decode_eligibility(r#"[{"result": null}, {}]"#).unwrap();
        assert!(data.categories.is_empty());
        assert!(data.address.is_none());
    }

    #[test]
    fn decode_rejects_non_json_body() {
        assert!(decode_eligibility("<html>gateway timeout</html>").is_err());
    }
}
