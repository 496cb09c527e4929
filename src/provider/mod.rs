pub mod client;
pub mod types;

pub use client::{EligibilityProvider, HttpEligibilityClient};
pub use types::{decode_eligibility, claim_query_input, EligibilityData};
