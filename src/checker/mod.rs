pub mod batch;
pub mod types;

pub use batch::BatchChecker;
pub use types::{CheckResult, CheckSummary, EligibilityRecord};
