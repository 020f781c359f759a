//! Bounded request fan-out and result aggregation.

pub mod driver;
pub mod prompts;
pub mod report;

pub use driver::{run_batch, RequestOutcome};
pub use report::RunReport;
