pub mod batch;
pub mod config;
pub mod matcher;
pub mod request;

pub use batch::{BatchReport, CaseOutcome, demo_cases, run_cases};
pub use config::{CaseConfig, CaseFile, load_case_file};
pub use matcher::{
    AlmostEqualMatcher, DEFAULT_MAX_MISMATCHES, NOT_FOUND, bounded_mismatches, find_almost_equal,
    find_almost_equal_index, find_almost_equal_str, offset_to_index,
};
pub use request::{SearchRequest, ValidatedRequest};
