use std::path::Path;

use nearmatch_base::tracing::debug;
use nearmatch_base::{ErrorKind, NearmatchError, NearmatchResult, ResultExt};
use serde::Deserialize;

use crate::matcher::{AlmostEqualMatcher, DEFAULT_MAX_MISMATCHES};
use crate::request::SearchRequest;

/// A TOML file listing search cases to run as a batch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFile {
    /// Number of mismatches a window may have.
    #[serde(default = "default_max_mismatches")]
    pub max_mismatches: usize,
    /// The cases, in file order.
    #[serde(default, rename = "case")]
    pub cases: Vec<CaseConfig>,
}

/// One `[[case]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseConfig {
    /// Optional label used in reports.
    pub name: Option<String>,
    pub text: Option<String>,
    pub pattern: Option<String>,
    /// Expected result in integer form (`-1` for not found).
    pub expected: Option<i64>,
}

fn default_max_mismatches() -> usize {
    DEFAULT_MAX_MISMATCHES
}

impl CaseFile {
    /// Parse a case file from TOML source.
    pub fn from_toml_str(source: &str) -> NearmatchResult<Self> {
        // Display keeps the line and column of the offending value
        toml::from_str(source).map_err(|e| Box::new(NearmatchError::message(e.to_string())))
    }

    /// Case file holding the given cases with the default budget.
    pub fn with_cases(cases: Vec<CaseConfig>) -> Self {
        Self {
            max_mismatches: DEFAULT_MAX_MISMATCHES,
            cases,
        }
    }

    pub fn matcher(&self) -> AlmostEqualMatcher {
        AlmostEqualMatcher::with_max_mismatches(self.max_mismatches)
    }
}

impl CaseConfig {
    pub fn new(text: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            pattern: Some(pattern.into()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn expecting(mut self, expected: i64) -> Self {
        self.expected = Some(expected);
        self
    }

    pub fn request(&self) -> SearchRequest {
        SearchRequest {
            text: self.text.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

/// Load and parse a case file from disk.
pub fn load_case_file(path: &Path) -> NearmatchResult<CaseFile> {
    debug!(path = %path.display(), "loading case file");
    let source = std::fs::read_to_string(path).map_err(|source| {
        Box::new(NearmatchError::new(ErrorKind::FileError {
            path: path.to_path_buf(),
            source,
        }))
    })?;
    CaseFile::from_toml_str(&source).with_context(|| format!("Failed to parse {}", path.display()))
}
