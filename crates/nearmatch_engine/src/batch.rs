/* 📖 # Why collect every invalid case before failing?

A case file is usually edited by hand. Reporting only the first broken entry means one
run per typo, so validation walks the whole file and returns all invalid cases in a
single Multiple error. No partial report is produced in that situation: a batch either
ran every case or none.
*/

use std::fmt;

use nearmatch_base::tracing::{debug, info, instrument, warn};
use nearmatch_base::{NearmatchError, NearmatchResult};
use serde::Serialize;

use crate::config::{CaseConfig, CaseFile};
use crate::matcher::offset_to_index;

/// Result of running one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    /// Position of the case in its file.
    pub position: usize,
    pub name: Option<String>,
    pub text: String,
    pub pattern: String,
    pub offset: Option<usize>,
    pub expected: Option<i64>,
}

impl CaseOutcome {
    /// Integer form of the result, `-1` when no window matched.
    pub fn index(&self) -> i64 {
        offset_to_index(self.offset)
    }

    /// A case without an expectation always passes.
    pub fn passed(&self) -> bool {
        self.expected.is_none_or(|expected| expected == self.index())
    }

    pub fn label(&self) -> String {
        case_label(self.position, self.name.as_deref())
    }
}

/// Outcomes of a batch, in case file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub max_mismatches: usize,
    outcomes: Vec<CaseOutcome>,
}

impl BatchReport {
    pub fn outcomes(&self) -> &[CaseOutcome] {
        &self.outcomes
    }

    /// Cases whose result disagrees with their expectation.
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            write!(f, "{}: {}", outcome.label(), outcome.index())?;
            match outcome.expected {
                Some(_) if outcome.passed() => writeln!(f, " ok")?,
                Some(expected) => writeln!(f, " MISMATCH (expected {})", expected)?,
                None => writeln!(f)?,
            }
        }
        Ok(())
    }
}

fn case_label(position: usize, name: Option<&str>) -> String {
    match name {
        Some(name) => name.to_string(),
        None => format!("case #{}", position),
    }
}

/// Run every case in the file with the file's mismatch budget.
#[instrument(skip_all, fields(cases = case_file.cases.len()))]
pub fn run_cases(case_file: &CaseFile) -> NearmatchResult<BatchReport> {
    let matcher = case_file.matcher();
    let mut outcomes = Vec::with_capacity(case_file.cases.len());
    let mut errors = Vec::new();

    for (position, case) in case_file.cases.iter().enumerate() {
        let request = match case.request().validate() {
            Ok(request) => request,
            Err(error) => {
                errors.push(error.context(case_label(position, case.name.as_deref())));
                continue;
            }
        };
        let offset = request.search(&matcher);
        debug!(position, ?offset, "ran case");
        outcomes.push(CaseOutcome {
            position,
            name: case.name.clone(),
            text: request.text().to_string(),
            pattern: request.pattern().to_string(),
            offset,
            expected: case.expected,
        });
    }

    if !errors.is_empty() {
        warn!(invalid = errors.len(), "case file contains invalid cases");
        return Err(Box::new(NearmatchError::multiple(errors)));
    }

    let report = BatchReport {
        max_mismatches: matcher.max_mismatches(),
        outcomes,
    };
    info!(
        ran = report.outcomes.len(),
        failed = report.failures().count(),
        "batch finished"
    );
    Ok(report)
}

/// The two cases the tool prints when started without arguments.
pub fn demo_cases() -> CaseFile {
    CaseFile::with_cases(vec![
        CaseConfig::new("abcdefg", "bcdffg").expecting(1),
        CaseConfig::new("ababbababa", "bacaba").expecting(4),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use nearmatch_base::ErrorKind;

    #[test]
    fn test_demo_cases_pass() {
        let report = run_cases(&demo_cases()).unwrap();
        let indices: Vec<i64> = report.outcomes().iter().map(CaseOutcome::index).collect();
        assert_eq!(indices, vec![1, 4]);
        assert!(report.all_passed());
    }

    #[test]
    fn test_report_rendering() {
        let case_file = CaseFile::with_cases(vec![
            CaseConfig::new("abcdefg", "bcdffg")
                .named("one substitution")
                .expecting(1),
            CaseConfig::new("ababbababa", "bacaba"),
            CaseConfig::new("aaaaaa", "aaaaab").expecting(-1),
            CaseConfig::new("", "a"),
        ]);
        let report = run_cases(&case_file).unwrap();

        expect![[r#"
            one substitution: 1 ok
            case #1: 4
            case #2: 0 MISMATCH (expected -1)
            case #3: -1
        "#]]
        .assert_eq(&report.to_string());

        let failures: Vec<String> = report.failures().map(CaseOutcome::label).collect();
        assert_eq!(failures, vec!["case #2"]);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_budget_from_case_file() {
        let mut case_file = CaseFile::with_cases(vec![CaseConfig::new("aaaaaa", "aaaabb")]);
        assert_eq!(run_cases(&case_file).unwrap().outcomes()[0].offset, None);

        case_file.max_mismatches = 2;
        let report = run_cases(&case_file).unwrap();
        assert_eq!(report.max_mismatches, 2);
        assert_eq!(report.outcomes()[0].offset, Some(0));
    }

    #[test]
    fn test_invalid_cases_are_collected() {
        let case_file = CaseFile::with_cases(vec![
            CaseConfig {
                pattern: Some("a".to_string()),
                ..CaseConfig::default()
            },
            CaseConfig::new("abc", "abd"),
            CaseConfig {
                name: Some("no pattern".to_string()),
                text: Some("abc".to_string()),
                ..CaseConfig::default()
            },
        ]);

        let error = run_cases(&case_file).unwrap_err();
        match error.kind() {
            ErrorKind::Multiple { errors, count } => {
                assert_eq!(*count, 2);
                assert!(errors.iter().all(NearmatchError::is_invalid_input));
                assert_eq!(errors[0].get_context(), ["case #0"]);
                assert_eq!(errors[1].get_context(), ["no pattern"]);
            }
            _ => panic!("Expected Multiple variant"),
        }
    }

    #[test]
    fn test_empty_case_file() {
        let report = run_cases(&CaseFile::with_cases(vec![])).unwrap();
        assert!(report.outcomes().is_empty());
        assert!(report.all_passed());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_report_serializes() {
        let report = run_cases(&CaseFile::with_cases(vec![
            CaseConfig::new("abcdefg", "bcdffg").named("demo"),
        ]))
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "max_mismatches": 1,
                "outcomes": [{
                    "position": 0,
                    "name": "demo",
                    "text": "abcdefg",
                    "pattern": "bcdffg",
                    "offset": 1,
                    "expected": null
                }]
            })
        );
    }
}
