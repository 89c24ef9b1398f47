/* 📖 # How does the CLI decide what to do?

There are three modes, picked from the arguments:

1. `nearmatch TEXT PATTERN`: search once and print the offset (`-1` when nothing matched)
2. `nearmatch --cases FILE`: run every case in a TOML case file and print a report
3. `nearmatch`: run the built-in demo cases and print one offset per line

Results go to stdout, logs go to stderr (`RUST_LOG` controls the filter).

Exit codes:
- 0: Success
- 1: A case disagreed with its expectation, or the case file could not be read or parsed
- 2: Invalid input (a TEXT without a PATTERN, or case file entries missing a field)

When several cases in a file are invalid, every one of them is listed on stderr.
*/

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use nearmatch_base::tracing::{debug, init_tracing};
use nearmatch_base::{ErrorKind, NearmatchError, NearmatchResult, err};
use nearmatch_engine::{
    AlmostEqualMatcher, BatchReport, CaseFile, SearchRequest, demo_cases, load_case_file,
    offset_to_index, run_cases,
};

const EXIT_FAILED_CASES: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;

/// Find the first window of TEXT that differs from PATTERN in at most one position.
#[derive(Debug, Parser)]
#[command(name = "nearmatch", version)]
struct Args {
    /// Text to search in
    text: Option<String>,

    /// Pattern to search for
    pattern: Option<String>,

    /// Run the cases from a TOML case file instead
    #[arg(long, value_name = "FILE", conflicts_with_all = ["text", "pattern"])]
    cases: Option<PathBuf>,

    /// Number of mismatches a window may have (overrides the case file)
    #[arg(short = 'k', long)]
    max_mismatches: Option<usize>,

    /// Print the case file report as JSON
    #[arg(long, requires = "cases")]
    json: bool,
}

enum Mode {
    Single(SearchRequest),
    Cases(PathBuf),
    Demo,
}

impl Args {
    fn mode(&self) -> Mode {
        match (&self.cases, &self.text, &self.pattern) {
            (Some(path), _, _) => Mode::Cases(path.clone()),
            (None, None, None) => Mode::Demo,
            (None, text, pattern) => Mode::Single(SearchRequest {
                text: text.clone(),
                pattern: pattern.clone(),
            }),
        }
    }

    fn matcher(&self) -> AlmostEqualMatcher {
        self.max_mismatches
            .map_or_else(AlmostEqualMatcher::new, AlmostEqualMatcher::with_max_mismatches)
    }

    fn apply_budget(&self, mut case_file: CaseFile) -> CaseFile {
        if let Some(max_mismatches) = self.max_mismatches {
            case_file.max_mismatches = max_mismatches;
        }
        case_file
    }
}

/// Run the selected mode, writing results to `out`. Returns the process exit code.
fn run(args: &Args, out: &mut impl Write) -> NearmatchResult<i32> {
    match args.mode() {
        Mode::Single(request) => {
            let request = request.validate()?;
            let offset = request.search(&args.matcher());
            debug!(?offset, "single search finished");
            writeln!(out, "{}", offset_to_index(offset)).map_err(write_error)?;
            Ok(0)
        }
        Mode::Cases(path) => {
            let case_file = args.apply_budget(load_case_file(&path)?);
            let report = run_cases(&case_file)?;
            write_report(&report, args.json, out)?;
            Ok(if report.all_passed() {
                0
            } else {
                EXIT_FAILED_CASES
            })
        }
        Mode::Demo => {
            let report = run_cases(&args.apply_budget(demo_cases()))?;
            for outcome in report.outcomes() {
                writeln!(out, "{}", outcome.index()).map_err(write_error)?;
            }
            Ok(0)
        }
    }
}

fn write_report(report: &BatchReport, json: bool, out: &mut impl Write) -> NearmatchResult<()> {
    if json {
        let rendered = serde_json::to_string_pretty(report)
            .map_err(|e| err!("Failed to serialize report: {}", e))?;
        writeln!(out, "{}", rendered).map_err(write_error)?;
    } else {
        write!(out, "{}", report).map_err(write_error)?;
    }
    Ok(())
}

fn write_error(error: io::Error) -> Box<NearmatchError> {
    err!("Failed to write output: {}", error)
}

/// Print a failure for the user, one line per collected error.
fn report_failure(error: &NearmatchError, out: &mut impl Write) -> io::Result<()> {
    match error.kind() {
        ErrorKind::Multiple { errors, .. } => {
            for context in error.get_context() {
                write!(out, "{}: ", context)?;
            }
            writeln!(out, "Error: {}", error.kind())?;
            for nested in errors {
                writeln!(out, "  - {}", nested)?;
            }
        }
        _ => writeln!(out, "Error: {}", error)?,
    }
    Ok(())
}

fn exit_code(error: &NearmatchError) -> i32 {
    if error.is_invalid_input() {
        EXIT_INVALID_INPUT
    } else {
        1
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = init_tracing("warn") {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let stdout = io::stdout();
    match run(&args, &mut stdout.lock()) {
        Ok(code) => process::exit(code),
        Err(e) => {
            let _ = report_failure(&e, &mut io::stderr().lock());
            debug!("{:?}", e);
            process::exit(exit_code(&e));
        }
    }
}
