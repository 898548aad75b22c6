//! CLI entry point for the pancake flip search.
//!
//! Usage:
//!   pancake [HEIGHT WIDTH] MAXLENGTH INITIAL GOAL [options]
//!
//! HEIGHT and WIDTH must be given together and lie in [1, 16]; both default
//! to 3. MAXLENGTH must be at least 1.
//!
//! Options:
//!   --format <fmt>     `text` prints one configuration per line, `json`
//!                      prints the path with search statistics (default: text)
//!   -v, --verbose      Log search progress to stderr (repeat for more)

use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pancake_search::{
    check_max_len, find_path, verify_path, FlipModel, GridDims, Meeting, PancakeError, Problem,
    SearchConfig, SearchOutcome, SearchStats, DEFAULT_BUCKETS,
};

#[derive(Parser)]
#[command(name = "pancake")]
#[command(about = "Find a bounded sequence of 2-D pancake flips from INITIAL to GOAL")]
#[command(override_usage = "pancake [OPTIONS] [HEIGHT WIDTH] MAXLENGTH INITIAL GOAL")]
#[command(version)]
struct Cli {
    /// [HEIGHT WIDTH] MAXLENGTH INITIAL GOAL
    #[arg(
        value_name = "ARGS",
        required = true,
        num_args = 3..=5,
        allow_negative_numbers = true
    )]
    args: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Number of hash index chains
    #[arg(long, default_value_t = DEFAULT_BUCKETS, hide = true)]
    buckets: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Positional arguments after validation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Invocation {
    dims: GridDims,
    max_len: usize,
    problem: Problem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON output document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchOutput {
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    flips: Option<usize>,
    height: usize,
    width: usize,
    max_len: usize,
    path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    meeting: Option<Meeting>,
    stats: SearchStats,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok((invocation, outcome)) => {
            print_outcome(cli.format, &invocation, &outcome);
            std::process::exit(0);
        }
        Err(e) => {
            if !e.is_precondition() {
                error!(error = %e, "search aborted");
            }
            eprintln!("pancake: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Validate in the order HEIGHT, WIDTH, MAXLENGTH, INITIAL, GOAL.
fn parse_invocation(args: &[String]) -> Result<Invocation, PancakeError> {
    let (dims, rest) = match args {
        [height, width, rest @ ..] if rest.len() == 3 => {
            let height = parse_number("HEIGHT", height)?;
            let width = parse_number("WIDTH", width)?;
            (GridDims::new(height, width), rest)
        }
        rest if rest.len() == 3 => (GridDims::DEFAULT, rest),
        _ => return Err(PancakeError::Usage),
    };
    if !dims.is_valid() {
        return Err(PancakeError::InvalidDimensions {
            height: dims.height,
            width: dims.width,
        });
    }

    let max_len = check_max_len(parse_number("MAXLENGTH", &rest[0])?)?;
    let problem = Problem::new(dims, rest[1].as_str(), rest[2].as_str())?;
    Ok(Invocation {
        dims,
        max_len,
        problem,
    })
}

fn parse_number(name: &'static str, value: &str) -> Result<usize, PancakeError> {
    value.parse().map_err(|_| PancakeError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

fn run(cli: &Cli) -> Result<(Invocation, SearchOutcome), PancakeError> {
    let invocation = parse_invocation(&cli.args)?;
    let config = SearchConfig {
        max_len: invocation.max_len,
        bucket_count: cli.buckets,
    };
    let outcome = find_path(&invocation.problem, &config)?;
    let outcome = checked_outcome(invocation.dims, invocation.max_len, outcome)?;
    Ok((invocation, outcome))
}

/// Refuse to report a path that is not a chain of legal flips within budget.
fn checked_outcome(
    dims: GridDims,
    max_len: usize,
    outcome: SearchOutcome,
) -> Result<SearchOutcome, PancakeError> {
    if outcome.found() {
        verify_path(&FlipModel::new(dims), &outcome.path, max_len)?;
        debug!(flips = ?outcome.flips(), "path verified");
    }
    Ok(outcome)
}

fn print_outcome(format: OutputFormat, invocation: &Invocation, outcome: &SearchOutcome) {
    match format {
        OutputFormat::Text => {
            for config in &outcome.path {
                println!("{}", config);
            }
        }
        OutputFormat::Json => {
            let output = format_result(invocation, outcome);
            match serde_json::to_string_pretty(&output) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("pancake: failed to encode output: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn format_result(invocation: &Invocation, outcome: &SearchOutcome) -> SearchOutput {
    SearchOutput {
        found: outcome.found(),
        flips: outcome.flips(),
        height: invocation.dims.height,
        width: invocation.dims.width,
        max_len: invocation.max_len,
        path: outcome.path.iter().map(|c| c.to_string()).collect(),
        meeting: outcome.meeting,
        stats: outcome.stats.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pancake_search::{Configuration, PathError};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_accepts_height_and_width_positionals() {
        let cli = Cli::try_parse_from(["pancake", "2", "2", "3", "abcd", "dcba"]).unwrap();
        let invocation = parse_invocation(&cli.args).unwrap();
        assert_eq!(invocation.dims, GridDims::new(2, 2));
        assert_eq!(invocation.max_len, 3);
        assert_eq!(invocation.problem.goal(), &Configuration::from("dcba"));
    }

    #[test]
    fn test_three_positionals_use_default_grid() {
        let cli =
            Cli::try_parse_from(["pancake", "4", "abcdefghi", "ihgfedcba", "--format", "json"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        let invocation = parse_invocation(&cli.args).unwrap();
        assert_eq!(invocation.dims, GridDims::DEFAULT);
        assert_eq!(invocation.max_len, 4);
    }

    #[test]
    fn test_four_positionals_is_a_usage_error() {
        let cli = Cli::try_parse_from(["pancake", "2", "3", "abcd", "dcba"]).unwrap();
        assert_eq!(parse_invocation(&cli.args), Err(PancakeError::Usage));
    }

    #[test]
    fn test_other_argument_counts_are_usage_errors() {
        assert_eq!(parse_invocation(&args(&["3", "abc"])), Err(PancakeError::Usage));
        assert_eq!(
            parse_invocation(&args(&["1", "2", "3", "4", "5", "6"])),
            Err(PancakeError::Usage)
        );
    }

    #[test]
    fn test_dimensions_are_checked_before_max_len() {
        let err = parse_invocation(&args(&["0", "2", "0", "ab", "ba"])).unwrap_err();
        assert_eq!(err, PancakeError::InvalidDimensions { height: 0, width: 2 });

        let err = parse_invocation(&args(&["2", "17", "1", "ab", "ba"])).unwrap_err();
        assert!(matches!(err, PancakeError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_invalid_numbers() {
        let err = parse_invocation(&args(&["x", "2", "1", "ab", "ba"])).unwrap_err();
        assert_eq!(
            err,
            PancakeError::InvalidArgument {
                name: "HEIGHT",
                value: "x".to_string()
            }
        );

        let cli = Cli::try_parse_from(["pancake", "1", "2", "-1", "ab", "ba"]).unwrap();
        let err = parse_invocation(&cli.args).unwrap_err();
        assert!(matches!(err, PancakeError::InvalidArgument { name: "MAXLENGTH", .. }));

        let err = parse_invocation(&args(&["1", "2", "0", "ab", "ba"])).unwrap_err();
        assert_eq!(err, PancakeError::InvalidMaxLength(0));
    }

    #[test]
    fn test_input_errors_follow_max_len() {
        let err = parse_invocation(&args(&["1", "2", "1", "abc", "ba"])).unwrap_err();
        assert!(matches!(err, PancakeError::LengthMismatch { .. }));

        let err = parse_invocation(&args(&["1", "2", "1", "ab", "bb"])).unwrap_err();
        assert_eq!(err, PancakeError::NotPermutation);
    }

    #[test]
    fn test_run_finds_path_with_original_command_line() {
        let cli = Cli::try_parse_from(["pancake", "1", "2", "1", "ab", "ba"]).unwrap();
        let (invocation, outcome) = run(&cli).unwrap();
        assert_eq!(invocation.dims, GridDims::new(1, 2));
        assert_eq!(outcome.path, vec![Configuration::from("ab"), Configuration::from("ba")]);

        let cli = Cli::try_parse_from(["pancake", "1", "abcdefghi", "ihgfedcba"]).unwrap();
        let (_, outcome) = run(&cli).unwrap();
        assert!(!outcome.found());
    }

    #[test]
    fn test_invalid_path_is_not_reported() {
        let dims = GridDims::new(2, 2);
        let bogus = SearchOutcome {
            path: vec![Configuration::from("abcd"), Configuration::from("dcba")],
            meeting: None,
            stats: SearchStats::default(),
        };
        let err = checked_outcome(dims, 3, bogus).unwrap_err();
        assert!(matches!(
            err,
            PancakeError::CorruptPath(PathError::NotAFlip { step: 0, .. })
        ));
        assert!(!err.is_precondition());

        let empty = SearchOutcome {
            path: Vec::new(),
            meeting: None,
            stats: SearchStats::default(),
        };
        assert!(checked_outcome(dims, 3, empty).is_ok());
    }
}
