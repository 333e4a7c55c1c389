//! CLI argument definitions using clap
//!
//! invaudit FILTER -i <INPUT>... [-o <OUTPUT>] [-v] [-p [--issues-out <PATH>]]
//!          [--config <PATH>] [--fail-fast]
//! invaudit --list-filters

use std::path::PathBuf;

use clap::builder::{PossibleValue, PossibleValuesParser};
use clap::Parser;

use crate::filter::FilterRegistry;

/// Flag form-completeness inventory rows whose annotations disagree with
/// their content
#[derive(Parser, Debug)]
#[command(name = "invaudit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Filter to apply
    #[arg(
        value_name = "FILTER",
        value_parser = filter_names(),
        required_unless_present = "list_filters"
    )]
    pub filter: Option<String>,

    /// Inventory file(s) to operate on
    #[arg(
        short,
        long,
        value_name = "INPUT",
        num_args = 1..,
        required_unless_present = "list_filters"
    )]
    pub input: Vec<PathBuf>,

    /// File to save the filtered inventory to (default: stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Verbose operation
    #[arg(short, long)]
    pub verbose: bool,

    /// Write issue drafts for sources the filter failed on
    #[arg(short = 'p', long)]
    pub post_to_github: bool,

    /// Where to write issue drafts (default: stderr)
    #[arg(long, value_name = "PATH", requires = "post_to_github")]
    pub issues_out: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stop at the first source the filter fails on
    #[arg(long)]
    pub fail_fast: bool,

    /// Print the available filters and exit
    #[arg(long)]
    pub list_filters: bool,
}

/// Restricts FILTER to registered names, so bad names fail before any I/O.
fn filter_names() -> PossibleValuesParser {
    PossibleValuesParser::new(
        FilterRegistry::builtin()
            .filters()
            .iter()
            .map(|f| PossibleValue::new(f.name()).help(f.description()))
            .collect::<Vec<_>>(),
    )
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let cli = Cli::try_parse_from([
            "invaudit",
            "empty_and_not_ignored",
            "-i",
            "a.csv",
            "b.csv",
            "-o",
            "out.csv",
            "-v",
            "-p",
        ])
        .unwrap();

        assert_eq!(cli.filter.as_deref(), Some("empty_and_not_ignored"));
        assert_eq!(cli.input, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
        assert_eq!(cli.output, Some(PathBuf::from("out.csv")));
        assert!(cli.verbose);
        assert!(cli.post_to_github);
        assert!(!cli.fail_fast);
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let err = Cli::try_parse_from(["invaudit", "not_a_filter", "-i", "a.csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_input_required() {
        let err = Cli::try_parse_from(["invaudit", "empty_and_not_ignored"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_list_filters_needs_nothing_else() {
        let cli = Cli::try_parse_from(["invaudit", "--list-filters"]).unwrap();
        assert!(cli.list_filters);
        assert!(cli.filter.is_none());
    }

    #[test]
    fn test_issues_out_requires_posting() {
        assert!(Cli::try_parse_from([
            "invaudit",
            "empty_and_not_ignored",
            "-i",
            "a.csv",
            "--issues-out",
            "issues.jsonl",
        ])
        .is_err());
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
