//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use serde_json::Value;

use crate::domain::decimal::Operation;
use crate::domain::search::SearchBias;

/// Reordering, tree search and chart axis helpers for JSON data
#[derive(Parser, Debug)]
#[command(name = "utilkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file, layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search and reshape nested trees
    Tree {
        #[command(subcommand)]
        command: TreeCommands,
    },

    /// Reorder and inspect arrays
    Array {
        #[command(subcommand)]
        command: ArrayCommands,
    },

    /// Axis ranges, gap filling and chart options
    Chart {
        #[command(subcommand)]
        command: ChartCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TreeCommands {
    /// Count the nodes at a depth (roots are depth 0)
    Count {
        #[arg(long)]
        depth: usize,
        /// JSON input, `-` for stdin
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// First node (breadth-first) whose field equals the value
    Find {
        #[arg(long)]
        field: String,
        /// JSON value; bare words are taken as strings
        #[arg(long, value_parser = parse_json_value)]
        value: Value,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Parent of the node with the given identity value
    Parent {
        #[arg(long, value_parser = parse_json_value)]
        id: Value,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Nodes from the root down to the first match
    Path {
        #[arg(long)]
        field: String,
        #[arg(long, value_parser = parse_json_value)]
        value: Value,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Pre-order list of all nodes without their children
    Flatten {
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Render the tree labelled by the identity field
    Show {
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ArrayCommands {
    /// Move the selected items as one block before an original position
    Move {
        /// Comma separated indices, e.g. 1,2
        #[arg(long, value_delimiter = ',', required = true)]
        indices: Vec<usize>,
        /// Original position the block is inserted before
        #[arg(long)]
        to: usize,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Move the first item whose field equals the value to the front
    ToStart {
        #[arg(long)]
        field: String,
        #[arg(long, value_parser = parse_json_value)]
        value: Value,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Move one item; negative indices count from the end
    Shift {
        #[arg(long, allow_negative_numbers = true)]
        from: isize,
        #[arg(long, allow_negative_numbers = true)]
        to: isize,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Smallest unused serial number for `<prefix><n>` values
    Serial {
        #[arg(long)]
        field: String,
        #[arg(long)]
        prefix: String,
        /// Result when no value matches
        #[arg(long, default_value_t = 1)]
        default: u64,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Binary search in an ascending array of numbers or strings
    Search {
        #[arg(long, value_parser = parse_json_value)]
        value: Value,
        /// Fallback when the value is absent
        #[arg(long, value_enum, default_value_t = Bias::Exact)]
        bias: Bias,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChartCommands {
    /// Rounded axis bounds for a numeric field
    Range {
        #[arg(long)]
        field: String,
        #[arg(long)]
        decimal_places: Option<u32>,
        #[arg(long)]
        split_count: Option<u32>,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Insert flat filler points on a minute grid between samples
    Fill {
        #[arg(long = "x")]
        x_field: String,
        #[arg(long = "y")]
        y_field: String,
        /// Grid in minutes
        #[arg(long)]
        interval: Option<u32>,
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Deep-merge an overrides document onto a base document
    Merge {
        #[arg(value_hint = ValueHint::FilePath)]
        base: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        overrides: PathBuf,
    },

    /// Drop null, empty string, empty array and empty object entries
    Compact {
        #[arg(default_value = "-", value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Convert a hex colour to rgba()
    Rgba {
        /// `#rgb` or `#rrggbb`
        hex: String,
        #[arg(long, default_value_t = 1.0)]
        alpha: f64,
    },

    /// Format a number as a tick or tooltip label
    Label {
        /// Number or numeric string; anything else prints the default
        #[arg(allow_hyphen_values = true, value_parser = parse_json_value)]
        value: Value,
        /// Fixed decimal places (default 3)
        #[arg(long, conflicts_with = "raw")]
        decimal_places: Option<u32>,
        /// Print the value without fixing the decimal places
        #[arg(long)]
        raw: bool,
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        prefix: String,
        #[arg(long, default_value = "")]
        suffix: String,
        /// Output for non-numeric values
        #[arg(long = "default", default_value = crate::domain::decimal::DEFAULT_PLACEHOLDER, allow_hyphen_values = true)]
        default_value: String,
        /// Arithmetic applied in order, e.g. `--op mul:100 --op places:1`
        #[arg(long = "op", value_parser = parse_operation)]
        operations: Vec<Operation>,
    },

    /// Years from START to END (default: the current year)
    Years {
        #[arg(long, allow_negative_numbers = true)]
        start: i32,
        #[arg(long, allow_negative_numbers = true)]
        end: Option<i32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a config template
    Template,
    /// Show config file location
    Path,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
    Exact,
    /// Greatest smaller item
    Forward,
    /// Smallest greater item
    Backward,
}

impl From<Bias> for SearchBias {
    fn from(bias: Bias) -> Self {
        match bias {
            Bias::Exact => SearchBias::Exact,
            Bias::Forward => SearchBias::Forward,
            Bias::Backward => SearchBias::Backward,
        }
    }
}

fn parse_operation(raw: &str) -> Result<Operation, String> {
    raw.parse().map_err(|e: crate::domain::DomainError| e.to_string())
}

/// Parses a JSON literal, falling back to a plain string.
pub fn parse_json_value(raw: &str) -> Result<Value, String> {
    Ok(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}
