//! Command-line interface of helixmd
//!
//! Every analysis is a sub-command taking its own option set.

use crate::{aggregate::MergeMethod, consts::DEFAULT_TOOL, estimate::ErrorMethod};

use clap::{Parser, Subcommand};
use log::Level;

use std::{fmt, path::PathBuf};

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Average parameters as a function of base-pair/step
    #[command(name = "vs-bps", alias = "vsBPS")]
    VsBps(VsBpsArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct VsBpsArgs {
    /// Input file from do_x3dna (plain or .gz)
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Output file for averages and errors
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    /// Total number of base-pairs in the DNA/RNA
    #[arg(short = 'n', long = "total-bp")]
    pub total_bp: usize,

    /// Parameter name, e.g. "twist" or "propeller"
    #[arg(short = 'p', long)]
    pub parameter: String,

    /// Number of the first base-pair
    #[arg(short = 'F', long = "first-bp", default_value = "1", allow_negative_numbers = true)]
    pub first_bp: i64,

    /// First base-pair/step to extract [default: first base-pair]
    #[arg(short = 's', long = "bp-start", allow_negative_numbers = true)]
    pub bp_start: Option<i64>,

    /// Last base-pair/step to extract [default: last base-pair/step]
    #[arg(short = 'e', long = "bp-end", allow_negative_numbers = true)]
    pub bp_end: Option<i64>,

    /// Error estimation method
    #[arg(short = 'm', long = "error-method", value_enum, default_value = "block")]
    pub error_method: ErrorMethod,

    /// Number of consecutive base-pairs/steps merged into one segment
    #[arg(short = 'b', long = "merge-bps", default_value = "1")]
    pub merge_bps: usize,

    /// How merged base-pairs/steps are combined (required with --merge-bps > 1)
    #[arg(short = 'M', long = "merge-method", value_enum)]
    pub merge_method: Option<MergeMethod>,

    /// Gromacs tool for autocorrelation time and block averaging error
    /// (use "gmx analyze" with Gromacs 5 or later)
    #[arg(short = 'g', long = "gromacs-tool", default_value = DEFAULT_TOOL)]
    pub tool: String,

    /// Base-pairs/steps to leave out, comma-separated
    #[arg(short = 'x', long, value_delimiter = ',')]
    pub exclude: Vec<i64>,

    /// Logging verbosity level
    #[arg(short = 'L', long, default_value = "info")]
    pub level: Level,
}

/// Formats the arguments as a comma-separated string of key=value pairs.
///
/// # Example
///
/// ```rust,ignore
/// use helixmd::Cli;
/// let cli = Cli::parse();
/// let Commands::VsBps(args) = cli.command;
/// println!("{}", args);
/// ```
impl fmt::Display for VsBpsArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "input={}, output={}, total_bp={}, parameter={}, first_bp={}, bp_start={:?}, bp_end={:?}, error_method={:?}, merge_bps={}, merge_method={:?}, tool={}, exclude={:?}, level={}",
            self.input.display(),
            self.output.display(),
            self.total_bp,
            self.parameter,
            self.first_bp,
            self.bp_start,
            self.bp_end,
            self.error_method,
            self.merge_bps,
            self.merge_method,
            self.tool,
            self.exclude,
            self.level,
        )
    }
}
