//! Average and error of nucleic-acid helical parameters along the helix
//!
//! Reads per-frame values of a base-pair or base-step parameter (as written
//! by do_x3dna) over a molecular-dynamics trajectory and reports, for every
//! base-pair/step or every segment of merged consecutive base-pairs/steps,
//! the average together with its statistical error (standard deviation,
//! autocorrelation-corrected standard error, or block averaging through
//! Gromacs `analyze`).
//!
//! # Usage
//!
//! ```bash
//! Usage: helixmd vs-bps [OPTIONS] --input <INPUT> --output <OUTPUT> --total-bp <TOTAL_BP> --parameter <PARAMETER>
//!
//! Options:
//!   -i, --input <INPUT>                Input file from do_x3dna (plain or .gz)
//!   -o, --output <OUTPUT>              Output file for averages and errors
//!   -n, --total-bp <TOTAL_BP>          Total number of base-pairs in the DNA/RNA
//!   -p, --parameter <PARAMETER>        Parameter name, e.g. "twist" or "propeller"
//!   -F, --first-bp <FIRST_BP>          Number of the first base-pair [default: 1]
//!   -s, --bp-start <BP_START>          First base-pair/step to extract [default: first base-pair]
//!   -e, --bp-end <BP_END>              Last base-pair/step to extract [default: last base-pair/step]
//!   -m, --error-method <ERROR_METHOD>  Error estimation method [default: block] [possible values: std, acf, block]
//!   -b, --merge-bps <MERGE_BPS>        Number of consecutive base-pairs/steps merged into one segment [default: 1]
//!   -M, --merge-method <MERGE_METHOD>  How merged base-pairs/steps are combined [possible values: mean, sum]
//!   -g, --gromacs-tool <TOOL>          Gromacs tool for autocorrelation time and block averaging error (use "gmx analyze" with Gromacs 5 or later) [default: g_analyze]
//!   -x, --exclude <EXCLUDE>            Base-pairs/steps to leave out, comma-separated
//!   -L, --level <LEVEL>                Logging verbosity level [default: info]
//!   -h, --help                         Print help
//! ```

pub mod aggregate;
pub mod cli;
pub mod consts;
pub mod core;
pub mod error;
pub mod estimate;
pub mod input;
pub mod parameter;
pub mod range;
pub mod report;

pub use cli::{Cli, Commands, VsBpsArgs};
pub use crate::core::vs_bps;
pub use error::HelixError;
