//! Error taxonomy shared by every stage of the extraction pipeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelixError {
    /// Missing or malformed command-line input.
    #[error("{0}")]
    Validation(String),

    #[error("Unknown parameter name \"{name}\"!!!\n\nAccepted parameters are as follows:\n{accepted}")]
    UnknownParameter { name: String, accepted: String },

    #[error("{0}")]
    Range(String),

    #[error(
        "{0} might not be suitable for error calculation.\n Use Gromacs analyze tool g_analyze or \"gmx analyze\"."
    )]
    UnsupportedTool(String),

    #[error("No usable base-pair/step in group {start}-{end}: every position is masked")]
    EmptyGroup { start: i64, end: i64 },

    #[error("Could not find statistical tool executable '{0}'")]
    ToolUnavailable(String),

    #[error("Statistical tool '{tool}' failed: {message}")]
    ToolExecution { tool: String, message: String },

    #[error("Malformed input at line {line}: {message}")]
    Input { line: usize, message: String },

    #[error("No values found for bp/s {0} in the input file")]
    MissingPosition(i64),

    #[error("{0}")]
    UnsupportedInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HelixError {
    /// Errors caused by the invocation itself; the usage text is shown with them.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            HelixError::Validation(_)
                | HelixError::UnknownParameter { .. }
                | HelixError::Range(_)
                | HelixError::UnsupportedTool(_)
        )
    }
}

pub type HelixResult<T> = Result<T, HelixError>;
