use crate::{
    aggregate::TimeSeries,
    consts::{MIN_TOOL_FRAMES, TOOL_KEYWORD},
    error::{HelixError, HelixResult},
};

use clap::ValueEnum;
use log::debug;
use tempfile::TempDir;

use std::{
    fs::File,
    io::{BufWriter, ErrorKind, Write},
    process::{Command, Output, Stdio},
};

/// Statistical error reported per base-pair/step.
///
/// # Variants
///
/// - `Std`: standard deviation of the series
/// - `Acf`: standard error with the sample count reduced by the autocorrelation time
/// - `Block`: block-averaging error estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ErrorMethod {
    Std,
    Acf,
    #[default]
    Block,
}

/// What one invocation of the statistical tool yields for one series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolReport {
    pub correlation_time: Option<f64>,
    pub block_error: Option<f64>,
}

/// An external routine estimating autocorrelation time and block-averaging
/// error of a time series.
pub trait StatisticalTool {
    fn name(&self) -> &str;

    fn analyze(&self, time: &[f64], series: &TimeSeries) -> HelixResult<ToolReport>;
}

/// Computes the error of `series` with `method`.
///
/// `time` holds the frame times and must match the series in length.
/// `Std` never touches `tool`; the other methods call it exactly once.
pub fn estimate_error<T: StatisticalTool + ?Sized>(
    series: &TimeSeries,
    time: &[f64],
    method: ErrorMethod,
    tool: &T,
) -> HelixResult<f64> {
    match method {
        ErrorMethod::Std => Ok(series.std_dev()),
        ErrorMethod::Acf => {
            check_frames(series, time, tool)?;
            let report = tool.analyze(time, series)?;
            let tau = report
                .correlation_time
                .ok_or_else(|| HelixError::ToolExecution {
                    tool: tool.name().to_string(),
                    message: "no correlation time in output".to_string(),
                })?
                .abs();

            Ok(acf_error(series, time, tau))
        }
        ErrorMethod::Block => {
            check_frames(series, time, tool)?;
            tool.analyze(time, series)?
                .block_error
                .ok_or_else(|| HelixError::ToolExecution {
                    tool: tool.name().to_string(),
                    message: "no block-averaging error estimate in output".to_string(),
                })
        }
    }
}

fn check_frames<T: StatisticalTool + ?Sized>(
    series: &TimeSeries,
    time: &[f64],
    tool: &T,
) -> HelixResult<()> {
    if series.len() != time.len() {
        return Err(HelixError::Validation(format!(
            "Series has {} frames but the time axis has {}",
            series.len(),
            time.len()
        )));
    }

    if series.len() < MIN_TOOL_FRAMES {
        return Err(HelixError::ToolExecution {
            tool: tool.name().to_string(),
            message: format!(
                "at least {} frames are needed, got {}",
                MIN_TOOL_FRAMES,
                series.len()
            ),
        });
    }

    Ok(())
}

/// Standard error using `total_time / tau` independent samples when the
/// correlation time exceeds the frame spacing.
fn acf_error(series: &TimeSeries, time: &[f64], tau: f64) -> f64 {
    let n = series.len() as f64;
    let total_time = time[time.len() - 1] - time[0];
    let dt = total_time / n;

    let n_independent = if tau >= dt && tau > 0.0 {
        total_time / tau
    } else {
        n
    };

    series.std_dev() / n_independent.sqrt()
}

/// Gromacs `g_analyze` / `gmx analyze` run as a subprocess.
#[derive(Debug, Clone)]
pub struct GromacsAnalyze {
    name: String,
    program: String,
    args: Vec<String>,
}

impl GromacsAnalyze {
    /// Accepts tool names such as `g_analyze`, `gmx analyze` or
    /// `/opt/gromacs/bin/gmx_mpi analyze`.
    pub fn new(tool: &str) -> HelixResult<Self> {
        if !tool.contains(TOOL_KEYWORD) {
            return Err(HelixError::UnsupportedTool(tool.to_string()));
        }

        let mut words = tool.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| HelixError::UnsupportedTool(tool.to_string()))?;

        Ok(Self {
            name: tool.to_string(),
            program,
            args: words.collect(),
        })
    }

    fn run(&self, workdir: &TempDir) -> HelixResult<Output> {
        let mut args = self.args.clone();
        args.extend(
            ["-f", "data.xvg", "-ee", "ee.xvg", "-ac", "acf.xvg", "-fitfn", "exp"]
                .iter()
                .map(|s| s.to_string()),
        );
        debug!("Running {} {}", self.program, args.join(" "));

        Command::new(&self.program)
            .args(&args)
            .current_dir(workdir.path())
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    HelixError::ToolUnavailable(self.program.clone())
                } else {
                    HelixError::ToolExecution {
                        tool: self.name.clone(),
                        message: format!("could not run with args [{}]: {}", args.join(" "), e),
                    }
                }
            })
    }
}

impl StatisticalTool for GromacsAnalyze {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&self, time: &[f64], series: &TimeSeries) -> HelixResult<ToolReport> {
        let workdir = TempDir::new()?;
        write_xvg(&workdir, time, series)?;

        let output = self.run(&workdir)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        if !output.status.success() {
            return Err(HelixError::ToolExecution {
                tool: self.name.clone(),
                message: format!(
                    "status={:?}, stderr='{}'",
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        parse_analyze_output(&stdout).map_err(|message| HelixError::ToolExecution {
            tool: self.name.clone(),
            message,
        })
    }
}

fn write_xvg(workdir: &TempDir, time: &[f64], series: &TimeSeries) -> HelixResult<()> {
    let mut writer = BufWriter::new(File::create(workdir.path().join("data.xvg"))?);
    for (t, value) in time.iter().zip(series.values()) {
        writeln!(writer, "{}    {}", t, value)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads the first data set's error estimate and correlation time from the
/// standard output of `gmx analyze -ee -ac`.
///
/// Relevant lines look like:
///
/// ```text
/// Set   1:  err.est. 0.0271393  a 0.632574  tau1 0.937004  tau2 35.6297
/// COR: Correlation time (plain integral from 0.000 to 100.000 ps) = 1.23456 ps
/// ```
pub fn parse_analyze_output(stdout: &str) -> Result<ToolReport, String> {
    let mut report = ToolReport::default();

    for line in stdout.lines() {
        let line = line.trim_start();

        if line.starts_with("Set") && report.block_error.is_none() {
            let value = line
                .split_whitespace()
                .nth(3)
                .ok_or_else(|| format!("truncated error estimate line '{}'", line))?;
            report.block_error = Some(parse_finite(value, "error estimate")?);
        } else if line.starts_with("COR: Correlation time") && report.correlation_time.is_none() {
            let value = line
                .split_once('=')
                .and_then(|(_, rest)| rest.split_whitespace().next())
                .ok_or_else(|| format!("truncated correlation time line '{}'", line))?;
            report.correlation_time = Some(parse_finite(value, "correlation time")?);
        }
    }

    if report.block_error.is_none() && report.correlation_time.is_none() {
        return Err("no error estimate or correlation time in output".to_string());
    }

    Ok(report)
}

/// Parses a tool value; `nan` and `inf` count as unusable output.
fn parse_finite(value: &str, what: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("non-numeric {} '{}'", what, value))
}
