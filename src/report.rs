use crate::error::{HelixError, HelixResult};

use log::info;

use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

/// Significant digits of averages and errors in the report.
pub const SIGNIFICANT_DIGITS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultEntry {
    pub midpoint: f64,
    pub average: f64,
    pub error: f64,
}

/// Per-position results in ascending position order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractionResult {
    pub entries: Vec<ResultEntry>,
}

impl ExtractionResult {
    pub fn push(&mut self, midpoint: f64, average: f64, error: f64) {
        self.entries.push(ResultEntry {
            midpoint,
            average,
            error,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writes the header and one `midpoint average error` line per entry.
pub fn write_report<W: Write>(
    result: &ExtractionResult,
    parameter: &str,
    writer: &mut W,
) -> HelixResult<()> {
    writeln!(
        writer,
        "# bp(mid) \t {0}-avg \t {0}-error",
        parameter
    )?;

    for entry in &result.entries {
        writeln!(
            writer,
            "{:?} \t\t {} \t {}",
            entry.midpoint,
            format_significant(entry.average, SIGNIFICANT_DIGITS),
            format_significant(entry.error, SIGNIFICANT_DIGITS)
        )?;
    }

    Ok(())
}

/// Writes the report to `path`, replacing any existing file.
pub fn write_report_file(result: &ExtractionResult, parameter: &str, path: &Path) -> HelixResult<()> {
    let file = File::create(path).map_err(|e| {
        HelixError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot create {}: {}", path.display(), e),
        ))
    })?;

    let mut writer = BufWriter::new(file);
    write_report(result, parameter, &mut writer)?;
    writer.flush()?;

    info!("Wrote {} entries to {}", result.len(), path.display());

    Ok(())
}

/// Parses a report back into entries; the header and comments are skipped.
pub fn read_report<R: BufRead>(reader: R) -> HelixResult<ExtractionResult> {
    let mut result = ExtractionResult::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = line
            .split_whitespace()
            .map(|field| {
                field.parse::<f64>().map_err(|_| HelixError::Input {
                    line: idx + 1,
                    message: format!("'{}' is not a number", field),
                })
            })
            .collect::<HelixResult<Vec<_>>>()?;

        match fields.as_slice() {
            [midpoint, average, error] => result.push(*midpoint, *average, *error),
            _ => {
                return Err(HelixError::Input {
                    line: idx + 1,
                    message: format!("expected 3 columns, found {}", fields.len()),
                });
            }
        }
    }

    Ok(result)
}

/// Formats `value` with `digits` significant digits, keeping trailing zeros.
///
/// Scientific notation is used when the decimal exponent is below -4 or at
/// least `digits`, as printf's `%g` does. Output never depends on locale.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(format_significant(1.234567, 6), "1.23457");
/// assert_eq!(format_significant(0.012345, 6), "0.0123450");
/// assert_eq!(format_significant(0.0000123456789, 6), "1.23457e-05");
/// ```
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, value);
    }

    // exponent after rounding, so 9.999999 becomes 10.0000 rather than 9.99999
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        format!("{:.*}", decimals, value)
    }
}
