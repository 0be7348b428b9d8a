//! Reader for do_x3dna text output
//!
//! Each frame starts with a `# Time` comment carrying the frame time, followed
//! by one line per base-pair/step whose first column is the position number:
//!
//! ```text
//! # Time = 0.000
//!     1    -0.12    0.03   ...
//!     2     0.21   -0.08   ...
//! # Time = 10.000
//!     1    -0.09    0.01   ...
//! ```
//!
//! Files without time comments are split into frames whenever the position
//! number stops increasing, and frames are then timed by their index.

use crate::{
    aggregate::TimeSeries,
    consts::HDF5_EXTENSIONS,
    error::{HelixError, HelixResult},
    parameter::column_of,
    range::PositionRange,
};

use flate2::read::MultiGzDecoder;
use log::info;

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// Frame times plus one series per position, all frame-aligned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    pub time: Vec<f64>,
    pub series: BTreeMap<i64, TimeSeries>,
}

impl Trajectory {
    pub fn n_frames(&self) -> usize {
        self.time.len()
    }
}

/// Returns true for file names that point to HDF5 storage.
pub fn is_hdf5_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some(ext) if HDF5_EXTENSIONS.contains(&ext)
    )
}

/// Loads the values of `parameter` for every position of `range`.
pub fn read_parameter(path: &Path, parameter: &str, range: PositionRange) -> HelixResult<Trajectory> {
    if is_hdf5_path(path) {
        return Err(HelixError::UnsupportedInput(format!(
            "{}: HDF5 input is not supported, use do_x3dna text output.",
            path.display()
        )));
    }

    let column = column_of(parameter).ok_or_else(|| {
        HelixError::UnsupportedInput(format!(
            "Extraction of parameter \"{}\" is only supported via input HDF5 file.",
            parameter
        ))
    })?;

    info!("Reading \"{}\" from file {}", parameter, path.display());

    let file = File::open(path).map_err(|e| {
        HelixError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open {}: {}", path.display(), e),
        ))
    })?;

    let reader: Box<dyn BufRead> = match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        _ => Box::new(BufReader::new(file)),
    };

    let trajectory = parse_frames(reader, column, range)?;

    info!(
        "Read {} frames for {} bp/s from file {}",
        trajectory.n_frames(),
        trajectory.series.len(),
        path.display()
    );

    Ok(trajectory)
}

/// Frame under construction: its time and the values seen so far.
struct Frame {
    time: Option<f64>,
    values: BTreeMap<i64, f64>,
    last_position: Option<i64>,
}

impl Frame {
    fn new(time: Option<f64>) -> Self {
        Self {
            time,
            values: BTreeMap::new(),
            last_position: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.last_position.is_none()
    }
}

/// Parses frames from `reader`, keeping `column` for positions within `range`.
pub fn parse_frames<R: BufRead>(
    reader: R,
    column: usize,
    range: PositionRange,
) -> HelixResult<Trajectory> {
    if column == 0 {
        return Err(HelixError::Input {
            line: 0,
            message: "data column must be at least 1, column 0 holds the position".to_string(),
        });
    }

    let mut trajectory = Trajectory::default();
    let mut frame = Frame::new(None);
    let mut last_line = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        last_line = line_no;
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if let Some(time) = parse_time(comment, line_no)? {
                if !frame.is_empty() || frame.time.is_some() {
                    close_frame(&mut trajectory, frame, range, line_no)?;
                }
                frame = Frame::new(Some(time));
            }
            continue;
        }

        let mut fields = line.split_whitespace();
        let position = parse_field::<i64>(fields.next(), "position", line_no)?;

        if frame.last_position.is_some_and(|last| position <= last) {
            if frame.time.is_some() {
                return Err(HelixError::Input {
                    line: line_no,
                    message: format!("bp/s {} repeated within one frame", position),
                });
            }
            close_frame(&mut trajectory, frame, range, line_no)?;
            frame = Frame::new(None);
        }
        frame.last_position = Some(position);

        if !range.contains(position) {
            continue;
        }

        let value = parse_field::<f64>(fields.nth(column - 1), "value", line_no)?;
        frame.values.insert(position, value);
    }

    if !frame.is_empty() || frame.time.is_some() {
        close_frame(&mut trajectory, frame, range, last_line)?;
    }

    if trajectory.time.is_empty() {
        return Err(HelixError::Input {
            line: last_line,
            message: "no frames found".to_string(),
        });
    }

    Ok(trajectory)
}

fn close_frame(
    trajectory: &mut Trajectory,
    frame: Frame,
    range: PositionRange,
    line_no: usize,
) -> HelixResult<()> {
    let frame_idx = trajectory.time.len();

    for position in range.positions() {
        let value = frame.values.get(&position).ok_or_else(|| HelixError::Input {
            line: line_no,
            message: format!("frame {} has no value for bp/s {}", frame_idx + 1, position),
        })?;
        trajectory
            .series
            .entry(position)
            .or_default()
            .push(*value);
    }

    trajectory
        .time
        .push(frame.time.unwrap_or(frame_idx as f64));

    Ok(())
}

/// Returns the time of a `# Time = 10.0` style comment, `None` for any other comment.
fn parse_time(comment: &str, line_no: usize) -> HelixResult<Option<f64>> {
    let comment = comment.trim_start();
    let Some(rest) = comment
        .get(..4)
        .filter(|head| head.eq_ignore_ascii_case("time"))
        .map(|_| &comment[4..])
        .filter(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric()))
    else {
        return Ok(None);
    };

    let rest = rest.trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);

    parse_field::<f64>(rest.split_whitespace().next(), "time", line_no).map(Some)
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, what: &str, line_no: usize) -> HelixResult<T> {
    let field = field.ok_or_else(|| HelixError::Input {
        line: line_no,
        message: format!("missing {} column", what),
    })?;

    field.parse::<T>().map_err(|_| HelixError::Input {
        line: line_no,
        message: format!("{} '{}' is not a number", what, field),
    })
}
