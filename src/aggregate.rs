use crate::{
    error::{HelixError, HelixResult},
    range::PositionRange,
};

use clap::ValueEnum;
use log::{debug, warn};

use std::collections::{BTreeMap, BTreeSet};

/// Per-frame values of one position or one merged group of positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population standard deviation (divisor `N`).
    pub fn std_dev(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let mean = self.mean();
        let var = self
            .values
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / self.values.len() as f64;
        var.sqrt()
    }
}

/// How the per-frame values of a merged group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MergeMethod {
    Mean,
    Sum,
}

/// Groups the validated range into blocks of `merge_size` positions.
///
/// Returns one `(midpoint, series)` per reported block in ascending order.
/// Masked positions never contribute to a block, and a trailing block
/// shorter than `merge_size` is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let groups = aggregate(&series, range, 3, MergeMethod::Sum, &BTreeSet::new())?;
/// let midpoints: Vec<f64> = groups.iter().map(|(mid, _)| *mid).collect();
/// assert_eq!(midpoints, vec![2.0, 5.0, 8.0]);
/// ```
pub fn aggregate(
    series: &BTreeMap<i64, TimeSeries>,
    range: PositionRange,
    merge_size: usize,
    merge_method: MergeMethod,
    excluded: &BTreeSet<i64>,
) -> HelixResult<Vec<(f64, TimeSeries)>> {
    if merge_size == 0 {
        return Err(HelixError::Validation(
            "Number of bp/s to merge must be at least one.".to_string(),
        ));
    }

    let positions: Vec<i64> = range.positions().collect();
    let mut groups = Vec::with_capacity(positions.len() / merge_size);

    for block in positions.chunks(merge_size) {
        if block.len() < merge_size {
            warn!(
                "Dropping trailing bp/s {}-{}: fewer than {} to merge",
                block[0],
                block[block.len() - 1],
                merge_size
            );
            break;
        }

        let members = block
            .iter()
            .filter(|position| !excluded.contains(position))
            .map(|position| {
                series
                    .get(position)
                    .map(|s| (*position, s))
                    .ok_or(HelixError::MissingPosition(*position))
            })
            .collect::<HelixResult<Vec<_>>>()?;

        if merge_size == 1 {
            // a masked single position is simply not reported
            if let Some((position, s)) = members.first() {
                groups.push((*position as f64, (*s).clone()));
            }
            continue;
        }

        if members.is_empty() {
            return Err(HelixError::EmptyGroup {
                start: block[0],
                end: block[block.len() - 1],
            });
        }

        let midpoint = block.iter().sum::<i64>() as f64 / block.len() as f64;
        let merged = merge(&members, merge_method)?;
        debug!(
            "Merged bp/s {:?} into group at {} ({} frames)",
            members.iter().map(|(p, _)| p).collect::<Vec<_>>(),
            midpoint,
            merged.len()
        );
        groups.push((midpoint, merged));
    }

    if groups.is_empty() {
        return Err(HelixError::EmptyGroup {
            start: range.start(),
            end: range.end(),
        });
    }

    Ok(groups)
}

/// Element-wise combination of frame-aligned series.
fn merge(members: &[(i64, &TimeSeries)], method: MergeMethod) -> HelixResult<TimeSeries> {
    let frames = members[0].1.len();
    if let Some((position, s)) = members.iter().find(|(_, s)| s.len() != frames) {
        return Err(HelixError::Validation(format!(
            "Cannot merge bp/s {} with {} frames into a group of {} frames",
            position,
            s.len(),
            frames
        )));
    }

    let mut combined = vec![0.0; frames];
    for (_, s) in members {
        for (acc, value) in combined.iter_mut().zip(s.values()) {
            *acc += value;
        }
    }

    if method == MergeMethod::Mean {
        let n = members.len() as f64;
        combined.iter_mut().for_each(|v| *v /= n);
    }

    Ok(TimeSeries::new(combined))
}
