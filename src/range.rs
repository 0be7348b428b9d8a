use crate::{
    error::{HelixError, HelixResult},
    parameter::ParameterKind,
};

use std::collections::BTreeSet;

/// The chain under analysis: its length, numbering origin and masked positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceHandle {
    total_length: usize,
    first_index: i64,
    mask: BTreeSet<i64>,
}

impl SequenceHandle {
    pub fn new(total_length: usize, first_index: i64, mask: BTreeSet<i64>) -> HelixResult<Self> {
        if total_length == 0 {
            return Err(HelixError::Validation(
                "Total number of base-pairs must be positive!!!".to_string(),
            ));
        }

        Ok(Self {
            total_length,
            first_index,
            mask,
        })
    }

    pub fn total_length(&self) -> usize {
        self.total_length
    }

    pub fn first_index(&self) -> i64 {
        self.first_index
    }

    pub fn mask(&self) -> &BTreeSet<i64> {
        &self.mask
    }

    pub fn validate(
        &self,
        start: Option<i64>,
        end: Option<i64>,
        kind: ParameterKind,
    ) -> HelixResult<PositionRange> {
        validate(start, end, self.total_length, self.first_index, kind)
    }
}

/// An inclusive, validated `[start, end]` range of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionRange {
    start: i64,
    end: i64,
}

impl PositionRange {
    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, position: i64) -> bool {
        (self.start..=self.end).contains(&position)
    }

    pub fn positions(&self) -> impl Iterator<Item = i64> {
        self.start..=self.end
    }

    /// Rejects merge sizes leaving no complete group inside this range.
    pub fn validate_merge_size(&self, merge_size: usize) -> HelixResult<()> {
        if merge_size > self.len() {
            return Err(HelixError::Validation(format!(
                "Number of bp/s to merge ({}) is larger than the {} bp/s between {} and {}.",
                merge_size,
                self.len(),
                self.start,
                self.end
            )));
        }

        Ok(())
    }
}

/// Validates a requested range against the chain length and parameter kind.
///
/// Unset bounds default to the first index and to the last position valid
/// for `kind`. A base-step range ends one position earlier than a base-pair
/// range over the same chain.
///
/// # Example
///
/// ```rust,ignore
/// use helixmd::{parameter::ParameterKind, range::validate};
///
/// let range = validate(None, None, 10, 1, ParameterKind::BaseStep).unwrap();
/// assert_eq!((range.start(), range.end()), (1, 9));
/// ```
pub fn validate(
    start: Option<i64>,
    end: Option<i64>,
    total_length: usize,
    first_index: i64,
    kind: ParameterKind,
) -> HelixResult<PositionRange> {
    let max_allowed = i64::try_from(total_length)
        .ok()
        .and_then(|total| first_index.checked_add(total - 1))
        .and_then(|last| last.checked_sub(kind.adjustment()))
        .ok_or_else(|| {
            HelixError::Range(format!(
                "A chain of {} base-pair(s) starting at {} exceeds the numbering limit.",
                total_length, first_index
            ))
        })?;
    if max_allowed < first_index {
        return Err(HelixError::Range(format!(
            "A chain of {} base-pair(s) has no {} position.",
            total_length, kind
        )));
    }

    let start = start.unwrap_or(first_index);
    let end = end.unwrap_or(max_allowed);

    if start < first_index || start > max_allowed {
        return Err(HelixError::Range(format!(
            "The requested start bp {} is out side of {}-{} range.",
            start, first_index, max_allowed
        )));
    }

    if start > end {
        return Err(HelixError::Range(format!(
            "The requested end bp {} is smaller than requested start bp {}!!!",
            end, start
        )));
    }

    if end < first_index || end > max_allowed {
        return Err(HelixError::Range(format!(
            "The requested end bp {} is out side of {}-{} range.",
            end, first_index, max_allowed
        )));
    }

    Ok(PositionRange { start, end })
}

/// Rejects merge sizes of zero or larger than the chain itself.
pub fn validate_merge_size(merge_size: usize, total_length: usize) -> HelixResult<()> {
    if merge_size == 0 {
        return Err(HelixError::Validation(
            "Number of bp/s to merge must be at least one.".to_string(),
        ));
    }

    if merge_size > total_length {
        return Err(HelixError::Validation(
            "Number of bp/s to merge is larger than total number of bp.".to_string(),
        ));
    }

    Ok(())
}
