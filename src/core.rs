use crate::{
    aggregate::{MergeMethod, aggregate},
    cli::VsBpsArgs,
    error::{HelixError, HelixResult},
    estimate::{ErrorMethod, GromacsAnalyze, StatisticalTool, estimate_error},
    input::{Trajectory, read_parameter},
    parameter::{ParameterKind, classify},
    range::{PositionRange, SequenceHandle, validate_merge_size},
    report::{ExtractionResult, write_report_file},
};

use log::{debug, info};

use std::collections::BTreeSet;

/// A fully validated extraction request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub parameter: String,
    pub kind: ParameterKind,
    pub range: PositionRange,
    pub merge_size: usize,
    pub merge_method: MergeMethod,
    pub error_method: ErrorMethod,
    pub excluded: BTreeSet<i64>,
}

/// Runs the `vs-bps` analysis: averages and errors of one parameter per
/// base-pair/step (or merged segment), written to `args.output`.
///
/// Nothing is written unless every group was computed.
pub fn vs_bps(args: &VsBpsArgs) -> HelixResult<ExtractionResult> {
    let (request, tool) = prepare(args)?;

    let trajectory = read_parameter(&args.input, &request.parameter, request.range)?;
    let result = extract(&trajectory, &request, &tool)?;

    write_report_file(&result, &request.parameter, &args.output)?;

    Ok(result)
}

/// Checks every option before any data is read.
pub fn prepare(args: &VsBpsArgs) -> HelixResult<(Request, GromacsAnalyze)> {
    let kind = classify(&args.parameter)?;

    let sequence = SequenceHandle::new(
        args.total_bp,
        args.first_bp,
        args.exclude.iter().copied().collect(),
    )?;
    let range = sequence.validate(args.bp_start, args.bp_end, kind)?;

    let merge_method = match (args.merge_bps, args.merge_method) {
        (_, Some(method)) => method,
        (1, None) => MergeMethod::Mean,
        (_, None) => {
            return Err(HelixError::Validation(
                "No merging method is provided!!!!".to_string(),
            ));
        }
    };
    validate_merge_size(args.merge_bps, sequence.total_length())?;
    range.validate_merge_size(args.merge_bps)?;

    let tool = GromacsAnalyze::new(&args.tool)?;

    info!(
        "Extracting {} parameter \"{}\" for bp/s {}-{}",
        kind,
        args.parameter,
        range.start(),
        range.end()
    );

    Ok((
        Request {
            parameter: args.parameter.clone(),
            kind,
            range,
            merge_size: args.merge_bps,
            merge_method,
            error_method: args.error_method,
            excluded: sequence.mask().clone(),
        },
        tool,
    ))
}

/// Groups the trajectory per `request` and computes average and error of
/// every group.
pub fn extract<T: StatisticalTool + ?Sized>(
    trajectory: &Trajectory,
    request: &Request,
    tool: &T,
) -> HelixResult<ExtractionResult> {
    let groups = aggregate(
        &trajectory.series,
        request.range,
        request.merge_size,
        request.merge_method,
        &request.excluded,
    )?;

    info!(
        "Estimating {:?} error for {} group(s)",
        request.error_method,
        groups.len()
    );

    let mut result = ExtractionResult::default();
    for (midpoint, series) in &groups {
        let average = series.mean();
        let error = estimate_error(series, &trajectory.time, request.error_method, tool)?;
        debug!("bp/s {}: avg={} error={}", midpoint, average, error);

        result.push(*midpoint, average, error);
    }

    Ok(result)
}
