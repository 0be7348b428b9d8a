use flate2::{Compression, write::GzEncoder};
use helixmd::{
    HelixError, VsBpsArgs, aggregate::MergeMethod, estimate::ErrorMethod, report::read_report,
    vs_bps,
};
use pretty_assertions::assert_eq;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::TempDir;

// three frames of a four base-pair helix; columns: bp shear stretch stagger
const BP_CONTENT: &str = "\
# Time = 0.0
    1   0.10   -0.10   0.01
    2   0.20   -0.20   0.02
    3   0.30   -0.30   0.03
    4   0.40   -0.40   0.04
# Time = 10.0
    1   0.30   -0.30   0.01
    2   0.40   -0.40   0.02
    3   0.50   -0.50   0.03
    4   0.60   -0.60   0.04
# Time = 20.0
    1   0.20   -0.20   0.01
    2   0.30   -0.30   0.02
    3   0.40   -0.40   0.03
    4   0.50   -0.50   0.04
";

// same frames for base-steps; columns: bp shift slide rise tilt roll twist
const BPS_CONTENT: &str = "\
# Time = 0.0
    1   0.0   0.0   3.2   0.0   0.0   30.0
    2   0.0   0.0   3.4   0.0   0.0   34.0
    3   0.0   0.0   3.3   0.0   0.0   36.0
# Time = 10.0
    1   0.0   0.0   3.4   0.0   0.0   32.0
    2   0.0   0.0   3.2   0.0   0.0   36.0
    3   0.0   0.0   3.3   0.0   0.0   38.0
# Time = 20.0
    1   0.0   0.0   3.3   0.0   0.0   34.0
    2   0.0   0.0   3.3   0.0   0.0   32.0
    3   0.0   0.0   3.3   0.0   0.0   34.0
";

fn base_args(input: PathBuf, output: PathBuf, parameter: &str) -> VsBpsArgs {
    VsBpsArgs {
        input,
        output,
        total_bp: 4,
        parameter: parameter.to_string(),
        first_bp: 1,
        bp_start: None,
        bp_end: None,
        error_method: ErrorMethod::Std,
        merge_bps: 1,
        merge_method: None,
        tool: "gmx analyze".to_string(),
        exclude: Vec::new(),
        level: log::Level::Info,
    }
}

fn write_bytes(path: &Path, content: &[u8]) {
    std::fs::write(path, content)
        .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
}

fn write_gzip(path: &Path, content: &[u8]) {
    let file = File::create(path)
        .unwrap_or_else(|e| panic!("failed to create gzip file {}: {}", path.display(), e));
    let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());

    writer
        .write_all(content)
        .unwrap_or_else(|e| panic!("failed to write gzip content {}: {}", path.display(), e));
    writer
        .finish()
        .unwrap_or_else(|e| panic!("failed to finish gzip file {}: {}", path.display(), e));
}

fn read_output(path: &Path) -> (String, Vec<(f64, f64, f64)>) {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    let header = text.lines().next().unwrap_or_default().to_string();

    let file = File::open(path).unwrap();
    let entries = read_report(BufReader::new(file))
        .unwrap_or_else(|e| panic!("failed to parse {}: {}", path.display(), e))
        .entries
        .into_iter()
        .map(|e| (e.midpoint, e.average, e.error))
        .collect();

    (header, entries)
}

fn assert_close(got: f64, want: f64) {
    assert!(
        (got - want).abs() <= 1e-5 * want.abs().max(1e-3),
        "expected {}, got {}",
        want,
        got
    );
}

#[test]
fn test_std_per_base_pair() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = temp.path().join("L-BP_cdna.dat");
    let output = temp.path().join("stretch.dat");
    write_bytes(&input, BP_CONTENT.as_bytes());

    let result = vs_bps(&base_args(input, output.clone(), "stretch")).unwrap();
    assert_eq!(result.len(), 4);

    let (header, entries) = read_output(&output);
    assert_eq!(header, "# bp(mid) \t stretch-avg \t stretch-error");

    let midpoints: Vec<f64> = entries.iter().map(|e| e.0).collect();
    assert_eq!(midpoints, vec![1.0, 2.0, 3.0, 4.0]);

    // deviations from the mean are 0.1, -0.1 and 0 at every position
    let std = (0.02_f64 / 3.0).sqrt();
    for (mid, avg, err) in entries {
        assert_close(avg, -(0.1 * mid + 0.1));
        assert_close(err, std);
    }
}

#[test]
fn test_merged_steps_from_gzip() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = temp.path().join("L-BPS_cdna.dat.gz");
    let output = temp.path().join("twist.dat");
    write_gzip(&input, BPS_CONTENT.as_bytes());

    let mut args = base_args(input, output.clone(), "twist");
    args.merge_bps = 2;
    args.merge_method = Some(MergeMethod::Sum);

    vs_bps(&args).unwrap();

    // steps 1-3 of a 4 bp helix: one full group of two, step 3 is dropped
    let (_, entries) = read_output(&output);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, 1.5);
    assert_close(entries[0].1, 66.0);
    assert_close(entries[0].2, (8.0_f64 / 3.0).sqrt());
}

#[test]
fn test_excluded_and_sub_range() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = temp.path().join("L-BP_cdna.dat");
    let output = temp.path().join("shear.dat");
    write_bytes(&input, BP_CONTENT.as_bytes());

    let mut args = base_args(input, output.clone(), "shear");
    args.bp_start = Some(2);
    args.exclude = vec![3];

    vs_bps(&args).unwrap();

    let (_, entries) = read_output(&output);
    let midpoints: Vec<f64> = entries.iter().map(|e| e.0).collect();
    assert_eq!(midpoints, vec![2.0, 4.0]);
}

fn assert_fails_without_output(args: VsBpsArgs, expected: impl Fn(&HelixError) -> bool) {
    let err = vs_bps(&args).expect_err("request should fail");
    assert!(expected(&err), "unexpected error {:?} for {}", err, args);
    assert!(!args.output.exists(), "{} was written", args.output.display());
}

#[test]
fn test_invalid_requests_write_nothing() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = temp.path().join("L-BP_cdna.dat");
    write_bytes(&input, BP_CONTENT.as_bytes());
    let out = |name: &str| temp.path().join(name);

    assert_fails_without_output(base_args(input.clone(), out("a.dat"), "writhe"), |e| {
        matches!(e, HelixError::UnknownParameter { .. })
    });

    assert_fails_without_output(
        VsBpsArgs {
            bp_end: Some(4),
            ..base_args(input.clone(), out("b.dat"), "rise")
        },
        |e| matches!(e, HelixError::Range(_)),
    );

    assert_fails_without_output(
        VsBpsArgs {
            merge_bps: 2,
            ..base_args(input.clone(), out("c.dat"), "shear")
        },
        |e| matches!(e, HelixError::Validation(_)),
    );

    assert_fails_without_output(
        VsBpsArgs {
            tool: "g_energy".to_string(),
            ..base_args(input.clone(), out("d.dat"), "shear")
        },
        |e| matches!(e, HelixError::UnsupportedTool(_)),
    );

    assert_fails_without_output(
        VsBpsArgs {
            exclude: vec![1, 2],
            merge_bps: 2,
            merge_method: Some(MergeMethod::Mean),
            ..base_args(input.clone(), out("e.dat"), "shear")
        },
        |e| matches!(e, HelixError::EmptyGroup { start: 1, end: 2 }),
    );

    assert_fails_without_output(
        VsBpsArgs {
            bp_start: Some(3),
            merge_bps: 3,
            merge_method: Some(MergeMethod::Sum),
            ..base_args(input.clone(), out("g.dat"), "shear")
        },
        |e| matches!(e, HelixError::Validation(_)),
    );

    assert_fails_without_output(
        base_args(out("missing.dat"), out("f.dat"), "shear"),
        |e| matches!(e, HelixError::Io(_)),
    );
}

#[cfg(unix)]
#[test]
fn test_block_and_acf_through_external_tool() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = temp.path().join("L-BP_cdna.dat");
    write_bytes(&input, BP_CONTENT.as_bytes());

    let good = temp.path().join("fake_analyze");
    write_bytes(
        &good,
        b"#!/bin/sh\n\
test -f data.xvg || exit 3\n\
echo 'Set   1:  err.est. 0.0421  a 0.5  tau1 1.0  tau2 2.0'\n\
echo 'COR: Correlation time (plain integral from 0.000 to 20.000 ps) = -10.0 ps'\n",
    );
    let bad = temp.path().join("broken_analyze");
    write_bytes(&bad, b"#!/bin/sh\necho 'Fatal error' >&2\nexit 1\n");

    for script in [&good, &bad] {
        std::fs::set_permissions(script, std::fs::Permissions::from_mode(0o755))
            .unwrap_or_else(|e| panic!("failed to chmod {}: {}", script.display(), e));
    }

    let block_out = temp.path().join("block.dat");
    let mut args = base_args(input.clone(), block_out.clone(), "shear");
    args.error_method = ErrorMethod::Block;
    args.tool = good.display().to_string();
    vs_bps(&args).unwrap();

    let (_, entries) = read_output(&block_out);
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().all(|e| e.2 == 0.0421));

    // |tau| = 10 over 20 ps of trajectory leaves two independent samples
    let acf_out = temp.path().join("acf.dat");
    args.error_method = ErrorMethod::Acf;
    args.output = acf_out.clone();
    vs_bps(&args).unwrap();

    let (_, entries) = read_output(&acf_out);
    let expected = (0.02_f64 / 3.0).sqrt() / 2.0_f64.sqrt();
    for e in entries {
        assert_close(e.2, expected);
    }

    let failed_out = temp.path().join("failed.dat");
    args.tool = bad.display().to_string();
    args.output = failed_out.clone();
    assert!(matches!(
        vs_bps(&args),
        Err(HelixError::ToolExecution { .. })
    ));
    assert!(!failed_out.exists());
}
