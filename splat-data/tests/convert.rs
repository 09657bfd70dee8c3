//! End-to-end conversion tests over real files.

use splat_data::{ConvertError, ConvertOptions, FormatError, FormatErrorKind, convert_dir, convert_file};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const PROPERTIES: [&str; 7] = ["x", "y", "z", "opacity", "f_dc_0", "f_dc_1", "f_dc_2"];

/// Rows are `[x, y, z, f_dc_0, f_dc_1, f_dc_2]`; an opacity column is interleaved
/// so decoding has to resolve fields by name.
fn header(format: &str, count: usize) -> String {
    let mut header = format!("ply\nformat {format} 1.0\nelement vertex {count}\n");
    for name in PROPERTIES {
        header.push_str(&format!("property float {name}\n"));
    }
    header.push_str("end_header\n");
    header
}

fn ascii_ply(rows: &[[f32; 6]]) -> Vec<u8> {
    let mut data = header("ascii", rows.len());
    for [x, y, z, r, g, b] in rows {
        data.push_str(&format!("{x} {y} {z} 0.5 {r} {g} {b}\n"));
    }
    data.into_bytes()
}

fn binary_ply(rows: &[[f32; 6]]) -> Vec<u8> {
    let mut data = header("binary_little_endian", rows.len()).into_bytes();
    for [x, y, z, r, g, b] in rows {
        for value in [*x, *y, *z, 0.5, *r, *g, *b] {
            data.extend_from_slice(&value.to_le_bytes());
        }
    }
    data
}

fn sample_rows() -> Vec<[f32; 6]> {
    (0..50)
        .map(|i| {
            let t = i as f32;
            [t * 0.37 - 4.0, -t * 1.13, t / 7.0, (t - 25.0) * 0.11, t * 0.05, -t * 0.2]
        })
        .collect()
}

fn quiet() -> ConvertOptions {
    ConvertOptions::default().with_progress_interval(0)
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_documented_scenario() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("scene.ply");
    fs::write(&input, ascii_ply(&[[-2.181, -1.207, 3.250, -0.660, -0.799, -0.966]])).unwrap();

    let report = convert_file(&input, None, &quiet()).unwrap();

    assert_eq!(report.output, dir.path().join("scene.xyz"));
    assert_eq!(report.points, 1);
    assert!(report.has_color);
    assert_eq!(
        fs::read_to_string(&report.output).unwrap(),
        "-2.181 -1.207 3.250 80 70 58\n"
    );
}

#[test]
fn test_line_count_and_order() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cloud.ply");
    let output = dir.path().join("out.xyz");
    let rows = sample_rows();
    fs::write(&input, binary_ply(&rows)).unwrap();

    convert_file(&input, Some(&output), &quiet()).unwrap();

    let lines = read_lines(&output);
    assert_eq!(lines.len(), rows.len());
    for (line, row) in lines.iter().zip(&rows) {
        let fields: Vec<&str> = line.split(' ').collect();
        assert_eq!(fields.len(), 6);
        assert_eq!(fields[0], format!("{:.3}", row[0] as f64));
        assert_eq!(fields[1], format!("{:.3}", row[1] as f64));
        assert_eq!(fields[2], format!("{:.3}", row[2] as f64));
    }
}

#[test]
fn test_ascii_and_binary_match() {
    let dir = tempdir().unwrap();
    let rows = sample_rows();
    let ascii = dir.path().join("a.ply");
    let binary = dir.path().join("b.ply");
    fs::write(&ascii, ascii_ply(&rows)).unwrap();
    fs::write(&binary, binary_ply(&rows)).unwrap();

    let a = convert_file(&ascii, None, &quiet()).unwrap();
    let b = convert_file(&binary, None, &quiet()).unwrap();

    assert_eq!(fs::read(a.output).unwrap(), fs::read(b.output).unwrap());
}

#[test]
fn test_colors_clamp() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bright.ply");
    fs::write(&input, ascii_ply(&[[0.0, 0.0, 0.0, 40.0, -40.0, 0.0]])).unwrap();

    let report = convert_file(&input, None, &quiet()).unwrap();
    assert_eq!(read_lines(&report.output), vec!["0.000 0.000 0.000 255 0 128"]);
}

#[test]
fn test_vertex_list_property_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("list.ply");
    let output = dir.path().join("list.xyz");
    fs::write(
        &input,
        "ply\nformat ascii 1.0\nelement vertex 1\nproperty list uchar float x\nend_header\n1 0\n",
    )
    .unwrap();

    let err = convert_file(&input, Some(&output), &quiet()).unwrap_err();
    match err {
        ConvertError::Format { path, source } => {
            assert_eq!(path, input);
            assert_eq!(source.kind(), FormatErrorKind::Unsupported);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!output.exists());
}

#[test]
fn test_truncated_binary_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("short.ply");
    let mut data = binary_ply(&sample_rows()[..3]);
    data.truncate(data.len() - 1);
    fs::write(&input, data).unwrap();

    let err = convert_file(&input, None, &quiet()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Format {
            source: FormatError::TruncatedData {
                expected: 84,
                found: 83
            },
            ..
        }
    ));
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("absent.ply");
    let err = convert_file(&input, None, &quiet()).unwrap_err();
    assert!(matches!(err, ConvertError::Io { .. }));
    assert_eq!(err.path(), input);
}

#[test]
fn test_gray_fallback_for_uncolored_points() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("plain.ply");
    fs::write(
        &input,
        "ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nproperty float y\n\
         property float z\nend_header\n1 2 3\n4 5 6\n",
    )
    .unwrap();

    let strict = convert_file(&input, None, &quiet()).unwrap_err();
    assert!(matches!(
        strict,
        ConvertError::Format {
            source: FormatError::MissingProperty("f_dc_0"),
            ..
        }
    ));

    let report = convert_file(&input, None, &quiet().with_gray_fallback()).unwrap();
    assert!(!report.has_color);
    assert_eq!(
        read_lines(&report.output),
        vec!["1.000 2.000 3.000 128 128 128", "4.000 5.000 6.000 128 128 128"]
    );
}

#[test]
fn test_batch_isolates_failures() {
    let input_dir = tempdir().unwrap();
    let output_dir = tempdir().unwrap();
    let out = output_dir.path().join("nested");
    let rows = sample_rows();

    fs::write(input_dir.path().join("a.ply"), ascii_ply(&rows)).unwrap();
    fs::write(input_dir.path().join("b.ply"), binary_ply(&rows)).unwrap();
    fs::write(input_dir.path().join("c.PLY"), ascii_ply(&rows[..5])).unwrap();
    fs::write(input_dir.path().join("broken.ply"), b"not a ply file\n").unwrap();
    fs::write(input_dir.path().join("notes.txt"), b"ignored").unwrap();

    let summary = convert_dir(input_dir.path(), Some(&out), &quiet()).unwrap();

    assert_eq!(summary.succeeded(), 3);
    assert_eq!(summary.failed_count(), 1);
    assert_eq!(summary.failed[0].path(), input_dir.path().join("broken.ply"));
    assert!(!summary.is_success());

    for name in ["a.xyz", "b.xyz", "c.xyz"] {
        assert!(out.join(name).is_file(), "{name} missing");
    }
    assert!(!out.join("broken.xyz").exists());
    assert_eq!(read_lines(&out.join("c.xyz")).len(), 5);
}

#[test]
fn test_batch_defaults_to_input_dir() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("only.ply"), ascii_ply(&sample_rows()[..2])).unwrap();

    let summary = convert_dir(dir.path(), None, &quiet()).unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.converted[0].output, dir.path().join("only.xyz"));
}

#[test]
fn test_batch_rejects_file_input() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("a.ply");
    fs::write(&file, ascii_ply(&[])).unwrap();
    assert!(matches!(
        convert_dir(&file, None, &quiet()),
        Err(ConvertError::NotADirectory(_))
    ));
}
