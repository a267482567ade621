use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use rowtally::{summarize, Error, Settings};

fn write_input(content: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("measurements.txt");
    fs::write(&path, content).unwrap();
    (dir, path)
}

fn settings(chunks: usize, workers: usize) -> Settings {
    Settings { chunks, workers }
}

// Several hundred records over a handful of keys. Values are multiples
// of 0.5 so sums are exact in binary and the rendered output cannot
// depend on fold order.
fn corpus() -> Vec<u8> {
    let keys = ["Aden", "Berlin", "Casablanca", "Da Nang", "Erbil", "Fukuoka", "Gdansk"];
    let mut out = Vec::new();
    for i in 0..500usize {
        let key = keys[i % keys.len()];
        let value = (i % 41) as f64 * 0.5 - 10.0;
        out.extend_from_slice(format!("{key};{value:.1}\n").as_bytes());
    }
    out
}

#[test]
fn aggregates_the_documented_example() {
    let (_dir, path) = write_input(b"A;3.0\nB;4.0\nA;5.0\n");
    for (chunks, workers) in [(1, 1), (2, 2), (8, 4), (33, 16)] {
        let summary = summarize(&path, &settings(chunks, workers)).unwrap();
        assert_eq!(
            summary.render(),
            "{A=3.0/4.0/5.0, B=4.0/4.0/4.0}",
            "chunks={chunks} workers={workers}"
        );
        assert!(summary.warnings.is_empty());
    }
}

#[test]
fn chunking_does_not_change_the_result() {
    let (_dir, path) = write_input(&corpus());
    let reference = summarize(&path, &settings(1, 1)).unwrap();
    assert_eq!(
        reference.totals.values().map(|t| t.count).sum::<u64>(),
        500,
        "every record counted exactly once"
    );
    assert_eq!(reference.totals.len(), 7);

    // Sub-range widths down to a few bytes force boundaries inside
    // names, inside values, and on separators, and produce sub-ranges
    // with no newline at all.
    for (chunks, workers) in [(1, 7), (3, 1), (8, 8), (33, 16), (200, 64)] {
        let summary = summarize(&path, &settings(chunks, workers)).unwrap();
        assert_eq!(
            summary.render(),
            reference.render(),
            "chunks={chunks} workers={workers}"
        );
        assert_eq!(summary.totals.values().map(|t| t.count).sum::<u64>(), 500);
        assert!(summary.warnings.is_empty());
    }
}

#[test]
fn empty_file_renders_empty_braces() {
    let (_dir, path) = write_input(b"");
    let summary = summarize(&path, &Settings::default()).unwrap();
    assert_eq!(summary.render(), "{}");
    assert!(summary.warnings.is_empty());
}

#[test]
fn single_record_file() {
    let (_dir, path) = write_input(b"Quito;-3.5\n");
    for (chunks, workers) in [(1, 1), (8, 4), (33, 33)] {
        let summary = summarize(&path, &settings(chunks, workers)).unwrap();
        assert_eq!(summary.render(), "{Quito=-3.5/-3.5/-3.5}");
    }
}

#[test]
fn missing_trailing_newline_still_counts_the_last_record() {
    let (_dir, path) = write_input(b"A;1.0\nB;2.0");
    for (chunks, workers) in [(1, 1), (4, 2), (33, 16)] {
        let summary = summarize(&path, &settings(chunks, workers)).unwrap();
        assert_eq!(
            summary.render(),
            "{A=1.0/1.0/1.0, B=2.0/2.0/2.0}",
            "chunks={chunks} workers={workers}"
        );
    }
}

#[test]
fn malformed_record_is_reported_once_and_dropped() {
    let (_dir, path) = write_input(b"A;1.0\nnonsense\nB;2.0\n");
    for (chunks, workers) in [(1, 1), (2, 3), (8, 8), (33, 16)] {
        let summary = summarize(&path, &settings(chunks, workers)).unwrap();
        assert_eq!(
            summary.warnings.len(),
            1,
            "chunks={chunks} workers={workers}"
        );
        assert_eq!(summary.warnings[0].bytes, b"nonsense");
        assert_eq!(summary.render(), "{A=1.0/1.0/1.0, B=2.0/2.0/2.0}");
    }
}

#[test]
fn blank_line_is_reported_as_malformed() {
    let (_dir, path) = write_input(b"A;1.0\n\nB;2.0\n");
    let summary = summarize(&path, &settings(4, 2)).unwrap();
    assert_eq!(summary.warnings.len(), 1);
    assert!(summary.warnings[0].bytes.is_empty());
    assert_eq!(summary.render(), "{A=1.0/1.0/1.0, B=2.0/2.0/2.0}");
}

#[test]
fn unparseable_value_aborts_the_run() {
    // as an interior record
    let (_dir, path) = write_input(b"A;1.0\nB;oops\nC;2.0\n");
    let err = summarize(&path, &settings(4, 2)).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));

    // as the file's very first record, folded from the leading fragment
    let (_dir2, path2) = write_input(b"A;not-a-number\n");
    let err = summarize(&path2, &settings(4, 2)).unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-file.txt");
    let err = summarize(&path, &Settings::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn zero_parallelism_settings_are_normalized() {
    let (_dir, path) = write_input(b"A;1.0\nB;2.0\n");
    let summary = summarize(&path, &settings(0, 0)).unwrap();
    assert_eq!(summary.render(), "{A=1.0/1.0/1.0, B=2.0/2.0/2.0}");
}
