use std::path::{Path, PathBuf};
use std::process::Command;

/// Helper function to run csvgraph with the given flags, writing to `out`
fn run_csvgraph(args: &[&str], out: &Path) -> Result<String, String> {
    let output = Command::new(env!("CARGO_BIN_EXE_csvgraph"))
        .args(args)
        .arg("--out")
        .arg(out)
        .output()
        .map_err(|e| format!("Failed to spawn process: {}", e))?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).to_string())
    }
}

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test")
        .join(name)
        .display()
        .to_string()
}

/// Check if bytes are a valid PNG
fn is_valid_png(bytes: &[u8]) -> bool {
    bytes.len() > 8 && bytes[0..8] == [137, 80, 78, 71, 13, 10, 26, 10]
}

fn png_at(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("output image missing")
}

#[test]
fn test_end_to_end_synthesized_x() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(&["--data", &fixture("simple.csv"), "--columns", "b"], &out);
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert_eq!(result.unwrap().matches("Saved:").count(), 1);
    assert!(is_valid_png(&png_at(&out)));
}

#[test]
fn test_end_to_end_markers_in_series_color() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(&["--data", &fixture("simple.csv"), "--columns", "b"], &out);
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let img = image::load_from_memory(&png_at(&out)).unwrap().to_rgb8();
    let color = csvgraph::palette::generate(1)[0];
    let expected = [color.0, color.1, color.2];

    // X = 1, 2, 3 and Y = 10, 20, 30 on the default 768x512 canvas
    for (x, y) in [(60, 452), (384, 256), (708, 60)] {
        assert_eq!(img.get_pixel(x, y).0, expected, "marker at ({}, {})", x, y);
    }
    assert_eq!(img.get_pixel(5, 5).0, [255, 255, 255]);
}

#[test]
fn test_end_to_end_range_and_xscale() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(
        &[
            "--data",
            &fixture("simple.csv"),
            "--columns",
            "a,b",
            "--range",
            "2",
            "--xscale",
            "0,100",
            "--title",
            "Scaled",
        ],
        &out,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&png_at(&out)));
}

#[test]
fn test_end_to_end_xdata_skip_and_size() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("waves.png");
    let result = run_csvgraph(
        &[
            "--data",
            &fixture("waves.csv"),
            "--columns",
            "sin,cos,noise",
            "--xdata",
            "--skip",
            "3",
            "--size",
            "640x400",
        ],
        &out,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let img = image::load_from_memory(&png_at(&out)).unwrap();
    assert_eq!(img.width(), 640);
    assert_eq!(img.height(), 400);
}

#[test]
fn test_end_to_end_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("waves.png");
    let result = run_csvgraph(
        &[
            "--data",
            &fixture("waves.csv"),
            "--config",
            &fixture("waves_config.json"),
        ],
        &out,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());

    let img = image::load_from_memory(&png_at(&out)).unwrap();
    assert_eq!((img.width(), img.height()), (640, 480));
}

#[test]
fn test_end_to_end_json_data() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("points.png");
    let result = run_csvgraph(
        &["--data", &fixture("points.json"), "--columns", "y", "--xdata"],
        &out,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&png_at(&out)));
}

#[test]
fn test_end_to_end_unknown_column_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(
        &["--data", &fixture("simple.csv"), "--columns", "nope,b"],
        &out,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&png_at(&out)));
}

#[test]
fn test_end_to_end_only_unknown_columns() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(&["--data", &fixture("simple.csv"), "--columns", "nope"], &out);
    assert!(result.unwrap_err().contains("no valid data"));
    assert!(!out.exists());
}

#[test]
fn test_end_to_end_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(
        &["--data", &fixture("header_only.csv"), "--columns", "b"],
        &out,
    );
    assert!(result.unwrap_err().contains("no data to plot"));
    assert!(!out.exists());
}

#[test]
fn test_end_to_end_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let missing = dir.path().join("missing.csv");
    let result = run_csvgraph(
        &["--data", &missing.display().to_string(), "--columns", "b"],
        &out,
    );
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn test_end_to_end_zero_skip_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(
        &["--data", &fixture("simple.csv"), "--columns", "b", "--skip", "0"],
        &out,
    );
    assert!(result.is_err());
    assert!(!out.exists());
}

#[test]
fn test_end_to_end_bad_size_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(
        &["--data", &fixture("simple.csv"), "--columns", "b", "--size", "big"],
        &out,
    );
    assert!(result.unwrap_err().contains("invalid size"));
}

#[test]
fn test_end_to_end_invalid_xscale_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(
        &["--data", &fixture("simple.csv"), "--columns", "b", "--xscale", "9,1"],
        &out,
    );
    assert!(result.is_ok(), "Failed: {:?}", result.err());
    assert!(is_valid_png(&png_at(&out)));
}

#[test]
fn test_end_to_end_missing_columns_flag() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chart.png");
    let result = run_csvgraph(&["--data", &fixture("simple.csv")], &out);
    assert!(result.unwrap_err().contains("Usage"));
}
