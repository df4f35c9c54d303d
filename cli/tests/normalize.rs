//! End-to-end runs of the `image_normalizer` binary against temp folders.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image_normalizer"))
}

fn run(args: &[&str]) -> Output {
    bin().args(args).output().expect("failed to spawn image_normalizer")
}

fn save_rgb(dir: &Path, name: &str, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 3 % 256) as u8, 120])
    })
    .save(dir.join(name))
    .unwrap();
}

/// Reference 80x60 plus one wide, one tall and one square photo.
fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    save_rgb(dir.path(), "gaenari.jpg", 80, 60);
    save_rgb(dir.path(), "wide.jpg", 160, 90);
    save_rgb(dir.path(), "tall.png", 60, 90);
    save_rgb(dir.path(), "square.bmp", 50, 50);
    dir
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_every_output_matches_reference_size() {
    let input = fixture();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("images_resized");

    let out = run(&["normalize", path_str(input.path()), path_str(&out_dir)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Target size: 80x60"));
    assert!(stdout.contains("All images processed."));

    for name in ["gaenari.jpg", "wide.jpg", "tall.png", "square.bmp"] {
        assert_eq!(
            image::image_dimensions(out_dir.join(name)).unwrap(),
            (80, 60),
            "{name}"
        );
    }
}

#[test]
fn test_one_corrupt_file_in_five() {
    let input = fixture();
    fs::write(input.path().join("broken.jpg"), b"\xFF\xD8 truncated").unwrap();
    let output = TempDir::new().unwrap();

    let out = run(&["normalize", path_str(input.path()), path_str(output.path()), "--json"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let results = report["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);

    let failed: Vec<_> = results.iter().filter(|r| !r["error"].is_null()).collect();
    assert_eq!(failed.len(), 1);
    assert!(failed[0]["path"].as_str().unwrap().ends_with("broken.jpg"));

    let written = fs::read_dir(output.path()).unwrap().count();
    assert_eq!(written, 4);

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("broken.jpg"));
}

#[test]
fn test_missing_reference_aborts() {
    let input = TempDir::new().unwrap();
    save_rgb(input.path(), "wide.jpg", 160, 90);
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("resized");

    let out = run(&["normalize", path_str(input.path()), path_str(&out_dir)]);
    assert!(!out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("gaenari.jpg"), "{stderr}");
    assert!(!out_dir.exists());
}

#[test]
fn test_custom_reference_and_exclusion() {
    let input = fixture();
    save_rgb(input.path(), "ref.png", 40, 40);
    let output = TempDir::new().unwrap();

    let out = run(&[
        "normalize",
        path_str(input.path()),
        path_str(output.path()),
        "--reference",
        "ref.png",
        "--exclude-reference",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    assert!(!output.path().join("ref.png").exists());
    assert_eq!(
        image::image_dimensions(output.path().join("gaenari.jpg")).unwrap(),
        (40, 40)
    );
}

#[test]
fn test_parallel_matches_sequential_sizes() {
    let input = fixture();
    let output = TempDir::new().unwrap();

    let out = run(&[
        "normalize",
        path_str(input.path()),
        path_str(output.path()),
        "--parallel",
        "--filter",
        "triangle",
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    for name in ["gaenari.jpg", "wide.jpg", "tall.png", "square.bmp"] {
        assert_eq!(image::image_dimensions(output.path().join(name)).unwrap(), (80, 60));
    }
}

#[test]
fn test_rerun_on_output_is_fixed_point() {
    let input = TempDir::new().unwrap();
    RgbaImage::from_pixel(80, 60, Rgba([1, 2, 3, 255]))
        .save(input.path().join("gaenari.png"))
        .unwrap();
    save_rgb(input.path(), "wide.png", 160, 90);
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    let args = |from: &Path, to: &Path| {
        run(&["normalize", path_str(from), path_str(to), "--reference", "gaenari.png"])
    };
    assert!(args(input.path(), first.path()).status.success());
    assert!(args(first.path(), second.path()).status.success());

    let once = image::open(first.path().join("wide.png")).unwrap();
    let twice = image::open(second.path().join("wide.png")).unwrap();
    assert_eq!(once.as_bytes(), twice.as_bytes());
}

#[test]
fn test_dry_run_and_inspect_write_nothing() {
    let input = fixture();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("resized");

    let out = run(&["normalize", path_str(input.path()), path_str(&out_dir), "--dry-run"]);
    assert!(out.status.success());
    assert!(!out_dir.exists());

    let out = run(&["inspect", path_str(input.path())]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Reference gaenari.jpg: 80x60"));
    assert!(stdout.contains("wide.jpg: 160x90 → scale 106x60 → crop at (13, 0)"));
    assert!(stdout.contains("tall.png: 60x90 → scale 80x120 → crop at (0, 30)"));
    assert!(stdout.contains("gaenari.jpg: 80x60 (already normalized)"));
}
