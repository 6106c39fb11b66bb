//! Integration tests: full runs over temporary directories.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use granum_cli::{RunConfig, RunError, run};
use granum_pipeline::{PipelineConfig, RgbImage};

/// Encode a 100x100 black image with filled white squares as PNG bytes.
fn squares_png(corners: &[(u32, u32)], side: u32) -> Vec<u8> {
    let mut img = RgbImage::from_pixel(100, 100, image::Rgb([0, 0, 0]));
    for &(x0, y0) in corners {
        for y in y0..y0 + side {
            for x in x0..x0 + side {
                img.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
    }
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::Rgb8,
    )
    .unwrap();
    buf
}

fn config_for(input_dir: &Path) -> RunConfig {
    RunConfig {
        input_dir: input_dir.to_path_buf(),
        output_dir: input_dir.join("processed_images"),
        csv_path: input_dir.join("analysis_results.csv"),
        ..RunConfig::default()
    }
}

const STAGE_SUFFIXES: [&str; 5] = [
    "_step1_gray.jpg",
    "_step2_blur.jpg",
    "_step3_canny.jpg",
    "_step4_dilated.jpg",
    "_step5_contours.jpg",
];

#[test]
fn full_run_counts_objects_and_exports_csv() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.png"), squares_png(&[(40, 40)], 20)).unwrap();
    // Candidate selection is by extension; decoding is by content, so a
    // PNG payload behind a .jpg name is still processed.
    fs::write(
        dir.path().join("two.jpg"),
        squares_png(&[(15, 15), (62, 62)], 20),
    )
    .unwrap();

    let config = config_for(dir.path());
    let summary = run(&config).unwrap();

    assert_eq!(summary.records.len(), 2);
    assert!(summary.skipped.is_empty());

    let csv = fs::read_to_string(&config.csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Filename,Number of Objects");
    assert_eq!(lines.len(), 3, "expected header plus one row per image");
    assert!(lines.contains(&"one.png,1"), "csv was:\n{csv}");
    assert!(lines.contains(&"two.jpg,2"), "csv was:\n{csv}");

    // Five artifacts per processed image, no figures by default.
    for source in ["one.png", "two.jpg"] {
        for suffix in STAGE_SUFFIXES {
            let path = config.output_dir.join(format!("{source}{suffix}"));
            assert!(path.is_file(), "missing artifact {path:?}");
        }
    }
    let figure_count = fs::read_dir(&config.output_dir)
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .contains("_figure")
        })
        .count();
    assert_eq!(figure_count, 0);
}

#[test]
fn corrupt_candidate_is_skipped_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ok.png"), squares_png(&[(40, 40)], 20)).unwrap();
    fs::write(dir.path().join("broken.jpg"), b"definitely not an image").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored entirely").unwrap();
    fs::create_dir(dir.path().join("nested.png")).unwrap();

    let config = config_for(dir.path());
    let summary = run(&config).unwrap();

    assert_eq!(summary.records.len(), 1);
    assert_eq!(summary.records[0].filename, "ok.png");
    assert_eq!(summary.records[0].object_count, 1);
    assert_eq!(summary.skipped, vec!["broken.jpg".to_string()]);

    // The skipped file contributes no row and no artifacts.
    let csv = fs::read_to_string(&config.csv_path).unwrap();
    assert_eq!(csv, "Filename,Number of Objects\nok.png,1\n");
    assert!(
        !config
            .output_dir
            .join("broken.jpg_step1_gray.jpg")
            .exists()
    );
}

#[test]
fn uppercase_extension_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("upper.PNG"), squares_png(&[(40, 40)], 20)).unwrap();

    let config = config_for(dir.path());
    let summary = run(&config).unwrap();

    assert_eq!(summary.records.len(), 1);
    assert_eq!(summary.records[0].filename, "upper.PNG");
}

#[test]
fn preexisting_output_dir_and_reruns_are_fine() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.png"), squares_png(&[(40, 40)], 20)).unwrap();

    let config = config_for(dir.path());
    fs::create_dir_all(&config.output_dir).unwrap();

    let first = run(&config).unwrap();
    assert_eq!(first.records.len(), 1);

    // The output directory now contains .jpg artifacts, but it is a
    // subdirectory and the scan is non-recursive: a second run still
    // sees exactly one candidate.
    let second = run(&config).unwrap();
    assert_eq!(second.records.len(), 1);
}

#[test]
fn figures_flag_writes_figure_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("one.png"), squares_png(&[(40, 40)], 20)).unwrap();

    let config = RunConfig {
        persist_figures: true,
        ..config_for(dir.path())
    };
    run(&config).unwrap();

    for n in 1..=5 {
        let found = fs::read_dir(&config.output_dir)
            .unwrap()
            .filter_map(Result::ok)
            .any(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                name.starts_with(&format!("one.png_step{n}_")) && name.ends_with("_figure.jpg")
            });
        assert!(found, "missing figure for stage {n}");
    }
}

#[test]
fn missing_input_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        input_dir: dir.path().join("absent"),
        ..config_for(dir.path())
    };
    assert!(matches!(run(&config), Err(RunError::ScanInputDir { .. })));
}

#[test]
fn invalid_pipeline_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = RunConfig {
        pipeline: PipelineConfig {
            blur_kernel_size: 4,
            ..PipelineConfig::default()
        },
        ..config_for(dir.path())
    };
    assert!(matches!(run(&config), Err(RunError::Config(_))));
}

#[test]
fn empty_input_dir_exports_header_only_csv() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let summary = run(&config).unwrap();

    assert!(summary.records.is_empty());
    assert!(summary.skipped.is_empty());
    let csv = fs::read_to_string(&config.csv_path).unwrap();
    assert_eq!(csv, "Filename,Number of Objects\n");
}
