//! Per-stage artifact persistence.
//!
//! Writes one JPEG per pipeline stage into the output directory, named
//! by the original filename plus a stage tag
//! (`{filename}_step{N}_{tag}.jpg`), and optionally a rendered figure
//! per stage (`{filename}_step{N}_{tag}_figure.jpg`).

use std::path::{Path, PathBuf};

use granum_pipeline::{GrayImage, RgbImage, StagedResult};

use crate::figure;

/// One pipeline stage, for artifact naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Grayscale conversion.
    Gray,
    /// Gaussian blur.
    Blur,
    /// Canny edge detection.
    Canny,
    /// Morphological dilation.
    Dilated,
    /// Contour overlay.
    Contours,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Self; 5] = [
        Self::Gray,
        Self::Blur,
        Self::Canny,
        Self::Dilated,
        Self::Contours,
    ];

    /// 1-based stage index used in artifact names.
    #[must_use]
    pub const fn index(self) -> u32 {
        match self {
            Self::Gray => 1,
            Self::Blur => 2,
            Self::Canny => 3,
            Self::Dilated => 4,
            Self::Contours => 5,
        }
    }

    /// Stage tag used in artifact names.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Gray => "gray",
            Self::Blur => "blur",
            Self::Canny => "canny",
            Self::Dilated => "dilated",
            Self::Contours => "contours",
        }
    }
}

/// Artifact filename for a stage of a source image.
#[must_use]
pub fn artifact_file_name(source: &str, stage: Stage) -> String {
    format!("{source}_step{}_{}.jpg", stage.index(), stage.tag())
}

/// Figure filename for a stage of a source image.
#[must_use]
pub fn figure_file_name(source: &str, stage: Stage) -> String {
    format!("{source}_step{}_{}_figure.jpg", stage.index(), stage.tag())
}

/// Failure to write one artifact file.
#[derive(Debug, thiserror::Error)]
#[error("failed to write artifact {}: {source}", path.display())]
pub struct ArtifactError {
    /// Path of the artifact that could not be written.
    pub path: PathBuf,
    /// Underlying encoder/filesystem error.
    #[source]
    pub source: image::ImageError,
}

/// Persist every stage of one image's pipeline run.
///
/// Always writes the five stage JPEGs; additionally writes the five
/// stage figures when `with_figures` is set.
///
/// # Errors
///
/// Returns [`ArtifactError`] on the first write that fails.
pub fn persist_stages(
    output_dir: &Path,
    source_name: &str,
    staged: &StagedResult,
    with_figures: bool,
) -> Result<(), ArtifactError> {
    save_gray(output_dir, source_name, Stage::Gray, &staged.grayscale, with_figures)?;
    save_gray(output_dir, source_name, Stage::Blur, &staged.blurred, with_figures)?;
    save_gray(output_dir, source_name, Stage::Canny, &staged.edges, with_figures)?;
    save_gray(output_dir, source_name, Stage::Dilated, &staged.dilated, with_figures)?;
    save_rgb(output_dir, source_name, Stage::Contours, &staged.overlay, with_figures)?;
    Ok(())
}

fn save_gray(
    output_dir: &Path,
    source_name: &str,
    stage: Stage,
    img: &GrayImage,
    with_figures: bool,
) -> Result<(), ArtifactError> {
    let path = output_dir.join(artifact_file_name(source_name, stage));
    img.save(&path).map_err(|source| ArtifactError {
        path: path.clone(),
        source,
    })?;

    if with_figures {
        save_figure(output_dir, source_name, stage, &figure::gray_to_rgb(img))?;
    }
    Ok(())
}

fn save_rgb(
    output_dir: &Path,
    source_name: &str,
    stage: Stage,
    img: &RgbImage,
    with_figures: bool,
) -> Result<(), ArtifactError> {
    let path = output_dir.join(artifact_file_name(source_name, stage));
    img.save(&path).map_err(|source| ArtifactError {
        path: path.clone(),
        source,
    })?;

    if with_figures {
        save_figure(output_dir, source_name, stage, img)?;
    }
    Ok(())
}

fn save_figure(
    output_dir: &Path,
    source_name: &str,
    stage: Stage,
    img: &RgbImage,
) -> Result<(), ArtifactError> {
    let path = output_dir.join(figure_file_name(source_name, stage));
    figure::render(img).save(&path).map_err(|source| ArtifactError {
        path: path.clone(),
        source,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use granum_pipeline::{PipelineConfig, process_staged};

    fn staged_fixture() -> StagedResult {
        let img = RgbImage::from_fn(40, 40, |x, y| {
            if (10..30).contains(&x) && (10..30).contains(&y) {
                image::Rgb([255, 255, 255])
            } else {
                image::Rgb([0, 0, 0])
            }
        });
        let mut png = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut png);
        image::ImageEncoder::write_image(
            encoder,
            img.as_raw(),
            img.width(),
            img.height(),
            image::ExtendedColorType::Rgb8,
        )
        .unwrap();
        process_staged(&png, &PipelineConfig::default()).unwrap()
    }

    #[test]
    fn artifact_names_match_the_observed_scheme() {
        assert_eq!(
            artifact_file_name("seeds.png", Stage::Gray),
            "seeds.png_step1_gray.jpg",
        );
        assert_eq!(
            artifact_file_name("seeds.png", Stage::Blur),
            "seeds.png_step2_blur.jpg",
        );
        assert_eq!(
            artifact_file_name("seeds.png", Stage::Canny),
            "seeds.png_step3_canny.jpg",
        );
        assert_eq!(
            artifact_file_name("seeds.png", Stage::Dilated),
            "seeds.png_step4_dilated.jpg",
        );
        assert_eq!(
            artifact_file_name("seeds.png", Stage::Contours),
            "seeds.png_step5_contours.jpg",
        );
    }

    #[test]
    fn figure_names_append_the_figure_tag() {
        assert_eq!(
            figure_file_name("seeds.png", Stage::Canny),
            "seeds.png_step3_canny_figure.jpg",
        );
    }

    #[test]
    fn stage_indices_are_sequential() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(stage.index() as usize, i + 1);
        }
    }

    #[test]
    fn persist_writes_five_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let staged = staged_fixture();
        persist_stages(dir.path(), "img.png", &staged, false).unwrap();

        for stage in Stage::ALL {
            let path = dir.path().join(artifact_file_name("img.png", stage));
            assert!(path.is_file(), "missing artifact {path:?}");
            let figure = dir.path().join(figure_file_name("img.png", stage));
            assert!(!figure.exists(), "unexpected figure {figure:?}");
        }
    }

    #[test]
    fn persist_with_figures_writes_ten_files() {
        let dir = tempfile::tempdir().unwrap();
        let staged = staged_fixture();
        persist_stages(dir.path(), "img.png", &staged, true).unwrap();

        for stage in Stage::ALL {
            assert!(dir.path().join(artifact_file_name("img.png", stage)).is_file());
            assert!(dir.path().join(figure_file_name("img.png", stage)).is_file());
        }
    }

    #[test]
    fn persist_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let staged = staged_fixture();
        let err = persist_stages(&missing, "img.png", &staged, false).unwrap_err();
        assert!(err.to_string().contains("img.png_step1_gray.jpg"));
    }
}
