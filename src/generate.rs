//! End-to-end asset generation.
//!
//! Ties the pipeline together: probe the source image, build the plan,
//! materialize every variant, persist the manifest (and, for web, the
//! `<link>`-tag artifact), and return a [`GenerateReport`] for display.
//!
//! Failure ordering follows the pipeline: an undecodable or missing source
//! aborts before anything is written; a bad output path aborts before any
//! per-variant work; a codec error aborts the remaining plan, leaving
//! already-written files in place.

use crate::execute::{self, ExecuteError, GeneratedFile};
use crate::imaging::{BackendError, ImageBackend, RustBackend};
use crate::manifest::{self, ManifestError};
use crate::plan::{self, PlanError, SizePolicy};
use crate::request::GenerationRequest;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("invalid input image: {0}")]
    Input(BackendError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
    #[error("failed to write manifest: {0}")]
    Manifest(#[from] ManifestError),
}

/// What one generation run produced, for console display.
#[derive(Debug)]
pub struct GenerateReport {
    /// Directory holding the generated files (the set directory, or the
    /// output directory itself for web).
    pub set_dir: PathBuf,
    /// Generated image files in plan order.
    pub files: Vec<GeneratedFile>,
    pub manifest_path: PathBuf,
    /// The `<link>`-tag artifact, web only.
    pub link_tags_path: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Generate an asset set using the production backend.
pub fn generate(
    source: &Path,
    output_dir: &Path,
    request: &GenerationRequest,
    policy: SizePolicy,
) -> Result<GenerateReport, GenerateError> {
    generate_with_backend(&RustBackend::new(), source, output_dir, request, policy)
}

/// Generate using a specific backend (allows testing with a mock).
pub fn generate_with_backend(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    request: &GenerationRequest,
    policy: SizePolicy,
) -> Result<GenerateReport, GenerateError> {
    let info = backend.probe(source).map_err(GenerateError::Input)?;
    let plan = plan::build_plan(&info, source, request, policy)?;

    let set_dir = match &plan.set_dir {
        Some(name) => output_dir.join(name),
        None => output_dir.to_path_buf(),
    };

    let files = execute::execute(backend, &info, source, &set_dir, &plan.instructions, request.quality)?;

    let manifest_path = manifest::write(&set_dir, plan.manifest_filename, &plan.manifest)?;
    let link_tags_path = match &plan.link_tags {
        Some(markup) => Some(manifest::write_link_tags(&set_dir, markup)?),
        None => None,
    };

    Ok(GenerateReport {
        set_dir,
        files,
        manifest_path,
        link_tags_path,
        warnings: plan.warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::request::{AssetKind, Dimension, OutputFormat, Platform};
    use crate::templates::Template;
    use image::RgbaImage;
    use tempfile::TempDir;

    fn create_test_png(path: &Path, width: u32, height: u32) {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x % 256) as u8, (y % 256) as u8, 96, 255])
        });
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    fn read_manifest(path: &Path) -> Template {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    // =========================================================================
    // Full pipeline against the real backend
    // =========================================================================

    #[test]
    fn icon_set_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        create_test_png(&source, 1024, 1024);
        let out = tmp.path().join("assets");

        let request = GenerationRequest {
            kind: AssetKind::Icon,
            platform: Platform::Macos,
            ..GenerationRequest::default()
        };
        let report = generate(&source, &out, &request, SizePolicy::Strict).unwrap();

        assert_eq!(report.set_dir, out.join("AppIcon.appiconset"));
        assert!(report.warnings.is_empty());

        // every manifest filename corresponds to a file on disk
        let manifest = read_manifest(&report.manifest_path);
        for variant in &manifest.images {
            let filename = variant.filename.as_deref().unwrap();
            assert!(
                report.set_dir.join(filename).is_file(),
                "{filename} missing on disk"
            );
        }

        // 512x512@2x is the largest mac variant: 1024px
        let (w, h) = image::image_dimensions(report.set_dir.join("logo-1024.png")).unwrap();
        assert_eq!((w, h), (1024, 1024));
        let (w, h) = image::image_dimensions(report.set_dir.join("logo-16.png")).unwrap();
        assert_eq!((w, h), (16, 16));
    }

    #[test]
    fn image_set_autosizes_from_source() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_png(&source, 300, 600);
        let out = tmp.path().join("assets");

        let request = GenerationRequest {
            kind: AssetKind::Image,
            platform: Platform::Ios,
            ..GenerationRequest::default()
        };
        let report = generate(&source, &out, &request, SizePolicy::Strict).unwrap();

        // 300-wide @3x master → 100/200/300 wide, aspect preserved
        let set = out.join("photo.imageset");
        assert_eq!(
            image::image_dimensions(set.join("photo@1x.png")).unwrap(),
            (100, 200)
        );
        assert_eq!(
            image::image_dimensions(set.join("photo@2x.png")).unwrap(),
            (200, 400)
        );
        assert_eq!(
            image::image_dimensions(set.join("photo@3x.png")).unwrap(),
            (300, 600)
        );
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn repeated_runs_produce_identical_manifests() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        create_test_png(&source, 1024, 1024);

        let request = GenerationRequest {
            kind: AssetKind::Icon,
            platform: Platform::Ios,
            ..GenerationRequest::default()
        };
        let first = generate(&source, &tmp.path().join("a"), &request, SizePolicy::Strict).unwrap();
        let second = generate(&source, &tmp.path().join("b"), &request, SizePolicy::Strict).unwrap();

        assert_eq!(
            std::fs::read(&first.manifest_path).unwrap(),
            std::fs::read(&second.manifest_path).unwrap()
        );
    }

    #[test]
    fn web_set_writes_images_manifest_and_link_tags() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("logo.png");
        create_test_png(&source, 512, 512);
        let out = tmp.path().join("site");

        let request = GenerationRequest {
            kind: AssetKind::Icon,
            platform: Platform::Web,
            ..GenerationRequest::default()
        };
        let report = generate(&source, &out, &request, SizePolicy::Strict).unwrap();

        assert_eq!(report.set_dir, out);
        assert_eq!(
            image::image_dimensions(out.join("apple-touch-icon-180x180.png")).unwrap(),
            (180, 180)
        );
        assert_eq!(
            image::image_dimensions(out.join("favicon-16x16.png")).unwrap(),
            (16, 16)
        );

        let tags = std::fs::read_to_string(report.link_tags_path.unwrap()).unwrap();
        assert!(tags.contains(r#"href="favicon-96x96.png""#));

        let manifest = read_manifest(&report.manifest_path);
        assert_eq!(manifest.images.len(), report.files.len());
    }

    #[test]
    fn undecodable_source_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("corrupt.png");
        std::fs::write(&source, b"definitely not a png").unwrap();
        let out = tmp.path().join("assets");

        let err = generate(
            &source,
            &out,
            &GenerationRequest::default(),
            SizePolicy::Strict,
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Input(_)));
        assert!(!out.exists(), "nothing may be written on input failure");
    }

    #[test]
    fn strict_undersized_icon_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("small.png");
        create_test_png(&source, 512, 512);
        let out = tmp.path().join("assets");

        let err = generate(
            &source,
            &out,
            &GenerationRequest::default(),
            SizePolicy::Strict,
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Plan(PlanError::SourceTooSmall { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn lenient_undersized_icon_generates_with_warning() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("small.png");
        create_test_png(&source, 512, 512);

        let report = generate(
            &source,
            &tmp.path().join("assets"),
            &GenerationRequest::default(),
            SizePolicy::Lenient,
        )
        .unwrap();

        assert_eq!(report.warnings.len(), 1);
        assert!(!report.files.is_empty());
    }

    #[test]
    fn jpeg_format_override_produces_jpeg_files() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("photo.png");
        create_test_png(&source, 600, 600);

        let request = GenerationRequest {
            kind: AssetKind::Image,
            platform: Platform::Ios,
            width: Dimension::Pixels(50),
            height: Dimension::Pixels(50),
            format: OutputFormat::Jpeg,
            ..GenerationRequest::default()
        };
        let report = generate(
            &source,
            &tmp.path().join("assets"),
            &request,
            SizePolicy::Strict,
        )
        .unwrap();

        for file in &report.files {
            assert!(file.filename.ends_with(".jpeg"));
            let path = report.set_dir.join(&file.filename);
            let reader = image::ImageReader::open(&path)
                .unwrap()
                .with_guessed_format()
                .unwrap();
            assert_eq!(reader.format(), Some(image::ImageFormat::Jpeg));
        }
    }

    // =========================================================================
    // Pipeline wiring against the mock backend
    // =========================================================================

    #[test]
    fn probe_happens_exactly_once() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::with_png_source(2048, 2048);

        let request = GenerationRequest {
            kind: AssetKind::Icon,
            platform: Platform::Macos,
            ..GenerationRequest::default()
        };
        generate_with_backend(
            &backend,
            Path::new("/src/logo.png"),
            tmp.path(),
            &request,
            SizePolicy::Strict,
        )
        .unwrap();

        use crate::imaging::backend::tests::RecordedOp;
        let probes = backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Probe(_)))
            .count();
        assert_eq!(probes, 1);
    }

    #[test]
    fn mock_codec_failure_surfaces_as_execute_error() {
        let tmp = TempDir::new().unwrap();
        let backend = MockBackend::with_png_source(2048, 2048).failing_on("logo-1024.png");

        let request = GenerationRequest {
            kind: AssetKind::Icon,
            platform: Platform::Macos,
            ..GenerationRequest::default()
        };
        let err = generate_with_backend(
            &backend,
            Path::new("/src/logo.png"),
            tmp.path(),
            &request,
            SizePolicy::Strict,
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Execute(_)));
        // the manifest describes the plan; on abort it is never written
        assert!(!tmp.path().join("AppIcon.appiconset/Contents.json").exists());
    }
}
