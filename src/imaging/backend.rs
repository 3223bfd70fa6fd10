//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: probe (dimensions + detected format) and resize. The production
//! implementation is [`RustBackend`](super::rust_backend::RustBackend) — pure
//! Rust, statically linked, no system dependencies.

use super::params::{EncodeFormat, ResizeParams};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode {path}: {detail}")]
    Decode { path: PathBuf, detail: String },
    #[error("failed to encode {path}: {detail}")]
    Encode { path: PathBuf, detail: String },
}

/// Result of a probe operation: native dimensions plus the detected encoding.
///
/// `format` is `None` when the container is decodable but its encoding has no
/// counterpart in [`EncodeFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
    pub format: Option<EncodeFormat>,
}

/// Trait for image processing backends.
///
/// Both operations take the source by path; the backend owns decoded pixel
/// data and is free to cache the decode across calls. The rest of the
/// codebase never touches pixels directly.
pub trait ImageBackend: Sync {
    /// Read native dimensions and detect the source encoding without a full
    /// decode.
    fn probe(&self, path: &Path) -> Result<SourceInfo, BackendError>;

    /// Produce one resized, re-encoded copy of the source.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::Quality;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    #[derive(Default)]
    pub struct MockBackend {
        pub probe_results: Mutex<Vec<SourceInfo>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        /// Filenames whose resize should fail, for error-path tests.
        pub fail_outputs: Mutex<Vec<String>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Probe(String),
        Resize {
            source: String,
            output: String,
            width: u32,
            height: u32,
            format: EncodeFormat,
            quality: u32,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_source(info: SourceInfo) -> Self {
            Self {
                probe_results: Mutex::new(vec![info]),
                ..Self::default()
            }
        }

        /// Shorthand for a PNG source of the given dimensions.
        pub fn with_png_source(width: u32, height: u32) -> Self {
            Self::with_source(SourceInfo {
                width,
                height,
                format: Some(EncodeFormat::Png),
            })
        }

        pub fn failing_on(self, filename: &str) -> Self {
            self.fail_outputs.lock().unwrap().push(filename.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        /// Recorded resizes only, in dispatch order.
        pub fn resizes(&self) -> Vec<RecordedOp> {
            self.get_operations()
                .into_iter()
                .filter(|op| matches!(op, RecordedOp::Resize { .. }))
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn probe(&self, path: &Path) -> Result<SourceInfo, BackendError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Probe(path.to_string_lossy().to_string()));

            self.probe_results.lock().unwrap().pop().ok_or_else(|| {
                BackendError::Decode {
                    path: path.to_path_buf(),
                    detail: "no mock source info".to_string(),
                }
            })
        }

        fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
            let output = params.output.to_string_lossy().to_string();
            let failing = self
                .fail_outputs
                .lock()
                .unwrap()
                .iter()
                .any(|f| output.ends_with(f.as_str()));

            self.operations.lock().unwrap().push(RecordedOp::Resize {
                source: params.source.to_string_lossy().to_string(),
                output: output.clone(),
                width: params.width,
                height: params.height,
                format: params.format,
                quality: params.quality.value(),
            });

            if failing {
                return Err(BackendError::Encode {
                    path: params.output.clone(),
                    detail: "mock encode failure".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_probe() {
        let backend = MockBackend::with_png_source(800, 600);

        let info = backend.probe(Path::new("/test/image.png")).unwrap();
        assert_eq!(info.width, 800);
        assert_eq!(info.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Probe(p) if p == "/test/image.png"));
    }

    #[test]
    fn mock_probe_exhausted_errors() {
        let backend = MockBackend::new();
        assert!(backend.probe(Path::new("/missing.png")).is_err());
    }

    #[test]
    fn mock_records_resize() {
        let backend = MockBackend::new();

        backend
            .resize(&ResizeParams {
                source: "/source.png".into(),
                output: "/output.png".into(),
                width: 120,
                height: 120,
                format: EncodeFormat::Png,
                quality: Quality::new(90),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Resize {
                width: 120,
                height: 120,
                format: EncodeFormat::Png,
                quality: 90,
                ..
            }
        ));
    }

    #[test]
    fn mock_fails_on_registered_output() {
        let backend = MockBackend::new().failing_on("bad.png");

        let result = backend.resize(&ResizeParams {
            source: "/source.png".into(),
            output: "/out/bad.png".into(),
            width: 10,
            height: 10,
            format: EncodeFormat::Png,
            quality: Quality::default(),
        });
        assert!(matches!(result, Err(BackendError::Encode { .. })));
    }
}
