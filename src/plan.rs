//! Asset plan construction.
//!
//! [`build_plan`] turns a generation request plus the probed source image
//! into an [`AssetPlan`]: the ordered resize instructions, the annotated
//! manifest that will be persisted next to the generated files, and any
//! non-fatal warnings. Planning is pure — no filesystem or image I/O — so the
//! full decision surface (dimensions, filenames, formats, manifest content)
//! is unit-testable without touching pixels.
//!
//! ## Filename Conventions
//!
//! | Kind | Pattern | Example |
//! |---|---|---|
//! | icon | `<stem>-<width>.<ext>` | `logo-120.png` |
//! | image | `<stem>@<scale>.<ext>` | `logo@2x.png` |
//! | web | fixed names | `apple-touch-icon-180x180.png`, `favicon-32x32.png` |
//!
//! Icon catalogs share files between entries that land on the same pixel size
//! (iPad 20pt@2x and 40pt@1x are both 40px); the manifest lists every entry
//! but the shared file is rendered once.
//!
//! ## Web
//!
//! The web platform bypasses templates entirely: it emits the two fixed
//! square families from [`TOUCH_ICON_SIZES`] and [`FAVICON_SIZES`], a
//! `<link>`-tag markup artifact (one line per variant, built with maud), and
//! a synthesized manifest mirroring the Apple shape.

use crate::imaging::{EncodeFormat, SourceInfo};
use crate::manifest::{APPLE_MANIFEST_FILE, WEB_MANIFEST_FILE};
use crate::request::{AssetKind, GenerationRequest, OutputFormat, Platform};
use crate::resolve::{ResizeTarget, ResolveError, resolve_variant};
use crate::templates::{
    FAVICON_SIZES, TOUCH_ICON_SIZES, Template, TemplateError, VariantSpec, template_for,
};
use maud::html;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Minimum source edge for icon catalogs. Marketing variants are emitted at
/// this size, so anything smaller gets upscaled.
pub const ICON_MIN_EDGE: u32 = 1024;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error("invalid template: {0}")]
    Resolve(#[from] ResolveError),
    #[error("icon source must be at least {min}x{min} pixels, got {width}x{height}")]
    SourceTooSmall { width: u32, height: u32, min: u32 },
}

/// What to do when an icon source is smaller than [`ICON_MIN_EDGE`].
///
/// Historical versions of this tool disagreed; both behaviors are kept and
/// the caller must pick one. The CLI defaults to `Lenient` with a `--strict`
/// opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizePolicy {
    /// Record a warning in the plan and continue (outputs will be upscaled).
    #[default]
    Lenient,
    /// Fail the request before anything is written.
    Strict,
}

/// One resize to perform: fully resolved target, output filename, encoding.
///
/// Created here, consumed exactly once by [`execute`](crate::execute).
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeInstruction {
    pub target: ResizeTarget,
    pub filename: String,
    pub format: EncodeFormat,
}

/// Everything decided about a generation request before any file is written.
#[derive(Debug)]
pub struct AssetPlan {
    /// Set directory name under the output directory (`AppIcon.appiconset`,
    /// `<stem>.imageset`), or `None` for web, whose files land in the output
    /// directory itself.
    pub set_dir: Option<String>,
    /// Resize work in template order.
    pub instructions: Vec<ResizeInstruction>,
    /// Annotated deep copy of the template; this is what gets persisted.
    pub manifest: Template,
    pub manifest_filename: &'static str,
    /// Rendered `<link>` markup, web only.
    pub link_tags: Option<String>,
    /// Non-fatal findings (lenient-mode size violation).
    pub warnings: Vec<String>,
}

/// Build the full plan for one request.
///
/// Pure: all filesystem and image I/O stays in later stages. Fails on a
/// missing template combination, a malformed template entry, or (strict
/// policy) an undersized icon source.
pub fn build_plan(
    source: &SourceInfo,
    source_path: &Path,
    request: &GenerationRequest,
    policy: SizePolicy,
) -> Result<AssetPlan, PlanError> {
    match request.platform {
        Platform::Web => Ok(web_plan(source, source_path, request)),
        _ => apple_plan(source, source_path, request, policy),
    }
}

/// Resolve the concrete encoding: icon catalogs are always PNG, and
/// `Source` resolves to the probed source format (PNG when undetectable).
fn effective_format(request: &GenerationRequest, source: &SourceInfo) -> EncodeFormat {
    if request.kind.is_icon() {
        return EncodeFormat::Png;
    }
    match request.format {
        OutputFormat::Bmp => EncodeFormat::Bmp,
        OutputFormat::Gif => EncodeFormat::Gif,
        OutputFormat::Jpeg => EncodeFormat::Jpeg,
        OutputFormat::Png => EncodeFormat::Png,
        OutputFormat::Tiff => EncodeFormat::Tiff,
        OutputFormat::Source => source.format.unwrap_or(EncodeFormat::Png),
    }
}

/// Pick the output extension. `Source` reuses the source file's own
/// extension (lowercased) rather than the canonical one, so `logo.jpg` stays
/// `.jpg`, not `.jpeg`.
fn effective_extension(
    request: &GenerationRequest,
    source_path: &Path,
    format: EncodeFormat,
) -> String {
    if request.kind.is_icon() {
        return "png".to_string();
    }
    match request.format {
        OutputFormat::Source => source_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| format.extension().to_string()),
        _ => format.extension().to_string(),
    }
}

fn file_stem(source_path: &Path) -> &str {
    source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("asset")
}

/// Drop instructions whose filename was already planned. Entries landing on
/// the same pixel size share one output file; rendering it once also keeps
/// parallel execution from racing on the same path.
fn dedup_shared_outputs(instructions: &mut Vec<ResizeInstruction>) {
    let mut seen = HashSet::new();
    instructions.retain(|i| seen.insert(i.filename.clone()));
}

fn apple_plan(
    source: &SourceInfo,
    source_path: &Path,
    request: &GenerationRequest,
    policy: SizePolicy,
) -> Result<AssetPlan, PlanError> {
    let template = template_for(request.platform, request.kind)?;

    let mut warnings = Vec::new();
    if request.kind.is_icon() && (source.width < ICON_MIN_EDGE || source.height < ICON_MIN_EDGE) {
        match policy {
            SizePolicy::Strict => {
                return Err(PlanError::SourceTooSmall {
                    width: source.width,
                    height: source.height,
                    min: ICON_MIN_EDGE,
                });
            }
            SizePolicy::Lenient => warnings.push(format!(
                "icon source is {}x{}, below the recommended {}x{}; outputs will be upscaled",
                source.width, source.height, ICON_MIN_EDGE, ICON_MIN_EDGE
            )),
        }
    }

    let format = effective_format(request, source);
    let ext = effective_extension(request, source_path, format);
    let stem = file_stem(source_path);

    let mut manifest = template.clone();
    let mut instructions = Vec::with_capacity(manifest.images.len());

    for spec in &mut manifest.images {
        let target = resolve_variant(spec, request, (source.width, source.height))?;
        let filename = match &spec.filename {
            Some(fixed) => fixed.clone(),
            None => match (request.kind, target) {
                (AssetKind::Icon, ResizeTarget::Exact { width, .. }) => {
                    format!("{stem}-{width}.{ext}")
                }
                _ => format!("{stem}@{}.{ext}", spec.scale),
            },
        };
        spec.filename = Some(filename.clone());
        instructions.push(ResizeInstruction {
            target,
            filename,
            format,
        });
    }
    dedup_shared_outputs(&mut instructions);

    let set_dir = match request.kind {
        AssetKind::Icon => "AppIcon.appiconset".to_string(),
        AssetKind::Image => format!("{stem}.imageset"),
    };

    Ok(AssetPlan {
        set_dir: Some(set_dir),
        instructions,
        manifest,
        manifest_filename: APPLE_MANIFEST_FILE,
        link_tags: None,
        warnings,
    })
}

fn web_variant(edge: u32, role: &str, filename: &str) -> VariantSpec {
    let mut extra = Map::new();
    extra.insert("idiom".to_string(), Value::from("web"));
    extra.insert("role".to_string(), Value::from(role));
    VariantSpec {
        size: Some(format!("{edge}x{edge}")),
        scale: "1x".to_string(),
        filename: Some(filename.to_string()),
        extra,
    }
}

fn web_plan(source: &SourceInfo, source_path: &Path, request: &GenerationRequest) -> AssetPlan {
    let format = effective_format(request, source);
    let ext = effective_extension(request, source_path, format);

    let mut manifest = Template {
        images: Vec::new(),
        info: None,
    };
    let mut instructions = Vec::new();
    let mut links = Vec::new();

    for &edge in TOUCH_ICON_SIZES {
        let filename = format!("apple-touch-icon-{edge}x{edge}.{ext}");
        links.push(
            html! {
                link rel="apple-touch-icon" sizes=(format!("{edge}x{edge}")) href=(filename.as_str());
            }
            .into_string(),
        );
        manifest
            .images
            .push(web_variant(edge, "apple-touch-icon", &filename));
        instructions.push(ResizeInstruction {
            target: ResizeTarget::Exact {
                width: edge,
                height: edge,
            },
            filename,
            format,
        });
    }

    for &edge in FAVICON_SIZES {
        let filename = format!("favicon-{edge}x{edge}.{ext}");
        links.push(
            html! {
                link rel="icon" type=(format.media_type()) sizes=(format!("{edge}x{edge}")) href=(filename.as_str());
            }
            .into_string(),
        );
        manifest.images.push(web_variant(edge, "favicon", &filename));
        instructions.push(ResizeInstruction {
            target: ResizeTarget::Exact {
                width: edge,
                height: edge,
            },
            filename,
            format,
        });
    }

    AssetPlan {
        set_dir: None,
        instructions,
        manifest,
        manifest_filename: WEB_MANIFEST_FILE,
        link_tags: Some(links.join("\n") + "\n"),
        warnings: Vec::new(),
    }
}
