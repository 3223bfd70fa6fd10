//! Manifest and companion artifact persistence.
//!
//! The manifest is the annotated template copy built during planning — every
//! variant already carries its generated filename, so the serialized content
//! describes the plan and is byte-identical across repeated runs of the same
//! request. It may be written before, during, or after image encoding; the
//! orchestrator happens to write it last.

use crate::templates::Template;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest filename for Apple asset catalogs, as Xcode expects it.
pub const APPLE_MANIFEST_FILE: &str = "Contents.json";

/// Manifest filename for web sets, which have no platform-mandated name.
pub const WEB_MANIFEST_FILE: &str = "manifest.json";

/// Markup artifact accompanying web sets: one `<link>` tag per variant.
pub const LINK_TAGS_FILE: &str = "link-tags.html";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the annotated manifest as formatted JSON into the set directory.
pub fn write(dir: &Path, filename: &str, manifest: &Template) -> Result<PathBuf, ManifestError> {
    let path = dir.join(filename);
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Persist the rendered `<link>` markup for a web set.
pub fn write_link_tags(dir: &Path, markup: &str) -> Result<PathBuf, ManifestError> {
    let path = dir.join(LINK_TAGS_FILE);
    std::fs::write(&path, markup)?;
    Ok(path)
}
