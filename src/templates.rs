//! Static platform templates for icon catalogs and image sets.
//!
//! Each Apple platform family ships two embedded JSON documents — one
//! enumerating the fixed icon-catalog variants, one enumerating the scales of
//! a generic image set. They are compiled in via `include_str!`, parsed once
//! behind a `LazyLock`, and resolved through the pure [`template_for`] lookup,
//! so the set of valid `(platform, kind)` combinations is statically
//! enumerable (and enumerated, by [`ALL_COMBINATIONS`]).
//!
//! The web platform has no template: it is served by the two fixed dimension
//! lists [`TOUCH_ICON_SIZES`] and [`FAVICON_SIZES`] instead.
//!
//! Templates are never handed out mutably. Annotation (attaching generated
//! filenames) always works on a deep copy, so the static documents can back
//! any number of concurrent or repeated requests.

use crate::request::{AssetKind, Platform};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("no template for platform '{platform}' and kind '{kind}'")]
    NotFound { platform: Platform, kind: AssetKind },
}

/// One required output variant: a size spec (absent for free-form image
/// sets), a scale suffix, and passthrough metadata.
///
/// `extra` carries `idiom`, `role`, `subtype`, and any future keys the
/// platform tooling cares about — they are echoed into the output manifest
/// untouched. `filename` is empty in the stored template and filled in on the
/// annotated copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub scale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Trailer block echoed into `Contents.json`, as Xcode writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogInfo {
    pub author: String,
    pub version: u32,
}

/// A parsed template document: the ordered variant list plus the catalog
/// info trailer. Doubles as the manifest type — the persisted manifest is an
/// annotated deep copy of one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub images: Vec<VariantSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<CatalogInfo>,
}

fn parse(raw: &'static str) -> Template {
    // Embedded documents; `embedded_templates_parse` keeps this infallible.
    serde_json::from_str(raw).expect("embedded template is valid JSON")
}

static IOS_ICON: LazyLock<Template> =
    LazyLock::new(|| parse(include_str!("../templates/ios/icon.json")));
static IOS_IMAGE: LazyLock<Template> =
    LazyLock::new(|| parse(include_str!("../templates/ios/image.json")));
static WATCHOS_ICON: LazyLock<Template> =
    LazyLock::new(|| parse(include_str!("../templates/watchos/icon.json")));
static WATCHOS_IMAGE: LazyLock<Template> =
    LazyLock::new(|| parse(include_str!("../templates/watchos/image.json")));
static MACOS_ICON: LazyLock<Template> =
    LazyLock::new(|| parse(include_str!("../templates/macos/icon.json")));
static MACOS_IMAGE: LazyLock<Template> =
    LazyLock::new(|| parse(include_str!("../templates/macos/image.json")));

/// Every `(platform, kind)` combination backed by a template, in display
/// order. Used by the `templates` listing command and by tests.
pub const ALL_COMBINATIONS: &[(Platform, AssetKind)] = &[
    (Platform::Ios, AssetKind::Icon),
    (Platform::Ios, AssetKind::Image),
    (Platform::Watchos, AssetKind::Icon),
    (Platform::Watchos, AssetKind::Image),
    (Platform::Macos, AssetKind::Icon),
    (Platform::Macos, AssetKind::Image),
];

/// Pure lookup from `(platform, kind)` to the embedded template.
///
/// Web is rejected here: it bypasses templates entirely (see
/// [`plan`](crate::plan)), so asking for its template is an unresolvable
/// combination.
pub fn template_for(
    platform: Platform,
    kind: AssetKind,
) -> Result<&'static Template, TemplateError> {
    match (platform, kind) {
        (Platform::Ios, AssetKind::Icon) => Ok(&IOS_ICON),
        (Platform::Ios, AssetKind::Image) => Ok(&IOS_IMAGE),
        (Platform::Watchos, AssetKind::Icon) => Ok(&WATCHOS_ICON),
        (Platform::Watchos, AssetKind::Image) => Ok(&WATCHOS_IMAGE),
        (Platform::Macos, AssetKind::Icon) => Ok(&MACOS_ICON),
        (Platform::Macos, AssetKind::Image) => Ok(&MACOS_IMAGE),
        (Platform::Web, _) => Err(TemplateError::NotFound { platform, kind }),
    }
}

/// Apple touch icon edge sizes emitted for the web platform.
pub const TOUCH_ICON_SIZES: &[u32] = &[76, 120, 152, 180];

/// Generic favicon edge sizes emitted for the web platform.
pub const FAVICON_SIZES: &[u32] = &[16, 32, 48, 96];
