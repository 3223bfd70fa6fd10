//! Generation request types and CLI-facing alias normalization.
//!
//! A [`GenerationRequest`] is the immutable description of one asset-set
//! generation: which template category ([`AssetKind`]), which platform family
//! ([`Platform`]), the explicit @1x dimensions if any ([`Dimension`]), and the
//! output encoding ([`OutputFormat`]).
//!
//! ## Alias Normalization
//!
//! Users type platform and kind names in several historical spellings. All of
//! them normalize to the small closed enums below before any template lookup:
//!
//! - `iphone`, `ipad`, `ios` → iOS family
//! - `watch`, `watchos` → watchOS family
//! - `mac`, `osx`, `macos` → macOS family
//! - `iconset` → `icon`, `imageset` → `image` (the `-set` spellings select
//!   the same template category)
//!
//! Unrecognized CLI input falls back to the documented default (`icon`,
//! `ios`, `source`) rather than failing — the `*_or_default` constructors are
//! the permissive entry points used by the CLI, while the typed enums keep the
//! inner generation contract closed.

use crate::imaging::Quality;

/// Which template category to generate: a fixed platform icon catalog or a
/// free-form multi-scale image set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssetKind {
    #[default]
    Icon,
    Image,
}

impl AssetKind {
    /// Parse a kind name, accepting the `-set` alias spellings.
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "icon" | "iconset" => Some(Self::Icon),
            "image" | "imageset" => Some(Self::Image),
            _ => None,
        }
    }

    /// Permissive CLI parsing: unrecognized input falls back to `icon`.
    pub fn from_alias_or_default(s: &str) -> Self {
        Self::from_alias(s).unwrap_or_default()
    }

    pub fn is_icon(self) -> bool {
        matches!(self, Self::Icon)
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Icon => "icon",
            Self::Image => "image",
        })
    }
}

/// Normalized platform family. Device-level names (`iphone`, `ipad`, `watch`,
/// `mac`) collapse into their family before template lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    Ios,
    Watchos,
    Macos,
    Web,
}

impl Platform {
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ios" | "iphone" | "ipad" => Some(Self::Ios),
            "watchos" | "watch" => Some(Self::Watchos),
            "macos" | "mac" | "osx" => Some(Self::Macos),
            "web" => Some(Self::Web),
            _ => None,
        }
    }

    /// Permissive CLI parsing: unrecognized input falls back to `ios`.
    pub fn from_alias_or_default(s: &str) -> Self {
        Self::from_alias(s).unwrap_or_default()
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ios => "ios",
            Self::Watchos => "watchos",
            Self::Macos => "macos",
            Self::Web => "web",
        })
    }
}

/// An explicitly requested @1x dimension, or "derive it from the source".
///
/// This replaces the historical numeric "auto" sentinel with a tagged value so
/// scale multiplication stays total: `Auto.scaled(n)` is `Auto`, never a
/// numeric artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Pixels(u32),
}

impl Dimension {
    /// Multiply by an integer scale factor. `Auto` is absorbing.
    pub fn scaled(self, factor: u32) -> Self {
        match self {
            Self::Auto => Self::Auto,
            Self::Pixels(n) => Self::Pixels(n * factor),
        }
    }

    /// Permissive CLI parsing: `"auto"`, zero, or anything unparseable is
    /// `Auto`; a positive integer is `Pixels`.
    pub fn from_arg(s: &str) -> Self {
        match s.trim().parse::<u32>() {
            Ok(n) if n > 0 => Self::Pixels(n),
            _ => Self::Auto,
        }
    }
}

/// Requested output encoding. `Source` preserves the source file's format
/// (and its extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Bmp,
    Gif,
    Jpeg,
    Png,
    Tiff,
    #[default]
    Source,
}

impl OutputFormat {
    pub fn from_alias(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            "jpeg" | "jpg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "tiff" | "tif" => Some(Self::Tiff),
            "source" | "default" => Some(Self::Source),
            _ => None,
        }
    }

    /// Permissive CLI parsing: unrecognized input preserves the source format.
    pub fn from_alias_or_default(s: &str) -> Self {
        Self::from_alias(s).unwrap_or_default()
    }
}

/// Immutable description of one asset-set generation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub kind: AssetKind,
    pub platform: Platform,
    /// Explicit @1x width, ignored for icon kinds (catalog sizes are fixed).
    pub width: Dimension,
    /// Explicit @1x height, ignored for icon kinds.
    pub height: Dimension,
    pub format: OutputFormat,
    /// Lossy-encoding quality (JPEG only; lossless formats ignore it).
    pub quality: Quality,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            kind: AssetKind::Icon,
            platform: Platform::Ios,
            width: Dimension::Auto,
            height: Dimension::Auto,
            format: OutputFormat::Source,
            quality: Quality::default(),
        }
    }
}
