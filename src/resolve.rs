//! Pure dimension resolution for output variants.
//!
//! All functions here are pure and testable without any I/O or images. Given
//! a template variant, the generation request, and the source's native
//! dimensions, [`resolve_variant`] computes the variant's [`ResizeTarget`] —
//! either an exact pixel box or a single pinned edge with the other edge left
//! to the source aspect ratio.
//!
//! The "auto" sentinel of the historical tool never survives past this
//! module: a resolved target is total. Planning guarantees at least one edge
//! is concrete (the default @1x width is derived from the source), so the
//! executor only ever sees `Exact`, `FitWidth`, or `FitHeight`.

use crate::request::{AssetKind, Dimension, GenerationRequest};
use crate::templates::VariantSpec;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("template variant has no size spec")]
    MissingSize,
    #[error("invalid size spec '{0}' (expected WxH)")]
    BadSizeSpec(String),
    #[error("invalid scale suffix '{0}' (expected Nx)")]
    BadScale(String),
}

/// Fully resolved target dimensions for one resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeTarget {
    /// Resize to this exact box, ignoring the source aspect ratio.
    Exact { width: u32, height: u32 },
    /// Pin the width; height follows the source aspect ratio.
    FitWidth(u32),
    /// Pin the height; width follows the source aspect ratio.
    FitHeight(u32),
}

impl ResizeTarget {
    /// Collapse to concrete pixel dimensions against a source aspect ratio.
    ///
    /// # Examples
    /// ```
    /// # use iconsmith::resolve::ResizeTarget;
    /// // 300x600 source, width pinned at 100 → 100x200
    /// assert_eq!(ResizeTarget::FitWidth(100).against((300, 600)), (100, 200));
    /// // exact targets ignore the source
    /// let exact = ResizeTarget::Exact { width: 320, height: 240 };
    /// assert_eq!(exact.against((300, 600)), (320, 240));
    /// ```
    pub fn against(self, source: (u32, u32)) -> (u32, u32) {
        let (src_w, src_h) = source;
        match self {
            Self::Exact { width, height } => (width, height),
            Self::FitWidth(width) => {
                let height = (width as f64 * src_h as f64 / src_w as f64).round() as u32;
                (width, height.max(1))
            }
            Self::FitHeight(height) => {
                let width = (height as f64 * src_w as f64 / src_h as f64).round() as u32;
                (width.max(1), height)
            }
        }
    }
}

/// Parse a `"WxH"` size spec. Sizes may be fractional (`"83.5x83.5"`).
pub(crate) fn parse_size_spec(spec: &str) -> Result<(f64, f64), ResolveError> {
    let bad = || ResolveError::BadSizeSpec(spec.to_string());
    let (w, h) = spec.split_once('x').ok_or_else(bad)?;
    let w: f64 = w.parse().map_err(|_| bad())?;
    let h: f64 = h.parse().map_err(|_| bad())?;
    if w <= 0.0 || h <= 0.0 {
        return Err(bad());
    }
    Ok((w, h))
}

/// Parse a `"Nx"` scale suffix into its integer factor.
pub(crate) fn parse_scale(scale: &str) -> Result<u32, ResolveError> {
    let bad = || ResolveError::BadScale(scale.to_string());
    let factor: u32 = scale.strip_suffix('x').ok_or_else(bad)?.parse().map_err(|_| bad())?;
    if factor == 0 {
        return Err(bad());
    }
    Ok(factor)
}

/// Compute the target dimensions for one template variant.
///
/// - **Icon kinds**: the catalog is fixed by platform convention, so the
///   target is `size × scale` exactly and any requested width/height is
///   ignored. Fractional base sizes round after multiplication
///   (`83.5 × 2 → 167`).
/// - **Image kinds**: the request's @1x dimensions are scaled per variant.
///   With neither given, the @1x width defaults to a third of the source's
///   native width (the source is treated as the @3x master) and height stays
///   aspect-free. With one given, the other stays aspect-free. With both,
///   the target is exact.
pub fn resolve_variant(
    variant: &VariantSpec,
    request: &GenerationRequest,
    source: (u32, u32),
) -> Result<ResizeTarget, ResolveError> {
    let scale = parse_scale(&variant.scale)?;

    match request.kind {
        AssetKind::Icon => {
            let spec = variant.size.as_deref().ok_or(ResolveError::MissingSize)?;
            let (w, h) = parse_size_spec(spec)?;
            Ok(ResizeTarget::Exact {
                width: (w * scale as f64).round() as u32,
                height: (h * scale as f64).round() as u32,
            })
        }
        AssetKind::Image => {
            let width = request.width.scaled(scale);
            let height = request.height.scaled(scale);
            Ok(match (width, height) {
                (Dimension::Pixels(w), Dimension::Pixels(h)) => {
                    ResizeTarget::Exact { width: w, height: h }
                }
                (Dimension::Pixels(w), Dimension::Auto) => ResizeTarget::FitWidth(w),
                (Dimension::Auto, Dimension::Pixels(h)) => ResizeTarget::FitHeight(h),
                (Dimension::Auto, Dimension::Auto) => {
                    // Source is the @3x master: @1x width is a third of it.
                    let base = (source.0 / 3).max(1);
                    ResizeTarget::FitWidth(base * scale)
                }
            })
        }
    }
}
