//! Pure calculation functions for variant dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// A single responsive variant to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSize {
    /// Requested breakpoint (width in pixels).
    pub target: u32,
    /// Calculated output width.
    pub width: u32,
    /// Calculated output height.
    pub height: u32,
}

/// Calculate which fit variants to generate for a screenshot.
///
/// Filters out widths larger than the original so images are never upscaled,
/// and calculates output heights preserving the source aspect ratio. If all
/// requested widths exceed the original, the original size is returned as the
/// only entry.
///
/// # Arguments
/// * `original` - Original image dimensions (width, height)
/// * `widths` - Requested breakpoint widths
pub fn calculate_fit_sizes(original: (u32, u32), widths: &[u32]) -> Vec<VariantSize> {
    let (orig_w, orig_h) = original;

    let mut result: Vec<VariantSize> = widths
        .iter()
        .filter(|&&w| w <= orig_w)
        .map(|&target| {
            let ratio = target as f64 / orig_w as f64;
            VariantSize {
                target,
                width: target,
                height: (orig_h as f64 * ratio).round() as u32,
            }
        })
        .collect();

    // If original is narrower than all requested widths, use original
    if result.is_empty() {
        result.push(VariantSize {
            target: orig_w,
            width: orig_w,
            height: orig_h,
        });
    }

    result
}

/// Height of a cover crop at `width` for the given aspect ratio.
///
/// # Examples
/// ```
/// # use monofolio::imaging::cover_height;
/// // 1:1 square at 320px wide → 320px tall
/// assert_eq!(cover_height((1, 1), 320), 320);
///
/// // 4:5 portrait at 320px wide → 400px tall
/// assert_eq!(cover_height((4, 5), 320), 400);
/// ```
pub fn cover_height(aspect: (u32, u32), width: u32) -> u32 {
    let (aspect_w, aspect_h) = aspect;
    (width as f64 * aspect_h as f64 / aspect_w as f64).round() as u32
}

/// Largest cover-crop width the source can supply without upscaling.
///
/// A cover crop at width `w` consumes `w` source columns and
/// `w * aspect_h / aspect_w` source rows, so the limit is whichever
/// dimension runs out first.
pub fn max_cover_width(source: (u32, u32), aspect: (u32, u32)) -> u32 {
    let (src_w, src_h) = source;
    let (aspect_w, aspect_h) = aspect;
    let height_limited = (src_h as f64 * aspect_w as f64 / aspect_h as f64).floor() as u32;
    src_w.min(height_limited)
}

/// Calculate which cover variants to generate for a portrait.
///
/// Each entry crops the source to the target aspect ratio at the requested
/// width. Widths the source cannot cover without upscaling are skipped; if
/// none fit, the largest coverable width is used as the only entry.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `aspect` - Target aspect ratio as (width, height)
/// * `widths` - Requested breakpoint widths
pub fn calculate_cover_sizes(
    source: (u32, u32),
    aspect: (u32, u32),
    widths: &[u32],
) -> Vec<VariantSize> {
    let max_width = max_cover_width(source, aspect);

    let mut result: Vec<VariantSize> = widths
        .iter()
        .filter(|&&w| w <= max_width)
        .map(|&target| VariantSize {
            target,
            width: target,
            height: cover_height(aspect, target),
        })
        .collect();

    if result.is_empty() && max_width > 0 {
        result.push(VariantSize {
            target: max_width,
            width: max_width,
            height: cover_height(aspect, max_width),
        });
    }

    result
}
