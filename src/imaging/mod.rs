//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize → AVIF / WebP** | Lanczos3 + rav1e / lossless WebP |
//! | **Cover crop** | `resize_to_fill` + `unsharpen` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for variant dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    VariantSize, calculate_cover_sizes, calculate_fit_sizes, cover_height, max_cover_width,
};
pub use params::{CoverParams, Quality, ResizeParams, Sharpening};
pub use rust_backend::{RustBackend, supported_input_extensions};
