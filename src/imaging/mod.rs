//! Image processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Probe** | `image::ImageReader` (dims + detected format) |
//! | **Resize → encode** | Lanczos3 + the `image` crate encoders |
//!
//! The module is split into:
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//!
//! Dimension math lives outside imaging, in [`resolve`](crate::resolve) —
//! it is planning logic, not pixel work.

pub mod backend;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend, SourceInfo};
pub use params::{EncodeFormat, Quality, ResizeParams};
pub use rust_backend::RustBackend;
