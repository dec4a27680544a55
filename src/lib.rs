//! SIMD accelerated FIR frame accumulation and inner product kernels for
//! dense f32 buffers.
//!
//! The kernel variant (scalar, 8-wide AVX+FMA, or 16-wide AVX-512) is selected
//! at build time from the enabled target features; see [`kernel`] for the
//! lane-width abstraction and [`kernel::description`] for what a given build
//! compiled to.

mod buffer;
mod error;
mod fir;
mod frame;
mod inner;
pub mod kernel;
pub mod synth;

pub use buffer::AlignedBuffer;
pub use error::KernelError;
pub use fir::FirFilter;
pub use frame::Frame;
pub use inner::{inner_product, inner_product_scalar};
pub use kernel::{ALIGNMENT, LANE_WIDTH};
