/// Errors the kernel entry points can return.
#[derive(Copy, Clone, Hash, PartialEq, Eq)]
pub enum KernelError {
    /// An aligned memory request could not be satisfied.
    Allocation {
        /// Requested element count.
        len: usize,
        /// Requested byte alignment.
        alignment: usize,
    },
    /// Frames in the active window disagree in dimensions.
    ShapeMismatch {
        /// Dimensions (rows, cols) of the first frame in the window.
        expected: (usize, usize),
        /// Dimensions (rows, cols) of the offending frame.
        got: (usize, usize),
    },
    /// The requested window exceeds the available frames.
    IndexOutOfRange {
        /// Starting frame index of the window.
        offset: usize,
        /// Number of filter taps (window length).
        taps: usize,
        /// Number of frames actually available.
        frames: usize,
    },
}

impl core::fmt::Display for KernelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Allocation { len, alignment } => {
                write!(
                    f,
                    "failed to allocate {len} f32 elements aligned to {alignment} bytes"
                )
            }
            Self::ShapeMismatch { expected, got } => {
                write!(
                    f,
                    "frame dimensions {}x{} do not match the window's first frame {}x{}",
                    got.0, got.1, expected.0, expected.1
                )
            }
            Self::IndexOutOfRange {
                offset,
                taps,
                frames,
            } => {
                write!(
                    f,
                    "window [{offset}, {}) exceeds the {frames} available frames",
                    offset.saturating_add(*taps)
                )
            }
        }
    }
}

impl core::fmt::Debug for KernelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self, f)
    }
}

impl std::error::Error for KernelError {}
