use crate::{AlignedBuffer, KernelError};

/// A dense rows × cols f32 matrix stored row-major in vector-aligned memory.
///
/// Every frame buffer satisfies the alignment of the widest vector register
/// the build targets, so kernels may use aligned loads over whole rows.
#[derive(Clone, Debug)]
pub struct Frame {
    rows: usize,
    cols: usize,
    data: AlignedBuffer,
}

impl Frame {
    /// Creates a zero-filled frame.
    pub fn zeroed(rows: usize, cols: usize) -> Result<Self, KernelError> {
        let data = AlignedBuffer::zeroed(rows * cols)?;
        Ok(Self { rows, cols, data })
    }

    /// Creates a frame whose pixel at (row, col) is `f(row, col)`.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self, KernelError> {
        let mut frame = Self::zeroed(rows, cols)?;

        for row in 0..rows {
            for col in 0..cols {
                frame.data[row * cols + col] = f(row, col);
            }
        }

        Ok(frame)
    }

    /// Number of pixel rows (height).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of pixel columns (width).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the frame holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame dimensions as (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether both frames share the same dimensions.
    pub fn same_shape(&self, other: &Frame) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }

    /// Pixel value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.cols + col]
    }

    /// Row-major pixel slice, base address vector-aligned.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mutable row-major pixel slice, base address vector-aligned.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::ALIGNMENT;

    #[test]
    fn test_zeroed_frame() {
        let frame = Frame::zeroed(600, 800).expect("allocation failed");

        assert_eq!(frame.shape(), (600, 800));
        assert_eq!(frame.len(), 480_000);
        assert_eq!(frame.as_slice().as_ptr().addr() % ALIGNMENT, 0);
        assert!(frame.as_slice().iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_from_fn_row_major() {
        let frame = Frame::from_fn(4, 8, |row, col| (row * 8 + col) as f32).expect("allocation failed");

        assert_eq!(frame.get(0, 0), 0.0);
        assert_eq!(frame.get(1, 0), 8.0);
        assert_eq!(frame.get(3, 7), 31.0);
        assert_eq!(frame.as_slice()[17], 17.0);
    }

    #[test]
    fn test_same_shape() {
        let a = Frame::zeroed(6, 8).expect("allocation failed");
        let b = Frame::zeroed(6, 8).expect("allocation failed");
        let c = Frame::zeroed(8, 6).expect("allocation failed");

        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }
}
