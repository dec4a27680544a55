use core::{
    ops::{Deref, DerefMut},
    ptr, slice,
};
use std::alloc::{Layout, alloc_zeroed, dealloc};

use crate::{KernelError, kernel::ALIGNMENT};

/// An owned, contiguous f32 allocation whose base address satisfies the
/// alignment required by the widest vector register the build targets.
///
/// The alignment and element type are fixed at allocation time and enforced by
/// the type itself; no raw byte view is ever exposed. The memory is released
/// exactly once when the buffer is dropped.
#[derive(Debug)]
pub struct AlignedBuffer {
    ptr: *mut f32,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Allocates `len` zeroed f32 elements at the build's vector alignment.
    pub fn zeroed(len: usize) -> Result<Self, KernelError> {
        Self::with_alignment(len, ALIGNMENT)
    }

    /// Allocates `len` zeroed f32 elements at a caller-specified power-of-two
    /// byte alignment.
    ///
    /// Fails with [`KernelError::Allocation`] when the alignment is zero, not
    /// a power of two, smaller than the f32 alignment, or when the underlying
    /// allocator cannot satisfy the request.
    pub fn with_alignment(len: usize, alignment: usize) -> Result<Self, KernelError> {
        if alignment < align_of::<f32>() {
            return Err(KernelError::Allocation { len, alignment });
        }

        // A zero-size allocation is undefined; reserve at least one element so
        // empty buffers still carry a valid, aligned base address.
        let size = len.max(1) * size_of::<f32>();
        let layout = Layout::from_size_align(size, alignment)
            .map_err(|_| KernelError::Allocation { len, alignment })?;

        unsafe {
            let ptr = alloc_zeroed(layout) as *mut f32;

            if ptr.is_null() {
                return Err(KernelError::Allocation { len, alignment });
            }

            Ok(Self { ptr, len, layout })
        }
    }

    /// Copies `data` into a freshly allocated buffer at the build's vector
    /// alignment.
    pub fn from_vec(data: Vec<f32>) -> Result<Self, KernelError> {
        let buffer = Self::zeroed(data.len())?;

        unsafe {
            ptr::copy_nonoverlapping(data.as_ptr(), buffer.ptr, data.len());
        }

        Ok(buffer)
    }

    /// Byte alignment of the base address.
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }
}

impl Deref for AlignedBuffer {
    type Target = [f32];

    fn deref(&self) -> &Self::Target {
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl DerefMut for AlignedBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        unsafe {
            dealloc(self.ptr as *mut u8, self.layout);
        }
    }
}

impl Clone for AlignedBuffer {
    fn clone(&self) -> Self {
        let buffer = Self::with_alignment(self.len, self.layout.align())
            .expect("failed to allocate aligned memory for clone");

        unsafe {
            ptr::copy_nonoverlapping(self.ptr, buffer.ptr, self.len);
        }

        buffer
    }
}

// Safety: AlignedBuffer owns its memory exclusively and can be sent between threads.
unsafe impl Send for AlignedBuffer {}

// Safety: AlignedBuffer can be shared between threads (immutable access).
unsafe impl Sync for AlignedBuffer {}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_alignment_contract() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..1000 {
            let len = rng.random_range(1..4096);
            let buffer = AlignedBuffer::zeroed(len).expect("allocation failed");

            assert_eq!(buffer.as_ptr().addr() % ALIGNMENT, 0);
            assert_eq!(buffer.len(), len);
            assert!(buffer.iter().all(|&x| x == 0.0));
        }
    }

    #[test]
    fn test_explicit_alignments() {
        for alignment in [8, 32, 64, 128, 4096] {
            let buffer = AlignedBuffer::with_alignment(257, alignment).expect("allocation failed");
            assert_eq!(buffer.as_ptr().addr() % alignment, 0);
            assert_eq!(buffer.alignment(), alignment);
        }
    }

    #[test]
    fn test_rejects_invalid_alignment() {
        assert!(matches!(
            AlignedBuffer::with_alignment(64, 0),
            Err(KernelError::Allocation { len: 64, alignment: 0 })
        ));
        assert!(matches!(
            AlignedBuffer::with_alignment(64, 48),
            Err(KernelError::Allocation { .. })
        ));
        assert!(matches!(
            AlignedBuffer::with_alignment(64, 2),
            Err(KernelError::Allocation { .. })
        ));
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = AlignedBuffer::zeroed(0).expect("allocation failed");
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_ptr().addr() % ALIGNMENT, 0);
    }

    #[test]
    fn test_from_vec_round_trip() {
        let data: Vec<f32> = (0..100).map(|i| i as f32 * 0.5).collect();
        let buffer = AlignedBuffer::from_vec(data.clone()).expect("allocation failed");

        assert_eq!(&buffer[..], &data[..]);
        assert_eq!(buffer.as_ptr().addr() % ALIGNMENT, 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = AlignedBuffer::from_vec(vec![1.0, 2.0, 3.0]).expect("allocation failed");
        let copy = original.clone();

        original[0] = 9.0;
        assert_eq!(copy[0], 1.0);
        assert_eq!(copy.as_ptr().addr() % ALIGNMENT, 0);
    }
}
