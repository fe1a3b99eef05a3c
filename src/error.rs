use std::alloc::Layout;

use thiserror::Error;

/// Failure of an allocating operation on a [`DynamicArray`](crate::DynamicArray).
///
/// A failed operation leaves the array exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    /// The requested slot count does not fit in a `Layout` or exceeds `isize::MAX` bytes.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator could not satisfy a request of `bytes` bytes.
    #[error("out of memory: failed to allocate {bytes} bytes")]
    OutOfMemory { bytes: usize, align: usize },
}

impl ArrayError {
    pub(crate) fn out_of_memory(layout: Layout) -> Self {
        ArrayError::OutOfMemory {
            bytes: layout.size(),
            align: layout.align(),
        }
    }
}

/// Diverging sink for the infallible wrappers around `try_*` operations.
#[cold]
#[inline(never)]
pub(crate) fn handle_error(err: ArrayError) -> ! {
    match err {
        ArrayError::CapacityOverflow => panic!("capacity overflow"),
        ArrayError::OutOfMemory { bytes, align } => match Layout::from_size_align(bytes, align) {
            Ok(layout) => std::alloc::handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
    }
}
