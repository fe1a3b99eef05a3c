use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use tracing::trace;

use crate::error::ArrayError;

/// Owning handle over one uninitialized allocation of `cap` slots.
///
/// The handle never reads, writes or drops a `T`. It hands out the slot
/// pointer and gives the block back to the allocator when dropped; which
/// slots are live is the owner's business.
pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

// SAFETY: the buffer is uniquely owned, moving it moves the `T`s it may hold
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: shared access only ever yields `&T`
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// The empty state: no allocation, zero slots.
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `cap` slots, all uninitialized.
    ///
    /// Zero slots or a zero-sized `T` never reach the allocator.
    pub(crate) fn allocate(cap: usize) -> Result<Self, ArrayError> {
        if cap == 0 {
            return Ok(Self::new());
        }
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                cap,
                _marker: PhantomData,
            });
        }

        let layout = Layout::array::<T>(cap).map_err(|_| ArrayError::CapacityOverflow)?;
        // SAFETY: `cap > 0` and `T` is not zero-sized, so the layout is non-empty
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw.cast::<T>()).ok_or(ArrayError::out_of_memory(layout))?;

        trace!(
            cap = cap,
            bytes = layout.size(),
            elem_size = mem::size_of::<T>(),
            "allocated buffer"
        );
        Ok(Self {
            ptr,
            cap,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.cap
    }

    /// Whether this handle owns nothing, the state every zero-capacity array is in.
    #[inline]
    pub(crate) fn is_empty_state(&self) -> bool {
        self.cap == 0 && self.ptr == NonNull::dangling()
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        if self.cap == 0 || Self::IS_ZST {
            return;
        }
        // SAFETY: the same layout was validated by `Layout::array` in `allocate`
        unsafe {
            let layout =
                Layout::from_size_align_unchecked(mem::size_of::<T>() * self.cap, mem::align_of::<T>());
            alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
        trace!(cap = self.cap, "released buffer");
    }
}
