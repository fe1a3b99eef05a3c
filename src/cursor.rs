//! Positional cursors over a [`DynamicArray`](crate::DynamicArray).
//!
//! A cursor is a slot index into the array's live range. It borrows the
//! array, so no operation that could move the buffer (`push`, `reserve`,
//! `shrink_to_fit`, ...) can run while a cursor is alive.
//!
//! Stepping is unchecked and may leave `[begin, end]`; only dereferencing
//! checks the position. `Cursor` is `Copy` and supports both prefix style
//! (`increment`, returning `&mut Self`) and postfix style (`post_increment`,
//! returning the position before the step).
//!
//! ```
//! use dynarray::dynarray;
//!
//! let arr = dynarray!['a', 'b', 'c'];
//! let mut seen = String::new();
//! let mut it = arr.begin();
//! while it != arr.end() {
//!     seen.push(*it.post_increment());
//! }
//! assert_eq!(seen, "abc");
//! ```

use std::fmt;
use std::ops::Deref;
use std::ptr::{self, NonNull};
use std::slice;

/// Read-only cursor. The default cursor belongs to no array.
pub struct Cursor<'a, T> {
    slice: &'a [T],
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(slice: &'a [T], index: usize) -> Self {
        Self { slice, index }
    }

    /// Slot index this cursor refers to.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the cursor sits one past the last element.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.slice.len()
    }

    /// The element under the cursor, or `None` when it is out of range.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.slice.get(self.index)
    }

    /// # Safety
    ///
    /// The cursor must point at a live slot (`index < len`).
    #[inline]
    pub unsafe fn get_unchecked(&self) -> &'a T {
        // SAFETY: upheld by the caller
        unsafe { self.slice.get_unchecked(self.index) }
    }

    /// Prefix `++`.
    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        self.index = self.index.wrapping_add(1);
        self
    }

    /// Postfix `++`: steps forward and returns the cursor as it was.
    #[inline]
    pub fn post_increment(&mut self) -> Self {
        let prev = *self;
        self.index = self.index.wrapping_add(1);
        prev
    }

    /// Prefix `--`.
    #[inline]
    pub fn decrement(&mut self) -> &mut Self {
        self.index = self.index.wrapping_sub(1);
        self
    }

    /// Postfix `--`.
    #[inline]
    pub fn post_decrement(&mut self) -> Self {
        let prev = *self;
        self.index = self.index.wrapping_sub(1);
        prev
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> Default for Cursor<'_, T> {
    fn default() -> Self {
        // Same base address an unallocated array reports, so a default cursor
        // equals `begin()` and `end()` of such an array.
        // SAFETY: a zero-length slice may start at any non-null aligned pointer
        let slice = unsafe { slice::from_raw_parts(NonNull::<T>::dangling().as_ptr(), 0) };
        Self { slice, index: 0 }
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    /// Cursors are equal when they name the same slot of the same buffer.
    ///
    /// Zero-sized elements share one dangling base address, so the live
    /// length takes part in the comparison as well.
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.slice.as_ptr(), other.slice.as_ptr())
            && self.slice.len() == other.slice.len()
            && self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> Deref for Cursor<'_, T> {
    type Target = T;

    /// # Panics
    ///
    /// Panics when the cursor is not on a live slot, `end()` included.
    fn deref(&self) -> &T {
        match self.get() {
            Some(item) => item,
            None => panic!(
                "cursor at index {} dereferenced outside an array of length {}",
                self.index,
                self.slice.len()
            ),
        }
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}

/// Cursor with write access. Not `Copy`, so it has no postfix forms.
pub struct CursorMut<'a, T> {
    slice: &'a mut [T],
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(slice: &'a mut [T], index: usize) -> Self {
        Self { slice, index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.index == self.slice.len()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.slice.get(self.index)
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.slice.get_mut(self.index)
    }

    #[inline]
    pub fn increment(&mut self) -> &mut Self {
        self.index = self.index.wrapping_add(1);
        self
    }

    #[inline]
    pub fn decrement(&mut self) -> &mut Self {
        self.index = self.index.wrapping_sub(1);
        self
    }

    /// Downgrades to a read-only cursor at the same position.
    pub fn into_cursor(self) -> Cursor<'a, T> {
        Cursor::new(self.slice, self.index)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}
