use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use tracing::{debug, trace};

use crate::cursor::{Cursor, CursorMut};
use crate::error::{handle_error, ArrayError};
use crate::raw::RawBuffer;

/// A contiguous, growable array that owns its elements.
///
/// Slots `[0, len)` of the buffer hold live elements; slots `[len, capacity)`
/// are uninitialized. Every element is constructed once and dropped once,
/// independently of how many times the backing buffer is replaced.
///
/// ```
/// use dynarray::{dynarray, DynamicArray};
///
/// let mut arr = DynamicArray::new();
/// arr.push(1);
/// arr.push(2);
/// arr.push(3);
/// assert_eq!(arr, dynarray![1, 2, 3]);
/// assert_eq!(arr.capacity(), 4);
/// ```
pub struct DynamicArray<T> {
    pub(crate) buf: RawBuffer<T>,
    pub(crate) len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array. Nothing is allocated until the first growth.
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| handle_error(err))
    }

    pub fn try_with_capacity(capacity: usize) -> Result<Self, ArrayError> {
        Ok(Self {
            buf: RawBuffer::allocate(capacity)?,
            len: 0,
        })
    }

    /// Creates an array of `n` default values; `capacity == len == n`.
    pub fn with_len(n: usize) -> Self
    where
        T: Default,
    {
        let mut arr = Self::with_capacity(n);
        arr.extend_with(n, T::default);
        arr
    }

    /// Creates an array of `n` clones of `value`; `capacity == len == n`.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut arr = Self::with_capacity(n);
        arr.extend_with(n, || value.clone());
        arr
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots, initialized or not.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is initialized and the pointer is non-null and aligned
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as above, and `&mut self` guarantees uniqueness
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    /// Grows the buffer so it holds at least `new_capacity` slots.
    ///
    /// `new_capacity` is a total, not an increment. When growth is needed the
    /// new buffer has exactly `new_capacity` slots.
    pub fn reserve(&mut self, new_capacity: usize) {
        if let Err(err) = self.try_reserve(new_capacity) {
            handle_error(err)
        }
    }

    /// Fallible [`reserve`](Self::reserve). On error the array is unchanged.
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        if self.capacity() >= new_capacity {
            return Ok(());
        }
        self.reallocate(new_capacity)
    }

    /// Appends `value`, doubling the capacity when the buffer is full.
    pub fn push(&mut self, value: T) {
        if let Err(err) = self.try_push(value) {
            handle_error(err)
        }
    }

    /// Fallible [`push`](Self::push). On error `value` is dropped and the array is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), ArrayError> {
        if self.len == self.capacity() {
            self.grow()?;
        }
        self.push_within_capacity(value);
        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range, so it is read once
        Some(unsafe { ptr::read(self.buf.ptr().add(self.len)) })
    }

    /// Inserts `value` at `index`, shifting later elements one slot right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(index <= self.len, "Index out of bounds");
        if self.len == self.capacity() {
            if let Err(err) = self.grow() {
                handle_error(err)
            }
        }
        // SAFETY: len < capacity here, so slots [index, len] are in bounds and
        // the shifted tail stays inside the allocation
        unsafe {
            let p = self.buf.ptr().add(index);
            ptr::copy(p, p.add(1), self.len - index);
            ptr::write(p, value);
        }
        self.len += 1;
    }

    /// Removes and returns the element at `index`, shifting later elements left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "Index out of bounds");
        // SAFETY: index < len, so the slot is live; it is read out exactly once
        // before the tail is shifted over it
        unsafe {
            self.len -= 1;
            let p = self.buf.ptr().add(index);
            let removed = ptr::read(p);
            ptr::copy(p.add(1), p, self.len - index);
            removed
        }
    }

    /// Drops the elements in `[new_len, len)`; never touches capacity.
    pub fn truncate(&mut self, new_len: usize) {
        // Back to front, shortening `len` before each drop so a panicking
        // destructor cannot cause the same slot to be dropped twice.
        while self.len > new_len {
            self.len -= 1;
            // SAFETY: slot `len` was live and has just left the live range
            unsafe { ptr::drop_in_place(self.buf.ptr().add(self.len)) };
        }
    }

    /// Drops every element, keeping the buffer.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `new_len`, default-constructing any new elements.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        if let Err(err) = self.try_resize_default(new_len) {
            handle_error(err)
        }
    }

    pub fn try_resize_default(&mut self, new_len: usize) -> Result<(), ArrayError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    ///
    /// Shrinking drops the tail and keeps the capacity. Growing reserves exactly
    /// `new_len` slots when the buffer is too small.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if let Err(err) = self.try_resize(new_len, value) {
            handle_error(err)
        }
    }

    pub fn try_resize(&mut self, new_len: usize, value: T) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    /// Releases unused slots so that `capacity == len`.
    ///
    /// An empty array returns to the unallocated state.
    pub fn shrink_to_fit(&mut self) {
        if let Err(err) = self.try_shrink_to_fit() {
            handle_error(err)
        }
    }

    pub fn try_shrink_to_fit(&mut self) -> Result<(), ArrayError> {
        if self.len == self.capacity() {
            return Ok(());
        }
        debug!(
            from = self.capacity(),
            to = self.len,
            "shrinking buffer to fit"
        );
        self.reallocate(self.len)
    }

    /// Appends clones of every element of `other`.
    pub fn extend_from_slice(&mut self, other: &[T])
    where
        T: Clone,
    {
        if let Err(err) = self.try_extend_from_slice(other) {
            handle_error(err)
        }
    }

    pub fn try_extend_from_slice(&mut self, other: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        self.reserve_for(other.len())?;
        for item in other {
            self.push_within_capacity(item.clone());
        }
        Ok(())
    }

    /// Replaces the contents with clones of `src`, reusing the buffer when it is large enough.
    pub fn assign_from_slice(&mut self, src: &[T])
    where
        T: Clone,
    {
        if let Err(err) = self.try_assign_from_slice(src) {
            handle_error(err)
        }
    }

    pub fn try_assign_from_slice(&mut self, src: &[T]) -> Result<(), ArrayError>
    where
        T: Clone,
    {
        if src.len() > self.capacity() {
            // Build the replacement first so a failed allocation leaves `self` alone.
            let mut fresh = Self::try_with_capacity(src.len())?;
            for item in src {
                fresh.push_within_capacity(item.clone());
            }
            *self = fresh;
            return Ok(());
        }

        self.truncate(src.len());
        let (head, tail) = src.split_at(self.len);
        self.as_mut_slice().clone_from_slice(head);
        for item in tail {
            self.push_within_capacity(item.clone());
        }
        Ok(())
    }

    /// Copy construction: the result has `capacity == self.len()`.
    pub fn try_clone(&self) -> Result<Self, ArrayError>
    where
        T: Clone,
    {
        let mut copy = Self::try_with_capacity(self.len)?;
        for item in self.as_slice() {
            copy.push_within_capacity(item.clone());
        }
        Ok(copy)
    }

    /// Exchanges buffers, lengths and capacities with `other`. No element is touched.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(&mut self.buf, &mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(item) => item,
            None => panic!("front() called on an empty DynamicArray"),
        }
    }

    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(item) => item,
            None => panic!("front_mut() called on an empty DynamicArray"),
        }
    }

    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(item) => item,
            None => panic!("back() called on an empty DynamicArray"),
        }
    }

    /// # Panics
    ///
    /// Panics if the array is empty.
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(item) => item,
            None => panic!("back_mut() called on an empty DynamicArray"),
        }
    }

    /// Cursor at slot 0.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Cursor one past the last live slot.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Mutable cursor at slot 0.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    /// Moves the live elements into a fresh buffer of exactly `new_cap` slots.
    ///
    /// This is the only place a buffer is replaced. The allocation happens
    /// before any element moves, so an error leaves the array untouched.
    fn reallocate(&mut self, new_cap: usize) -> Result<(), ArrayError> {
        debug_assert!(new_cap >= self.len);
        let new_buf = RawBuffer::allocate(new_cap)?;
        // SAFETY: the buffers are distinct allocations (or zero-byte regions) valid for
        // `len` elements. Ownership of the live elements moves into `new_buf` and the
        // old slots are released below without being dropped.
        unsafe { ptr::copy_nonoverlapping(self.buf.ptr(), new_buf.ptr(), self.len) };
        trace!(
            from = self.capacity(),
            to = new_cap,
            len = self.len,
            "reallocated buffer"
        );
        self.buf = new_buf;
        debug_assert!(new_cap != 0 || self.buf.is_empty_state());
        Ok(())
    }

    /// Growth step for a full buffer: 0 -> 1, otherwise doubling.
    fn grow(&mut self) -> Result<(), ArrayError> {
        let new_cap = match self.capacity() {
            0 => 1,
            cap => cap.checked_mul(2).ok_or(ArrayError::CapacityOverflow)?,
        };
        self.reallocate(new_cap)
    }

    /// Makes room for `additional` more elements, at least doubling when it has to grow.
    fn reserve_for(&mut self, additional: usize) -> Result<(), ArrayError> {
        let needed = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        if needed <= self.capacity() {
            return Ok(());
        }
        let doubled = self.capacity().saturating_mul(2);
        self.reallocate(needed.max(doubled))
    }

    fn resize_with(&mut self, new_len: usize, make: impl FnMut() -> T) -> Result<(), ArrayError> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.try_reserve(new_len)?;
        self.extend_with(new_len - self.len, make);
        Ok(())
    }

    /// Constructs `n` elements at the tail. Capacity must already cover them.
    ///
    /// `len` is bumped after each write, so a panicking `make` leaves only the
    /// elements built so far live.
    fn extend_with(&mut self, n: usize, mut make: impl FnMut() -> T) {
        debug_assert!(self.len + n <= self.capacity());
        for _ in 0..n {
            self.push_within_capacity(make());
        }
    }

    #[inline]
    fn push_within_capacity(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: slot `len` is inside the buffer and uninitialized
        unsafe { ptr::write(self.buf.ptr().add(self.len), value) };
        self.len += 1;
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // elements first, then `buf` releases the block
        self.truncate(0);
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| handle_error(err))
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign_from_slice(source.as_slice());
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynamicArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynamicArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    /// Literal-sequence construction: `capacity == len == N`, order preserved.
    fn from(items: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        for item in items {
            arr.push_within_capacity(item);
        }
        arr
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        let mut arr = Self::with_capacity(items.len());
        arr.extend_from_slice(items);
        arr
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.reserve_for(lower) {
            handle_error(err)
        }
        for item in iter {
            self.push(item);
        }
    }
}
