//! A contiguous, growable array with explicit slot lifecycle.
//!
//! [`DynamicArray`] owns one heap buffer, grows it by doubling on append and
//! moves its elements into a fresh buffer whenever capacity changes. Every
//! allocating operation has a `try_` form reporting [`ArrayError`]. Cursors
//! walk the live range in both directions; [`Stack`] and [`PriorityQueue`]
//! are built on top of the array.

#[macro_use]
mod macros;

mod array;
mod cursor;
mod error;
mod iter;
mod raw;

pub mod adapters;

pub use adapters::{PriorityQueue, Stack};
pub use array::DynamicArray;
pub use cursor::{Cursor, CursorMut};
pub use error::ArrayError;
pub use iter::IntoIter;

#[cfg(test)]
mod tests;
