//! Containers layered on top of [`DynamicArray`](crate::DynamicArray).

mod priority_queue;
mod stack;

pub use priority_queue::PriorityQueue;
pub use stack::Stack;
