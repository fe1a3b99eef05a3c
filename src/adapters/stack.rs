use crate::array::DynamicArray;

/// LIFO stack whose top is the back of the underlying array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    pub(crate) container: DynamicArray<T>,
}

impl<T> Stack<T> {
    pub const fn new() -> Self {
        Self {
            container: DynamicArray::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.container.push(value);
    }

    /// Removes the top element; `None` when the stack is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.container.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.container.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.container.last_mut()
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn clear(&mut self) {
        self.container.clear();
    }

    /// Gives back the storage, bottom of the stack first.
    pub fn into_inner(self) -> DynamicArray<T> {
        self.container
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<DynamicArray<T>> for Stack<T> {
    /// The last element of `container` becomes the top.
    fn from(container: DynamicArray<T>) -> Self {
        Self { container }
    }
}
