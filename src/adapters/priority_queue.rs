use crate::array::DynamicArray;

/// Max-heap priority queue stored level by level in a [`DynamicArray`].
///
/// The children of slot `i` live at `2i + 1` and `2i + 2`.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    pub(crate) container: DynamicArray<T>,
}

impl<T: Ord> PriorityQueue<T> {
    pub const fn new() -> Self {
        Self {
            container: DynamicArray::new(),
        }
    }

    pub fn push(&mut self, value: T) {
        self.container.push(value);
        let last = self.container.len() - 1;
        sift_up(&mut self.container, last);
    }

    /// Removes the greatest element.
    pub fn pop(&mut self) -> Option<T> {
        let len = self.container.len();
        if len == 0 {
            return None;
        }
        self.container.swap(0, len - 1);
        let top = self.container.pop();
        let len = self.container.len();
        sift_down(&mut self.container, 0, len);
        top
    }

    /// The greatest element, if any.
    pub fn peek(&self) -> Option<&T> {
        self.container.first()
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    /// Heap-sorts the elements in place, ascending, and returns the storage.
    pub fn into_sorted(self) -> DynamicArray<T> {
        let mut data = self.container;
        for end in (1..data.len()).rev() {
            data.swap(0, end);
            sift_down(&mut data, 0, end);
        }
        data
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<DynamicArray<T>> for PriorityQueue<T> {
    /// Bottom-up heapify in O(n).
    fn from(mut container: DynamicArray<T>) -> Self {
        let len = container.len();
        for i in (0..len / 2).rev() {
            sift_down(&mut container, i, len);
        }
        Self { container }
    }
}

fn sift_up<T: Ord>(heap: &mut [T], mut i: usize) {
    while i > 0 {
        let parent = (i - 1) / 2;
        if heap[i] <= heap[parent] {
            break;
        }
        heap.swap(i, parent);
        i = parent;
    }
}

/// Restores the heap property below `i`, looking only at `heap[..end]`.
fn sift_down<T: Ord>(heap: &mut [T], mut i: usize, end: usize) {
    loop {
        let left = 2 * i + 1;
        if left >= end {
            break;
        }
        let right = left + 1;
        let child = if right < end && heap[right] > heap[left] {
            right
        } else {
            left
        };
        if heap[i] >= heap[child] {
            break;
        }
        heap.swap(i, child);
        i = child;
    }
}
