use super::*;
use std::cell::RefCell;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use crossbeam::scope;

struct Droppable(Arc<AtomicUsize>);

impl Drop for Droppable {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_new_does_not_allocate() {
    let v: DynamicArray<String> = DynamicArray::new();
    assert!(v.buf.is_empty_state());
    assert_eq!(v.len, 0);
    assert_eq!(v.capacity(), 0);
    assert!(v.is_empty());
}

#[test]
fn test_basic_push_pop() {
    let mut v = DynamicArray::new();
    v.push(1);
    v.push(2);
    v.push(3);
    assert_eq!(v.len(), 3);
    assert_eq!(v[0], 1);
    assert_eq!(v[1], 2);
    assert_eq!(v[2], 3);
    assert_eq!(v.pop(), Some(3));
    assert_eq!(v.pop(), Some(2));
    assert_eq!(v.pop(), Some(1));
    assert_eq!(v.pop(), None);
    assert_eq!(v.len, 0);
}

#[test]
fn test_push_doubles_capacity() {
    let mut v = DynamicArray::new();
    let mut seen = Vec::new();
    for i in 0..9 {
        v.push(i);
        seen.push(v.capacity());
    }
    assert_eq!(seen, [1, 2, 4, 4, 8, 8, 8, 8, 16]);
}

#[test]
fn test_insert_remove() {
    let mut v = DynamicArray::new();
    v.push(1);
    v.push(3);
    v.insert(1, 2);
    assert_eq!(v.as_ref(), &[1, 2, 3]);
    assert_eq!(v.remove(1), 2);
    assert_eq!(v.as_ref(), &[1, 3]);
    v.insert(2, 4);
    assert_eq!(v.as_ref(), &[1, 3, 4]);
}

#[test]
fn test_grow_and_shrink() {
    let mut v = DynamicArray::with_capacity(2);
    assert_eq!(v.capacity(), 2);
    v.push(1);
    v.push(2);
    v.push(3);
    assert_eq!(v.capacity(), 4);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 3);
    v.pop();
    v.pop();
    v.pop();
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 0);
    assert!(v.buf.is_empty_state());
}

#[test]
fn test_reserve_is_exact_and_keeps_contents() {
    let mut v = dynarray![1, 2, 3];
    let before = v.buf.ptr();

    v.reserve(2);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.buf.ptr(), before);

    v.reserve(10);
    assert_eq!(v.capacity(), 10);
    assert_eq!(v.len, 3);
    assert_eq!(v, [1, 2, 3]);
}

#[test]
fn test_try_reserve() {
    let mut v: DynamicArray<i32> = DynamicArray::new();
    assert!(v.try_reserve(10).is_ok());
    assert_eq!(v.capacity(), 10);
}

#[test]
fn test_try_reserve_overflow_leaves_array_untouched() {
    let mut v = dynarray![7u64, 8, 9];
    let ptr = v.buf.ptr();
    assert_eq!(v.try_reserve(usize::MAX), Err(ArrayError::CapacityOverflow));
    assert_eq!(v.buf.ptr(), ptr);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v, [7, 8, 9]);
}

#[test]
fn test_try_reserve_out_of_memory_leaves_array_untouched() {
    let mut v = dynarray![1u64, 2];
    let huge = isize::MAX as usize / mem::size_of::<u64>();
    match v.try_reserve(huge) {
        Err(ArrayError::OutOfMemory { bytes, .. }) => assert_eq!(bytes, huge * 8),
        other => panic!("expected OutOfMemory, got {:?}", other),
    }
    assert_eq!(v.capacity(), 2);
    assert_eq!(v, [1, 2]);
}

#[test]
#[should_panic(expected = "capacity overflow")]
fn test_reserve_overflow_panics() {
    let mut v: DynamicArray<u32> = DynamicArray::new();
    v.reserve(usize::MAX);
}

#[test]
fn test_raii_drop() {
    let counter = Arc::new(AtomicUsize::new(0));

    {
        let mut v = DynamicArray::new();
        for _ in 0..10 {
            v.push(Droppable(counter.clone()));
        }
        // four reallocations so far, none of which may drop anything
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        v.reserve(64);
        v.shrink_to_fit();
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn test_truncate_and_clear_drop_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..6 {
        v.push(Droppable(counter.clone()));
    }

    v.truncate(4);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    v.truncate(9);
    assert_eq!(v.len, 4);

    v.clear();
    assert_eq!(counter.load(Ordering::SeqCst), 6);
    assert_eq!(v.capacity(), 8);

    drop(v);
    assert_eq!(counter.load(Ordering::SeqCst), 6);
}

#[test]
fn test_drop_runs_back_to_front() {
    struct Logged(u32, Rc<RefCell<Vec<u32>>>);
    impl Drop for Logged {
        fn drop(&mut self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut v = DynamicArray::new();
    for i in 0..4 {
        v.push(Logged(i, log.clone()));
    }
    drop(v);
    assert_eq!(*log.borrow(), [3, 2, 1, 0]);
}

#[test]
fn test_panicking_clone_drops_built_elements_once() {
    let clones = Arc::new(AtomicUsize::new(0));
    let drops = Arc::new(AtomicUsize::new(0));

    struct Bomb {
        clones: Arc<AtomicUsize>,
        drops: Arc<AtomicUsize>,
    }
    impl Clone for Bomb {
        fn clone(&self) -> Self {
            if self.clones.fetch_add(1, Ordering::SeqCst) == 2 {
                panic!("clone failed");
            }
            Bomb {
                clones: self.clones.clone(),
                drops: self.drops.clone(),
            }
        }
    }
    impl Drop for Bomb {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    let seed = Bomb {
        clones: clones.clone(),
        drops: drops.clone(),
    };
    let result = panic::catch_unwind(AssertUnwindSafe(|| DynamicArray::from_elem(5, seed)));
    assert!(result.is_err());
    // the seed plus the two clones that were built
    assert_eq!(drops.load(Ordering::SeqCst), 3);
}

#[test]
fn test_with_len_and_from_elem() {
    let zeros: DynamicArray<i32> = DynamicArray::with_len(4);
    assert_eq!(zeros, [0, 0, 0, 0]);
    assert_eq!(zeros.capacity(), 4);

    let filled = DynamicArray::from_elem(3, String::from("x"));
    assert_eq!(filled.len, 3);
    assert_eq!(filled.capacity(), 3);
    assert!(filled.iter().all(|s| s == "x"));

    let none: DynamicArray<u8> = DynamicArray::with_len(0);
    assert!(none.buf.is_empty_state());
}

#[test]
fn test_literal_sequence_is_exact() {
    let v = dynarray![String::from("a"), String::from("b"), String::from("c")];
    assert_eq!(v.len, 3);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v[0], "a");
    assert_eq!(v[2], "c");
}

#[test]
fn test_clone_has_no_slack() {
    let mut a = DynamicArray::with_capacity(8);
    a.extend_from_slice(&[1, 2, 3, 4, 5]);
    let b = a.clone();
    assert_eq!(b.capacity(), 5);
    assert_eq!(b, a);
    assert_ne!(b.buf.ptr(), a.buf.ptr());
}

#[test]
fn test_clone_from_reuses_buffer_when_large_enough() {
    let mut dst = DynamicArray::with_capacity(8);
    dst.extend_from_slice(&[9, 9]);
    let ptr = dst.buf.ptr();

    let src = dynarray![1, 2, 3, 4];
    dst.clone_from(&src);
    assert_eq!(dst, [1, 2, 3, 4]);
    assert_eq!(dst.buf.ptr(), ptr);
    assert_eq!(dst.capacity(), 8);

    let big = DynamicArray::from_elem(20, 5);
    dst.clone_from(&big);
    assert_eq!(dst.len, 20);
    assert_eq!(dst.capacity(), 20);
}

#[test]
fn test_take_leaves_source_empty() {
    let mut a = dynarray![1, 2, 3];
    let ptr = a.buf.ptr();
    let b = mem::take(&mut a);

    assert_eq!(b.buf.ptr(), ptr);
    assert_eq!(b, [1, 2, 3]);
    assert!(a.buf.is_empty_state());
    assert_eq!(a.len, 0);
}

#[test]
fn test_swap_with_exchanges_buffers() {
    let mut a = dynarray![1, 2, 3];
    let mut b = DynamicArray::with_capacity(10);
    b.push(4);
    let (pa, pb) = (a.buf.ptr(), b.buf.ptr());

    a.swap_with(&mut b);
    assert_eq!((a.buf.ptr(), b.buf.ptr()), (pb, pa));
    assert_eq!((a.len, a.capacity()), (1, 10));
    assert_eq!((b.len, b.capacity()), (3, 3));
}

#[test]
fn test_resize_grows_exactly() {
    let mut v = dynarray![1, 2];
    v.resize(4, 9);
    assert_eq!(v, [1, 2, 9, 9]);
    assert_eq!(v.capacity(), 4);

    v.resize(1, 0);
    assert_eq!(v, [1]);
    assert_eq!(v.capacity(), 4);

    v.resize_default(3);
    assert_eq!(v, [1, 0, 0]);
}

#[test]
fn test_zero_sized_elements() {
    let mut v = DynamicArray::new();
    for _ in 0..5 {
        v.push(());
    }
    assert_eq!(v.len(), 5);
    assert_eq!(v.capacity(), 8);
    v.shrink_to_fit();
    assert_eq!(v.capacity(), 5);
    assert_eq!(v.pop(), Some(()));
    assert_eq!(v.iter().count(), 4);
    assert_ne!(v.begin(), v.end());
}

#[test]
fn test_iterators() {
    let mut v = DynamicArray::new();
    v.push(10);
    v.push(20);
    v.push(30);

    let mut sum = 0;
    for &x in &v {
        sum += x;
    }
    assert_eq!(sum, 60);

    for x in &mut v {
        *x += 1;
    }
    assert_eq!(v[0], 11);

    let collected: Vec<i32> = v.into_iter().collect();
    assert_eq!(collected, vec![11, 21, 31]);
}

#[test]
fn test_into_iter_drops_unconsumed() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut v = DynamicArray::new();
    for _ in 0..5 {
        v.push(Droppable(counter.clone()));
    }

    let mut it = v.into_iter();
    drop(it.next());
    drop(it.next_back());
    assert_eq!(it.len(), 3);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
    drop(it);
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[test]
fn test_default_cursor_matches_unallocated_array() {
    let v: DynamicArray<i32> = DynamicArray::new();
    let c: Cursor<'_, i32> = Cursor::default();
    assert_eq!(v.begin(), v.end());
    assert_eq!(c, v.begin());
    assert!(c.get().is_none());
}

#[test]
fn test_zst_cursors_keep_their_identity() {
    let three = dynarray![(); 3];
    let five = dynarray![(); 5];
    let empty: DynamicArray<()> = DynamicArray::new();

    assert_ne!(Cursor::<()>::default(), three.begin());
    assert_eq!(Cursor::<()>::default(), empty.begin());
    assert_ne!(three.begin(), five.begin());
    assert_ne!(three.begin(), three.end());

    let mut c = three.begin();
    c.increment().increment().increment();
    assert_eq!(c, three.end());
}

#[test]
fn test_cursor_steps_both_ways() {
    let v = dynarray![1, 2, 3];
    let mut c = v.end();
    assert_eq!(**c.decrement(), 3);
    assert_eq!(*c.post_decrement(), 3);
    assert_eq!(*c, 2);
    c.decrement();
    assert_eq!(c, v.begin());
    assert_eq!(c.index(), 0);
}

#[test]
fn test_cursor_mut_writes_through() {
    let mut v = dynarray![1, 2, 3];
    {
        let mut c = v.begin_mut();
        while !c.is_end() {
            if let Some(x) = c.get_mut() {
                *x *= 10;
            }
            c.increment();
        }
    }
    assert_eq!(v, [10, 20, 30]);
}

#[test]
#[should_panic(expected = "dereferenced outside")]
fn test_deref_end_cursor_panics() {
    let v = dynarray![1];
    let _value: i32 = *v.end();
}

#[test]
fn test_concurrency() {
    let mut v = DynamicArray::new();
    for i in 0..100 {
        v.push(i);
    }

    let (summed, walked) = scope(|s| {
        let summed = s.spawn(|_| v.iter().sum::<i32>());
        let walked = s.spawn(|_| {
            let mut c = v.begin();
            let mut n = 0;
            while c != v.end() {
                n += *c.post_increment();
            }
            n
        });
        (summed.join().unwrap(), walked.join().unwrap())
    })
    .unwrap();
    assert_eq!(summed, 4950);
    assert_eq!(walked, 4950);
}

#[test]
fn test_stack_uses_array_back() {
    let mut s = Stack::new();
    s.push(1);
    s.push(2);
    s.push(3);
    assert_eq!(s.container.capacity(), 4);
    assert_eq!(s.top(), Some(&3));
    assert_eq!(s.pop(), Some(3));
    assert_eq!(*s.container.back(), 2);
}

#[test]
fn test_priority_queue_heap_layout() {
    let q = PriorityQueue::from(dynarray![3, 1, 4, 1, 5, 9, 2, 6]);
    let heap = q.container.as_slice();
    for i in 1..heap.len() {
        assert!(heap[(i - 1) / 2] >= heap[i], "heap property broken at {}", i);
    }
    assert_eq!(q.peek(), Some(&9));
}

#[test]
#[should_panic(expected = "Index out of bounds")]
fn test_out_of_bounds_remove() {
    let mut v: DynamicArray<i32> = DynamicArray::new();
    v.remove(0);
}

#[test]
#[should_panic(expected = "Index out of bounds")]
fn test_out_of_bounds_insert() {
    let mut v: DynamicArray<i32> = DynamicArray::new();
    v.insert(1, 10);
}
