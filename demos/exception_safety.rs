use dynarray::{ArrayError, DynamicArray};
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Tracked(usize, Arc<AtomicUsize>);

impl Drop for Tracked {
    fn drop(&mut self) {
        println!("Dropping element {}", self.0);
        self.1.fetch_add(1, Ordering::SeqCst);
    }
}

struct Fragile;

impl Clone for Fragile {
    fn clone(&self) -> Self {
        panic!("Fragile cannot be cloned");
    }
}

fn main() {
    println!("--- Exception Safety & RAII Example ---");
    let drop_count = Arc::new(AtomicUsize::new(0));

    {
        let mut arr = DynamicArray::new();
        for i in 0..3 {
            arr.push(Tracked(i, drop_count.clone()));
        }
        println!("Array created with 3 elements, cap {}.", arr.capacity());
        arr.reserve(32);
        println!("Reallocated to cap {} without dropping anything.", arr.capacity());
        // Scope ends here, arr is dropped
    }

    println!("Total elements dropped: {}", drop_count.load(Ordering::SeqCst));
    assert_eq!(drop_count.load(Ordering::SeqCst), 3);

    // A failed allocation leaves the array as it was.
    let mut arr = DynamicArray::from([1u64, 2, 3]);
    match arr.try_reserve(usize::MAX) {
        Err(ArrayError::CapacityOverflow) => println!("try_reserve(usize::MAX): capacity overflow"),
        other => println!("unexpected result: {:?}", other),
    }
    match arr.try_reserve(isize::MAX as usize / 8) {
        Err(err) => println!("try_reserve(huge): {}", err),
        Ok(()) => println!("try_reserve(huge) unexpectedly succeeded"),
    }
    println!("Array still intact: {:?}, cap {}", arr, arr.capacity());

    // A panicking clone during resize leaves only fully built elements live.
    let mut fragile: DynamicArray<Fragile> = DynamicArray::new();
    fragile.push(Fragile);
    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| fragile.resize(4, Fragile)));
    println!("resize panicked: {}, len afterwards: {}", result.is_err(), fragile.len());
}
