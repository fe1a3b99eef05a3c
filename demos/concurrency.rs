use dynarray::DynamicArray;
use std::thread;

fn main() {
    println!("--- Cross-thread Ownership Transfer Example ---");
    let mut arr = DynamicArray::new();
    for i in 0..10 {
        arr.push(i);
    }

    println!("Original array (thread main): {:?}", arr);

    // Move ownership to another thread
    let handle = thread::spawn(move || {
        println!("Array in new thread: {:?}", arr);
        arr.push(100);
        arr // Return ownership back
    });

    let arr = match handle.join() {
        Ok(arr) => arr,
        Err(_) => panic!("worker thread panicked"),
    };
    println!("Array back in main thread: {:?}", arr);

    // Shared read-only access from scoped threads
    let (evens, odds) = thread::scope(|s| {
        let evens = s.spawn(|| arr.iter().filter(|x| *x % 2 == 0).count());
        let odds = s.spawn(|| arr.iter().filter(|x| *x % 2 == 1).count());
        (evens.join(), odds.join())
    });
    println!("evens: {:?}, odds: {:?}", evens, odds);
}
