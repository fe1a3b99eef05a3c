use dynarray::{dynarray, DynamicArray};

fn main() {
    println!("--- Basic Usage Example ---");
    let mut arr = DynamicArray::new();

    // Capacity doubles: 1, 2, 4, 8
    for i in 1..=5 {
        arr.push(i * 10);
        println!("Pushed: {}, len: {}, cap: {}", i * 10, arr.len(), arr.capacity());
    }

    println!("Elements: {:?}", &arr[..]);
    println!("front: {}, back: {}", arr.front(), arr.back());

    print!("Cursor walk:");
    let mut it = arr.begin();
    while it != arr.end() {
        print!(" {}", *it.post_increment());
    }
    println!();

    arr.resize(8, -1);
    println!("After resize(8, -1): {:?}, cap: {}", arr, arr.capacity());

    arr.resize(3, 0);
    arr.shrink_to_fit();
    println!("After resize(3) + shrink_to_fit: {:?}, cap: {}", arr, arr.capacity());

    let literal = dynarray![1, 2, 3];
    println!("Literal: {:?}, cap: {}", literal, literal.capacity());

    while let Some(val) = arr.pop() {
        println!("Popped: {}, len: {}", val, arr.len());
    }
}
