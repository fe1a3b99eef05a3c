/// Builds a [`DynamicArray`](crate::DynamicArray) the way `vec!` builds a `Vec`.
///
/// - `dynarray![a, b, c]` moves the values in order; `capacity == len`.
/// - `dynarray![value; n]` holds `n` clones of `value`.
///
/// ```
/// use dynarray::dynarray;
///
/// let words = dynarray!["a", "b", "c"];
/// assert_eq!(words.len(), 3);
/// assert_eq!(words.capacity(), 3);
///
/// let zeros = dynarray![0u8; 4];
/// assert_eq!(zeros, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dynarray {
    () => {
        $crate::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($n, $elem)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($x),+])
    };
}
