//! Capacity growth policy
//!
//! Both line bytes and document rows grow the same way: start from a fixed
//! initial allocation and double until the requested headroom fits.

/// Default first allocation for a line, in bytes
pub const LINE_INIT_CAPACITY: usize = 1024;

/// Default first allocation for the row sequence, in rows
pub const DOCUMENT_INIT_CAPACITY: usize = 128;

/// Compute the capacity needed to hold `n` more items after `len`.
///
/// Returns `capacity` unchanged when `capacity - len >= n`. Otherwise a zero
/// capacity jumps to `initial` and any other capacity doubles until the
/// headroom suffices, stopping at `usize::MAX`.
///
/// # Panics
///
/// Panics with "capacity overflow" when `len + n` does not fit in a `usize`,
/// as `Vec::reserve` does.
pub fn grown_capacity(capacity: usize, len: usize, n: usize, initial: usize) -> usize {
    debug_assert!(capacity >= len);
    let required = match len.checked_add(n) {
        Some(required) => required,
        None => panic!("capacity overflow"),
    };
    let initial = initial.max(1);
    let mut new_capacity = capacity;
    while new_capacity < required {
        new_capacity = if new_capacity == 0 {
            initial
        } else {
            new_capacity.checked_mul(2).unwrap_or(usize::MAX)
        };
    }
    new_capacity
}

/// Reserve room in `vec` for `n` more items using the doubling policy.
///
/// Does not touch the allocation when the headroom is already there.
pub(crate) fn grow_vec<T>(vec: &mut Vec<T>, n: usize, initial: usize) {
    let capacity = vec.capacity();
    let len = vec.len();
    let new_capacity = grown_capacity(capacity, len, n, initial);
    if new_capacity != capacity {
        vec.reserve_exact(new_capacity - len);
    }
}
