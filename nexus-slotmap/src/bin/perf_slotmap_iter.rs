//! Profiling binary for dense iteration.
//!
//! Half the entries are erased first so the slot table has holes; iteration
//! should not see them.
//!
//! Run with:
//!   cargo build --release --bin perf_slotmap_iter
//!   perf stat -e cycles,instructions,cache-misses,branch-misses \
//!       ./target/release/perf_slotmap_iter

use std::hint::black_box;

const CAPACITY: usize = 100_000;
const ITERATIONS: usize = 1_000;

fn main() {
    let mut map = nexus_slotmap::SlotMap::<u64>::with_capacity(CAPACITY);

    let handles: Vec<_> = (0..CAPACITY as u64).map(|i| map.insert(i)).collect();
    for handle in handles.iter().step_by(2) {
        map.erase(*handle);
    }

    // Timed section - sum over dense storage
    for _ in 0..ITERATIONS {
        let mut sum = 0u64;
        for value in map.values() {
            sum = sum.wrapping_add(*value);
        }
        black_box(sum);
    }
}
