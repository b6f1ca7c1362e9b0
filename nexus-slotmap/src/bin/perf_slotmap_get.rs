//! Profiling binary for random-order get operations.
//!
//! Run with:
//!   cargo build --release --bin perf_slotmap_get
//!   perf stat -e cycles,instructions,cache-misses,branch-misses,L1-dcache-load-misses \
//!       ./target/release/perf_slotmap_get

use std::hint::black_box;

const CAPACITY: usize = 100_000;
const ITERATIONS: usize = 100;

fn main() {
    let mut map = nexus_slotmap::SlotMap::<u64>::with_capacity(CAPACITY);

    let handles: Vec<_> = (0..CAPACITY as u64).map(|i| map.insert(i)).collect();

    // Pseudo-random access pattern to stress cache
    let indices: Vec<usize> = (0..CAPACITY).map(|i| (i * 7919) % CAPACITY).collect();

    // Timed section - slot lookup + generation check + dense load
    for _ in 0..ITERATIONS {
        for &idx in &indices {
            black_box(map.get(handles[idx]));
        }
    }
}
