//! Profiling binary for insert operations.
//!
//! Run with:
//!   cargo build --release --bin perf_slotmap_insert
//!   perf stat -e cycles,instructions,cache-misses,branch-misses \
//!       ./target/release/perf_slotmap_insert
//!
//!   perf record -g ./target/release/perf_slotmap_insert
//!   perf report

use std::hint::black_box;

const CAPACITY: usize = 100_000;
const ITERATIONS: usize = 100;

fn main() {
    // Pre-allocate outside timing loop
    let mut maps: Vec<nexus_slotmap::SlotMap<u64>> = Vec::with_capacity(ITERATIONS);
    for _ in 0..ITERATIONS {
        maps.push(nexus_slotmap::SlotMap::with_capacity(CAPACITY));
    }

    // Timed section - just inserts
    for map in &mut maps {
        for i in 0..CAPACITY as u64 {
            black_box(map.insert(i));
        }
    }
}
