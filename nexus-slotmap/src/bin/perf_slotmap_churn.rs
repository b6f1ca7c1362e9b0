//! Profiling binary for churn (insert/erase cycles).
//!
//! Run with:
//!   cargo build --release --bin perf_slotmap_churn
//!   perf stat -e cycles,instructions,cache-misses,branch-misses \
//!       ./target/release/perf_slotmap_churn

use std::hint::black_box;

const CYCLES: usize = 10_000_000;

fn main() {
    let mut map = nexus_slotmap::SlotMap::<u64>::with_capacity(1024);

    // Timed section - insert then immediately erase (hot cache, one slot recycled)
    for i in 0..CYCLES as u64 {
        let handle = map.insert(i);
        black_box(map.erase(handle));
    }
}
