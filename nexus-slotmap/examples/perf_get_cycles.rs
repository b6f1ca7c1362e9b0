//! Cycle-accurate get latency comparison using rdtscp.
//!
//! Compares nexus-slotmap vs slotmap's DenseSlotMap with per-operation cycle
//! counts. Handles are shuffled with a fixed seed so both maps see the same
//! random access pattern.
//!
//! Working set: 100K u64 entries. Values (800KB) plus slot table fit in
//! L2/L3 on most parts.
//!
//! Run with:
//!   cargo build --release --example perf_get_cycles
//!   taskset -c 0 ./target/release/examples/perf_get_cycles

use hdrhistogram::Histogram;
use std::hint::black_box;

const CAPACITY: usize = 100_000;
const PASSES: usize = 10;
const SEED: u64 = 42;

#[inline(always)]
fn rdtscp() -> u64 {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        let mut aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut aux)
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        panic!("rdtscp only supported on x86_64");
    }
}

/// Simple deterministic PRNG for reproducible random access pattern
struct Xorshift {
    state: u64,
}

impl Xorshift {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

/// Fisher-Yates shuffle of `0..count`.
fn shuffled_order(count: usize, seed: u64) -> Vec<usize> {
    let mut rng = Xorshift::new(seed);
    let mut order: Vec<usize> = (0..count).collect();
    for i in (1..count).rev() {
        let j = (rng.next() as usize) % (i + 1);
        order.swap(i, j);
    }
    order
}

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>6} cycles", hist.min());
    println!("  p50:  {:>6} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>6} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>6} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>6} cycles", hist.max());
    println!("  avg:  {:>6.0} cycles", hist.mean());
}

fn bench_nexus_slotmap(order: &[usize]) -> Histogram<u64> {
    let mut map = nexus_slotmap::SlotMap::<u64>::with_capacity(CAPACITY);
    let mut hist = Histogram::<u64>::new(3).unwrap();

    let handles: Vec<_> = (0..CAPACITY as u64).map(|i| map.insert(i)).collect();

    // Warmup
    for &idx in order.iter().take(10_000) {
        black_box(map.get(handles[idx]));
    }

    for _ in 0..PASSES {
        for &idx in order {
            let handle = handles[idx];
            let start = rdtscp();
            black_box(map.get(handle));
            let end = rdtscp();
            let _ = hist.record(end.wrapping_sub(start));
        }
    }

    hist
}

fn bench_dense_slotmap(order: &[usize]) -> Histogram<u64> {
    let mut map = slotmap::DenseSlotMap::<slotmap::DefaultKey, u64>::with_capacity(CAPACITY);
    let mut hist = Histogram::<u64>::new(3).unwrap();

    let keys: Vec<_> = (0..CAPACITY as u64).map(|i| map.insert(i)).collect();

    // Warmup
    for &idx in order.iter().take(10_000) {
        black_box(map.get(keys[idx]));
    }

    for _ in 0..PASSES {
        for &idx in order {
            let key = keys[idx];
            let start = rdtscp();
            black_box(map.get(key));
            let end = rdtscp();
            let _ = hist.record(end.wrapping_sub(start));
        }
    }

    hist
}

fn main() {
    env_logger::init();

    let order = shuffled_order(CAPACITY, SEED);

    println!(
        "GET latency comparison ({} entries x {} shuffled passes, seed={})",
        CAPACITY, PASSES, SEED
    );
    println!("========================================");
    println!();

    let nexus_hist = bench_nexus_slotmap(&order);
    let dense_hist = bench_dense_slotmap(&order);

    print_stats("nexus-slotmap:", &nexus_hist);
    println!();
    print_stats("slotmap::DenseSlotMap:", &dense_hist);
    println!();

    let nexus_p50 = nexus_hist.value_at_quantile(0.50);
    let dense_p50 = dense_hist.value_at_quantile(0.50);

    println!("----------------------------------------");
    if nexus_p50 < dense_p50 {
        println!(
            "nexus-slotmap p50 is {:.1}% FASTER",
            (1.0 - nexus_p50 as f64 / dense_p50 as f64) * 100.0
        );
    } else if nexus_p50 > dense_p50 {
        println!(
            "nexus-slotmap p50 is {:.1}% SLOWER",
            (nexus_p50 as f64 / dense_p50 as f64 - 1.0) * 100.0
        );
    } else {
        println!("nexus-slotmap p50 is EQUAL");
    }
}
