//! Cycle-accurate insert latency comparison using rdtscp.
//!
//! Compares nexus-slotmap vs slotmap's DenseSlotMap with per-operation cycle
//! counts. Both maps are reserved up front and cleared between rounds, so
//! this measures steady-state insert (free list populated after the first
//! round) rather than growth.
//!
//! Run with:
//!   cargo build --release --example perf_insert_cycles
//!   taskset -c 0 ./target/release/examples/perf_insert_cycles

use hdrhistogram::Histogram;
use std::hint::black_box;

const CAPACITY: usize = 10_000;
const ROUNDS: usize = 100;

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

fn print_stats(name: &str, hist: &Histogram<u64>) {
    println!("{}", name);
    println!("  min:  {:>6} cycles", hist.min());
    println!("  p50:  {:>6} cycles", hist.value_at_quantile(0.50));
    println!("  p99:  {:>6} cycles", hist.value_at_quantile(0.99));
    println!("  p999: {:>6} cycles", hist.value_at_quantile(0.999));
    println!("  max:  {:>6} cycles", hist.max());
    println!("  avg:  {:>6.0} cycles", hist.mean());
}

fn bench_nexus_slotmap() -> Histogram<u64> {
    let mut map = nexus_slotmap::SlotMap::<u64>::new();
    map.reserve(CAPACITY);
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for _ in 0..ROUNDS {
        for i in 0..CAPACITY as u64 {
            let start = rdtscp();
            let handle = map.insert(i);
            let end = rdtscp();
            black_box(handle);
            let _ = hist.record(end.wrapping_sub(start));
        }
        map.clear();
    }

    hist
}

fn bench_dense_slotmap() -> Histogram<u64> {
    let mut map = slotmap::DenseSlotMap::<slotmap::DefaultKey, u64>::with_capacity(CAPACITY);
    let mut hist = Histogram::<u64>::new(3).unwrap();

    for _ in 0..ROUNDS {
        for i in 0..CAPACITY as u64 {
            let start = rdtscp();
            let key = map.insert(i);
            let end = rdtscp();
            black_box(key);
            let _ = hist.record(end.wrapping_sub(start));
        }
        map.clear();
    }

    hist
}

fn main() {
    env_logger::init();

    println!(
        "INSERT latency comparison ({} rounds x {} inserts)",
        ROUNDS, CAPACITY
    );
    println!("========================================");
    println!();

    let nexus_hist = bench_nexus_slotmap();
    let dense_hist = bench_dense_slotmap();

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
