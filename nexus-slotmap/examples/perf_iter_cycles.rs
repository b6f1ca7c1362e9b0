//! Iteration cost: nexus-slotmap dense values vs a plain Vec baseline.
//!
//! Records cycles per full pass and reports per-element cost. Run once with
//! a fully packed map and once after erasing every other handle, to show
//! that holes in the slot table do not slow iteration down.
//!
//! Run with:
//!   cargo build --release --example perf_iter_cycles
//!   taskset -c 0 ./target/release/examples/perf_iter_cycles

use hdrhistogram::Histogram;
use std::hint::black_box;

const COUNT: usize = 10_000;
const PASSES: usize = 10_000;

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

fn print_pass_stats(name: &str, hist: &Histogram<u64>, elements: usize) {
    println!("{} ({} elements)", name, elements);
    println!("  p50:  {:>8} cycles/pass", hist.value_at_quantile(0.50));
    println!("  p99:  {:>8} cycles/pass", hist.value_at_quantile(0.99));
    println!("  max:  {:>8} cycles/pass", hist.max());
    println!(
        "  per element (p50): {:.2} cycles",
        hist.value_at_quantile(0.50) as f64 / elements as f64
    );
}

fn time_passes<'a>(values: impl Fn() -> std::slice::Iter<'a, u64>) -> Histogram<u64> {
    let mut hist = Histogram::<u64>::new(3).unwrap();
    for _ in 0..PASSES {
        let start = rdtscp();
        let mut sum = 0u64;
        for value in values() {
            sum = sum.wrapping_add(*value);
        }
        black_box(sum);
        let end = rdtscp();
        let _ = hist.record(end.wrapping_sub(start));
    }
    hist
}

fn main() {
    env_logger::init();

    println!("ITERATION cost ({} passes)", PASSES);
    println!("========================================");
    println!();

    let vec: Vec<u64> = (0..COUNT as u64).collect();
    let vec_hist = time_passes(|| vec.iter());
    print_pass_stats("Vec<u64> baseline:", &vec_hist, vec.len());
    println!();

    let mut map = nexus_slotmap::SlotMap::<u64>::with_capacity(COUNT);
    let handles: Vec<_> = (0..COUNT as u64).map(|i| map.insert(i)).collect();
    let packed_hist = time_passes(|| map.values());
    print_pass_stats("nexus-slotmap (packed):", &packed_hist, map.len());
    println!();

    for handle in handles.iter().step_by(2) {
        map.erase(*handle);
    }
    let holey_hist = time_passes(|| map.values());
    print_pass_stats(
        "nexus-slotmap (half erased):",
        &holey_hist,
        map.len(),
    );
}
