//! Mixed workload latency: 50% insert / 30% lookup / 20% erase.
//!
//! Lookups and erases pick a uniformly random live handle. An insert is
//! forced whenever no handle is live. Per-operation cycle counts go into one
//! histogram per operation kind.
//!
//! Phases:
//! 1. Within reserved capacity
//! 2. Growth (map starts small and must reallocate)
//!
//! Run with:
//!   cargo build --release --example perf_mixed_cycles
//!   taskset -c 0 ./target/release/examples/perf_mixed_cycles

use hdrhistogram::Histogram;
use std::hint::black_box;

const COUNT: usize = 16_384;
const OPS: usize = COUNT * 2;
const ROUNDS: usize = 50;
const SEED: u64 = 42;

#[inline(always)]
fn rdtscp() -> u64 {
    #[cfg(target_arch = "x86_64")]
    unsafe {
        let mut aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut aux)
    }
    #[cfg(not(target_arch = "x86_64"))]
    panic!("rdtscp only supported on x86_64");
}

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

    fn next_usize(&mut self, max: usize) -> usize {
        (self.next() as usize) % max
    }
}

struct MixStats {
    insert: Histogram<u64>,
    get: Histogram<u64>,
    erase: Histogram<u64>,
}

impl MixStats {
    fn new() -> Self {
        Self {
            insert: Histogram::new(3).unwrap(),
            get: Histogram::new(3).unwrap(),
            erase: Histogram::new(3).unwrap(),
        }
    }

    fn print(&self, phase: &str) {
        println!("  {}:", phase);
        println!(
            "    INSERT:  p50={:>4}  p99={:>4}  p999={:>5}  max={:>8}  (n={})",
            self.insert.value_at_quantile(0.50),
            self.insert.value_at_quantile(0.99),
            self.insert.value_at_quantile(0.999),
            self.insert.max(),
            self.insert.len()
        );
        println!(
            "    GET:     p50={:>4}  p99={:>4}  p999={:>5}  max={:>8}  (n={})",
            self.get.value_at_quantile(0.50),
            self.get.value_at_quantile(0.99),
            self.get.value_at_quantile(0.999),
            self.get.max(),
            self.get.len()
        );
        println!(
            "    ERASE:   p50={:>4}  p99={:>4}  p999={:>5}  max={:>8}  (n={})",
            self.erase.value_at_quantile(0.50),
            self.erase.value_at_quantile(0.99),
            self.erase.value_at_quantile(0.999),
            self.erase.max(),
            self.erase.len()
        );
    }
}

fn run_mix(map: &mut nexus_slotmap::SlotMap<u64>, stats: &mut MixStats, rng: &mut Xorshift) {
    let mut handles: Vec<nexus_slotmap::Handle> = Vec::with_capacity(COUNT);

    for i in 0..OPS {
        let op = rng.next() % 100;
        if op < 50 || handles.is_empty() {
            let start = rdtscp();
            let handle = map.insert(i as u64);
            let end = rdtscp();
            let _ = stats.insert.record(end.wrapping_sub(start));
            handles.push(handle);
        } else if op < 80 {
            let handle = handles[rng.next_usize(handles.len())];
            let start = rdtscp();
            black_box(map.get(handle));
            let end = rdtscp();
            let _ = stats.get.record(end.wrapping_sub(start));
        } else {
            let handle = handles.swap_remove(rng.next_usize(handles.len()));
            let start = rdtscp();
            black_box(map.erase(handle));
            let end = rdtscp();
            let _ = stats.erase.record(end.wrapping_sub(start));
        }
    }
}

fn bench_reserved() -> MixStats {
    let mut stats = MixStats::new();
    let mut rng = Xorshift::new(SEED);
    let mut map = nexus_slotmap::SlotMap::<u64>::new();
    map.reserve(COUNT);

    for _ in 0..ROUNDS {
        run_mix(&mut map, &mut stats, &mut rng);
        map.clear();
    }

    stats
}

fn bench_growth() -> MixStats {
    let mut stats = MixStats::new();
    let mut rng = Xorshift::new(SEED);

    for _ in 0..ROUNDS {
        // Fresh map each round so every round pays for growth
        let mut map = nexus_slotmap::SlotMap::<u64>::with_capacity(64);
        run_mix(&mut map, &mut stats, &mut rng);
    }

    stats
}

fn main() {
    env_logger::init();

    println!(
        "MIXED WORKLOAD 50/30/20 ({} ops x {} rounds, seed={})",
        OPS, ROUNDS, SEED
    );
    println!("================================================================\n");

    let reserved = bench_reserved();
    let growth = bench_growth();

    println!("nexus-slotmap:");
    reserved.print("RESERVED (no reallocation)");
    growth.print("GROWTH (starts at 64)");
    println!();

    println!("================================================================");
    println!("INSERT p999 / max (where reallocation shows up):");
    println!("----------------------------------------------------------------");
    println!("              reserved       growth");
    println!(
        "  p999:       {:>5}          {:>5}",
        reserved.insert.value_at_quantile(0.999),
        growth.insert.value_at_quantile(0.999)
    );
    println!(
        "  max:        {:>5}          {:>5}",
        reserved.insert.max(),
        growth.insert.max()
    );
}
