use std::collections::{HashMap, HashSet};

use nexus_slotmap::{BuildError, CapacityExhausted, Handle, SlotMap, SlotMapBuilder};

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

/// Iteration must match the model exactly: same live set, no duplicates.
fn assert_matches_model(map: &SlotMap<u64>, model: &HashMap<Handle, u64>) {
    assert_eq!(map.len(), model.len());
    assert_eq!(map.is_empty(), model.is_empty());

    let mut seen = HashSet::new();
    for (handle, value) in map {
        assert!(seen.insert(handle), "iteration yielded {handle:?} twice");
        assert_eq!(model.get(&handle), Some(value));
    }
    assert_eq!(seen.len(), model.len());
    assert_eq!(map.values().count(), model.len());

    for (handle, value) in model {
        assert_eq!(map.get(*handle), Some(value));
    }
}

// =============================================================================
// Core contracts
// =============================================================================

#[test]
fn get_after_insert() {
    let mut map = SlotMap::new();
    for i in 0..1000u64 {
        let h = map.insert(i * 3);
        assert_eq!(map.get(h), Some(&(i * 3)));
    }
}

#[test]
fn erase_is_idempotent() {
    let mut map = SlotMap::new();
    let handles: Vec<_> = (0..100u64).map(|i| map.insert(i)).collect();
    for h in &handles {
        assert!(map.erase(*h));
        assert_eq!(map.get(*h), None);
        assert!(!map.erase(*h));
    }
    assert!(map.is_empty());
}

#[test]
fn len_tracks_inserts_minus_erases() {
    let mut map = SlotMap::new();
    let handles: Vec<_> = (0..50u64).map(|i| map.insert(i)).collect();
    for h in handles.iter().take(20) {
        map.erase(*h);
    }
    assert_eq!(map.len(), 30);
}

#[test]
fn clear_invalidates_prior_handles() {
    let mut map = SlotMap::new();
    let before: Vec<_> = (0..64u64).map(|i| map.insert(i)).collect();
    map.clear();
    for h in &before {
        assert_eq!(map.get(*h), None);
    }

    // Reused slots never resurrect old handles
    let after: Vec<_> = (0..64u64).map(|i| map.insert(i)).collect();
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(map.get(*old), None);
        assert_ne!(old, new);
    }
}

#[test]
fn slot_reuse_scenario() {
    let mut map = SlotMap::new();
    let h1 = map.insert(10u64);
    let h2 = map.insert(20);
    let h3 = map.insert(30);

    assert!(map.erase(h2));
    assert_eq!(map.get(h2), None);
    assert_eq!(map.get(h1), Some(&10));
    assert_eq!(map.get(h3), Some(&30));

    let h4 = map.insert(40);
    assert_eq!(h4.index(), h2.index());
    assert_eq!(h4.generation(), h2.generation() + 1);
    assert_eq!(map.get(h2), None);
    assert_eq!(map.get(h4), Some(&40));
}

#[test]
fn erase_out_of_range_is_noop() {
    let mut map = SlotMap::new();
    map.insert(1u64);
    map.insert(2u64);

    let never_issued = Handle::from_raw((1_000_000u64 << 32) | 7);
    assert!(!map.erase(never_issued));
    assert_eq!(map.len(), 2);
}

#[test]
fn raw_handle_roundtrip_resolves() {
    let mut map = SlotMap::new();
    let h = map.insert(99u64);
    let raw = h.to_raw();
    assert_eq!(map.get(Handle::from_raw(raw)), Some(&99));
}

// =============================================================================
// Growth
// =============================================================================

#[test]
fn growth_preserves_lookups() {
    let mut map = SlotMap::new();
    let mut handles = Vec::new();
    for i in 0..10_000u64 {
        handles.push(map.insert(i));
        // Spot-check everything each time the backing store may have moved
        if i.is_power_of_two() {
            for (j, h) in handles.iter().enumerate() {
                assert_eq!(map.get(*h), Some(&(j as u64)));
            }
        }
    }
}

#[test]
fn reserve_preserves_lookups() {
    let mut map = SlotMap::new();
    let handles: Vec<_> = (0..100u64).map(|i| map.insert(i)).collect();
    for h in handles.iter().step_by(2) {
        map.erase(*h);
    }
    let before: Vec<_> = handles.iter().map(|h| map.get(*h).copied()).collect();

    map.reserve(50_000);

    let after: Vec<_> = handles.iter().map(|h| map.get(*h).copied()).collect();
    assert_eq!(before, after);
    assert!(map.capacity() >= map.len() + 50_000);
}

// =============================================================================
// Capacity exhaustion
// =============================================================================

#[test]
fn exhausted_index_space() {
    let mut map = SlotMapBuilder::default().max_slots(3).build().unwrap();
    let handles: Vec<_> = (0..3u64).map(|i| map.insert(i)).collect();

    assert_eq!(map.try_insert(3), Err(CapacityExhausted(3)));
    assert_eq!(map.len(), 3);
    assert_eq!(map.slot_count(), 3);

    map.erase(handles[0]);
    assert!(map.try_insert(4).is_ok());
}

#[test]
fn builder_rejects_bad_config() {
    assert_eq!(
        SlotMapBuilder::default().max_slots(0).build::<u8>().unwrap_err(),
        BuildError::ZeroMaxSlots
    );
    assert!(
        SlotMapBuilder::default()
            .capacity(5)
            .max_slots(4)
            .build::<u8>()
            .is_err()
    );
}

// =============================================================================
// Iteration
// =============================================================================

#[test]
fn iteration_order_is_dense_order() {
    let mut map = SlotMap::new();
    let handles: Vec<_> = (0..5u64).map(|i| map.insert(i)).collect();
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(map.handles().collect::<Vec<_>>(), handles);

    map.erase(handles[1]);
    // Tail swapped into the hole
    assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![0, 4, 2, 3]);
}

#[test]
fn iteration_is_restartable() {
    let mut map = SlotMap::new();
    for i in 0..10u64 {
        map.insert(i);
    }
    let first: u64 = map.values().sum();
    let second: u64 = map.values().sum();
    assert_eq!(first, second);
    assert_eq!(map.iter().rev().count(), 10);
}

#[test]
fn into_iter_yields_owned_pairs() {
    let mut map = SlotMap::new();
    let a = map.insert(String::from("a"));
    let b = map.insert(String::from("b"));
    let pairs: Vec<_> = map.into_iter().collect();
    assert_eq!(pairs, vec![(a, String::from("a")), (b, String::from("b"))]);
}

#[test]
fn values_mut_writes_through() {
    let mut map = SlotMap::new();
    let h = map.insert(1u64);
    for value in map.values_mut() {
        *value += 41;
    }
    assert_eq!(map[h], 42);
}

// =============================================================================
// Randomized model check
// =============================================================================

#[test]
fn random_ops_match_model() {
    let mut rng = Xorshift::new(0xDEADBEEF);
    let mut map = SlotMap::new();
    let mut model: HashMap<Handle, u64> = HashMap::new();
    let mut live: Vec<Handle> = Vec::new();
    let mut dead: Vec<Handle> = Vec::new();

    for step in 0..20_000u64 {
        match rng.next() % 100 {
            0..50 => {
                let h = map.insert(step);
                assert!(model.insert(h, step).is_none(), "handle {h:?} issued twice");
                live.push(h);
            }
            50..80 if !live.is_empty() => {
                let h = live[rng.next_usize(live.len())];
                assert_eq!(map.get(h), model.get(&h));
            }
            80..97 if !live.is_empty() => {
                let h = live.swap_remove(rng.next_usize(live.len()));
                assert_eq!(map.remove(h), model.remove(&h));
                dead.push(h);
            }
            97..99 if !dead.is_empty() => {
                let h = dead[rng.next_usize(dead.len())];
                assert_eq!(map.get(h), None);
                assert!(!map.erase(h));
            }
            99 => {
                map.clear();
                dead.extend(model.drain().map(|(h, _)| h));
                live.clear();
            }
            _ => {}
        }

        if step % 1000 == 0 {
            assert_matches_model(&map, &model);
        }
    }

    assert_matches_model(&map, &model);
    for h in &dead {
        assert_eq!(map.get(*h), None);
    }
}

#[test]
fn retain_matches_model() {
    let mut rng = Xorshift::new(7);
    let mut map = SlotMap::new();
    let mut model = HashMap::new();
    for _ in 0..500 {
        let value = rng.next() % 1000;
        model.insert(map.insert(value), value);
    }

    map.retain(|_, v| *v % 3 != 0);
    model.retain(|_, v| *v % 3 != 0);

    assert_matches_model(&map, &model);
}
