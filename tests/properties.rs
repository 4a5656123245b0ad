//! Property tests: random operation sequences against a dedicated arena,
//! with the structural invariants re-checked after every single operation.

use fitalloc::{ALIGNMENT, FirstFitAllocator, align_size};
use proptest::prelude::*;

const ARENA_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone)]
enum Op {
  Allocate(usize),
  Release(usize),
  Resize(usize, usize),
  ZeroAllocate(usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
  prop_oneof![
    3 => (1usize..=600).prop_map(Op::Allocate),
    3 => (0usize..64).prop_map(Op::Release),
    2 => ((0usize..64), (0usize..=600)).prop_map(|(index, size)| Op::Resize(index, size)),
    1 => ((1usize..=24), (1usize..=24)).prop_map(|(count, size)| Op::ZeroAllocate(count, size)),
  ]
}

proptest! {
  /// P1-P5 after every operation, P10 at the end of every sequence.
  #[test]
  fn invariants_hold_over_random_op_sequences(
    ops in prop::collection::vec(op(), 1..80),
  ) {
    let mut heap = FirstFitAllocator::new();
    heap.init(ARENA_SIZE).unwrap();

    let mut live: Vec<(usize, *mut u8)> = Vec::new();
    let mut last_peak = 0usize;

    unsafe {
      for op in ops {
        match op {
          Op::Allocate(size) => {
            let ptr = heap.allocate(size);
            if !ptr.is_null() {
              // Returned pointers are aligned, inside the arena, and at
              // least as large as the rounded request.
              prop_assert_eq!(0, ptr as usize % ALIGNMENT);
              prop_assert!(heap.heap_range().unwrap().contains(&(ptr as usize)));
              prop_assert!(heap.size_of(ptr) >= align_size(size));
              live.push((size, ptr));
            }
          }
          Op::Release(index) => {
            if !live.is_empty() {
              let (_, ptr) = live.remove(index % live.len());
              heap.release(ptr);
            }
          }
          Op::Resize(index, new_size) => {
            if !live.is_empty() {
              let slot = index % live.len();
              let (_, ptr) = live[slot];
              let new_ptr = heap.resize(ptr, new_size);

              if new_size == 0 {
                live.remove(slot);
              } else if !new_ptr.is_null() {
                live[slot] = (new_size, new_ptr);
              }
              // A failed grow leaves the old pointer live and untouched.
            }
          }
          Op::ZeroAllocate(count, size) => {
            let ptr = heap.zero_allocate(count, size);
            if !ptr.is_null() {
              for offset in 0..count * size {
                prop_assert_eq!(0, ptr.add(offset).read());
              }
              live.push((count * size, ptr));
            }
          }
        }

        // The audit stays green after every operation.
        prop_assert!(heap.check_integrity());

        // No two adjacent blocks are ever both free.
        let blocks: Vec<_> = heap.blocks().collect();
        for pair in blocks.windows(2) {
          prop_assert!(!(pair[0].is_free && pair[1].is_free));
        }

        // Counter conservation and peak monotonicity.
        let stats = heap.stats();
        prop_assert_eq!(stats.current_usage, stats.total_allocated - stats.total_freed);
        prop_assert!(stats.peak_usage >= stats.current_usage);
        prop_assert!(stats.peak_usage >= last_peak);
        last_peak = stats.peak_usage;
      }

      // Lifetime conservation: allocation/free balance equals the leak scan.
      let stats = heap.stats();
      let leaks = heap.leak_scan();
      prop_assert_eq!(stats.num_allocations - stats.num_frees, leaks.len());
      prop_assert_eq!(live.len(), leaks.len());

      // Every tracked pointer is listed, with its rounded size or more.
      for (requested, ptr) in &live {
        let leak = leaks.iter().find(|leak| leak.ptr == *ptr);
        prop_assert!(leak.is_some());
        prop_assert!(leak.unwrap().size >= align_size(*requested));
      }
    }
  }

  /// P9: growth preserves payload content, moved or not.
  #[test]
  fn resize_growth_preserves_prefix(
    size in 1usize..=300,
    extra in 1usize..=300,
    pattern in any::<u8>(),
  ) {
    let mut heap = FirstFitAllocator::new();
    heap.init(ARENA_SIZE).unwrap();

    unsafe {
      let ptr = heap.allocate(size);
      prop_assert!(!ptr.is_null());

      for offset in 0..size {
        ptr.add(offset).write(pattern.wrapping_add(offset as u8));
      }

      let grown = heap.resize(ptr, size + extra);
      prop_assert!(!grown.is_null());

      for offset in 0..size {
        prop_assert_eq!(pattern.wrapping_add(offset as u8), grown.add(offset).read());
      }
    }
  }

  /// P8: bogus releases change neither the counters nor the audit verdict.
  #[test]
  fn bogus_releases_are_invisible(
    noise in prop::collection::vec(any::<usize>(), 1..20),
  ) {
    let mut heap = FirstFitAllocator::new();
    heap.init(ARENA_SIZE).unwrap();

    unsafe {
      let live = heap.allocate(128);
      prop_assert!(!live.is_null());

      let released = heap.allocate(64);
      heap.release(released);

      let before = heap.stats();

      heap.release(std::ptr::null_mut());
      heap.release(released); // double release
      for addr in noise {
        // Arbitrary addresses, deliberately including unaligned garbage.
        // Anything outside the arena payload range is rejected by the
        // bounds check before its bytes are ever read.
        if heap.heap_range().unwrap().contains(&addr) {
          continue;
        }
        heap.release(addr as *mut u8);
      }

      prop_assert_eq!(before, heap.stats());
      prop_assert!(heap.check_integrity());
    }
  }

  /// P6: the reported size is the rounded request when a split occurred,
  /// and never less.
  #[test]
  fn size_of_matches_rounded_request_on_fresh_arena(size in 1usize..=4096) {
    let mut heap = FirstFitAllocator::new();
    heap.init(ARENA_SIZE).unwrap();

    unsafe {
      // On a fresh arena the remainder is always large enough to split,
      // so the granted payload is exactly the rounded request.
      let ptr = heap.allocate(size);
      prop_assert!(!ptr.is_null());
      prop_assert_eq!(align_size(size), heap.size_of(ptr));
      prop_assert!(heap.size_of(ptr) >= size);
    }
  }
}
