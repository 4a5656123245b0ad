//! Fragmentation showcase: checkerboard the heap, watch the fragmentation
//! ratio move, then let the coalesce pass and the audit tell the story.

use fitalloc::FirstFitAllocator;

const SLOTS: usize = 16;
const SLOT_SIZE: usize = 2048;

fn main() {
  println!("========================================");
  println!("FITALLOC - FRAGMENTATION SHOWCASE");
  println!("========================================\n");

  let mut heap = FirstFitAllocator::new();
  heap.init(1024 * 1024).expect("heap init failed");

  unsafe {
    // Fill a band of the arena with equally sized blocks.
    let mut slots = Vec::with_capacity(SLOTS);
    for i in 0..SLOTS {
      let ptr = heap.allocate(SLOT_SIZE);
      assert!(!ptr.is_null(), "slot {i} must allocate");
      slots.push(ptr);
    }
    println!("[1] Allocated {SLOTS} blocks of {SLOT_SIZE} bytes");
    println!("    fragmentation: {}%", heap.stats().fragmentation_ratio);

    // Release every other block: classic checkerboard fragmentation. The
    // holes are real free payload, but none of them can serve a request
    // larger than one slot.
    for (index, ptr) in slots.iter().enumerate() {
      if index % 2 == 1 {
        heap.release(*ptr);
      }
    }
    println!("\n[2] Released every other block");
    println!("    fragmentation: {}%", heap.stats().fragmentation_ratio);
    println!("    blocks in list: {}", heap.stats().num_blocks);

    // A request larger than one hole walks past all of them and lands in
    // the tail; a request that fits a hole reuses the first one.
    let big = heap.allocate(SLOT_SIZE * 2);
    let small = heap.allocate(64);
    println!("\n[3] allocate({}) -> {big:?} (tail)", SLOT_SIZE * 2);
    println!("    allocate(64)   -> {small:?} (first hole, split)");
    assert_eq!(slots[1], small);

    // The manual coalesce pass finds nothing to merge: release already
    // merged everything it could, and the checkerboard has no free
    // neighbours.
    let before = heap.stats().num_blocks;
    heap.defragment();
    let after = heap.stats().num_blocks;
    println!("\n[4] Manual coalesce pass: {before} blocks -> {after} blocks");

    // Release everything and the arena folds back into one free block.
    heap.release(big);
    heap.release(small);
    for (index, ptr) in slots.iter().enumerate() {
      if index % 2 == 0 {
        heap.release(*ptr);
      }
    }
    println!("\n[5] Released everything");
    println!("    blocks in list: {}", heap.stats().num_blocks);
    println!("    fragmentation: {}%", heap.stats().fragmentation_ratio);
  }

  println!("\n[6] Final state:\n");
  heap.print_stats();
  println!();
  heap.print_leaks();

  assert!(heap.check_integrity(), "integrity audit must pass");
  println!("\nIntegrity audit passed.");
}
