use std::ptr;

use fitalloc::{FirstFitAllocator, align_size};

fn main() {
  println!("========================================");
  println!("FITALLOC - BASIC EXAMPLE");
  println!("========================================\n");

  let mut heap = FirstFitAllocator::new();
  if let Err(error) = heap.init(1024 * 1024) {
    eprintln!("failed to initialize the heap: {error}");
    std::process::exit(1);
  }

  unsafe {
    // --------------------------------------------------------------------
    // 1) Three allocations, written to and read back.
    // --------------------------------------------------------------------
    let a = heap.allocate(100);
    let b = heap.allocate(200);
    let c = heap.allocate(300);
    println!("[1] Allocated 3 blocks: {a:?}, {b:?}, {c:?}");

    for (ptr, fill) in [(a, 0x11u8), (b, 0x22), (c, 0x33)] {
      ptr.write_bytes(fill, 100);
    }
    println!("[1] Wrote distinct patterns into each block");

    // --------------------------------------------------------------------
    // 2) Release the middle block and look at the statistics.
    //    The freed payload shows up as fragmentation: the hole between
    //    a and c can only serve requests that fit it.
    // --------------------------------------------------------------------
    heap.release(b);
    println!("\n[2] Released the middle block\n");
    heap.print_stats();

    // --------------------------------------------------------------------
    // 3) The heap layout, block by block.
    // --------------------------------------------------------------------
    println!("\n[3] Heap layout after the release:\n");
    heap.print_heap();

    // --------------------------------------------------------------------
    // 4) Resize: shrinking stays in place, growing relocates.
    // --------------------------------------------------------------------
    let a_small = heap.resize(a, 50);
    println!("\n[4] Shrunk a to 50 bytes: {a:?} -> {a_small:?} (same address)");

    let a_big = heap.resize(a_small, 500);
    println!("[4] Grew a to 500 bytes: {a_small:?} -> {a_big:?} (relocated)");
    println!(
      "[4] First byte survived both moves: {:#04x}",
      a_big.read(),
    );

    // --------------------------------------------------------------------
    // 5) Zero-allocation: an array of ten u32, guaranteed zeroed.
    // --------------------------------------------------------------------
    let numbers = heap.zero_allocate(10, size_of::<u32>()) as *mut u32;
    let mut values = Vec::new();
    for i in 0..10 {
      values.push(numbers.add(i).read());
    }
    println!("\n[5] zero_allocate(10, 4) -> {values:?}");

    // --------------------------------------------------------------------
    // 6) The leak scan lists everything still live.
    // --------------------------------------------------------------------
    println!("\n[6] Live allocations before cleanup:\n");
    heap.print_leaks();

    heap.release(a_big);
    heap.release(c);
    heap.release(numbers as *mut u8);

    println!("\n[6] After releasing everything:\n");
    heap.print_leaks();
  }

  // --------------------------------------------------------------------
  // 7) Boundary behavior: rejected requests return null, never panic.
  // --------------------------------------------------------------------
  unsafe {
    println!("\n[7] allocate(0) is null: {}", heap.allocate(0).is_null());
    println!(
      "[7] zero_allocate(usize::MAX, 2) overflows to null: {}",
      heap.zero_allocate(usize::MAX, 2).is_null(),
    );
    println!(
      "[7] align_size(100) = {} (what allocate(100) actually reserves)",
      align_size(100),
    );
    heap.release(ptr::null_mut());
    println!("[7] release(null) was a no-op");
  }

  assert!(heap.check_integrity());
  println!("\nIntegrity audit passed. Cleaning up.");
  heap.cleanup();
}
