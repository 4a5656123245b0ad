//! Introspection over the block list: integrity audit, leak scan, layout
//! dump, and the manual coalesce pass.
//!
//! Everything here derives from one address-order walk of the list; only
//! [`FirstFitAllocator::defragment`] mutates state. The printing helpers
//! mirror the statistics report and exist for driver programs; library
//! users consume [`FirstFitAllocator::blocks`] and
//! [`FirstFitAllocator::leak_scan`] directly.

use std::marker::PhantomData;
use std::ops::Range;

use log::error;

use crate::block::{Block, FREE_TAG, USED_TAG};
use crate::first_fit::FirstFitAllocator;

/// One block as reported by the layout dump, in list (= address) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
  /// Address of the in-band header.
  pub addr: usize,
  /// Payload bytes.
  pub size: usize,
  /// Whether the block sits on the free side of the list.
  pub is_free: bool,
  /// Raw magic tag as stored in the header.
  pub tag: u32,
  /// Address range of the payload.
  pub payload: Range<usize>,
}

/// A still-live allocation found by the leak scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeakRecord {
  /// The pointer that was handed out to the caller.
  pub ptr: *mut u8,
  /// Payload bytes.
  pub size: usize,
}

/// Address-order iterator over every block of the arena.
///
/// Borrowing the allocator keeps the list immutable while the walk runs.
pub struct Blocks<'a> {
  current: *mut Block,
  _heap: PhantomData<&'a FirstFitAllocator>,
}

impl Iterator for Blocks<'_> {
  type Item = BlockInfo;

  fn next(&mut self) -> Option<BlockInfo> {
    if self.current.is_null() {
      return None;
    }

    unsafe {
      let block = self.current;
      self.current = (*block).next;

      let payload_start = Block::user_ptr(block) as usize;

      Some(BlockInfo {
        addr: block as usize,
        size: (*block).size,
        is_free: (*block).is_free,
        tag: (*block).tag,
        payload: payload_start..payload_start + (*block).size,
      })
    }
  }
}

impl FirstFitAllocator {
  /// Walks every block in address order, free and used alike.
  ///
  /// An inactive allocator yields nothing.
  pub fn blocks(&self) -> Blocks<'_> {
    Blocks {
      current: self.head,
      _heap: PhantomData,
    }
  }

  /// Read-only whole-arena audit.
  ///
  /// Verifies, for every block: the header lies inside the arena, the tag
  /// is one of the two sentinels, and the successor points back via its
  /// `prev` link. Finally the walked count must match the block counter.
  /// Violations are reported through `log::error!`; the returned boolean
  /// is the authoritative answer. An inactive allocator audits clean.
  pub fn check_integrity(&self) -> bool {
    let Some(range) = self.heap_range() else {
      return true;
    };

    let mut counted = 0usize;
    let mut current = self.head;

    while !current.is_null() {
      unsafe {
        let addr = current as usize;
        if !range.contains(&addr) {
          error!("block {current:?} lies outside the arena");
          return false;
        }

        if (*current).tag != FREE_TAG && (*current).tag != USED_TAG {
          error!(
            "block {current:?} carries illegal tag {:#010x}",
            (*current).tag,
          );
          return false;
        }

        let next = (*current).next;
        if !next.is_null() && (*next).prev != current {
          error!("broken sibling link between {current:?} and {next:?}");
          return false;
        }

        counted += 1;
        current = next;
      }
    }

    if counted != self.stats.num_blocks {
      error!(
        "block count mismatch: walked {counted}, counter says {}",
        self.stats.num_blocks,
      );
      return false;
    }

    true
  }

  /// Enumerates still-live allocations, in address order.
  ///
  /// Every used block with an intact tag is reported as one record of user
  /// pointer and payload size. Derived purely from the block list; no
  /// separate registry is kept.
  pub fn leak_scan(&self) -> Vec<LeakRecord> {
    self
      .blocks()
      .filter(|block| !block.is_free && block.tag == USED_TAG)
      .map(|block| LeakRecord {
        ptr: block.payload.start as *mut u8,
        size: block.size,
      })
      .collect()
  }

  /// Manual coalesce pass over the whole list.
  ///
  /// Walks in address order and forward-merges every run of free
  /// neighbours. Release already leaves the list maximally merged, so the
  /// pass is normally a no-op; it is kept for clients that want to assert
  /// or restore that state out-of-band. Merging forward only keeps the
  /// cursor valid: the current block absorbs its successors, never the
  /// other way around.
  pub fn defragment(&mut self) {
    let mut current = self.head;

    while !current.is_null() {
      unsafe {
        if (*current).is_free {
          self.merge_forward(current);
        }
        current = (*current).next;
      }
    }
  }

  /// Prints the statistics snapshot to stdout.
  pub fn print_stats(&self) {
    println!("{}", self.stats());
  }

  /// Prints every block of the arena to stdout.
  pub fn print_heap(&self) {
    let Some(range) = self.heap_range() else {
      println!("heap not initialized");
      return;
    };

    println!("========================================");
    println!("HEAP LAYOUT");
    println!("========================================");
    println!(
      "Arena: {:#x} - {:#x} ({} bytes)",
      range.start,
      range.end,
      range.end - range.start,
    );
    println!("----------------------------------------");

    for (index, block) in self.blocks().enumerate() {
      println!("Block {index}: {:#x}", block.addr);
      println!("  Size:   {} bytes", block.size);
      println!("  Status: {}", if block.is_free { "FREE" } else { "USED" });
      println!("  Tag:    {:#010x}", block.tag);
      println!("  Data:   {:#x} - {:#x}", block.payload.start, block.payload.end);
      println!("----------------------------------------");
    }
  }

  /// Prints the leak scan to stdout.
  pub fn print_leaks(&self) {
    println!("========================================");
    println!("LEAK SCAN");
    println!("========================================");

    let leaks = self.leak_scan();
    if leaks.is_empty() {
      println!("No live allocations.");
    } else {
      for leak in &leaks {
        println!("LEAK: {} bytes at {:?}", leak.size, leak.ptr);
      }
    }

    println!("========================================");
  }
}
