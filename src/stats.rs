use std::fmt;

/// Running counters of the allocator, plus the fragmentation figure that is
/// derived on demand by [`FirstFitAllocator::stats`](crate::FirstFitAllocator::stats).
///
/// The counters satisfy `current_usage == total_allocated - total_freed`
/// after every completed operation, and `peak_usage` never decreases.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
  /// Lifetime sum of payload bytes handed to callers.
  pub total_allocated: usize,
  /// Lifetime sum of payload bytes released back.
  pub total_freed: usize,
  /// Live payload bytes right now.
  pub current_usage: usize,
  /// Highest `current_usage` ever observed.
  pub peak_usage: usize,
  /// Completed allocate and zero-allocate calls.
  pub num_allocations: usize,
  /// Completed releases. No-op releases do not count.
  pub num_frees: usize,
  /// Blocks in the list, free and used together.
  pub num_blocks: usize,
  /// Free payload as a percentage of the whole arena, headers included.
  /// Zero until filled in by a snapshot.
  pub fragmentation_ratio: usize,
}

impl fmt::Display for HeapStats {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    writeln!(f, "========================================")?;
    writeln!(f, "HEAP STATISTICS")?;
    writeln!(f, "========================================")?;
    writeln!(f, "Total allocated:    {} bytes", self.total_allocated)?;
    writeln!(f, "Total freed:        {} bytes", self.total_freed)?;
    writeln!(f, "Current usage:      {} bytes", self.current_usage)?;
    writeln!(f, "Peak usage:         {} bytes", self.peak_usage)?;
    writeln!(f, "Number of allocs:   {}", self.num_allocations)?;
    writeln!(f, "Number of frees:    {}", self.num_frees)?;
    writeln!(f, "Blocks in list:     {}", self.num_blocks)?;
    write!(f, "Fragmentation:      {}%", self.fragmentation_ratio)
  }
}
