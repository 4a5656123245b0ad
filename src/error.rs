use thiserror::Error;

/// Errors surfaced by the fallible lifecycle operations.
///
/// Only arena setup can fail with an error value. The allocation operations
/// themselves keep a null-pointer failure contract and never panic; see
/// [`FirstFitAllocator`](crate::FirstFitAllocator).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
  /// `init` was called while an arena is already active.
  #[error("heap is already initialized")]
  AlreadyInitialized,

  /// The operating system refused the anonymous mapping.
  #[error("anonymous mapping of {size} bytes failed")]
  ReserveFailed { size: usize },

  /// The requested arena cannot hold one header plus one minimum block.
  #[error("heap size {size} bytes is too small for a single block")]
  HeapSizeTooSmall { size: usize },
}
