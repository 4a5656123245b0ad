//! Arena backing: one contiguous, anonymously-mapped region.
//!
//! The allocator consumes exactly two operations from the operating system:
//! reserve a readable/writable region of N bytes, and release it. Both are
//! provided here over `mmap(2)`/`munmap(2)`. Everything else in the crate
//! stays inside the reserved bounds.

use std::ptr;

use libc::{MAP_ANONYMOUS, MAP_FAILED, MAP_PRIVATE, PROT_READ, PROT_WRITE, mmap, munmap};
use log::debug;

use crate::error::HeapError;

/// One contiguous byte region obtained from the operating system.
///
/// Dropping the arena returns the region to the kernel; every pointer into
/// it becomes dangling at that moment.
pub(crate) struct Arena {
  base: *mut u8,
  limit: *mut u8,
}

impl Arena {
  /// Maps `size` bytes of fresh, page-aligned memory.
  ///
  /// Page alignment makes the base address stricter than the 8-byte
  /// alignment the block layout requires.
  pub fn reserve(size: usize) -> Result<Self, HeapError> {
    let base = unsafe {
      mmap(
        ptr::null_mut(),
        size,
        PROT_READ | PROT_WRITE,
        MAP_PRIVATE | MAP_ANONYMOUS,
        -1,
        0,
      )
    };

    if base == MAP_FAILED {
      return Err(HeapError::ReserveFailed { size });
    }

    debug!("mapped {size} byte arena at {base:?}");

    Ok(Self {
      base: base.cast::<u8>(),
      limit: unsafe { base.cast::<u8>().add(size) },
    })
  }

  pub fn base(&self) -> *mut u8 {
    self.base
  }

  pub fn limit(&self) -> *mut u8 {
    self.limit
  }

  pub fn size(&self) -> usize {
    self.limit as usize - self.base as usize
  }
}

impl Drop for Arena {
  fn drop(&mut self) {
    unsafe {
      munmap(self.base.cast(), self.size());
    }
  }
}
