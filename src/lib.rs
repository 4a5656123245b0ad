//! # fitalloc - A First-Fit Heap Allocator Library
//!
//! This crate provides a classical **first-fit heap allocator** over a
//! single contiguous arena obtained from the operating system with one
//! anonymous `mmap`.
//!
//! ## Overview
//!
//! ```text
//!   First-Fit Allocator Concept:
//!
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                       ARENA (one mapping)                        │
//!   │                                                                  │
//!   │   ┌────┬──────┬────┬──────┬────┬────────────────────────────┐    │
//!   │   │ H  │ used │ H  │ free │ H  │          free              │    │
//!   │   └────┴──────┴────┴──────┴────┴────────────────────────────┘    │
//!   │     │            │            │                                  │
//!   │     └── next ────┴── next ────┘   (doubly linked, in-band,       │
//!   │                                    address order)                │
//!   └──────────────────────────────────────────────────────────────────┘
//!
//!   Allocation walks the list and takes the FIRST free block that fits,
//!   splitting off the unused tail. Release merges free neighbours back
//!   together.
//! ```
//!
//! Every block header carries a 32-bit magic tag ([`USED_TAG`] or
//! [`FREE_TAG`]), which lets the allocator reject foreign pointers and
//! double releases without bookkeeping outside the arena.
//!
//! ## Crate Structure
//!
//! ```text
//!   fitalloc
//!   ├── align      - alignment macro and size-rounding policy
//!   ├── arena      - anonymous-mapping arena backing (internal)
//!   ├── block      - in-band block header and magic tags (internal)
//!   ├── error      - lifecycle error type
//!   ├── first_fit  - FirstFitAllocator and the allocation operations
//!   ├── stats      - statistics record
//!   └── debug      - integrity audit, leak scan, layout dump
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use fitalloc::FirstFitAllocator;
//!
//! let mut heap = FirstFitAllocator::new();
//! heap.init(1024 * 1024)?;
//!
//! unsafe {
//!   // Allocate, use, resize, release.
//!   let ptr = heap.allocate(100);
//!   assert!(!ptr.is_null());
//!
//!   ptr.write_bytes(0x2A, 100);
//!
//!   let ptr = heap.resize(ptr, 200);
//!   heap.release(ptr);
//! }
//!
//! // Introspection is always available.
//! assert!(heap.check_integrity());
//! assert!(heap.leak_scan().is_empty());
//! println!("{}", heap.stats());
//! # Ok::<(), fitalloc::HeapError>(())
//! ```
//!
//! ## Features
//!
//! - **Block reuse**: released blocks are found again by the first-fit
//!   search, split when oversized, and merged with free neighbours
//! - **Self-describing heap**: statistics, an integrity audit, a leak scan,
//!   and a layout dump all derive from the in-band block list
//! - **Defensive release**: null, foreign, and double releases are silent
//!   no-ops, caught by arena bounds and the magic tags
//!
//! ## Limitations
//!
//! - **Single arena**: the heap never grows past the mapped region
//! - **Single-threaded only**: no synchronization primitives; the type is
//!   `!Send` and `!Sync`
//! - **First fit**: allocation is O(n) in the number of blocks; there is no
//!   segregated free list
//! - **Unix-only**: requires `libc` and `mmap`
//!
//! ## Safety
//!
//! The allocator manages raw memory and stores its own control data inside
//! the arena. The allocation operations are `unsafe` and rely on callers
//! passing back only pointers they received; the introspection operations
//! are safe.

pub mod align;
mod arena;
mod block;
mod debug;
mod error;
mod first_fit;
mod stats;

pub use align::{ALIGNMENT, MIN_BLOCK_SIZE, align_size};
pub use block::{FREE_TAG, HEADER_SIZE, USED_TAG};
pub use debug::{BlockInfo, Blocks, LeakRecord};
pub use error::HeapError;
pub use first_fit::{DEFAULT_HEAP_SIZE, FirstFitAllocator};
pub use stats::HeapStats;
