// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable record stack with explicit doubling and owner-supplied destructors.
//!
//! Two faces of one design:
//!
//! - [`Stack<T>`] — typed, fully safe; the record size is `size_of::<T>()`.
//! - [`RawStack`] — type-erased; records are `record_size` raw bytes and the
//!   caller interprets them (the documented unsafe boundary of the design).
//!
//! Both start with storage for 8 records, double on overflow (never shrink),
//! and run an optional destroy callback on each element as it is popped or
//! when the stack is dropped. A failed growth is rolled back completely:
//! length, capacity and stored data are untouched and the push reports
//! [`StackError::AllocationFailed`].
//!
//! Single-threaded, single-owner. Borrowed views returned by `peek()` are
//! invalidated by the next mutating call; the borrow checker enforces this.
//!
//! # Example
//!
//! ```rust
//! use recstack::{Stack, StackError};
//!
//! let mut stk = Stack::new().unwrap();
//! for i in 0u64..20 {
//!     stk.push(i).unwrap();
//! }
//!
//! // Grew past the initial 8 slots without losing anything.
//! assert!(stk.capacity() >= 20);
//! assert_eq!(stk.len(), 20);
//!
//! for i in (0u64..20).rev() {
//!     assert_eq!(stk.peek().unwrap(), &i);
//!     stk.pop().unwrap();
//! }
//! assert_eq!(stk.pop(), Err(StackError::Empty));
//! ```

mod error;
mod raw;
mod stack;

#[cfg(test)]
mod tests;

pub use error::StackError;
pub use raw::{DestroyFn, INITIAL_CAPACITY, RawStack};
pub use stack::{DestroyHook, Stack};
