// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::error::StackError;

/// Number of record slots allocated at initialization.
pub const INITIAL_CAPACITY: usize = 8;

/// Capacity multiplier applied on overflow.
///
/// Doubling bounds the total copying work of N pushes at O(N) despite
/// O(log N) reallocations, at the price of up to 2x transient memory.
const GROWTH_FACTOR: usize = 2;

/// Destroy callback invoked on a record's bytes immediately before its slot
/// leaves the occupied region.
///
/// The callback owns whatever the record's bytes *reference* (nested
/// allocations, handles); the stack itself only owns the bytes.
pub type DestroyFn = Box<dyn FnMut(&mut [u8])>;

/// Type-erased growable stack of fixed-size records.
///
/// Stores records as raw byte copies: `record_size` contiguous bytes per
/// slot in one exclusively owned buffer. The stack never inspects record
/// contents beyond copying them. Capacity starts at [`INITIAL_CAPACITY`]
/// and doubles on overflow; it never shrinks.
///
/// Interpreting the byte views handed out by [`peek()`](RawStack::peek) or
/// into the destroy callback is the caller's responsibility — this is the
/// unsafe boundary of the type-erased design. Callers that want a typed,
/// fully safe interface should use [`Stack`](crate::Stack) instead.
///
/// # Example
///
/// ```rust
/// use recstack::RawStack;
///
/// let mut stk = RawStack::new(8, None).unwrap();
/// stk.push(&42u64.to_ne_bytes()).unwrap();
///
/// assert_eq!(stk.len(), 1);
/// assert_eq!(stk.peek().unwrap(), &42u64.to_ne_bytes()[..]);
///
/// stk.pop().unwrap();
/// assert!(stk.is_empty());
/// ```
pub struct RawStack {
    record_size: usize,
    len: usize,
    cap: usize,
    buf: Vec<u8>,
    destroy: Option<DestroyFn>,
    #[cfg(any(test, feature = "test_utils"))]
    fail_next_grow: bool,
}

impl core::fmt::Debug for RawStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawStack")
            .field("record_size", &self.record_size)
            .field("len", &self.len)
            .field("capacity", &self.cap)
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}

impl RawStack {
    /// Creates a stack for `record_size`-byte records with storage for
    /// [`INITIAL_CAPACITY`] of them.
    ///
    /// `destroy`, if supplied, runs on each record's bytes as the record is
    /// popped or when the stack is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::ZeroRecordSize`] if `record_size` is zero, and
    /// [`StackError::AllocationFailed`] if the initial buffer cannot be
    /// obtained. No usable stack exists in either case.
    pub fn new(record_size: usize, destroy: Option<DestroyFn>) -> Result<Self, StackError> {
        if record_size == 0 {
            return Err(StackError::ZeroRecordSize);
        }

        let bytes = record_size
            .checked_mul(INITIAL_CAPACITY)
            .ok_or(StackError::Overflow)?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes)
            .map_err(|_| StackError::AllocationFailed { bytes })?;
        buf.resize(bytes, 0);

        Ok(Self {
            record_size,
            len: 0,
            cap: INITIAL_CAPACITY,
            buf,
            destroy,
            #[cfg(any(test, feature = "test_utils"))]
            fail_next_grow: false,
        })
    }

    /// Copies `record` into the next free slot.
    ///
    /// Grows the backing buffer (doubling) first when the stack is full.
    /// Growth relocates the buffer, so byte views previously returned by
    /// [`peek()`](RawStack::peek) do not survive a push; the borrow checker
    /// enforces this.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::RecordSizeMismatch`] if `record` is not exactly
    /// `record_size` bytes, and [`StackError::AllocationFailed`] if growth
    /// fails — in which case length, capacity and all stored records are
    /// left exactly as they were.
    pub fn push(&mut self, record: &[u8]) -> Result<(), StackError> {
        self.sanity_check();

        if record.len() != self.record_size {
            return Err(StackError::RecordSizeMismatch {
                expected: self.record_size,
                actual: record.len(),
            });
        }

        if self.len == self.cap {
            self.grow()?;
        }

        let start = self.len * self.record_size;
        self.buf[start..start + self.record_size].copy_from_slice(record);
        self.len += 1;

        Ok(())
    }

    /// Returns a borrowed view of the top record's bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Empty`] if the stack has no elements.
    pub fn peek(&self) -> Result<&[u8], StackError> {
        self.sanity_check();

        if self.len == 0 {
            return Err(StackError::Empty);
        }

        let start = (self.len - 1) * self.record_size;
        Ok(&self.buf[start..start + self.record_size])
    }

    /// Removes the top record.
    ///
    /// The destroy callback (if configured) runs on the record's bytes
    /// before the length decrement: it observes the record still in place,
    /// as the last access to it. The buffer never shrinks.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Empty`] if the stack has no elements.
    pub fn pop(&mut self) -> Result<(), StackError> {
        self.sanity_check();

        if self.len == 0 {
            return Err(StackError::Empty);
        }

        let start = (self.len - 1) * self.record_size;
        if let Some(destroy) = self.destroy.as_mut() {
            destroy(&mut self.buf[start..start + self.record_size]);
        }
        self.len -= 1;

        Ok(())
    }

    /// Returns the number of records on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the stack has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of records the current buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns the byte size of one record.
    #[inline]
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Makes the next growth attempt fail with
    /// [`StackError::AllocationFailed`] before touching any state.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn fail_next_grow(&mut self) {
        self.fail_next_grow = true;
    }

    /// Doubles the backing storage.
    ///
    /// `try_reserve_exact` failing leaves the old buffer intact, so a failed
    /// growth cannot corrupt or lose existing records.
    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<(), StackError> {
        let target = self
            .cap
            .checked_mul(GROWTH_FACTOR)
            .ok_or(StackError::Overflow)?;
        let total = target
            .checked_mul(self.record_size)
            .ok_or(StackError::Overflow)?;

        #[cfg(any(test, feature = "test_utils"))]
        if self.fail_next_grow {
            self.fail_next_grow = false;
            return Err(StackError::AllocationFailed { bytes: total });
        }

        let additional = total - self.buf.len();
        self.buf
            .try_reserve_exact(additional)
            .map_err(|_| StackError::AllocationFailed { bytes: total })?;
        self.buf.resize(total, 0);
        self.cap = target;

        Ok(())
    }

    // len <= cap and a full-capacity buffer are structural invariants;
    // a violation is a programming error, not a recoverable condition.
    #[inline]
    fn sanity_check(&self) {
        debug_assert!(self.record_size > 0);
        debug_assert!(self.len <= self.cap);
        debug_assert_eq!(self.buf.len(), self.cap * self.record_size);
    }
}

impl Drop for RawStack {
    fn drop(&mut self) {
        // Destroy every remaining record before the buffer is released.
        while self.pop().is_ok() {}
    }
}
