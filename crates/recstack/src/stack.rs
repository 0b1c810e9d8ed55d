// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::mem::size_of;

use crate::error::StackError;
use crate::raw::INITIAL_CAPACITY;

const GROWTH_FACTOR: usize = 2;

/// Destroy hook invoked on the top element immediately before it is dropped
/// by [`Stack::pop`] or by dropping the stack.
///
/// The element's own `Drop` implementation still runs afterwards; the hook
/// is an owner-supplied teardown step, not a replacement for ownership.
pub type DestroyHook<T> = Box<dyn FnMut(&mut T)>;

/// Typed growable stack with an explicit doubling policy.
///
/// The safe face of the record-stack design: the record size is
/// `size_of::<T>()`, known at compile time, and every stored value is a
/// real `T`. Capacity starts at [`INITIAL_CAPACITY`] and doubles on
/// overflow — the doubling is implemented here rather than delegated to
/// `Vec`'s unspecified growth factor, so the capacity sequence (8, 16,
/// 32, …) and the O(N) amortized push bound are part of the contract.
/// Capacity never shrinks.
///
/// # Example
///
/// ```rust
/// use recstack::Stack;
///
/// let mut stk = Stack::new().unwrap();
/// stk.push(1u64).unwrap();
/// stk.push(2u64).unwrap();
///
/// assert_eq!(stk.peek().unwrap(), &2);
/// stk.pop().unwrap();
/// assert_eq!(stk.peek().unwrap(), &1);
/// ```
pub struct Stack<T> {
    inner: Vec<T>,
    cap: usize,
    destroy: Option<DestroyHook<T>>,
    #[cfg(any(test, feature = "test_utils"))]
    fail_next_grow: bool,
}

impl<T> core::fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stack")
            .field("len", &self.inner.len())
            .field("capacity", &self.cap)
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}

impl<T> Stack<T> {
    /// Creates a stack with storage for [`INITIAL_CAPACITY`] elements and
    /// no destroy hook.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::ZeroRecordSize`] if `T` is zero-sized and
    /// [`StackError::AllocationFailed`] if the initial buffer cannot be
    /// obtained.
    pub fn new() -> Result<Self, StackError> {
        Self::build(None)
    }

    /// Creates a stack whose `hook` runs on each element as it is popped
    /// or when the stack is dropped.
    ///
    /// # Errors
    ///
    /// Same as [`Stack::new`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use recstack::Stack;
    ///
    /// let mut stk = Stack::with_destroy(Box::new(|s: &mut String| s.clear())).unwrap();
    /// stk.push("hello".to_string()).unwrap();
    /// stk.pop().unwrap();
    /// ```
    pub fn with_destroy(hook: DestroyHook<T>) -> Result<Self, StackError> {
        Self::build(Some(hook))
    }

    fn build(destroy: Option<DestroyHook<T>>) -> Result<Self, StackError> {
        // record_size > 0 holds for both faces of the design.
        if size_of::<T>() == 0 {
            return Err(StackError::ZeroRecordSize);
        }

        let mut inner = Vec::new();
        inner.try_reserve_exact(INITIAL_CAPACITY).map_err(|_| {
            StackError::AllocationFailed {
                bytes: INITIAL_CAPACITY * size_of::<T>(),
            }
        })?;

        Ok(Self {
            inner,
            cap: INITIAL_CAPACITY,
            destroy,
            #[cfg(any(test, feature = "test_utils"))]
            fail_next_grow: false,
        })
    }

    /// Pushes `value` onto the stack, growing (doubling) first when full.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::AllocationFailed`] if growth fails; the stack
    /// is left unchanged and `value`'s drop runs as usual in the caller.
    pub fn push(&mut self, value: T) -> Result<(), StackError> {
        self.sanity_check();

        if self.inner.len() == self.cap {
            self.grow()?;
        }

        self.inner.push(value);
        Ok(())
    }

    /// Returns a borrowed view of the top element.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Empty`] if the stack has no elements.
    pub fn peek(&self) -> Result<&T, StackError> {
        self.sanity_check();
        self.inner.last().ok_or(StackError::Empty)
    }

    /// Removes and drops the top element.
    ///
    /// The destroy hook (if configured) runs first, while the element is
    /// still in place; the element is dropped immediately afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::Empty`] if the stack has no elements.
    pub fn pop(&mut self) -> Result<(), StackError> {
        self.sanity_check();

        let Some(top) = self.inner.last_mut() else {
            return Err(StackError::Empty);
        };
        if let Some(destroy) = self.destroy.as_mut() {
            destroy(top);
        }
        drop(self.inner.pop());

        Ok(())
    }

    /// Returns the number of elements on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the stack has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of elements the stack can hold before its next
    /// growth. Monotonic; follows the doubling sequence exactly.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Returns an immutable view of all elements, bottom of stack first.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.inner
    }

    /// Makes the next growth attempt fail with
    /// [`StackError::AllocationFailed`] before touching any state.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn fail_next_grow(&mut self) {
        self.fail_next_grow = true;
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<(), StackError> {
        let target = self
            .cap
            .checked_mul(GROWTH_FACTOR)
            .ok_or(StackError::Overflow)?;
        let bytes = target
            .checked_mul(size_of::<T>())
            .ok_or(StackError::Overflow)?;

        #[cfg(any(test, feature = "test_utils"))]
        if self.fail_next_grow {
            self.fail_next_grow = false;
            return Err(StackError::AllocationFailed { bytes });
        }

        let additional = target - self.inner.len();
        self.inner
            .try_reserve_exact(additional)
            .map_err(|_| StackError::AllocationFailed { bytes })?;
        self.cap = target;

        Ok(())
    }

    // The tracked capacity may trail Vec's real allocation but never lead it.
    #[inline]
    fn sanity_check(&self) {
        debug_assert!(self.inner.len() <= self.cap);
        debug_assert!(self.inner.capacity() >= self.cap);
    }
}

impl<T> Drop for Stack<T> {
    fn drop(&mut self) {
        // Pop everything so the destroy hook observes each element.
        while self.pop().is_ok() {}
    }
}
