// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for recstack.

use thiserror::Error;

/// Error type for stack operations.
///
/// Three families map onto the operations that can fail:
/// invalid arguments (`ZeroRecordSize`, `RecordSizeMismatch`), allocation
/// failures (`AllocationFailed`, `Overflow`), and empty-stack access (`Empty`).
#[derive(Debug, Error, Eq, PartialEq)]
pub enum StackError {
    /// Attempted to initialize a stack with a record size of zero bytes.
    #[error("record size must be non-zero")]
    ZeroRecordSize,

    /// Pushed a record whose byte length does not match the stack's record size.
    #[error("record size mismatch: stack stores {expected}-byte records, got {actual} bytes")]
    RecordSizeMismatch {
        /// The record size the stack was initialized with.
        expected: usize,
        /// The byte length of the rejected record.
        actual: usize,
    },

    /// Backing storage could not be allocated or grown.
    ///
    /// A failed growth leaves the stack untouched: length, capacity and all
    /// stored records remain exactly as they were before the push.
    #[error("allocation failed: could not obtain {bytes} bytes of backing storage")]
    AllocationFailed {
        /// The byte size of the allocation that failed.
        bytes: usize,
    },

    /// Integer overflow when computing the byte size of grown storage.
    ///
    /// This error is practically impossible to encounter in normal usage,
    /// as it would require a capacity approaching `usize::MAX` records.
    /// It exists as a defensive check for integer overflow safety.
    #[error("integer overflow: grown storage size would exceed usize::MAX")]
    Overflow,

    /// Peek or pop attempted on a stack with zero elements.
    #[error("stack is empty")]
    Empty,
}
