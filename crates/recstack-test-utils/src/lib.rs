// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for recstack crates.
//!
//! ## License
//!
//! GPL-3.0-only

extern crate alloc;

use alloc::rc::Rc;
use core::cell::Cell;

use rand::Rng;

/// Shared invocation counter for destroy callbacks.
///
/// Clones share one counter, so a clone can be moved into a boxed hook
/// while the test keeps the original to assert exact invocation counts.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DropCounter(Rc<Cell<usize>>);

impl DropCounter {
    /// Records one invocation.
    pub fn record(&self) {
        self.0.set(self.0.get() + 1);
    }

    /// Returns the number of invocations recorded so far.
    pub fn count(&self) -> usize {
        self.0.get()
    }

    /// Resets the counter to zero.
    pub fn reset(&self) {
        self.0.set(0);
    }
}

/// Generates a random lowercase ASCII string of length `len`.
pub fn lowercase_string(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'a' + rng.random_range(0..26u8)))
        .collect()
}

/// Generates `count` random lowercase ASCII strings of length `len`.
pub fn lowercase_strings(count: usize, len: usize) -> Vec<String> {
    (0..count).map(|_| lowercase_string(len)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_counter_shares_count_across_clones() {
        let counter = DropCounter::default();
        let clone = counter.clone();

        clone.record();
        clone.record();

        assert_eq!(counter.count(), 2);
        counter.reset();
        assert_eq!(clone.count(), 0);
    }

    #[test]
    fn test_lowercase_strings_shape() {
        let strs = lowercase_strings(4, 8);

        assert_eq!(strs.len(), 4);
        for s in &strs {
            assert_eq!(s.len(), 8);
            assert!(s.bytes().all(|b| b.is_ascii_lowercase()));
        }
    }
}
