// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::mem::size_of;

use recstack_test_utils::{DropCounter, lowercase_strings};

use crate::{DestroyFn, INITIAL_CAPACITY, RawStack, StackError};

fn read_usize(bytes: &[u8]) -> usize {
    let mut raw = [0u8; size_of::<usize>()];
    raw.copy_from_slice(bytes);
    usize::from_ne_bytes(raw)
}

#[test]
fn test_zero_record_size_rejected() {
    assert!(matches!(
        RawStack::new(0, None),
        Err(StackError::ZeroRecordSize)
    ));
}

#[test]
fn test_new_starts_empty_at_initial_capacity() {
    let stk = RawStack::new(8, None).unwrap();

    assert_eq!(stk.len(), 0);
    assert!(stk.is_empty());
    assert_eq!(stk.capacity(), INITIAL_CAPACITY);
    assert_eq!(stk.record_size(), 8);
}

#[test]
fn test_peek_and_pop_on_empty() {
    let mut stk = RawStack::new(8, None).unwrap();

    assert_eq!(stk.peek(), Err(StackError::Empty));
    assert_eq!(stk.pop(), Err(StackError::Empty));
}

#[test]
fn test_wrong_record_length_rejected() {
    let mut stk = RawStack::new(8, None).unwrap();

    assert_eq!(
        stk.push(&[1, 2, 3]),
        Err(StackError::RecordSizeMismatch {
            expected: 8,
            actual: 3,
        })
    );
    assert_eq!(stk.len(), 0);
}

#[test]
fn test_push_peek_pop_round() {
    let mut stk = RawStack::new(8, None).unwrap();

    stk.push(&42u64.to_ne_bytes()).unwrap();
    stk.push(&7u64.to_ne_bytes()).unwrap();

    assert_eq!(stk.peek().unwrap(), &7u64.to_ne_bytes()[..]);
    stk.pop().unwrap();
    assert_eq!(stk.peek().unwrap(), &42u64.to_ne_bytes()[..]);
    stk.pop().unwrap();
    assert_eq!(stk.pop(), Err(StackError::Empty));
}

#[test]
fn test_growth_scenario_twenty_records() {
    let mut stk = RawStack::new(8, None).unwrap();
    for i in 0u64..20 {
        stk.push(&i.to_ne_bytes()).unwrap();
    }

    assert_eq!(stk.len(), 20);
    assert!(stk.capacity() >= 20);
    assert_eq!(stk.capacity(), 32);

    for i in (0u64..20).rev() {
        assert_eq!(stk.peek().unwrap(), &i.to_ne_bytes()[..]);
        stk.pop().unwrap();
    }
    assert_eq!(stk.peek(), Err(StackError::Empty));
}

#[test]
fn test_destroy_callback_runs_once_per_pop() {
    let counter = DropCounter::default();
    let hook = counter.clone();
    let destroy: DestroyFn = Box::new(move |_: &mut [u8]| hook.record());

    let mut stk = RawStack::new(4, Some(destroy)).unwrap();
    for i in 0u32..6 {
        stk.push(&i.to_ne_bytes()).unwrap();
    }

    stk.pop().unwrap();
    stk.pop().unwrap();
    stk.pop().unwrap();
    assert_eq!(counter.count(), 3);

    drop(stk);
    assert_eq!(counter.count(), 6);
}

#[test]
fn test_destroy_callback_sees_record_in_place() {
    let seen = DropCounter::default();
    let hook = seen.clone();
    let destroy: DestroyFn = Box::new(move |bytes: &mut [u8]| {
        assert_eq!(bytes, &31u32.to_ne_bytes()[..]);
        hook.record();
    });

    let mut stk = RawStack::new(4, Some(destroy)).unwrap();
    stk.push(&31u32.to_ne_bytes()).unwrap();
    stk.pop().unwrap();

    assert_eq!(seen.count(), 1);
}

#[test]
fn test_failed_growth_rolls_back() {
    let mut stk = RawStack::new(8, None).unwrap();
    for i in 0u64..INITIAL_CAPACITY as u64 {
        stk.push(&i.to_ne_bytes()).unwrap();
    }

    stk.fail_next_grow();
    assert!(matches!(
        stk.push(&99u64.to_ne_bytes()),
        Err(StackError::AllocationFailed { .. })
    ));

    assert_eq!(stk.len(), INITIAL_CAPACITY);
    assert_eq!(stk.capacity(), INITIAL_CAPACITY);

    // Every record survived the failed growth.
    for i in (0u64..INITIAL_CAPACITY as u64).rev() {
        assert_eq!(stk.peek().unwrap(), &i.to_ne_bytes()[..]);
        stk.pop().unwrap();
    }
}

#[test]
fn test_heap_owning_records_freed_by_callback() {
    let counter = DropCounter::default();
    let hook = counter.clone();
    let destroy: DestroyFn = Box::new(move |bytes: &mut [u8]| {
        let ptr = read_usize(bytes) as *mut String;
        // SAFETY (PRECONDITIONS ARE MET): every record holds a pointer
        // produced by Box::into_raw below, and the callback is the last
        // access to the record.
        drop(unsafe { Box::from_raw(ptr) });
        hook.record();
    });

    let strs = lowercase_strings(16, 8);
    let mut stk = RawStack::new(size_of::<usize>(), Some(destroy)).unwrap();
    for s in &strs {
        let ptr = Box::into_raw(Box::new(s.clone())) as usize;
        stk.push(&ptr.to_ne_bytes()).unwrap();
    }

    // The stored pointer round-trips through the byte view.
    let top = read_usize(stk.peek().unwrap()) as *const String;
    // SAFETY (PRECONDITIONS ARE MET): the top record's box is still live;
    // nothing has popped it.
    assert_eq!(unsafe { &*top }, strs.last().unwrap());

    for _ in 0..8 {
        stk.pop().unwrap();
    }
    assert_eq!(counter.count(), 8);

    // Dropping the stack frees the rest exactly once each.
    drop(stk);
    assert_eq!(counter.count(), 16);
}
