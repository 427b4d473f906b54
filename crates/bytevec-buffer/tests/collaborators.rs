//! Integration tests: destructor, allocator and diagnostic collaborators.

use std::rc::Rc;

use bytevec_buffer::Buffer;
use bytevec_core::{BufferError, ErrorKind};
use bytevec_test_utils::{
    failing_config, quiet_config, recording_config, CountingDestructor, FailingAllocator,
    RecordingSink,
};

// ── Destructor ───────────────────────────────────────────────────────

#[test]
fn destroy_runs_destructor_once_per_element_in_order() {
    let counter = CountingDestructor::new();
    let mut buffer = Buffer::new(2, Some(counter.destructor())).unwrap();
    for i in 0..25u8 {
        buffer.push(&[i, 0xFF]).unwrap();
    }
    buffer.destroy();
    assert_eq!(counter.count(), 25);
    assert_eq!(counter.first_bytes(), (0..25).collect::<Vec<u8>>());
    assert!(counter.calls().iter().all(|c| c[1] == 0xFF));
}

#[test]
fn filled_buffer_destroys_every_copy() {
    let counter = CountingDestructor::new();
    let buffer = Buffer::filled(7, 1, Some(counter.destructor()), &[3]).unwrap();
    drop(buffer);
    assert_eq!(counter.first_bytes(), [3; 7]);
}

#[test]
fn pop_into_out_transfers_ownership() {
    let counter = CountingDestructor::new();
    let mut buffer = Buffer::new(1, Some(counter.destructor())).unwrap();
    buffer.insert_many(0, &[1, 2, 3]).unwrap();
    let mut out = [0u8];
    buffer.pop(Some(&mut out[..])).unwrap();
    buffer.pop(None).unwrap();
    drop(buffer);
    // 3 was handed out; 2 destroyed by pop; 1 destroyed by drop.
    assert_eq!(counter.first_bytes(), [2, 1]);
}

#[test]
fn destructor_not_run_on_failed_operations() {
    let counter = CountingDestructor::new();
    let mut buffer =
        Buffer::with_config(quiet_config(), 1, Some(counter.destructor())).unwrap();
    buffer.push(&[1]).unwrap();
    assert!(buffer.remove(5).is_err());
    assert!(buffer.replace(5, &[2]).is_err());
    assert!(buffer.replace(0, &[2, 2]).is_err());
    assert_eq!(counter.count(), 0);
    assert_eq!(buffer.as_bytes(), &[1]);
}

// ── Allocator ────────────────────────────────────────────────────────

#[test]
fn growth_failure_keeps_existing_elements() {
    let allocator = Rc::new(FailingAllocator::new(4, 0));
    let mut buffer = Buffer::with_config(failing_config(&allocator), 1, None).unwrap();
    for i in 0..4u8 {
        buffer.push(&[i]).unwrap();
    }
    assert_eq!(allocator.grows(), 4);
    assert_eq!(buffer.capacity(), 4);

    let err = buffer.push(&[9]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AllocationFailure);
    assert_eq!(buffer.as_bytes(), &[0, 1, 2, 3]);
    assert_eq!(buffer.capacity(), 4);

    assert!(buffer.insert(0, &[9]).is_err());
    assert!(buffer.insert_many(2, &[7, 7]).is_err());
    assert_eq!(buffer.as_bytes(), &[0, 1, 2, 3]);

    allocator.refill_grows(1);
    buffer.insert(0, &[9]).unwrap();
    assert_eq!(buffer.as_bytes(), &[9, 0, 1, 2, 3]);
    assert_eq!(buffer.capacity(), 6);
}

#[test]
fn shrink_failure_still_completes_removal() {
    let allocator = Rc::new(FailingAllocator::new(usize::MAX, 0));
    let sink = Rc::new(RecordingSink::new());
    let config = recording_config(&sink)
        .with_allocator(Rc::clone(&allocator) as Rc<dyn bytevec_core::ByteAllocator>);
    let mut buffer = Buffer::with_config(config, 1, None).unwrap();
    buffer.reserve(8).unwrap();
    buffer.insert_many(0, &[1, 2, 3]).unwrap();

    buffer.pop(None).unwrap();
    buffer.remove(0).unwrap();
    assert_eq!(buffer.as_bytes(), &[2]);
    // len 1 <= floor(8 * 0.25) wanted a shrink to 4, which was refused.
    assert_eq!(buffer.capacity(), 8);
    assert_eq!(allocator.shrinks(), 0);
    assert!(sink
        .messages()
        .iter()
        .any(|m| m.starts_with("remove: allocation of")));
}

#[test]
fn with_capacity_failure_is_reported_as_error() {
    let allocator = Rc::new(FailingAllocator::always());
    let mut buffer = Buffer::with_config(failing_config(&allocator), 4, None).unwrap();
    assert!(matches!(
        buffer.reserve(10),
        Err(BufferError::AllocationFailure {
            requested_bytes: 40
        })
    ));
    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn alias_copy_failure_leaves_source_untouched() {
    let allocator = Rc::new(FailingAllocator::new(1, 0));
    let mut buffer = Buffer::with_config(failing_config(&allocator), 1, None).unwrap();
    buffer.insert_many(0, &[4, 5, 6]).unwrap();
    assert!(buffer.alias_copy().is_err());
    assert!(buffer.deep_copy(|s, d| d.copy_from_slice(s)).is_err());
    assert_eq!(buffer.as_bytes(), &[4, 5, 6]);
}

// ── Diagnostics ──────────────────────────────────────────────────────

#[test]
fn every_precondition_violation_is_reported() {
    let sink = Rc::new(RecordingSink::new());
    let mut buffer = Buffer::with_config(recording_config(&sink), 4, None).unwrap();
    let mut out = [0u8; 4];

    assert!(buffer.pop(Some(&mut out[..])).is_err());
    assert!(buffer.front(&mut out).is_err());
    assert!(buffer.get(0, &mut out).is_err());
    assert!(buffer.insert(1, &[0; 4]).is_err());
    assert!(buffer.push(&[0; 3]).is_err());

    assert_eq!(
        sink.messages(),
        [
            "pop: collection is empty",
            "front: collection is empty",
            "get: index 0 out of bounds for length 0",
            "insert: index 1 out of bounds for length 0",
            "push: invalid argument: element is 3 bytes, expected 4",
        ]
    );
}

#[test]
fn zero_element_size_is_reported_at_construction() {
    let sink = Rc::new(RecordingSink::new());
    let err = Buffer::with_config(recording_config(&sink), 0, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(
        sink.messages(),
        ["create: invalid argument: element_size must be > 0"]
    );
}

#[test]
fn successful_operations_report_nothing() {
    let sink = Rc::new(RecordingSink::new());
    let mut buffer = Buffer::with_config(recording_config(&sink), 1, None).unwrap();
    buffer.insert_many(0, b"hello").unwrap();
    buffer.remove(0).unwrap();
    buffer.pop(None).unwrap();
    buffer.clear();
    assert!(sink.is_empty());
}
