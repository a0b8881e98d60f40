use vm::error::{MemoryFault, ResourceFault};
use vm::memory::{Memory, PROGRAM_ARRAY};

#[test]
fn test_allocation_never_returns_program_array() {
    let mut memory = Memory::new(vec![]);
    let handle = memory.allocate(4).unwrap();
    assert_ne!(handle, PROGRAM_ARRAY);
    assert_eq!(handle, 1);
    assert_eq!(memory.len(handle), Ok(4));
    assert_eq!(memory.active_count(), 2);
}

#[test]
fn test_new_array_is_zero_filled() {
    let mut memory = Memory::new(vec![]);
    let handle = memory.allocate(3).unwrap();
    for offset in 0..3 {
        assert_eq!(memory.index(handle, offset), Ok(0));
    }
}

#[test]
fn test_abandoned_handle_is_reused() {
    let mut memory = Memory::new(vec![]);
    let first = memory.allocate(2).unwrap();
    memory.abandon(first).unwrap();
    assert!(!memory.is_active(first));

    let second = memory.allocate(2).unwrap();
    assert_eq!(second, first);
    assert!(memory.is_active(second));
}

#[test]
fn test_reused_array_starts_clean() {
    let mut memory = Memory::new(vec![]);
    let handle = memory.allocate(2).unwrap();
    memory.amend(handle, 1, 0xdead_beef).unwrap();
    memory.abandon(handle).unwrap();

    let handle = memory.allocate(5).unwrap();
    assert_eq!(memory.len(handle), Ok(5));
    assert_eq!(memory.index(handle, 1), Ok(0));
}

#[test]
fn test_lowest_free_handle_wins() {
    let mut memory = Memory::new(vec![]);
    let handles: Vec<u32> = (0..4).map(|_| memory.allocate(1).unwrap()).collect();
    assert_eq!(handles, vec![1, 2, 3, 4]);

    memory.abandon(3).unwrap();
    memory.abandon(1).unwrap();

    assert_eq!(memory.allocate(1), Ok(1));
    assert_eq!(memory.allocate(1), Ok(3));
    assert_eq!(memory.allocate(1), Ok(5));
    assert_eq!(memory.active_count(), 6);
}

#[test]
fn test_program_array_cannot_be_abandoned() {
    let mut memory = Memory::new(vec![1, 2, 3]);
    assert_eq!(memory.abandon(0), Err(ResourceFault::AbandonProgramArray));

    let handle = memory.allocate(1).unwrap();
    memory.abandon(handle).unwrap();
    assert_eq!(memory.abandon(0), Err(ResourceFault::AbandonProgramArray));
    assert_eq!(memory.program(), &[1, 2, 3]);
}

#[test]
fn test_abandoning_inactive_handle_fails() {
    let mut memory = Memory::new(vec![]);
    assert_eq!(memory.abandon(9), Err(ResourceFault::AbandonInactive(9)));

    let handle = memory.allocate(1).unwrap();
    memory.abandon(handle).unwrap();
    assert_eq!(memory.abandon(handle), Err(ResourceFault::AbandonInactive(handle)));
}

#[test]
fn test_amend_then_index_round_trip() {
    let mut memory = Memory::new(vec![0; 2]);
    let handle = memory.allocate(8).unwrap();

    for offset in 0..8u32 {
        let value = offset.wrapping_mul(0x9e37_79b9);
        memory.amend(handle, offset, value).unwrap();
        assert_eq!(memory.index(handle, offset), Ok(value));
    }

    memory.amend(PROGRAM_ARRAY, 1, u32::MAX).unwrap();
    assert_eq!(memory.index(PROGRAM_ARRAY, 1), Ok(u32::MAX));
}

#[test]
fn test_out_of_bounds_access_faults() {
    let mut memory = Memory::new(vec![7]);
    let handle = memory.allocate(2).unwrap();

    let fault = MemoryFault::OutOfBounds { handle, offset: 2, len: 2 };
    assert_eq!(memory.index(handle, 2), Err(fault));
    assert_eq!(memory.amend(handle, 2, 1), Err(fault));

    let empty = memory.allocate(0).unwrap();
    assert_eq!(
        memory.index(empty, 0),
        Err(MemoryFault::OutOfBounds { handle: empty, offset: 0, len: 0 })
    );
}

#[test]
fn test_inactive_handle_access_faults() {
    let mut memory = Memory::new(vec![7]);
    assert_eq!(memory.index(4, 0), Err(MemoryFault::InactiveArray(4)));
    assert_eq!(memory.amend(4, 0, 1), Err(MemoryFault::InactiveArray(4)));

    let handle = memory.allocate(1).unwrap();
    memory.abandon(handle).unwrap();
    assert_eq!(memory.index(handle, 0), Err(MemoryFault::InactiveArray(handle)));
    assert_eq!(memory.amend(handle, 0, 1), Err(MemoryFault::InactiveArray(handle)));
}

#[test]
fn test_duplicate_into_zero_copies() {
    let mut memory = Memory::new(vec![1, 2, 3]);
    let handle = memory.allocate(2).unwrap();
    memory.amend(handle, 0, 40).unwrap();
    memory.amend(handle, 1, 50).unwrap();

    memory.duplicate_into_zero(handle).unwrap();
    assert_eq!(memory.program(), &[40, 50]);

    // The copy is independent of its source.
    memory.amend(handle, 0, 99).unwrap();
    assert_eq!(memory.program(), &[40, 50]);
    assert_eq!(memory.fetch(0), Ok(40));
    assert!(memory.is_active(handle));
}

#[test]
fn test_duplicate_program_array_is_noop() {
    let mut memory = Memory::new(vec![1, 2, 3]);
    memory.duplicate_into_zero(PROGRAM_ARRAY).unwrap();
    assert_eq!(memory.program(), &[1, 2, 3]);
}

#[test]
fn test_duplicate_inactive_array_faults() {
    let mut memory = Memory::new(vec![1]);
    assert_eq!(memory.duplicate_into_zero(3), Err(MemoryFault::InactiveArray(3)));
    assert_eq!(memory.program(), &[1]);
}
