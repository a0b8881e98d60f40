use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::error::{MemoryFault, ResourceFault};

/// Identifier of the program array. Created by the loader, never abandoned.
pub const PROGRAM_ARRAY: u32 = 0;

/// The machine's collection of platter arrays, keyed by 32-bit identifiers.
///
/// MEMORY MODEL: the Universal Machine has no flat address space. All data
/// outside the registers lives in arrays of platters. An array is created with
/// a fixed length, zero-filled, and named by the identifier that Allocation
/// hands back. Array 0 is special: it holds the running program, it exists
/// from load time, and it can be replaced by Load Program but never
/// abandoned.
///
/// LAYOUT: slots are indexed by identifier, so a lookup is one bounds-checked
/// `Vec` access. An abandoned slot is emptied (`None`) and its identifier is
/// parked in a min-heap. The next allocation reissues the lowest free
/// identifier before growing the table, which keeps identifier assignment
/// identical to a low-to-high scan for the first empty slot while making
/// allocate and abandon O(log n).
///
/// ERRORS: every access is checked. An inactive identifier or an offset past
/// the end of an array comes back as a `MemoryFault`; misuse of Abandonment
/// or running out of identifiers comes back as a `ResourceFault`. Nothing
/// here panics on a guest's behalf.
#[derive(Debug, Clone)]
pub struct Memory {
    /// Array storage by identifier; `None` marks an inactive identifier.
    arrays: Vec<Option<Vec<u32>>>,

    /// Abandoned identifiers, smallest on top.
    free: BinaryHeap<Reverse<u32>>,
}

impl Memory {
    /// Creates the table with `program` installed as the '0' array.
    pub fn new(program: Vec<u32>) -> Self {
        Self {
            arrays: vec![Some(program)],
            free: BinaryHeap::new(),
        }
    }

    /// Creates a zero-filled array of `size` platters and returns its identifier.
    pub fn allocate(&mut self, size: u32) -> Result<u32, ResourceFault> {
        let array = vec![0u32; size as usize];

        let handle = match self.free.pop() {
            Some(Reverse(handle)) => {
                self.arrays[handle as usize] = Some(array);
                handle
            }
            None => {
                let handle = u32::try_from(self.arrays.len())
                    .map_err(|_| ResourceFault::HandlesExhausted)?;
                self.arrays.push(Some(array));
                handle
            }
        };

        trace!(handle, size, "allocated array");
        Ok(handle)
    }

    /// Frees `handle` so a later allocation may reuse it.
    pub fn abandon(&mut self, handle: u32) -> Result<(), ResourceFault> {
        if handle == PROGRAM_ARRAY {
            return Err(ResourceFault::AbandonProgramArray);
        }

        let released = self
            .arrays
            .get_mut(handle as usize)
            .and_then(Option::take);
        if released.is_none() {
            return Err(ResourceFault::AbandonInactive(handle));
        }

        self.free.push(Reverse(handle));
        trace!(handle, "abandoned array");
        Ok(())
    }

    /// Reads the platter at `offset` of array `handle`.
    pub fn index(&self, handle: u32, offset: u32) -> Result<u32, MemoryFault> {
        let array = self.array(handle)?;
        array
            .get(offset as usize)
            .copied()
            .ok_or(MemoryFault::OutOfBounds {
                handle,
                offset,
                len: array.len(),
            })
    }

    /// Stores `value` at `offset` of array `handle`.
    pub fn amend(&mut self, handle: u32, offset: u32, value: u32) -> Result<(), MemoryFault> {
        let array = self
            .arrays
            .get_mut(handle as usize)
            .and_then(Option::as_mut)
            .ok_or(MemoryFault::InactiveArray(handle))?;
        let len = array.len();
        let cell = array
            .get_mut(offset as usize)
            .ok_or(MemoryFault::OutOfBounds { handle, offset, len })?;
        *cell = value;
        Ok(())
    }

    /// Replaces the '0' array with a copy of array `handle`.
    ///
    /// Loading the '0' array onto itself leaves it untouched.
    pub fn duplicate_into_zero(&mut self, handle: u32) -> Result<(), MemoryFault> {
        if handle == PROGRAM_ARRAY {
            return Ok(());
        }
        let copy = self.array(handle)?.clone();
        trace!(handle, len = copy.len(), "loading array as program");
        self.arrays[PROGRAM_ARRAY as usize] = Some(copy);
        Ok(())
    }

    /// Fetches the platter the execution finger points at.
    pub fn fetch(&self, finger: u32) -> Result<u32, MemoryFault> {
        self.index(PROGRAM_ARRAY, finger)
    }

    /// Contents of the '0' array.
    pub fn program(&self) -> &[u32] {
        self.arrays[PROGRAM_ARRAY as usize].as_deref().unwrap_or_default()
    }

    pub fn is_active(&self, handle: u32) -> bool {
        matches!(self.arrays.get(handle as usize), Some(Some(_)))
    }

    /// Length of array `handle`.
    pub fn len(&self, handle: u32) -> Result<usize, MemoryFault> {
        self.array(handle).map(Vec::len)
    }

    /// Number of arrays currently active, the '0' array included.
    pub fn active_count(&self) -> usize {
        self.arrays.len() - self.free.len()
    }

    fn array(&self, handle: u32) -> Result<&Vec<u32>, MemoryFault> {
        self.arrays
            .get(handle as usize)
            .and_then(Option::as_ref)
            .ok_or(MemoryFault::InactiveArray(handle))
    }
}
