use std::ops::{Index, IndexMut};

pub const REGISTER_COUNT: usize = 8;

/// The eight general-purpose registers, r0 through r7.
///
/// Operand fields are three bits wide, so every index the decoder produces is
/// in range. All registers start out holding zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    regs: [u32; REGISTER_COUNT],
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, r: usize) -> u32 {
        self.regs[r]
    }

    pub fn set(&mut self, r: usize, value: u32) {
        self.regs[r] = value;
    }

    pub fn as_array(&self) -> &[u32; REGISTER_COUNT] {
        &self.regs
    }
}

impl From<[u32; REGISTER_COUNT]> for Registers {
    fn from(regs: [u32; REGISTER_COUNT]) -> Self {
        Self { regs }
    }
}

impl Index<usize> for Registers {
    type Output = u32;

    fn index(&self, r: usize) -> &u32 {
        &self.regs[r]
    }
}

impl IndexMut<usize> for Registers {
    fn index_mut(&mut self, r: usize) -> &mut u32 {
        &mut self.regs[r]
    }
}
