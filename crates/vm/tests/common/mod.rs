#![allow(dead_code)]

use std::io;

use vm::decoder::{encode_orthography, encode_standard};
use vm::isa::Opcode;
use vm::{BufferConsole, Console, VM};

/// Standard-layout platter.
pub fn op(opcode: Opcode, a: usize, b: usize, c: usize) -> u32 {
    encode_standard(opcode, a, b, c)
}

/// Orthography platter: r[a] = value.
pub fn ortho(a: usize, value: u32) -> u32 {
    encode_orthography(a, value)
}

pub fn halt() -> u32 {
    encode_standard(Opcode::Halt, 0, 0, 0)
}

pub fn machine(program: Vec<u32>) -> VM<BufferConsole> {
    VM::new(program, BufferConsole::new())
}

pub fn machine_with_input(program: Vec<u32>, input: &[u8]) -> VM<BufferConsole> {
    VM::new(program, BufferConsole::with_input(input))
}

/// Console that fails a set number of reads and writes before handing
/// through to an in-memory buffer.
#[derive(Debug, Default)]
pub struct FlakyConsole {
    pub read_failures: usize,
    pub write_failures: usize,
    pub inner: BufferConsole,
}

impl FlakyConsole {
    pub fn failing_reads(count: usize, input: &[u8]) -> Self {
        Self {
            read_failures: count,
            inner: BufferConsole::with_input(input),
            ..Self::default()
        }
    }

    pub fn failing_writes(count: usize) -> Self {
        Self {
            write_failures: count,
            ..Self::default()
        }
    }
}

impl Console for FlakyConsole {
    fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        if self.write_failures > 0 {
            self.write_failures -= 1;
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "output closed"));
        }
        self.inner.write_byte(byte)
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.read_failures > 0 {
            self.read_failures -= 1;
            return Err(io::Error::new(io::ErrorKind::Other, "input unavailable"));
        }
        self.inner.read_byte()
    }
}
