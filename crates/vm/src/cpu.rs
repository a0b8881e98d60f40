use tracing::trace;

use crate::console::Console;
use crate::decoder::decode;
use crate::error::{ArithmeticFault, Fault, IoFault};
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::registers::Registers;

/// Value an Input leaves in its register once the console is exhausted.
pub const END_OF_INPUT: u32 = 0xffff_ffff;

/// Whether the machine should keep going after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Halt,
}

/// The execution unit of the Universal Machine: execution finger plus
/// register file.
///
/// ARCHITECTURE NOTES:
/// - Eight general-purpose registers, each an unsigned 32-bit word, all zero
///   at start. Unlike RISC-V there is no hardwired zero register; r0 is as
///   writable as the rest.
/// - The execution finger plays the role of a program counter. It is an offset
///   into the '0' array, counted in platters rather than bytes.
/// - There are no flags, no stack and no separate address space. Every value
///   an instruction touches lives either in a register or in an array.
///
/// OWNERSHIP: the CPU owns no memory and no console. Both are passed into
/// `step` so the VM keeps sole ownership of them, and tests can drive the CPU
/// against whatever array table or console they build.
///
/// STEP CYCLE: each `step` fetches the platter under the finger, decodes it,
/// executes it and then moves the finger. The finger moves by one except
/// after Load Program, which sets it outright.
///
/// FAULTS: a failing instruction returns its `Fault` before any of its
/// effects are applied, and the finger stays on the faulting platter.
#[derive(Debug, Default, Clone)]
pub struct CPU {
    /// Offset into the '0' array of the next platter to fetch.
    ///
    /// Starts at 0. Load Program may place it anywhere, including past the
    /// end of the new program; that only faults when the next fetch happens.
    pub finger: u32,

    /// General-purpose registers r0..r7.
    ///
    /// Instructions name them with three-bit fields, so every register
    /// number that can be encoded is valid.
    pub regs: Registers,

    /// Log every executed instruction at trace level.
    ///
    /// Off by default; the command line turns it on at `-vv`. The check sits
    /// in front of the trace event so a quiet run never formats a platter.
    pub verbose: bool,
}

impl CPU {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one fetch / decode / execute cycle.
    ///
    /// FETCH reads `arrays[0][finger]`; a finger past the end of the '0' array
    /// is a memory fault. DECODE rejects the two undefined operators. EXECUTE
    /// applies the instruction and moves the finger.
    ///
    /// On a fault the finger is left on the offending platter.
    pub fn step(
        &mut self,
        memory: &mut Memory,
        console: &mut dyn Console,
    ) -> Result<StepOutcome, Fault> {
        let platter = memory.fetch(self.finger)?;
        let instr = decode(platter)?;

        if self.verbose {
            trace!(
                finger = self.finger,
                platter = %format!("0x{:08x}", platter),
                "{}",
                instr.pretty_print()
            );
        }

        self.execute(instr, memory, console)
    }

    /// Applies a decoded instruction.
    ///
    /// Every instruction advances the finger by one, except Load Program,
    /// which places it at `r[c]` instead. Arithmetic wraps at 32 bits.
    pub fn execute(
        &mut self,
        instr: Instruction,
        memory: &mut Memory,
        console: &mut dyn Console,
    ) -> Result<StepOutcome, Fault> {
        let regs = &mut self.regs;
        let mut next_finger = self.finger.wrapping_add(1);
        let mut outcome = StepOutcome::Continue;

        match instr {
            Instruction::ConditionalMove { a, b, c } => {
                if regs[c] != 0 {
                    regs[a] = regs[b];
                }
            }
            Instruction::ArrayIndex { a, b, c } => {
                regs[a] = memory.index(regs[b], regs[c])?;
            }
            Instruction::ArrayAmendment { a, b, c } => {
                memory.amend(regs[a], regs[b], regs[c])?;
            }
            Instruction::Addition { a, b, c } => {
                regs[a] = regs[b].wrapping_add(regs[c]);
            }
            Instruction::Multiplication { a, b, c } => {
                regs[a] = regs[b].wrapping_mul(regs[c]);
            }
            Instruction::Division { a, b, c } => {
                regs[a] = regs[b]
                    .checked_div(regs[c])
                    .ok_or(ArithmeticFault::DivisionByZero)?;
            }
            Instruction::NotAnd { a, b, c } => {
                regs[a] = !(regs[b] & regs[c]);
            }
            Instruction::Halt => outcome = StepOutcome::Halt,
            Instruction::Allocation { b, c } => {
                regs[b] = memory.allocate(regs[c])?;
            }
            Instruction::Abandonment { c } => {
                memory.abandon(regs[c])?;
            }
            Instruction::Output { c } => {
                let value = regs[c];
                let byte = u8::try_from(value).map_err(|_| IoFault::OutputOutOfRange(value))?;
                console.write_byte(byte).map_err(IoFault::from)?;
            }
            Instruction::Input { c } => {
                regs[c] = match console.read_byte().map_err(IoFault::from)? {
                    Some(byte) => u32::from(byte),
                    None => END_OF_INPUT,
                };
            }
            Instruction::LoadProgram { b, c } => {
                memory.duplicate_into_zero(regs[b])?;
                next_finger = regs[c];
            }
            Instruction::Orthography { a, value } => {
                regs[a] = value;
            }
        }

        self.finger = next_finger;
        Ok(outcome)
    }
}
