use crate::error::DecodeError;
use crate::instruction::Instruction;
use crate::isa::Opcode;

/// Mask for a 3-bit register field.
const REG_MASK: u32 = 0x7;
/// Register A of the orthography layout sits right below the operator.
const ORTHO_REG_SHIFT: u32 = 25;
/// The orthography immediate occupies bits 24..0.
const ORTHO_VALUE_MASK: u32 = 0x01ff_ffff;

/// Decodes one platter into an `Instruction`.
///
/// PLATTER LAYOUTS:
/// ```text
/// standard (operators 0..=12):
///   31:28  operator
///   27:9   unused
///    8:6   register A
///    5:3   register B
///    2:0   register C
///
/// orthography (operator 13):
///   31:28  operator
///   27:25  register A
///   24:0   value (zero-extended)
/// ```
///
/// Bits an operator does not use are ignored. Operators 14 and 15 have no
/// meaning and decode to `DecodeError::UndefinedOperator`.
pub fn decode(platter: u32) -> Result<Instruction, DecodeError> {
    let raw = Opcode::raw(platter);
    let opcode = Opcode::from_u8(raw).ok_or(DecodeError::UndefinedOperator {
        opcode: raw,
        platter,
    })?;

    let a = ((platter >> 6) & REG_MASK) as usize;
    let b = ((platter >> 3) & REG_MASK) as usize;
    let c = (platter & REG_MASK) as usize;

    Ok(match opcode {
        Opcode::ConditionalMove => Instruction::ConditionalMove { a, b, c },
        Opcode::ArrayIndex => Instruction::ArrayIndex { a, b, c },
        Opcode::ArrayAmendment => Instruction::ArrayAmendment { a, b, c },
        Opcode::Addition => Instruction::Addition { a, b, c },
        Opcode::Multiplication => Instruction::Multiplication { a, b, c },
        Opcode::Division => Instruction::Division { a, b, c },
        Opcode::NotAnd => Instruction::NotAnd { a, b, c },
        Opcode::Halt => Instruction::Halt,
        Opcode::Allocation => Instruction::Allocation { b, c },
        Opcode::Abandonment => Instruction::Abandonment { c },
        Opcode::Output => Instruction::Output { c },
        Opcode::Input => Instruction::Input { c },
        Opcode::LoadProgram => Instruction::LoadProgram { b, c },
        Opcode::Orthography => Instruction::Orthography {
            a: ((platter >> ORTHO_REG_SHIFT) & REG_MASK) as usize,
            value: platter & ORTHO_VALUE_MASK,
        },
    })
}

/// Builds a standard-layout platter. Register fields are masked to 3 bits.
pub fn encode_standard(opcode: Opcode, a: usize, b: usize, c: usize) -> u32 {
    ((opcode as u32) << Opcode::SHIFT)
        | ((a as u32 & REG_MASK) << 6)
        | ((b as u32 & REG_MASK) << 3)
        | (c as u32 & REG_MASK)
}

/// Builds an orthography platter. `value` is truncated to 25 bits.
pub fn encode_orthography(a: usize, value: u32) -> u32 {
    ((Opcode::Orthography as u32) << Opcode::SHIFT)
        | ((a as u32 & REG_MASK) << ORTHO_REG_SHIFT)
        | (value & ORTHO_VALUE_MASK)
}
