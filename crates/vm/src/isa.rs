/// Operator numbers of the Universal Machine.
///
/// The operator lives in the top four bits of every platter. Sixteen values
/// fit in that field but only fourteen are defined; 14 and 15 are rejected by
/// `from_u8` and surface as a decode error when such a platter is fetched.
///
/// STANDARD LAYOUT (operators 0 through 12):
/// ```text
///  31    28 27                     9 8   6 5   3 2   0
/// +--------+------------------------+-----+-----+-----+
/// |   op   |        (unused)        |  A  |  B  |  C  |
/// +--------+------------------------+-----+-----+-----+
/// ```
///
/// ORTHOGRAPHY LAYOUT (operator 13):
/// ```text
///  31    28 27  25 24                               0
/// +--------+------+----------------------------------+
/// |   13   |  A   |              value               |
/// +--------+------+----------------------------------+
/// ```
///
/// Unused bits are ignored rather than rejected, so two platters that differ
/// only there decode to the same instruction.
///
/// GROUPS: operators 0, 3, 4, 5 and 6 work purely on registers; 1, 2, 8, 9
/// and 12 touch the array table; 10 and 11 are the only I/O; 7 stops the
/// machine and 13 is the only way to put a constant into a register.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// A receives B unless C is zero.
    ConditionalMove = 0,
    /// A receives the platter at offset C of array B.
    ArrayIndex = 1,
    /// Array A at offset B is set to C.
    ArrayAmendment = 2,
    /// A receives B + C, wrapping.
    Addition = 3,
    /// A receives B * C, wrapping.
    Multiplication = 4,
    /// A receives B / C, unsigned; traps when C is zero.
    Division = 5,
    /// A receives !(B & C).
    NotAnd = 6,
    /// Stops the machine.
    Halt = 7,
    /// A fresh zeroed array of C platters; its identifier goes into B.
    Allocation = 8,
    /// Frees the array identified by C.
    Abandonment = 9,
    /// Writes the byte in C to the console.
    Output = 10,
    /// Reads one byte from the console into C.
    Input = 11,
    /// Replaces array 0 with a copy of array B and jumps to offset C.
    LoadProgram = 12,
    /// Loads a 25-bit immediate into a register.
    Orthography = 13,
}

impl Opcode {
    /// Bit position of the operator field.
    pub const SHIFT: u32 = 28;

    /// Maps the raw 4-bit operator number onto an `Opcode`.
    /// Returns `None` for the two undefined operator numbers.
    pub fn from_u8(value: u8) -> Option<Self> {
        use Opcode::*;
        Some(match value {
            0 => ConditionalMove,
            1 => ArrayIndex,
            2 => ArrayAmendment,
            3 => Addition,
            4 => Multiplication,
            5 => Division,
            6 => NotAnd,
            7 => Halt,
            8 => Allocation,
            9 => Abandonment,
            10 => Output,
            11 => Input,
            12 => LoadProgram,
            13 => Orthography,
            _ => return None,
        })
    }

    /// Extracts the raw operator number (bits 31..28) of a platter.
    pub fn raw(platter: u32) -> u8 {
        (platter >> Self::SHIFT) as u8
    }
}
