use crate::isa::Opcode;

/// A decoded platter.
///
/// One variant per defined operator, carrying only the operand fields that
/// operator reads. Register operands are already masked to 0..=7 by the
/// decoder, so they can index the register file directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// if r[c] != 0 { r[a] = r[b] }
    ConditionalMove { a: usize, b: usize, c: usize },
    /// r[a] = arrays[r[b]][r[c]]
    ArrayIndex { a: usize, b: usize, c: usize },
    /// arrays[r[a]][r[b]] = r[c]
    ArrayAmendment { a: usize, b: usize, c: usize },
    /// r[a] = r[b] + r[c]
    Addition { a: usize, b: usize, c: usize },
    /// r[a] = r[b] * r[c]
    Multiplication { a: usize, b: usize, c: usize },
    /// r[a] = r[b] / r[c]
    Division { a: usize, b: usize, c: usize },
    /// r[a] = !(r[b] & r[c])
    NotAnd { a: usize, b: usize, c: usize },
    Halt,
    /// r[b] = allocate(r[c])
    Allocation { b: usize, c: usize },
    /// abandon(r[c])
    Abandonment { c: usize },
    /// putc(r[c])
    Output { c: usize },
    /// r[c] = getc()
    Input { c: usize },
    /// arrays[0] = arrays[r[b]].clone(); finger = r[c]
    LoadProgram { b: usize, c: usize },
    /// r[a] = value
    Orthography { a: usize, value: u32 },
}

impl Instruction {
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::ConditionalMove { .. } => Opcode::ConditionalMove,
            Instruction::ArrayIndex { .. } => Opcode::ArrayIndex,
            Instruction::ArrayAmendment { .. } => Opcode::ArrayAmendment,
            Instruction::Addition { .. } => Opcode::Addition,
            Instruction::Multiplication { .. } => Opcode::Multiplication,
            Instruction::Division { .. } => Opcode::Division,
            Instruction::NotAnd { .. } => Opcode::NotAnd,
            Instruction::Halt => Opcode::Halt,
            Instruction::Allocation { .. } => Opcode::Allocation,
            Instruction::Abandonment { .. } => Opcode::Abandonment,
            Instruction::Output { .. } => Opcode::Output,
            Instruction::Input { .. } => Opcode::Input,
            Instruction::LoadProgram { .. } => Opcode::LoadProgram,
            Instruction::Orthography { .. } => Opcode::Orthography,
        }
    }

    /// Assembly-like rendering used by the execution trace.
    pub fn pretty_print(&self) -> String {
        match self {
            Instruction::ConditionalMove { a, b, c } => format!("cmov  r{a}, r{b}, r{c}"),
            Instruction::ArrayIndex { a, b, c } => format!("index r{a}, r{b}[r{c}]"),
            Instruction::ArrayAmendment { a, b, c } => format!("amend r{a}[r{b}], r{c}"),
            Instruction::Addition { a, b, c } => format!("add   r{a}, r{b}, r{c}"),
            Instruction::Multiplication { a, b, c } => format!("mul   r{a}, r{b}, r{c}"),
            Instruction::Division { a, b, c } => format!("div   r{a}, r{b}, r{c}"),
            Instruction::NotAnd { a, b, c } => format!("nand  r{a}, r{b}, r{c}"),
            Instruction::Halt => "halt".to_string(),
            Instruction::Allocation { b, c } => format!("alloc r{b}, r{c}"),
            Instruction::Abandonment { c } => format!("free  r{c}"),
            Instruction::Output { c } => format!("out   r{c}"),
            Instruction::Input { c } => format!("in    r{c}"),
            Instruction::LoadProgram { b, c } => format!("load  r{b}, r{c}"),
            Instruction::Orthography { a, value } => format!("ortho r{a}, {value}"),
        }
    }
}
