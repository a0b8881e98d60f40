use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Every trap the machine can raise while running.
///
/// Faults are fatal: the run loop stops at the first one and hands it back to
/// the caller untouched. Nothing in the engine retries or recovers. A trapped
/// `VM` keeps its fault and returns a clone of it from every later step, so
/// faults are `Clone` down to the console error they may carry.
#[derive(Debug, Clone, Error)]
pub enum Fault {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Memory(#[from] MemoryFault),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticFault),
    #[error(transparent)]
    Resource(#[from] ResourceFault),
    #[error(transparent)]
    Io(#[from] IoFault),
}

impl Fault {
    /// Name of the fault category, used when reporting a trap to the user.
    pub fn kind(&self) -> &'static str {
        match self {
            Fault::Decode(_) => "DecodeError",
            Fault::Memory(_) => "MemoryFault",
            Fault::Arithmetic(_) => "ArithmeticFault",
            Fault::Resource(_) => "ResourceFault",
            Fault::Io(_) => "IOFault",
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("undefined operator {opcode} in platter 0x{platter:08x}")]
    UndefinedOperator { opcode: u8, platter: u32 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryFault {
    #[error("array 0x{0:08x} is not active")]
    InactiveArray(u32),
    #[error("offset {offset} is out of bounds for array 0x{handle:08x} (length {len})")]
    OutOfBounds { handle: u32, offset: u32, len: usize },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticFault {
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFault {
    #[error("the '0' array cannot be abandoned")]
    AbandonProgramArray,
    #[error("array 0x{0:08x} is not active and cannot be abandoned")]
    AbandonInactive(u32),
    #[error("no free array identifiers remain")]
    HandlesExhausted,
}

#[derive(Debug, Clone, Error)]
pub enum IoFault {
    #[error("output value {0} is outside the byte range 0..=255")]
    OutputOutOfRange(u32),
    #[error("console stream failed: {0}")]
    Console(#[source] Arc<io::Error>),
}

impl From<io::Error> for IoFault {
    fn from(err: io::Error) -> Self {
        IoFault::Console(Arc::new(err))
    }
}

/// Problems turning a byte image into the initial program array.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program image is {len} bytes long, which is not a multiple of 4")]
    TruncatedPlatter { len: usize },
    #[error("failed to read program image: {0}")]
    Io(#[from] io::Error),
}
