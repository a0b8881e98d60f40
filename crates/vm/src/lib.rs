pub mod console;
pub mod cpu;
pub mod decoder;
pub mod error;
pub mod instruction;
pub mod isa;
pub mod loader;
pub mod memory;
pub mod registers;
pub mod vm;

pub use console::{BufferConsole, Console, StreamConsole};
pub use cpu::{StepOutcome, CPU};
pub use error::{Fault, LoadError};
pub use vm::{MachineState, VM};
