use tracing::debug;

use crate::console::Console;
use crate::cpu::{StepOutcome, CPU};
use crate::error::{Fault, LoadError};
use crate::loader::load_program;
use crate::memory::Memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Running,
    /// Terminal. Reached only through the Halt operator.
    Halted,
    /// Terminal. Reached through any fault; the fault is kept on the VM.
    Trapped,
}

/// A Universal Machine: CPU, array table and console, owned together.
#[derive(Debug)]
pub struct VM<C: Console> {
    pub cpu: CPU,
    pub memory: Memory,
    console: C,
    state: MachineState,
    trap: Option<Fault>,
}

impl<C: Console> VM<C> {
    /// Builds a machine whose '0' array holds `program`, finger at 0.
    pub fn new(program: Vec<u32>, console: C) -> Self {
        debug!(platters = program.len(), "machine created");
        Self {
            cpu: CPU::new(),
            memory: Memory::new(program),
            console,
            state: MachineState::Running,
            trap: None,
        }
    }

    /// Builds a machine straight from a program image.
    pub fn load(image: &[u8], console: C) -> Result<Self, LoadError> {
        Ok(Self::new(load_program(image)?, console))
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    /// The fault that stopped the machine, if it trapped.
    pub fn trap(&self) -> Option<&Fault> {
        self.trap.as_ref()
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    /// Executes a single instruction.
    ///
    /// Both end states are final. A halted machine executes nothing and keeps
    /// reporting `Halt`. A trapped machine executes nothing and keeps returning
    /// the fault that stopped it; registers, memory and the finger are left as
    /// they were at the trap for inspection.
    pub fn step(&mut self) -> Result<StepOutcome, Fault> {
        if let Some(fault) = &self.trap {
            return Err(fault.clone());
        }
        if self.state == MachineState::Halted {
            return Ok(StepOutcome::Halt);
        }

        match self.cpu.step(&mut self.memory, &mut self.console) {
            Ok(StepOutcome::Halt) => {
                self.state = MachineState::Halted;
                debug!(finger = self.cpu.finger, "machine halted");
                Ok(StepOutcome::Halt)
            }
            Ok(StepOutcome::Continue) => Ok(StepOutcome::Continue),
            Err(fault) => {
                debug!(
                    finger = self.cpu.finger,
                    kind = fault.kind(),
                    %fault,
                    "machine trapped"
                );
                self.state = MachineState::Trapped;
                self.trap = Some(fault.clone());
                Err(fault)
            }
        }
    }

    /// Runs until Halt or the first fault.
    pub fn run(&mut self) -> Result<(), Fault> {
        while self.step()? == StepOutcome::Continue {}
        Ok(())
    }
}
