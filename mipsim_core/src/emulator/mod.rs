pub mod alu;
pub mod controller;
pub mod datapath;
mod data_memory;
mod error;
mod instruction_memory;
mod register_file;


pub use data_memory::DataMemory;
pub use error::EmulatorError;
pub use instruction_memory::InstructionMemory;
pub use register_file::RegisterFile;

use datapath::Datapath;

/// Architectural state of the simulated processor: register file, data
/// memory, and the datapath's PC. The instruction image lives outside the
/// state and is borrowed per cycle, since it is never written during
/// execution.
///
/// Stepping is functional in style: [`EmulatorState::clock`] leaves `self`
/// untouched and returns the state after one more cycle, so a driver can
/// keep snapshots around and compare runs.
#[derive(Clone, Debug, PartialEq)]
pub struct EmulatorState {
    rf: RegisterFile,
    data_memory: DataMemory,
    datapath: Datapath,
}

impl Default for EmulatorState {
    fn default() -> Self {
        Self::with_data_memory(DataMemory::new(DataMemory::DEFAULT_WORDS))
    }
}

impl EmulatorState {
    /// Fresh state: pc = 0, registers zeroed, default-sized zeroed memory.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_memory(data_memory: DataMemory) -> Self {
        EmulatorState {
            rf: RegisterFile::default(),
            data_memory,
            datapath: Datapath::default(),
        }
    }

    /// Advance the datapath by exactly one cycle.
    pub fn clock(&self, imem: &InstructionMemory) -> Result<Self, EmulatorError> {
        let mut next = self.clone();
        next.datapath
            .clock(imem, &mut next.rf, &mut next.data_memory)?;
        Ok(next)
    }

    /// Advance by `cycles` cycles, stopping at the first error.
    pub fn clock_for(
        &self,
        imem: &InstructionMemory,
        cycles: usize,
    ) -> Result<Self, EmulatorError> {
        let mut state = self.clone();
        for _ in 0..cycles {
            state = state.clock(imem)?;
        }
        Ok(state)
    }

    /// Committed register state only; never mid-cycle values.
    pub fn registers(&self) -> &RegisterFile {
        &self.rf
    }

    pub fn data_memory(&self) -> &DataMemory {
        &self.data_memory
    }

    pub fn pc(&self) -> u32 {
        self.datapath.pc
    }

    /// Wires and control signals of the last evaluated cycle, for tracing.
    pub fn datapath(&self) -> &Datapath {
        &self.datapath
    }
}
