use thiserror::Error;

/// Errors surfaced while loading an image or stepping the datapath.
///
/// None of these are recoverable within a cycle; they propagate to the
/// driver, which decides whether to halt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmulatorError {
    /// The decoded (opcode, funct) pair has no row in the control table.
    /// Control signals are never defaulted for unknown words, since a silent
    /// default would mask an assembler or image defect.
    #[error("unsupported instruction at pc {pc:#x}: opcode {opcode:#04x}, funct {funct:#04x}")]
    UnsupportedInstruction { opcode: u8, funct: u8, pc: u32 },

    /// A load or store address fell outside the configured data memory.
    #[error("data address {address:#x} outside memory of {len} words")]
    DataAddressOutOfRange { address: u32, len: usize },

    /// An instruction fetch fell outside the loaded image.
    #[error("instruction fetch at pc {pc:#x} outside image of {len} words")]
    FetchOutOfRange { pc: u32, len: usize },

    /// A supplied memory image does not fit the configured capacity.
    /// Rejected at load time, before any cycle executes.
    #[error("memory image of {words} words exceeds capacity of {capacity}")]
    ImageTooLarge { words: usize, capacity: usize },
}
