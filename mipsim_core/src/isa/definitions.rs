use strum::IntoEnumIterator;

use super::instruction::{Instruction, InstructionBuildError};

/// The two supported instruction encodings. J-type is not modeled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionFormat {
    R,
    I,
}

/// Encoding constants for one instruction: the primary opcode, and the funct
/// selector for the R-type rows sharing opcode 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionDefinition {
    pub format: InstructionFormat,
    pub opcode: u8,
    pub funct: Option<u8>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    pub rs: u32,
    pub rt: u32,
    pub rd: u32,
    pub imm: i32,
}

/// The supported MIPS subset.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum ISA {
    ADD,
    AND,
    SLT,
    ADDI,
    LUI,
    ORI,
    LW,
    SW,
    BEQ,
}

impl ISA {
    pub fn definition(&self) -> InstructionDefinition {
        use InstructionFormat::*;
        match self {
            ISA::ADD => InstructionDefinition {
                format: R,
                opcode: 0x00,
                funct: Some(0x20),
            },
            ISA::AND => InstructionDefinition {
                format: R,
                opcode: 0x00,
                funct: Some(0x24),
            },
            ISA::SLT => InstructionDefinition {
                format: R,
                opcode: 0x00,
                funct: Some(0x2A),
            },
            ISA::ADDI => InstructionDefinition {
                format: I,
                opcode: 0x08,
                funct: None,
            },
            ISA::LUI => InstructionDefinition {
                format: I,
                opcode: 0x0F,
                funct: None,
            },
            ISA::ORI => InstructionDefinition {
                format: I,
                opcode: 0x0D,
                funct: None,
            },
            ISA::LW => InstructionDefinition {
                format: I,
                opcode: 0x23,
                funct: None,
            },
            ISA::SW => InstructionDefinition {
                format: I,
                opcode: 0x2B,
                funct: None,
            },
            ISA::BEQ => InstructionDefinition {
                format: I,
                opcode: 0x04,
                funct: None,
            },
        }
    }

    /// The instruction matching a raw word's (opcode, funct) pair, if any.
    pub fn from_instr(instr: Instruction) -> Option<ISA> {
        ISA::iter().find(|isa| {
            let def = isa.definition();
            def.opcode == instr.opcode() && def.funct.is_none_or(|f| f == instr.funct())
        })
    }

    pub fn build(&self, operands: Operands) -> Instruction {
        self.try_build(operands).expect("Invalid instruction")
    }

    pub fn try_build(&self, operands: Operands) -> Result<Instruction, InstructionBuildError> {
        let def = self.definition();
        Instruction::try_build(
            def.format,
            def.opcode as u32,
            operands.rs,
            operands.rt,
            operands.rd,
            def.funct.unwrap_or_default() as u32,
            operands.imm,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_round_trip() {
        for isa in ISA::iter() {
            let instr = isa.build(Operands::default());
            assert_eq!(ISA::from_instr(instr), Some(isa), "{isa} did not round-trip");
        }
    }

    #[test]
    fn test_unknown_words_have_no_definition() {
        // SUB shares opcode 0 but funct 0x22 is not in the subset
        assert_eq!(ISA::from_instr(Instruction::from_raw(0x01095022)), None);
        // J-type opcode
        assert_eq!(ISA::from_instr(Instruction::from_raw(0x08000000)), None);
    }

    #[test]
    fn test_mnemonic_strings() {
        use std::str::FromStr;
        assert_eq!(ISA::LW.to_string(), "LW");
        assert_eq!(ISA::from_str("BEQ"), Ok(ISA::BEQ));
        assert!(ISA::from_str("JAL").is_err());
    }
}
