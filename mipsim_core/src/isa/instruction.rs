use super::InstructionFormat;
use crate::{bitmask, bits};

/// A raw 32-bit MIPS instruction word.
///
/// Field accessors are pure bit extraction: any 32-bit value decodes, and
/// whether the decoded fields name a supported instruction is the
/// controller's concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    instr: u32,
}

#[derive(Debug)]
pub struct InstructionBuildError {
    pub error_message: String,
    pub error_type: InstructionBuildErrorType,
}

#[derive(Debug)]
pub enum InstructionBuildErrorType {
    InvalidOpcode,
    InvalidRs,
    InvalidRt,
    InvalidRd,
    InvalidFunct,
    InvalidImm,
}

impl Instruction {
    pub fn try_build(
        format: InstructionFormat,
        opcode: u32,
        rs: u32,
        rt: u32,
        rd: u32,
        funct: u32,
        imm: i32,
    ) -> Result<Instruction, InstructionBuildError> {
        if opcode != bits!(opcode,5;0) {
            Err(InstructionBuildError {
                error_message: format!("Opcode {opcode:#04x} is out of range."),
                error_type: InstructionBuildErrorType::InvalidOpcode,
            })
        } else if rs != bits!(rs,4;0) {
            Err(InstructionBuildError {
                error_message: format!("Rs {rs:#04x} is out of range."),
                error_type: InstructionBuildErrorType::InvalidRs,
            })
        } else if rt != bits!(rt,4;0) {
            Err(InstructionBuildError {
                error_message: format!("Rt {rt:#04x} is out of range."),
                error_type: InstructionBuildErrorType::InvalidRt,
            })
        } else if rd != bits!(rd,4;0) {
            Err(InstructionBuildError {
                error_message: format!("Rd {rd:#04x} is out of range."),
                error_type: InstructionBuildErrorType::InvalidRd,
            })
        } else if funct != bits!(funct,5;0) {
            Err(InstructionBuildError {
                error_message: format!("Funct {funct:#04x} is out of range."),
                error_type: InstructionBuildErrorType::InvalidFunct,
            })
        } else {
            let instr = match format {
                InstructionFormat::R => {
                    if imm != 0 {
                        Err(InstructionBuildError {
                            error_message: "Unexpected operand immediate for R type instruction."
                                .into(),
                            error_type: InstructionBuildErrorType::InvalidImm,
                        })
                    } else {
                        Self::encode_r(opcode, rs, rt, rd, funct)
                    }
                }
                InstructionFormat::I => {
                    if rd != 0 {
                        Err(InstructionBuildError {
                            error_message: "Unexpected operand rd for I type instruction.".into(),
                            error_type: InstructionBuildErrorType::InvalidRd,
                        })
                    } else if funct != 0 {
                        Err(InstructionBuildError {
                            error_message: "Unexpected operand funct for I type instruction."
                                .into(),
                            error_type: InstructionBuildErrorType::InvalidFunct,
                        })
                    } else {
                        Self::encode_i(opcode, rs, rt, imm)
                    }
                }
            }?;
            Ok(Self { instr })
        }
    }

    pub fn from_raw(instr: u32) -> Instruction {
        Self { instr }
    }

    fn encode_r(
        opcode: u32,
        rs: u32,
        rt: u32,
        rd: u32,
        funct: u32,
    ) -> Result<u32, InstructionBuildError> {
        Ok((opcode << 26) | (rs << 21) | (rt << 16) | (rd << 11) | funct)
    }

    fn encode_i(opcode: u32, rs: u32, rt: u32, imm: i32) -> Result<u32, InstructionBuildError> {
        if !((imm == bits!(imm,15;0)) || (imm & bitmask!(31;15) == bitmask!(31;15))) {
            Err(InstructionBuildError {
                error_message: format!(
                    "Immediate {imm:#06x} is out of range for I type instruction."
                ),
                error_type: InstructionBuildErrorType::InvalidImm,
            })
        } else {
            let imm = imm as u32;
            Ok((opcode << 26) | (rs << 21) | (rt << 16) | bits!(imm,15;0))
        }
    }

    pub fn raw(&self) -> u32 {
        self.instr
    }

    pub fn opcode(&self) -> u8 {
        bits!(self.instr,31;26) as u8
    }

    pub fn rs(&self) -> u8 {
        bits!(self.instr,25;21) as u8
    }

    pub fn rt(&self) -> u8 {
        bits!(self.instr,20;16) as u8
    }

    pub fn rd(&self) -> u8 {
        bits!(self.instr,15;11) as u8
    }

    pub fn shamt(&self) -> u8 {
        bits!(self.instr,10;6) as u8
    }

    pub fn funct(&self) -> u8 {
        bits!(self.instr,5;0) as u8
    }

    /// The raw 16-bit immediate. Sign- or zero-extension is per-instruction
    /// and happens in the operand mux, not here.
    pub fn immediate(&self) -> u16 {
        bits!(self.instr,15;0) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{ISA, Operands};

    #[test]
    fn test_field_extraction() {
        // ADD x10 := x8 + x9
        let instr = Instruction::from_raw(0x01095020);
        assert_eq!(instr.opcode(), 0x00);
        assert_eq!(instr.rs(), 8);
        assert_eq!(instr.rt(), 9);
        assert_eq!(instr.rd(), 10);
        assert_eq!(instr.shamt(), 0);
        assert_eq!(instr.funct(), 0x20);

        // ADDI x8 := x0 + 5
        let instr = Instruction::from_raw(0x20080005);
        assert_eq!(instr.opcode(), 0x08);
        assert_eq!(instr.rs(), 0);
        assert_eq!(instr.rt(), 8);
        assert_eq!(instr.immediate(), 5);
    }

    #[test]
    fn test_encode_matches_assembled_words() {
        assert_eq!(
            ISA::ADD
                .build(Operands {
                    rs: 8,
                    rt: 9,
                    rd: 10,
                    ..Default::default()
                })
                .raw(),
            0x01095020
        );
        assert_eq!(
            ISA::ADDI
                .build(Operands {
                    rs: 0,
                    rt: 8,
                    imm: 5,
                    ..Default::default()
                })
                .raw(),
            0x20080005
        );
        assert_eq!(
            ISA::SW
                .build(Operands {
                    rs: 0,
                    rt: 10,
                    ..Default::default()
                })
                .raw(),
            0xAC0A0000
        );
        assert_eq!(
            ISA::LW
                .build(Operands {
                    rs: 0,
                    rt: 2,
                    ..Default::default()
                })
                .raw(),
            0x8C020000
        );
    }

    #[test]
    fn test_negative_immediate_round_trips() {
        let instr = ISA::ADDI.build(Operands {
            rs: 1,
            rt: 2,
            imm: -4,
            ..Default::default()
        });
        assert_eq!(instr.immediate(), 0xFFFC);
        assert_eq!(instr.immediate() as i16, -4);
    }

    #[test]
    fn test_out_of_range_operands_rejected() {
        assert!(
            ISA::ADD
                .try_build(Operands {
                    rs: 32,
                    ..Default::default()
                })
                .is_err()
        );
        assert!(
            ISA::ADDI
                .try_build(Operands {
                    imm: 0x10000,
                    ..Default::default()
                })
                .is_err()
        );
        assert!(
            ISA::ADDI
                .try_build(Operands {
                    imm: -0x8001,
                    ..Default::default()
                })
                .is_err()
        );
        // R-type instructions take no immediate
        assert!(
            ISA::ADD
                .try_build(Operands {
                    imm: 1,
                    ..Default::default()
                })
                .is_err()
        );
    }
}
