use super::alu::AluOp;
use super::error::EmulatorError;
use crate::isa::Instruction;

/// Write-back destination register selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegDst {
    Rt,
    Rd,
}

/// ALU operand B mux selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AluSrc {
    /// rt register value (R-type, BEQ).
    Reg,
    /// Immediate, sign-extended to 32 bits.
    SignExtImm,
    /// Immediate, zero-extended to 32 bits.
    ZeroExtImm,
    /// Immediate, zero-extended then shifted left by 16 (LUI only).
    ShiftImm,
}

/// Control signals for the single-cycle datapath: a pure function of the
/// decoded (opcode, funct) pair.
///
/// Fields an instruction does not use hold their mux defaults (`reg_dst`
/// and `mem_to_reg` are don't-care for SW and BEQ); the enables gate every
/// effect, so a don't-care value never commits anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ControlSignals {
    pub reg_dst: RegDst,
    pub branch: bool,
    pub reg_write: bool,
    pub alu_src: AluSrc,
    pub mem_write: bool,
    pub mem_to_reg: bool,
    pub alu_op: AluOp,
}

impl ControlSignals {
    /// R-type arithmetic: rd := rs OP rt.
    pub fn register(op: AluOp) -> Self {
        Self {
            reg_dst: RegDst::Rd,
            branch: false,
            reg_write: true,
            alu_src: AluSrc::Reg,
            mem_write: false,
            mem_to_reg: false,
            alu_op: op,
        }
    }

    /// I-type arithmetic: rt := rs OP ext(imm).
    pub fn immediate(src: AluSrc, op: AluOp) -> Self {
        Self {
            reg_dst: RegDst::Rt,
            branch: false,
            reg_write: true,
            alu_src: src,
            mem_write: false,
            mem_to_reg: false,
            alu_op: op,
        }
    }

    /// LW: rt := d_mem[rs + sign_ext(imm)].
    pub fn load() -> Self {
        Self {
            reg_dst: RegDst::Rt,
            branch: false,
            reg_write: true,
            alu_src: AluSrc::SignExtImm,
            mem_write: false,
            mem_to_reg: true,
            alu_op: AluOp::Add,
        }
    }

    /// SW: d_mem[rs + sign_ext(imm)] := rt.
    pub fn store() -> Self {
        Self {
            reg_dst: RegDst::Rt,
            branch: false,
            reg_write: false,
            alu_src: AluSrc::SignExtImm,
            mem_write: true,
            mem_to_reg: false,
            alu_op: AluOp::Add,
        }
    }

    /// BEQ: compare rs and rt, branch on the equality flag.
    pub fn branch() -> Self {
        Self {
            reg_dst: RegDst::Rt,
            branch: true,
            reg_write: false,
            alu_src: AluSrc::Reg,
            mem_write: false,
            mem_to_reg: false,
            alu_op: AluOp::Beq,
        }
    }
}

/// Control table for the supported subset. An (opcode, funct) pair without
/// a row is an unsupported-instruction error, never a defaulted bundle.
pub fn get_control_signals(
    instr: Instruction,
    pc: u32,
) -> Result<ControlSignals, EmulatorError> {
    let unsupported = EmulatorError::UnsupportedInstruction {
        opcode: instr.opcode(),
        funct: instr.funct(),
        pc,
    };
    match instr.opcode() {
        0x00 => match instr.funct() {
            0x20 => Ok(ControlSignals::register(AluOp::Add)), // ADD
            0x24 => Ok(ControlSignals::register(AluOp::And)), // AND
            0x2A => Ok(ControlSignals::register(AluOp::Slt)), // SLT
            _ => Err(unsupported),
        },
        0x08 => Ok(ControlSignals::immediate(AluSrc::SignExtImm, AluOp::Add)), // ADDI
        0x0D => Ok(ControlSignals::immediate(AluSrc::ZeroExtImm, AluOp::Or)),  // ORI
        0x0F => Ok(ControlSignals::immediate(AluSrc::ShiftImm, AluOp::Lui)),   // LUI
        0x23 => Ok(ControlSignals::load()),                                    // LW
        0x2B => Ok(ControlSignals::store()),                                   // SW
        0x04 => Ok(ControlSignals::branch()),                                  // BEQ
        _ => Err(unsupported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::{ISA, Operands};
    use strum::IntoEnumIterator;

    fn signals_for(isa: ISA) -> ControlSignals {
        let instr = isa.build(Operands::default());
        get_control_signals(instr, 0).unwrap()
    }

    #[test]
    fn test_table_matches_every_supported_instruction() {
        let expected = [
            (ISA::ADD, ControlSignals::register(AluOp::Add)),
            (ISA::AND, ControlSignals::register(AluOp::And)),
            (ISA::SLT, ControlSignals::register(AluOp::Slt)),
            (
                ISA::ADDI,
                ControlSignals::immediate(AluSrc::SignExtImm, AluOp::Add),
            ),
            (
                ISA::LUI,
                ControlSignals::immediate(AluSrc::ShiftImm, AluOp::Lui),
            ),
            (
                ISA::ORI,
                ControlSignals::immediate(AluSrc::ZeroExtImm, AluOp::Or),
            ),
            (ISA::LW, ControlSignals::load()),
            (ISA::SW, ControlSignals::store()),
            (ISA::BEQ, ControlSignals::branch()),
        ];
        assert_eq!(expected.len(), ISA::iter().count());
        for (isa, signals) in expected {
            assert_eq!(signals_for(isa), signals, "{isa}");
        }
    }

    #[test]
    fn test_table_rows_are_exact() {
        // Spot-check individual fields rather than going through the
        // constructors the table itself uses.
        let lw = signals_for(ISA::LW);
        assert_eq!(lw.reg_dst, RegDst::Rt);
        assert!(lw.reg_write && lw.mem_to_reg && !lw.mem_write && !lw.branch);
        assert_eq!(lw.alu_src, AluSrc::SignExtImm);
        assert_eq!(lw.alu_op, AluOp::Add);

        let sw = signals_for(ISA::SW);
        assert!(sw.mem_write && !sw.reg_write && !sw.branch);
        assert_eq!(sw.alu_op, AluOp::Add);

        let beq = signals_for(ISA::BEQ);
        assert!(beq.branch && !beq.reg_write && !beq.mem_write);
        assert_eq!(beq.alu_src, AluSrc::Reg);
        assert_eq!(beq.alu_op, AluOp::Beq);

        let add = signals_for(ISA::ADD);
        assert_eq!(add.reg_dst, RegDst::Rd);
        assert!(add.reg_write && !add.mem_to_reg);
    }

    #[test]
    fn test_unknown_pairs_are_unsupported() {
        for raw in [
            0x01095022u32, // SUB: opcode 0, funct 0x22
            0x00000000,    // SLL x0 (all zeroes): funct 0x00 not in the subset
            0x08000000,    // J: J-type is out of scope
            0xFC000000,    // opcode 0x3F
        ] {
            let instr = Instruction::from_raw(raw);
            assert_eq!(
                get_control_signals(instr, 3),
                Err(EmulatorError::UnsupportedInstruction {
                    opcode: instr.opcode(),
                    funct: instr.funct(),
                    pc: 3,
                }),
                "{raw:#010x}"
            );
        }
    }
}
