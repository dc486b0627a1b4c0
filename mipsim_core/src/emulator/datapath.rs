use super::alu;
use super::controller::{AluSrc, ControlSignals, RegDst, get_control_signals};
use super::data_memory::DataMemory;
use super::error::EmulatorError;
use super::instruction_memory::InstructionMemory;
use super::register_file::RegisterFile;
use crate::isa::Instruction;

/// Wires in the single-cycle datapath.
///
/// Every field is recomputed from scratch each cycle; nothing here carries
/// stale combinational values across a cycle boundary. Only the PC register
/// on [`Datapath`] itself persists.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DatapathWires {
    // decoded instruction fields
    pub reg_s: u8,
    pub reg_t: u8,
    pub reg_d: u8,
    pub imm: u16,

    // register file outputs
    pub data_s: u32,
    pub data_t: u32,

    // alu
    pub alu_op_b: u32,
    pub alu_out: u32,
    pub alu_eq: bool,

    // memory and write-back
    pub mem_rdata: u32,
    pub write_reg: u8,
    pub reg_write_data: u32,

    // program counter
    pub next_pc: u32,
}

/// The program counter plus the combinational wires of the last evaluated
/// cycle, kept around for inspection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Datapath {
    pub pc: u32,
    pub wires: DatapathWires,
    pub control: Option<ControlSignals>,
}

impl Datapath {
    /// Evaluate one full cycle.
    ///
    /// The combinational phase reads only start-of-cycle state; the register
    /// file, data memory, and PC then latch together at the cycle boundary,
    /// so no read ever observes a same-cycle write. On error nothing
    /// commits and the state is unchanged apart from the wire snapshot.
    pub fn clock(
        &mut self,
        imem: &InstructionMemory,
        registers: &mut RegisterFile,
        data_memory: &mut DataMemory,
    ) -> Result<(), EmulatorError> {
        // Combinational phase
        let instr = Instruction::from_raw(imem.fetch(self.pc)?);
        let control = get_control_signals(instr, self.pc)?;
        self.control = Some(control);

        self.run_decode(instr);
        self.run_read_registers(registers);
        self.run_operand_mux(control);
        self.run_alu(control);
        self.run_data_memory(control, data_memory)?;
        self.run_write_data_mux(control);
        self.run_write_reg_mux(control);
        self.run_pc_mux(control);

        // Synchronous phase: commit every enabled write at the boundary.
        // The enables are independent and evaluated independently, even
        // though no instruction in the subset sets more than one.
        self.run_write_register(control, registers);
        self.run_memory_write(control, data_memory)?;
        self.run_pc_reg();
        Ok(())
    }

    fn run_decode(&mut self, instr: Instruction) {
        self.wires.reg_s = instr.rs();
        self.wires.reg_t = instr.rt();
        self.wires.reg_d = instr.rd();
        self.wires.imm = instr.immediate();
    }

    fn run_read_registers(&mut self, register_file: &RegisterFile) {
        self.wires.data_s = register_file[self.wires.reg_s as usize];
        self.wires.data_t = register_file[self.wires.reg_t as usize];
    }

    fn run_operand_mux(&mut self, control: ControlSignals) {
        let imm = self.wires.imm;
        self.wires.alu_op_b = match control.alu_src {
            AluSrc::Reg => self.wires.data_t,
            AluSrc::SignExtImm => imm as i16 as i32 as u32,
            AluSrc::ZeroExtImm => imm as u32,
            AluSrc::ShiftImm => (imm as u32) << 16,
        };
    }

    fn run_alu(&mut self, control: ControlSignals) {
        let a = self.wires.data_s;
        let b = self.wires.alu_op_b;
        self.wires.alu_out = control.alu_op.apply(a, b);
        self.wires.alu_eq = alu::eq_flag(a, b);
    }

    fn run_data_memory(
        &mut self,
        control: ControlSignals,
        data_memory: &DataMemory,
    ) -> Result<(), EmulatorError> {
        // Combinational read at the ALU-computed address (LW). An enabled
        // store is bounds-checked here too, so a bad address aborts the
        // cycle before anything has committed.
        self.wires.mem_rdata = if control.mem_to_reg {
            data_memory.read(self.wires.alu_out)?
        } else {
            0
        };
        if control.mem_write {
            data_memory.check_address(self.wires.alu_out)?;
        }
        Ok(())
    }

    fn run_write_data_mux(&mut self, control: ControlSignals) {
        self.wires.reg_write_data = if control.mem_to_reg {
            self.wires.mem_rdata
        } else {
            self.wires.alu_out
        };
    }

    fn run_write_reg_mux(&mut self, control: ControlSignals) {
        self.wires.write_reg = match control.reg_dst {
            RegDst::Rt => self.wires.reg_t,
            RegDst::Rd => self.wires.reg_d,
        };
    }

    fn run_pc_mux(&mut self, control: ControlSignals) {
        // Word-relative update: memories here are word-addressed, so the
        // increment is 1 and a taken branch lands at pc + 1 + sign_ext(imm).
        // There is NO x4 byte scaling as in the real MIPS encoding; branch
        // offsets in ported programs must be word counts.
        let incremented = self.pc.wrapping_add(1);
        self.wires.next_pc = if control.branch && self.wires.alu_eq {
            incremented.wrapping_add(self.wires.imm as i16 as i32 as u32)
        } else {
            incremented
        };
    }

    fn run_write_register(&mut self, control: ControlSignals, register_file: &mut RegisterFile) {
        if control.reg_write {
            register_file.write(self.wires.write_reg as usize, self.wires.reg_write_data);
        }
    }

    fn run_memory_write(
        &mut self,
        control: ControlSignals,
        data_memory: &mut DataMemory,
    ) -> Result<(), EmulatorError> {
        if control.mem_write {
            // The stored value is always the rt register, never the
            // write-back mux output.
            data_memory.write(self.wires.alu_out, self.wires.data_t)?;
        }
        Ok(())
    }

    fn run_pc_reg(&mut self) {
        self.pc = self.wires.next_pc;
    }
}
