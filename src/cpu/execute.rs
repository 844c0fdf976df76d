// CPU execution and trace logging

use crate::bus::CpuBus;
use crate::cpu::addressing::{AddressingMode, AddressingResult};
use crate::cpu::opcodes::{OpcodeInfo, OPCODE_TABLE};
use crate::cpu::Cpu;

impl Cpu {
    /// Execute one CPU instruction
    ///
    /// Polls the NMI line first; a pending edge is serviced between
    /// instructions and charges its 7 cycles without executing an opcode.
    /// Otherwise fetches, decodes, and executes one instruction, charging its
    /// base cycle count plus any page-cross and branch penalties.
    ///
    /// # Returns
    /// The number of cycles consumed by this step
    pub fn step(&mut self, bus: &mut CpuBus) -> u8 {
        if self.nmi_line.take() {
            self.nmi(bus);
            return 7;
        }

        let opcode = bus.read(self.pc);
        let opcode_info = &OPCODE_TABLE[opcode as usize];

        self.pc = self.pc.wrapping_add(1);

        let addr_result = match opcode_info.mode {
            AddressingMode::Implied => self.addr_implied(),
            AddressingMode::Accumulator => self.addr_accumulator(),
            AddressingMode::Immediate => self.addr_immediate(bus),
            AddressingMode::ZeroPage => self.addr_zero_page(bus),
            AddressingMode::ZeroPageX => self.addr_zero_page_x(bus),
            AddressingMode::ZeroPageY => self.addr_zero_page_y(bus),
            AddressingMode::Relative => self.addr_relative(bus),
            AddressingMode::Absolute => self.addr_absolute(bus),
            AddressingMode::AbsoluteX => self.addr_absolute_x(bus),
            AddressingMode::AbsoluteY => self.addr_absolute_y(bus),
            AddressingMode::Indirect => self.addr_indirect(bus),
            AddressingMode::IndexedIndirect => self.addr_indexed_indirect(bus),
            AddressingMode::IndirectIndexed => self.addr_indirect_indexed(bus),
        };

        let extra_cycles = self.execute_instruction(opcode, &addr_result, bus);

        // Base cycles, plus the indexed-mode page-cross penalty. Branches
        // account for their own penalties through extra_cycles.
        let mut cycles = opcode_info.cycles;
        if addr_result.page_crossed && opcode_info.mode != AddressingMode::Relative {
            cycles += 1;
        }
        cycles += extra_cycles;

        self.cycles = self.cycles.wrapping_add(cycles as u64);

        cycles
    }

    /// Execute a specific instruction based on its opcode
    /// Returns the number of extra cycles consumed (used by branches)
    #[allow(clippy::too_many_lines)]
    fn execute_instruction(
        &mut self,
        opcode: u8,
        addr_result: &AddressingResult,
        bus: &mut CpuBus,
    ) -> u8 {
        match opcode {
            // Load/Store instructions
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(bus, addr_result),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(bus, addr_result),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(bus, addr_result),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(bus, addr_result),
            0x86 | 0x96 | 0x8E => self.stx(bus, addr_result),
            0x84 | 0x94 | 0x8C => self.sty(bus, addr_result),

            // Arithmetic instructions
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(bus, addr_result),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 | 0xEB => {
                self.sbc(bus, addr_result)
            }
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(bus, addr_result),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(bus, addr_result),
            0xE8 => self.inx(),
            0xC8 => self.iny(),
            0xCA => self.dex(),
            0x88 => self.dey(),

            // Logical instructions
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(bus, addr_result),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(bus, addr_result),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(bus, addr_result),
            0x24 | 0x2C => self.bit(bus, addr_result),

            // Shift/Rotate instructions
            0x0A => self.asl(bus, addr_result, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(bus, addr_result, false),
            0x4A => self.lsr(bus, addr_result, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(bus, addr_result, false),
            0x2A => self.rol(bus, addr_result, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(bus, addr_result, false),
            0x6A => self.ror(bus, addr_result, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(bus, addr_result, false),

            // Compare instructions
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(bus, addr_result),
            0xE0 | 0xE4 | 0xEC => self.cpx(bus, addr_result),
            0xC0 | 0xC4 | 0xCC => self.cpy(bus, addr_result),

            // Branch instructions (return extra cycles)
            0x90 => return self.bcc(addr_result),
            0xB0 => return self.bcs(addr_result),
            0xF0 => return self.beq(addr_result),
            0x30 => return self.bmi(addr_result),
            0xD0 => return self.bne(addr_result),
            0x10 => return self.bpl(addr_result),
            0x50 => return self.bvc(addr_result),
            0x70 => return self.bvs(addr_result),

            // Jump/Subroutine instructions
            0x4C | 0x6C => self.jmp(addr_result),
            0x20 => self.jsr(bus, addr_result),
            0x60 => self.rts(bus),

            // Stack instructions
            0x48 => self.pha(bus),
            0x68 => self.pla(bus),
            0x08 => self.php(bus),
            0x28 => self.plp(bus),
            0x9A => self.txs(),
            0xBA => self.tsx(),

            // Transfer instructions
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),

            // Flag instructions
            0x18 => self.clc(),
            0xD8 => self.cld(),
            0x58 => self.cli(),
            0xB8 => self.clv(),
            0x38 => self.sec(),
            0xF8 => self.sed(),
            0x78 => self.sei(),

            // Interrupt-related instructions
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),

            // Official and undocumented NOP encodings
            0xEA | 0x1A | 0x3A | 0x5A | 0x7A | 0xDA | 0xFA => self.nop(),
            0x80 | 0x82 | 0x89 | 0xC2 | 0xE2 => self.nop(),
            0x04 | 0x44 | 0x64 | 0x0C => self.nop(),
            0x14 | 0x34 | 0x54 | 0x74 | 0xD4 | 0xF4 => self.nop(),
            0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC => self.nop(),

            // Undocumented opcodes
            0xA3 | 0xA7 | 0xAB | 0xAF | 0xB3 | 0xB7 | 0xBF => self.lax(bus, addr_result),
            0x83 | 0x87 | 0x8F | 0x97 => self.sax(bus, addr_result),
            0xC3 | 0xC7 | 0xCF | 0xD3 | 0xD7 | 0xDB | 0xDF => self.dcp(bus, addr_result),
            0xE3 | 0xE7 | 0xEF | 0xF3 | 0xF7 | 0xFB | 0xFF => self.isb(bus, addr_result),
            0x23 | 0x27 | 0x2F | 0x33 | 0x37 | 0x3B | 0x3F => self.rla(bus, addr_result),
            0x63 | 0x67 | 0x6F | 0x73 | 0x77 | 0x7B | 0x7F => self.rra(bus, addr_result),
            0x03 | 0x07 | 0x0F | 0x13 | 0x17 | 0x1B | 0x1F => self.slo(bus, addr_result),
            0x43 | 0x47 | 0x4F | 0x53 | 0x57 | 0x5B | 0x5F => self.sre(bus, addr_result),
            0x4B => self.asr(bus, addr_result),
            0x0B | 0x2B => self.anc(bus, addr_result),
            0x6B => self.arr(bus, addr_result),
            0xCB => self.axs(bus, addr_result),

            // Rare undocumented opcodes with unstable semantics: treated as NOP
            0x9B | 0x9C | 0x9E | 0x93 | 0x9F | 0x8B | 0xBB => {
                log::warn!(
                    "opcode ${:02X} ({}) is not implemented, executing as NOP",
                    opcode,
                    OPCODE_TABLE[opcode as usize].mnemonic
                );
            }

            // Unassigned (JAM) slots: log and keep the machine running
            _ => {
                log::error!("bad opcode ${:02X}, executing as NOP", opcode);
            }
        }
        0
    }

    /// Format a nestest-style trace line for the instruction at PC
    ///
    /// Format: `PC  OP OP OP  MNEMONIC OPERAND  A:XX X:XX Y:XX P:XX SP:XX CYC:N`
    ///
    /// Operand bytes are fetched from the bus; memory operands are shown as
    /// written, without dereferencing (a dereference here could perturb PPU
    /// register state).
    pub fn trace(&self, bus: &CpuBus) -> String {
        let pc = self.pc;
        let opcode = bus.read(pc);
        let opcode_info = &OPCODE_TABLE[opcode as usize];

        let byte2 = bus.read(pc.wrapping_add(1));
        let byte3 = bus.read(pc.wrapping_add(2));

        let hex_bytes = match opcode_info.mode.operand_bytes() {
            0 => format!("{:02X}      ", opcode),
            1 => format!("{:02X} {:02X}   ", opcode, byte2),
            _ => format!("{:02X} {:02X} {:02X}", opcode, byte2, byte3),
        };

        let disassembly = Self::format_operand(pc, opcode_info, byte2, byte3);

        format!(
            "{:04X}  {}  {:<14}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    fn format_operand(pc: u16, info: &OpcodeInfo, byte2: u8, byte3: u8) -> String {
        let mnemonic = info.mnemonic;
        match info.mode {
            AddressingMode::Implied => mnemonic.to_string(),
            AddressingMode::Accumulator => format!("{} A", mnemonic),
            AddressingMode::Immediate => format!("{} #${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPage => format!("{} ${:02X}", mnemonic, byte2),
            AddressingMode::ZeroPageX => format!("{} ${:02X},X", mnemonic, byte2),
            AddressingMode::ZeroPageY => format!("{} ${:02X},Y", mnemonic, byte2),
            AddressingMode::Relative => {
                let offset = byte2 as i8;
                let target = pc.wrapping_add(2).wrapping_add(offset as u16);
                format!("{} ${:04X}", mnemonic, target)
            }
            AddressingMode::Absolute => {
                format!("{} ${:04X}", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::AbsoluteX => {
                format!("{} ${:04X},X", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::AbsoluteY => {
                format!("{} ${:04X},Y", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::Indirect => {
                format!("{} (${:04X})", mnemonic, u16::from_le_bytes([byte2, byte3]))
            }
            AddressingMode::IndexedIndirect => format!("{} (${:02X},X)", mnemonic, byte2),
            AddressingMode::IndirectIndexed => format!("{} (${:02X}),Y", mnemonic, byte2),
        }
    }
}
