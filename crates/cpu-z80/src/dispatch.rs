//! Opcode decode and single-instruction execution.
//!
//! Decode is table-driven: one 256-entry table for the base opcodes and one
//! per index prefix, built at compile time. Each populated entry carries the
//! operation descriptor and its documented T-state cost, so timing lives
//! next to the decode entry instead of inside the handlers.

use std::error::Error;
use std::fmt;

use crate::memory::Memory;
use crate::ops;
use crate::registers::{Pair, Reg8, Registers};

#[derive(Debug, Clone, Copy)]
enum Op {
    Nop,
    LdRegReg { dst: Reg8, src: Reg8 },
    LdRegPairPtr { dst: Reg8, addr: Pair },
    LdPairPtrReg { addr: Pair, src: Reg8 },
    LdRegImm { dst: Reg8 },
    LdPairPtrImm { addr: Pair },
    LdRegDirect { dst: Reg8 },
    LdDirectReg { src: Reg8 },
    LdPairImm { dst: Pair },
    LdPairDirect { dst: Pair },
    LdRegIndexed { dst: Reg8, idx: Pair },
    LdIndexedReg { idx: Pair, src: Reg8 },
    LdIndexedImm { idx: Pair },
    IncPair { pair: Pair },
    DecPair { pair: Pair },
    IncReg { reg: Reg8 },
    DecReg { reg: Reg8 },
    RotateALeft,
    AddAReg { src: Reg8 },
    AddAPairPtr { addr: Pair },
    AddHlPair { src: Pair },
    ExDeHl,
    ExAfAf,
    Exx,
    ExSpPair { pair: Pair },
}

#[derive(Clone, Copy)]
struct Opcode {
    op: Op,
    t_states: u32,
}

type Table = [Option<Opcode>; 256];

const fn entry(op: Op, t_states: u32) -> Option<Opcode> {
    Some(Opcode { op, t_states })
}

/// Map a 3-bit register field to its register, `None` for the `(HL)` slot.
const fn reg_code(code: usize) -> Option<Reg8> {
    match code {
        0 => Some(Reg8::B),
        1 => Some(Reg8::C),
        2 => Some(Reg8::D),
        3 => Some(Reg8::E),
        4 => Some(Reg8::H),
        5 => Some(Reg8::L),
        7 => Some(Reg8::A),
        _ => None,
    }
}

const fn base_table() -> Table {
    let mut t: Table = [None; 256];

    // LD r,r' matrix, with the (HL) row and column. 0x76 is HALT, which is
    // outside the implemented set and stays unpopulated.
    let mut code = 0x40;
    while code <= 0x7F {
        if code != 0x76 {
            t[code] = match (reg_code((code >> 3) & 7), reg_code(code & 7)) {
                (Some(dst), Some(src)) => entry(Op::LdRegReg { dst, src }, 4),
                (Some(dst), None) => entry(Op::LdRegPairPtr { dst, addr: Pair::HL }, 7),
                (None, Some(src)) => entry(Op::LdPairPtrReg { addr: Pair::HL, src }, 7),
                (None, None) => None,
            };
        }
        code += 1;
    }

    // LD r,n column, with LD (HL),n in the (HL) slot.
    let mut code = 0;
    while code < 8 {
        t[0x06 + code * 8] = match reg_code(code) {
            Some(dst) => entry(Op::LdRegImm { dst }, 7),
            None => entry(Op::LdPairPtrImm { addr: Pair::HL }, 10),
        };
        code += 1;
    }

    // ADD A,r row, with ADD A,(HL).
    let mut code = 0;
    while code < 8 {
        t[0x80 + code] = match reg_code(code) {
            Some(src) => entry(Op::AddAReg { src }, 4),
            None => entry(Op::AddAPairPtr { addr: Pair::HL }, 7),
        };
        code += 1;
    }

    t[0x00] = entry(Op::Nop, 4);
    t[0x01] = entry(Op::LdPairImm { dst: Pair::BC }, 10);
    t[0x02] = entry(Op::LdPairPtrReg { addr: Pair::BC, src: Reg8::A }, 7);
    t[0x03] = entry(Op::IncPair { pair: Pair::BC }, 6);
    t[0x04] = entry(Op::IncReg { reg: Reg8::B }, 4);
    t[0x05] = entry(Op::DecReg { reg: Reg8::B }, 4);
    t[0x07] = entry(Op::RotateALeft, 4);
    t[0x08] = entry(Op::ExAfAf, 4);
    t[0x09] = entry(Op::AddHlPair { src: Pair::BC }, 11);
    t[0x0A] = entry(Op::LdRegPairPtr { dst: Reg8::A, addr: Pair::BC }, 7);
    t[0x0B] = entry(Op::DecPair { pair: Pair::BC }, 6);
    t[0x0C] = entry(Op::IncReg { reg: Reg8::C }, 4);
    t[0x0D] = entry(Op::DecReg { reg: Reg8::C }, 4);
    t[0x11] = entry(Op::LdPairImm { dst: Pair::DE }, 10);
    t[0x12] = entry(Op::LdPairPtrReg { addr: Pair::DE, src: Reg8::A }, 7);
    t[0x1A] = entry(Op::LdRegPairPtr { dst: Reg8::A, addr: Pair::DE }, 7);
    t[0x21] = entry(Op::LdPairImm { dst: Pair::HL }, 10);
    t[0x2A] = entry(Op::LdPairDirect { dst: Pair::HL }, 16);
    t[0x31] = entry(Op::LdPairImm { dst: Pair::SP }, 10);
    t[0x32] = entry(Op::LdDirectReg { src: Reg8::A }, 13);
    t[0x3A] = entry(Op::LdRegDirect { dst: Reg8::A }, 13);
    t[0xD9] = entry(Op::Exx, 4);
    t[0xE3] = entry(Op::ExSpPair { pair: Pair::HL }, 19);
    t[0xEB] = entry(Op::ExDeHl, 4);

    t
}

const fn indexed_table(idx: Pair) -> Table {
    let mut t: Table = [None; 256];

    // LD r,(i?+n) column and LD (i?+n),r row. Slot 6 in each is the
    // (i?+n),n and HALT position respectively; only the immediate store
    // exists here.
    let mut code = 0;
    while code < 8 {
        if let Some(dst) = reg_code(code) {
            t[0x46 + code * 8] = entry(Op::LdRegIndexed { dst, idx }, 19);
        }
        if let Some(src) = reg_code(code) {
            t[0x70 + code] = entry(Op::LdIndexedReg { idx, src }, 19);
        }
        code += 1;
    }

    t[0x21] = entry(Op::LdPairImm { dst: idx }, 14);
    t[0x36] = entry(Op::LdIndexedImm { idx }, 19);
    t[0xE3] = entry(Op::ExSpPair { pair: idx }, 23);

    t
}

static BASE: Table = base_table();
static PREFIX_DD: Table = indexed_table(Pair::IX);
static PREFIX_FD: Table = indexed_table(Pair::IY);

/// Decode table for a prefix byte, if the byte is a known prefix.
fn prefix_table(prefix: u8) -> Option<&'static Table> {
    match prefix {
        0xDD => Some(&PREFIX_DD),
        0xFD => Some(&PREFIX_FD),
        _ => None,
    }
}

/// A fetched opcode with no decode entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidOpcode {
    /// Address the instruction was fetched from.
    pub addr: u16,
    /// Index prefix byte, when the failing opcode followed one.
    pub prefix: Option<u8>,
    /// The byte that failed to decode.
    pub opcode: u8,
}

impl fmt::Display for InvalidOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix {
            Some(prefix) => write!(
                f,
                "invalid opcode 0x{prefix:02X} 0x{:02X} at 0x{:04X}",
                self.opcode, self.addr
            ),
            None => write!(f, "invalid opcode 0x{:02X} at 0x{:04X}", self.opcode, self.addr),
        }
    }
}

impl Error for InvalidOpcode {}

/// Fetch, decode and execute one instruction, returning its T-state cost.
///
/// On a decode miss `pc` stays where the fetches left it: past the opcode
/// byte, and past the prefix byte too when one was consumed.
pub fn execute_one(regs: &mut Registers, mem: &mut Memory) -> Result<u32, InvalidOpcode> {
    let fetch_addr = regs.pc;
    let mut opcode = ops::fetch(regs, mem);
    let mut prefix = None;

    let table = match prefix_table(opcode) {
        Some(table) => {
            prefix = Some(opcode);
            opcode = ops::fetch(regs, mem);
            table
        }
        None => &BASE,
    };

    let Some(decoded) = table[opcode as usize] else {
        return Err(InvalidOpcode {
            addr: fetch_addr,
            prefix,
            opcode,
        });
    };

    execute(decoded.op, regs, mem);
    Ok(decoded.t_states)
}

fn execute(op: Op, regs: &mut Registers, mem: &mut Memory) {
    match op {
        Op::Nop => {}
        Op::LdRegReg { dst, src } => {
            let value = regs.reg8(src);
            regs.set_reg8(dst, value);
        }
        Op::LdRegPairPtr { dst, addr } => ops::load_reg_from_pair(regs, mem, dst, addr),
        Op::LdPairPtrReg { addr, src } => ops::store_pair_from_reg(regs, mem, addr, src),
        Op::LdRegImm { dst } => {
            let value = ops::fetch(regs, mem);
            regs.set_reg8(dst, value);
        }
        Op::LdPairPtrImm { addr } => {
            let value = ops::fetch(regs, mem);
            mem.write(regs.pair(addr), value);
        }
        Op::LdRegDirect { dst } => {
            let addr = ops::fetch_wide(regs, mem);
            regs.set_reg8(dst, mem.read(addr));
        }
        Op::LdDirectReg { src } => {
            let addr = ops::fetch_wide(regs, mem);
            mem.write(addr, regs.reg8(src));
        }
        Op::LdPairImm { dst } => ops::load_pair_immediate(regs, mem, dst),
        Op::LdPairDirect { dst } => {
            let addr = ops::fetch_wide(regs, mem);
            let low = mem.read(addr);
            let high = mem.read(addr.wrapping_add(1));
            let value = regs.order().pack(high, low);
            regs.set_pair(dst, value);
        }
        Op::LdRegIndexed { dst, idx } => ops::load_reg_from_indexed(regs, mem, dst, idx),
        Op::LdIndexedReg { idx, src } => ops::store_indexed_from_reg(regs, mem, idx, src),
        Op::LdIndexedImm { idx } => ops::store_indexed_immediate(regs, mem, idx),
        // INC/DEC in this subset leave the flags register untouched.
        Op::IncPair { pair } => {
            let value = regs.pair(pair).wrapping_add(1);
            regs.set_pair(pair, value);
        }
        Op::DecPair { pair } => {
            let value = regs.pair(pair).wrapping_sub(1);
            regs.set_pair(pair, value);
        }
        Op::IncReg { reg } => {
            let value = regs.reg8(reg).wrapping_add(1);
            regs.set_reg8(reg, value);
        }
        Op::DecReg { reg } => {
            let value = regs.reg8(reg).wrapping_sub(1);
            regs.set_reg8(reg, value);
        }
        Op::RotateALeft => ops::rotate_accumulator_left(regs),
        Op::AddAReg { src } => {
            let operand = regs.reg8(src);
            ops::add_to_accumulator(regs, operand);
        }
        Op::AddAPairPtr { addr } => {
            let operand = mem.read(regs.pair(addr));
            ops::add_to_accumulator(regs, operand);
        }
        Op::AddHlPair { src } => ops::add_pair_to_hl(regs, src),
        Op::ExDeHl => ops::exchange_de_hl(regs),
        Op::ExAfAf => ops::exchange_af_alt(regs),
        Op::Exx => ops::exchange_alt_set(regs),
        Op::ExSpPair { pair } => ops::exchange_sp_pair(regs, mem, pair),
    }
}
