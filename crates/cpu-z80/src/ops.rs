//! Addressing helpers and arithmetic primitives.
//!
//! These are the building blocks the dispatcher composes into instructions.
//! They are exposed publicly so harnesses can drive the data paths directly,
//! without assembling opcodes.

use crate::memory::Memory;
use crate::registers::{Pair, Reg8, Registers};

/// Fetch one byte at `pc` and advance `pc`.
pub(crate) fn fetch(regs: &mut Registers, mem: &Memory) -> u8 {
    let byte = mem.read(regs.pc);
    regs.pc = regs.pc.wrapping_add(1);
    byte
}

/// Fetch a 16-bit operand, low byte first, and advance `pc` by two.
pub(crate) fn fetch_wide(regs: &mut Registers, mem: &Memory) -> u16 {
    let low = fetch(regs, mem);
    let high = fetch(regs, mem);
    regs.order().pack(high, low)
}

/// `LD r,(rr)`: load a register from the memory cell a pair points at.
pub fn load_reg_from_pair(regs: &mut Registers, mem: &Memory, dst: Reg8, addr: Pair) {
    let value = mem.read(regs.pair(addr));
    regs.set_reg8(dst, value);
}

/// `LD (rr),r`: store a register to the memory cell a pair points at.
pub fn store_pair_from_reg(regs: &Registers, mem: &mut Memory, addr: Pair, src: Reg8) {
    mem.write(regs.pair(addr), regs.reg8(src));
}

/// `LD r,(i?+n)`: load a register through an index register plus a
/// displacement byte fetched at `pc`. The displacement is taken as an
/// unsigned offset, 0 through 255.
pub fn load_reg_from_indexed(regs: &mut Registers, mem: &Memory, dst: Reg8, idx: Pair) {
    let disp = fetch(regs, mem);
    let addr = regs.pair(idx).wrapping_add(u16::from(disp));
    regs.set_reg8(dst, mem.read(addr));
}

/// `LD (i?+n),r`: store a register through an index register plus an
/// unsigned displacement byte fetched at `pc`.
pub fn store_indexed_from_reg(regs: &mut Registers, mem: &mut Memory, idx: Pair, src: Reg8) {
    let disp = fetch(regs, mem);
    let addr = regs.pair(idx).wrapping_add(u16::from(disp));
    mem.write(addr, regs.reg8(src));
}

/// `LD (i?+n),n`: store an immediate byte through an index register. The
/// displacement byte comes first in the instruction stream, then the value.
pub fn store_indexed_immediate(regs: &mut Registers, mem: &mut Memory, idx: Pair) {
    let disp = fetch(regs, mem);
    let value = fetch(regs, mem);
    let addr = regs.pair(idx).wrapping_add(u16::from(disp));
    mem.write(addr, value);
}

/// `LD rr,nn`: load a pair from a 16-bit immediate, low byte first.
pub fn load_pair_immediate(regs: &mut Registers, mem: &Memory, dst: Pair) {
    let value = fetch_wide(regs, mem);
    regs.set_pair(dst, value);
}

/// `ADD A,v`: add a value into the accumulator and set all six flags.
///
/// Overflow is the signed rule: set when both operands share a sign and the
/// result's sign differs.
pub fn add_to_accumulator(regs: &mut Registers, operand: u8) {
    let a = regs.a;
    let (result, carry) = a.overflowing_add(operand);

    regs.set_carry(carry);
    regs.set_zero(result == 0);
    regs.set_sign(result & 0x80 != 0);
    regs.set_parity_overflow((a ^ operand) & 0x80 == 0 && (a ^ result) & 0x80 != 0);
    regs.set_subtract(false);
    regs.set_half_carry((a & 0x0F) + (operand & 0x0F) > 0x0F);

    regs.a = result;
}

/// `ADD HL,rr`: add a pair into HL. Sets carry on 16-bit overflow and
/// half-carry out of bit 11; clears subtract; leaves zero, sign and
/// parity/overflow untouched.
pub fn add_pair_to_hl(regs: &mut Registers, src: Pair) {
    let hl = regs.hl();
    let operand = regs.pair(src);
    let sum = u32::from(hl) + u32::from(operand);

    regs.set_carry(sum > 0xFFFF);
    regs.set_half_carry((hl & 0x0FFF) + (operand & 0x0FFF) > 0x0FFF);
    regs.set_subtract(false);

    regs.set_hl(sum as u16);
}

/// `RLCA`: rotate the accumulator left one bit, bit 7 into both bit 0 and
/// the carry flag. Clears subtract and half-carry; other flags untouched.
pub fn rotate_accumulator_left(regs: &mut Registers) {
    let bit7 = regs.a & 0x80 != 0;
    regs.a = regs.a.rotate_left(1);
    regs.set_carry(bit7);
    regs.set_subtract(false);
    regs.set_half_carry(false);
}

/// `EX DE,HL`: swap the DE and HL pairs.
pub fn exchange_de_hl(regs: &mut Registers) {
    std::mem::swap(&mut regs.d, &mut regs.h);
    std::mem::swap(&mut regs.e, &mut regs.l);
}

/// `EX AF,AF'`: swap the accumulator and flags with their alternates.
pub fn exchange_af_alt(regs: &mut Registers) {
    std::mem::swap(&mut regs.a, &mut regs.a_alt);
    std::mem::swap(&mut regs.f, &mut regs.f_alt);
}

/// `EXX`: swap BC, DE and HL with the alternate set.
pub fn exchange_alt_set(regs: &mut Registers) {
    std::mem::swap(&mut regs.b, &mut regs.b_alt);
    std::mem::swap(&mut regs.c, &mut regs.c_alt);
    std::mem::swap(&mut regs.d, &mut regs.d_alt);
    std::mem::swap(&mut regs.e, &mut regs.e_alt);
    std::mem::swap(&mut regs.h, &mut regs.h_alt);
    std::mem::swap(&mut regs.l, &mut regs.l_alt);
}

/// `EX (SP),rr`: swap a pair with the 16-bit value on top of the stack,
/// low byte at `sp`, high byte at `sp + 1`.
pub fn exchange_sp_pair(regs: &mut Registers, mem: &mut Memory, pair: Pair) {
    let sp = regs.sp;
    let low = mem.read(sp);
    let high = mem.read(sp.wrapping_add(1));
    let from_stack = regs.order().pack(high, low);

    let (high, low) = regs.order().unpack(regs.pair(pair));
    mem.write(sp, low);
    mem.write(sp.wrapping_add(1), high);
    regs.set_pair(pair, from_stack);
}
