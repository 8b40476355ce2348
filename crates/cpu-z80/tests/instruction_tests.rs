//! Unit tests for individual instructions and short programs.
//!
//! Each test loads a small machine-code program at address zero and runs it
//! with an exact instruction budget, then checks register and memory state.

use cpu_z80::{InvalidOpcode, Memory, Registers, run};

fn load(mem: &mut Memory, program: &[u8]) {
    for (i, &byte) in program.iter().enumerate() {
        mem.write(i as u16, byte);
    }
}

fn run_program(program: &[u8], steps: u64) -> (Registers, Memory) {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    load(&mut mem, program);
    run(&mut regs, &mut mem, steps).unwrap();
    (regs, mem)
}

#[test]
fn test_nop() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0, 0x00);
    assert_eq!(run(&mut regs, &mut mem, 1).unwrap(), 1);
    assert_eq!(regs.pc, 1);
}

#[test]
fn test_ld_a_n() {
    let (regs, _) = run_program(&[0x3E, 0x42], 1); // LD A, 0x42
    assert_eq!(regs.a, 0x42);
    assert_eq!(regs.pc, 2);
}

#[test]
fn test_ld_r_n_all_registers() {
    let (regs, _) = run_program(
        &[
            0x06, 0x01, // LD B, 1
            0x0E, 0x02, // LD C, 2
            0x16, 0x03, // LD D, 3
            0x1E, 0x04, // LD E, 4
            0x26, 0x05, // LD H, 5
            0x2E, 0x06, // LD L, 6
        ],
        6,
    );
    assert_eq!(regs.b, 1);
    assert_eq!(regs.c, 2);
    assert_eq!(regs.d, 3);
    assert_eq!(regs.e, 4);
    assert_eq!(regs.h, 5);
    assert_eq!(regs.l, 6);
}

#[test]
fn test_ld_bc_nn() {
    let (regs, _) = run_program(&[0x01, 0xEE, 0xFF], 1); // LD BC, 0xFFEE
    assert_eq!(regs.bc(), 0xFFEE);
    assert_eq!(regs.b, 0xFF);
    assert_eq!(regs.c, 0xEE);
}

#[test]
fn test_ld_through_pair_pointers() {
    let (regs, mem) = run_program(
        &[
            0x3E, 0x5A, // LD A, 0x5A
            0x01, 0x00, 0x20, // LD BC, 0x2000
            0x02, // LD (BC), A
            0x11, 0x00, 0x20, // LD DE, 0x2000
            0x3E, 0x00, // LD A, 0
            0x1A, // LD A, (DE)
        ],
        6,
    );
    assert_eq!(mem.read(0x2000), 0x5A);
    assert_eq!(regs.a, 0x5A);
}

#[test]
fn test_ld_hl_n_writes_through_hl() {
    let (_, mem) = run_program(
        &[
            0x21, 0x00, 0x30, // LD HL, 0x3000
            0x36, 0x77, // LD (HL), 0x77
        ],
        2,
    );
    assert_eq!(mem.read(0x3000), 0x77);
}

#[test]
fn test_ld_a_direct_and_store_direct() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0x4000, 0x99);
    load(
        &mut mem,
        &[
            0x3A, 0x00, 0x40, // LD A, (0x4000)
            0x32, 0x01, 0x40, // LD (0x4001), A
        ],
    );
    run(&mut regs, &mut mem, 2).unwrap();
    assert_eq!(regs.a, 0x99);
    assert_eq!(mem.read(0x4001), 0x99);
}

#[test]
fn test_ld_hl_from_direct() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0x4000, 0x34);
    mem.write(0x4001, 0x12);
    load(&mut mem, &[0x2A, 0x00, 0x40]); // LD HL, (0x4000)
    run(&mut regs, &mut mem, 1).unwrap();
    assert_eq!(regs.hl(), 0x1234);
}

#[test]
fn test_ld_reg_reg_copy_chain() {
    let (regs, _) = run_program(
        &[
            0x3E, 0x2B, // LD A, 0x2B
            0x47, // LD B, A
            0x48, // LD C, B
            0x51, // LD D, C
            0x5A, // LD E, D
            0x63, // LD H, E
            0x6C, // LD L, H
        ],
        7,
    );
    assert_eq!(regs.l, 0x2B);
    assert_eq!(regs.hl(), 0x2B2B);
}

#[test]
fn test_identity_load_is_a_real_instruction() {
    let (regs, _) = run_program(
        &[
            0x06, 0x7A, // LD B, 0x7A
            0x40, // LD B, B
        ],
        2,
    );
    assert_eq!(regs.b, 0x7A);
    assert_eq!(regs.pc, 3, "LD B,B consumes its byte like any other load");
}

#[test]
fn test_inc_dec_pair_wrap() {
    let (regs, _) = run_program(&[0x0B], 1); // DEC BC from 0
    assert_eq!(regs.bc(), 0xFFFF);

    let (regs, _) = run_program(
        &[
            0x01, 0xFF, 0xFF, // LD BC, 0xFFFF
            0x03, // INC BC
        ],
        2,
    );
    assert_eq!(regs.bc(), 0x0000);
    assert!(!regs.carry());
    assert!(!regs.zero());
}

#[test]
fn test_add_a_b_flags() {
    let (regs, _) = run_program(
        &[
            0x3E, 0x90, // LD A, 0x90
            0x06, 0x90, // LD B, 0x90
            0x80, // ADD A, B
        ],
        3,
    );
    assert_eq!(regs.a, 0x20);
    assert!(regs.carry());
    assert!(regs.parity_overflow(), "two negatives adding to a positive overflow");
    assert!(!regs.sign());
    assert!(!regs.zero());
}

#[test]
fn test_add_a_hl_pointer() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0x2000, 0x08);
    load(
        &mut mem,
        &[
            0x3E, 0x08, // LD A, 8
            0x21, 0x00, 0x20, // LD HL, 0x2000
            0x86, // ADD A, (HL)
        ],
    );
    run(&mut regs, &mut mem, 3).unwrap();
    assert_eq!(regs.a, 0x10);
    assert!(regs.half_carry());
    assert!(!regs.carry());
}

#[test]
fn test_add_hl_bc() {
    let (regs, _) = run_program(
        &[
            0x21, 0x34, 0x12, // LD HL, 0x1234
            0x01, 0x11, 0x11, // LD BC, 0x1111
            0x09, // ADD HL, BC
        ],
        3,
    );
    assert_eq!(regs.hl(), 0x2345);
    assert!(!regs.carry());
    assert!(!regs.subtract());
}

#[test]
fn test_rlca() {
    let (regs, _) = run_program(
        &[
            0x3E, 0x81, // LD A, 0x81
            0x07, // RLCA
        ],
        2,
    );
    assert_eq!(regs.a, 0x03);
    assert!(regs.carry());
}

#[test]
fn test_exchange_family() {
    let (regs, _) = run_program(
        &[
            0x11, 0x22, 0x11, // LD DE, 0x1122
            0x21, 0x44, 0x33, // LD HL, 0x3344
            0xEB, // EX DE, HL
            0x3E, 0xAA, // LD A, 0xAA
            0x08, // EX AF, AF'
            0xD9, // EXX
        ],
        6,
    );
    assert_eq!(regs.de(), 0x3344);
    assert_eq!(regs.hl(), 0x0000, "EXX swapped HL into the alternates");
    assert_eq!(regs.hl_alt(), 0x1122);
    assert_eq!(regs.a, 0x00);
    assert_eq!(regs.a_alt, 0xAA);
}

#[test]
fn test_ex_sp_hl() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0x8000, 0xCD);
    mem.write(0x8001, 0xAB);
    load(
        &mut mem,
        &[
            0x31, 0x00, 0x80, // LD SP, 0x8000
            0x21, 0x34, 0x12, // LD HL, 0x1234
            0xE3, // EX (SP), HL
        ],
    );
    run(&mut regs, &mut mem, 3).unwrap();
    assert_eq!(regs.hl(), 0xABCD);
    assert_eq!(mem.read(0x8000), 0x34);
    assert_eq!(mem.read(0x8001), 0x12);
}

#[test]
fn test_indexed_loads_and_stores() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0x2005, 0x66);
    load(
        &mut mem,
        &[
            0xDD, 0x21, 0x00, 0x20, // LD IX, 0x2000
            0xDD, 0x7E, 0x05, // LD A, (IX+5)
            0xFD, 0x21, 0x00, 0x21, // LD IY, 0x2100
            0xFD, 0x77, 0x02, // LD (IY+2), A
            0xFD, 0x36, 0x03, 0x44, // LD (IY+3), 0x44
        ],
    );
    run(&mut regs, &mut mem, 5).unwrap();
    assert_eq!(regs.a, 0x66);
    assert_eq!(mem.read(0x2102), 0x66);
    assert_eq!(mem.read(0x2103), 0x44);
}

#[test]
fn test_indexed_displacement_is_unsigned() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    mem.write(0x20FF, 0x12);
    load(
        &mut mem,
        &[
            0xDD, 0x21, 0x00, 0x20, // LD IX, 0x2000
            0xDD, 0x46, 0xFF, // LD B, (IX+0xFF)
        ],
    );
    run(&mut regs, &mut mem, 2).unwrap();
    assert_eq!(regs.b, 0x12, "0xFF is +255, not -1");
}

#[test]
fn test_run_stops_at_first_invalid_opcode() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    load(&mut mem, &[0x00, 0x00, 0xC3]); // NOP; NOP; unimplemented JP
    let err = run(&mut regs, &mut mem, 10).unwrap_err();
    assert_eq!(err.executed, 2);
    assert_eq!(
        err.fault,
        InvalidOpcode {
            addr: 2,
            prefix: None,
            opcode: 0xC3,
        }
    );
    assert_eq!(regs.pc, 3);
}

#[test]
fn test_budget_stops_mid_program() {
    let (regs, _) = run_program(
        &[
            0x3E, 0x01, // LD A, 1
            0x06, 0x02, // LD B, 2
            0x0E, 0x03, // LD C, 3
        ],
        2,
    );
    assert_eq!(regs.a, 1);
    assert_eq!(regs.b, 2);
    assert_eq!(regs.c, 0, "third instruction is past the budget");
    assert_eq!(regs.pc, 4);
}

#[test]
fn test_reset_reruns_program() {
    let mut regs = Registers::new();
    let mut mem = Memory::new();
    load(&mut mem, &[0x03, 0x03]); // INC BC; INC BC
    run(&mut regs, &mut mem, 2).unwrap();
    assert_eq!(regs.bc(), 2);
    regs.reset();
    run(&mut regs, &mut mem, 2).unwrap();
    assert_eq!(regs.bc(), 4, "state other than pc survives reset");
    assert_eq!(regs.pc, 2);
}
