//! Text rendering of machine state.
//!
//! Pure formatting: both functions build a `String` the caller prints, so
//! the layout is testable without capturing stdout.

use cpu_z80::{Memory, Registers};

/// Flag bits rendered low bit first, matching the `CZPSNH` column header.
fn flag_bits(f: u8) -> String {
    (0..6)
        .map(|bit| if f & (1 << bit) != 0 { '1' } else { '0' })
        .collect()
}

/// Register status block: a header row and a value row, one column per
/// register, the alternate set primed with `'`.
pub fn registers(regs: &Registers) -> String {
    let mut out = String::from("Register Status:\n");
    out.push_str("pc    a   CZPSNH  bc    de    hl    ix    iy    'a  'CZPSNH 'bc   'de   'hl   ir    sp\n");
    out.push_str(&format!(
        "{:04x}  {:02X}  {}  {:04x}  {:04x}  {:04x}  {:04x}  {:04x}  {:02X}  {}  {:04x}  {:04x}  {:04x}  {:02X}{:02X}  {:04x}\n",
        regs.pc,
        regs.a,
        flag_bits(regs.f),
        regs.bc(),
        regs.de(),
        regs.hl(),
        regs.ix,
        regs.iy,
        regs.a_alt,
        flag_bits(regs.f_alt),
        regs.bc_alt(),
        regs.de_alt(),
        regs.hl_alt(),
        regs.i,
        regs.r,
        regs.sp,
    ));
    out
}

/// Dump of the first 128 bytes of memory, sixteen to a row with the row's
/// base address in front and a gap after every fourth byte.
pub fn memory(mem: &Memory) -> String {
    let mut out = String::from("Memory Display:\n");
    for (row, chunk) in mem.bytes()[..128].chunks(16).enumerate() {
        out.push_str(&format!("0x{:04X}: ", row * 16));
        for (i, byte) in chunk.iter().enumerate() {
            out.push_str(&format!("{byte:02X} "));
            if i % 4 == 3 {
                out.push(' ');
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bits_render_low_bit_first() {
        assert_eq!(flag_bits(0b00_0001), "100000");
        assert_eq!(flag_bits(0b10_0000), "000001");
        assert_eq!(flag_bits(0b11_1111), "111111");
    }

    #[test]
    fn register_block_shows_values_in_order() {
        let mut regs = Registers::new();
        regs.pc = 0x1234;
        regs.a = 0xAB;
        regs.set_carry(true);
        regs.sp = 0xFFFE;
        let block = registers(&regs);
        let value_row = block.lines().nth(2).unwrap();
        assert!(value_row.starts_with("1234  AB  100000"));
        assert!(value_row.ends_with("fffe"));
    }

    #[test]
    fn memory_dump_has_eight_rows_of_sixteen() {
        let mut mem = Memory::new();
        mem.write(0x0000, 0xDE);
        mem.write(0x0013, 0xAD);
        let dump = memory(&mem);
        let rows: Vec<&str> = dump.lines().skip(1).collect();
        assert_eq!(rows.len(), 8);
        assert!(rows[0].starts_with("0x0000: DE 00 00 00  00"));
        assert!(rows[1].starts_with("0x0010: 00 00 00 AD "));
        assert!(rows[7].starts_with("0x0070: "));
    }
}
