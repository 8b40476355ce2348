//! Flag register bits.
//!
//! Six significant bits, carry in bit 0 through half-carry in bit 5. This is
//! the layout the status display prints (`CZPSNH`), not the hardware F
//! register layout.

/// Carry flag (bit 0) - carry out of bit 7 (or bit 15 for pair adds).
pub const CF: u8 = 0b00_0001;

/// Zero flag (bit 1) - result was zero.
pub const ZF: u8 = 0b00_0010;

/// Parity/overflow flag (bit 2) - signed overflow on arithmetic.
pub const PF: u8 = 0b00_0100;

/// Sign flag (bit 3) - result bit 7 set.
pub const SF: u8 = 0b00_1000;

/// Add/subtract flag (bit 4) - last operation was a subtraction.
pub const NF: u8 = 0b01_0000;

/// Half-carry flag (bit 5) - carry from bit 3 to bit 4.
pub const HF: u8 = 0b10_0000;

/// Mask of the significant flag bits.
pub const FLAGS_MASK: u8 = 0b11_1111;
