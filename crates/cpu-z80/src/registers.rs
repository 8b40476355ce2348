//! CPU register file.
//!
//! The 8-bit registers are stored individually; the 16-bit pair views are
//! packed and unpacked on demand through an explicit [`ByteOrder`], so a
//! register file can model either byte order regardless of the host.

/// How a register pair maps its high and low bytes onto a 16-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// The host's native byte order.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BigEndian
        } else {
            Self::LittleEndian
        }
    }

    /// Combine a high and a low byte into a pair value.
    #[must_use]
    pub const fn pack(self, high: u8, low: u8) -> u16 {
        match self {
            Self::LittleEndian => u16::from_le_bytes([low, high]),
            Self::BigEndian => u16::from_be_bytes([high, low]),
        }
    }

    /// Split a pair value into its `(high, low)` bytes.
    #[must_use]
    pub const fn unpack(self, value: u16) -> (u8, u8) {
        match self {
            Self::LittleEndian => {
                let [low, high] = value.to_le_bytes();
                (high, low)
            }
            Self::BigEndian => {
                let [high, low] = value.to_be_bytes();
                (high, low)
            }
        }
    }
}

/// One of the 8-bit working registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reg8 {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
}

/// One of the 16-bit register pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pair {
    BC,
    DE,
    HL,
    SP,
    IX,
    IY,
}

/// The full register file: working set, alternate set, index registers,
/// interrupt vector and refresh, stack pointer, program counter and the
/// interrupt countdown.
pub struct Registers {
    pub pc: u16,
    /// T-states remaining until the next interrupt opportunity.
    pub counter: i32,

    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,

    pub a_alt: u8,
    pub f_alt: u8,
    pub b_alt: u8,
    pub c_alt: u8,
    pub d_alt: u8,
    pub e_alt: u8,
    pub h_alt: u8,
    pub l_alt: u8,

    pub ix: u16,
    pub iy: u16,
    pub i: u8,
    pub r: u8,
    pub sp: u16,

    order: ByteOrder,
}

impl Registers {
    /// A zeroed register file using the host's byte order for pair views.
    #[must_use]
    pub fn new() -> Self {
        Self::with_order(ByteOrder::native())
    }

    /// A zeroed register file with an explicit pair byte order.
    #[must_use]
    pub fn with_order(order: ByteOrder) -> Self {
        Self {
            pc: 0,
            counter: 0,
            a: 0,
            f: 0,
            b: 0,
            c: 0,
            d: 0,
            e: 0,
            h: 0,
            l: 0,
            a_alt: 0,
            f_alt: 0,
            b_alt: 0,
            c_alt: 0,
            d_alt: 0,
            e_alt: 0,
            h_alt: 0,
            l_alt: 0,
            ix: 0,
            iy: 0,
            i: 0,
            r: 0,
            sp: 0,
            order,
        }
    }

    /// Byte order used by the pair views.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Restart execution at address zero. Every other register, including
    /// the flags and the interrupt counter, keeps its value.
    pub fn reset(&mut self) {
        self.pc = 0;
    }

    #[must_use]
    pub fn bc(&self) -> u16 {
        self.order.pack(self.b, self.c)
    }

    pub fn set_bc(&mut self, value: u16) {
        (self.b, self.c) = self.order.unpack(value);
    }

    #[must_use]
    pub fn de(&self) -> u16 {
        self.order.pack(self.d, self.e)
    }

    pub fn set_de(&mut self, value: u16) {
        (self.d, self.e) = self.order.unpack(value);
    }

    #[must_use]
    pub fn hl(&self) -> u16 {
        self.order.pack(self.h, self.l)
    }

    pub fn set_hl(&mut self, value: u16) {
        (self.h, self.l) = self.order.unpack(value);
    }

    #[must_use]
    pub fn bc_alt(&self) -> u16 {
        self.order.pack(self.b_alt, self.c_alt)
    }

    #[must_use]
    pub fn de_alt(&self) -> u16 {
        self.order.pack(self.d_alt, self.e_alt)
    }

    #[must_use]
    pub fn hl_alt(&self) -> u16 {
        self.order.pack(self.h_alt, self.l_alt)
    }

    /// Read an 8-bit register by name.
    #[must_use]
    pub fn reg8(&self, reg: Reg8) -> u8 {
        match reg {
            Reg8::A => self.a,
            Reg8::B => self.b,
            Reg8::C => self.c,
            Reg8::D => self.d,
            Reg8::E => self.e,
            Reg8::H => self.h,
            Reg8::L => self.l,
        }
    }

    /// Write an 8-bit register by name.
    pub fn set_reg8(&mut self, reg: Reg8, value: u8) {
        match reg {
            Reg8::A => self.a = value,
            Reg8::B => self.b = value,
            Reg8::C => self.c = value,
            Reg8::D => self.d = value,
            Reg8::E => self.e = value,
            Reg8::H => self.h = value,
            Reg8::L => self.l = value,
        }
    }

    /// Read a register pair by name.
    #[must_use]
    pub fn pair(&self, pair: Pair) -> u16 {
        match pair {
            Pair::BC => self.bc(),
            Pair::DE => self.de(),
            Pair::HL => self.hl(),
            Pair::SP => self.sp,
            Pair::IX => self.ix,
            Pair::IY => self.iy,
        }
    }

    /// Write a register pair by name.
    pub fn set_pair(&mut self, pair: Pair, value: u16) {
        match pair {
            Pair::BC => self.set_bc(value),
            Pair::DE => self.set_de(value),
            Pair::HL => self.set_hl(value),
            Pair::SP => self.sp = value,
            Pair::IX => self.ix = value,
            Pair::IY => self.iy = value,
        }
    }

    fn flag(&self, mask: u8) -> bool {
        self.f & mask != 0
    }

    fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.f |= mask;
        } else {
            self.f &= !mask;
        }
    }

    #[must_use]
    pub fn carry(&self) -> bool {
        self.flag(crate::flags::CF)
    }

    pub fn set_carry(&mut self, on: bool) {
        self.set_flag(crate::flags::CF, on);
    }

    #[must_use]
    pub fn zero(&self) -> bool {
        self.flag(crate::flags::ZF)
    }

    pub fn set_zero(&mut self, on: bool) {
        self.set_flag(crate::flags::ZF, on);
    }

    #[must_use]
    pub fn parity_overflow(&self) -> bool {
        self.flag(crate::flags::PF)
    }

    pub fn set_parity_overflow(&mut self, on: bool) {
        self.set_flag(crate::flags::PF, on);
    }

    #[must_use]
    pub fn sign(&self) -> bool {
        self.flag(crate::flags::SF)
    }

    pub fn set_sign(&mut self, on: bool) {
        self.set_flag(crate::flags::SF, on);
    }

    #[must_use]
    pub fn subtract(&self) -> bool {
        self.flag(crate::flags::NF)
    }

    pub fn set_subtract(&mut self, on: bool) {
        self.set_flag(crate::flags::NF, on);
    }

    #[must_use]
    pub fn half_carry(&self) -> bool {
        self.flag(crate::flags::HF)
    }

    pub fn set_half_carry(&mut self, on: bool) {
        self.set_flag(crate::flags::HF, on);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
