//! Flat byte-addressable memory.

/// Size of the address space: one cell per 16-bit address.
pub const MEMSIZE: usize = 65536;

/// RAM covering the full 16-bit address space.
///
/// Reads and writes are total: every `u16` address maps to exactly one cell,
/// so no access can fail. Address arithmetic happens on `u16` with the
/// wrapping operations before it reaches these calls, never as raw offset
/// arithmetic past the end of the array.
pub struct Memory {
    cells: Box<[u8; MEMSIZE]>,
}

impl Memory {
    /// A fresh, zero-filled address space.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: Box::new([0; MEMSIZE]),
        }
    }

    /// Read the byte at `addr`.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    /// Write `value` to the cell at `addr`.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.cells[addr as usize] = value;
    }

    /// View of the whole address space, for loaders and dumps.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.cells[..]
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let mem = Memory::new();
        assert_eq!(mem.read(0x0000), 0);
        assert_eq!(mem.read(0xFFFF), 0);
    }

    #[test]
    fn read_back_written_cell() {
        let mut mem = Memory::new();
        mem.write(0x1234, 0xAB);
        assert_eq!(mem.read(0x1234), 0xAB);
        assert_eq!(mem.read(0x1233), 0);
        assert_eq!(mem.read(0x1235), 0);
    }

    #[test]
    fn covers_full_address_range() {
        let mut mem = Memory::new();
        mem.write(0xFFFF, 0x42);
        assert_eq!(mem.read(0xFFFF), 0x42);
        assert_eq!(mem.bytes().len(), MEMSIZE);
    }
}
