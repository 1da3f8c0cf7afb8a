use crate::constants::MEMORY_SIZE;

// NB. every u16 is a valid address, so none of these accessors can fail

/// # Memory
/// A flat 64K byte store shared by code, data, the stack and the I/O ports.
/// Nothing is protected; programs are free to rewrite their own instructions.
///
/// 16-bit words are little-endian. A word access at 0xFFFF wraps its high byte
/// around to 0x0000.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            bytes: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    pub fn read8(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr)]
    }

    pub fn write8(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr)] = value;
    }

    pub fn read16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read8(addr), self.read8(addr.wrapping_add(1))])
    }

    pub fn write16(&mut self, addr: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write8(addr, low);
        self.write8(addr.wrapping_add(1), high);
    }

    /// Copies `len` bytes starting at `addr`, wrapping past the end of memory.
    pub fn read_block(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read8(addr.wrapping_add(offset as u16)))
            .collect()
    }

    /// Zeroes everything, then places `data` at `origin`.
    /// Callers guarantee `data` fits between `origin` and the end of memory.
    pub fn load(&mut self, origin: u16, data: &[u8]) {
        self.clear();
        let start = usize::from(origin);
        self.bytes[start..start + data.len()].copy_from_slice(data);
    }

    pub fn clear(&mut self) {
        self.bytes.iter_mut().for_each(|byte| *byte = 0);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
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
    fn test_memory_zeroed() {
        let m = Memory::new();
        assert_eq!(m.as_slice().len(), MEMORY_SIZE);
        assert!(m.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_word_is_little_endian() {
        let mut m = Memory::new();
        m.write16(0x1000, 0xABCD);
        assert_eq!(m.read8(0x1000), 0xCD);
        assert_eq!(m.read8(0x1001), 0xAB);
        assert_eq!(m.read16(0x1000), 0xABCD);
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let mut m = Memory::new();
        for &addr in [0x0000, 0x0001, 0x7FFF, 0xFFFE].iter() {
            m.write16(addr, 0xBEEF);
            assert_eq!(m.read16(addr), 0xBEEF);
            m.write8(addr, 0x5A);
            assert_eq!(m.read8(addr), 0x5A);
        }
    }

    #[test]
    fn test_word_access_wraps_at_top_of_memory() {
        let mut m = Memory::new();
        m.write16(0xFFFF, 0x1234);
        assert_eq!(m.read8(0xFFFF), 0x34);
        assert_eq!(m.read8(0x0000), 0x12);
        assert_eq!(m.read16(0xFFFF), 0x1234);
    }

    #[test]
    fn test_load_places_data_and_zeroes_the_rest() {
        let mut m = Memory::new();
        m.write8(0x8000, 0xFF);
        m.load(0x0010, &[1, 2, 3]);
        assert_eq!(m.read_block(0x000F, 5), vec![0, 1, 2, 3, 0]);
        assert_eq!(m.read8(0x8000), 0);
    }

    #[test]
    fn test_read_block_wraps() {
        let mut m = Memory::new();
        m.write8(0xFFFF, 0xAA);
        m.write8(0x0000, 0xBB);
        assert_eq!(m.read_block(0xFFFF, 2), vec![0xAA, 0xBB]);
    }
}
