/// # Opcodes
///
/// Chip16 instructions are 4 bytes each, laid out as `[OP, YX, LL, HH]`:
/// - `OP` selects the operation; its high nibble names the family (e.g. `4_` add)
/// - `YX` packs two register indices, `Y` in the high nibble and `X` in the low one
/// - `LL HH` is a little-endian 16-bit immediate
///
/// Some operations reuse the trailing bytes for smaller fields.
/// - `(_, _, 0Z, _)` the register Rz holding a result or an address
/// - `(_, _, 0N, _)` a 4-bit immediate (shift amount, background index)
/// - `(_, AD, VT, SR)` the envelope nibbles of `SNG`
pub trait Opcode {
    /// The operation byte.
    /// `[OP__ ____]`
    fn op(&self) -> u8;

    /// The low nibble of the second byte.
    /// `[__ _X __ __]`
    fn x(&self) -> u8;

    /// The high nibble of the second byte.
    /// `[__ Y_ __ __]`
    fn y(&self) -> u8;

    /// The low nibble of the third byte.
    /// `[__ __ _Z __]`
    fn z(&self) -> u8;

    /// Same position as `z`, read as an immediate.
    fn n(&self) -> u8;

    /// The third byte.
    fn ll(&self) -> u8;

    /// The fourth byte.
    fn hh(&self) -> u8;

    /// The little-endian immediate formed by the last two bytes.
    /// `[__ __ LL HH]`
    fn hhll(&self) -> u16;
}

impl Opcode for [u8; 4] {
    fn op(&self) -> u8 {
        self[0]
    }

    fn x(&self) -> u8 {
        self[1] & 0x0F
    }

    fn y(&self) -> u8 {
        self[1] >> 4
    }

    fn z(&self) -> u8 {
        self[2] & 0x0F
    }

    fn n(&self) -> u8 {
        self.z()
    }

    fn ll(&self) -> u8 {
        self[2]
    }

    fn hh(&self) -> u8 {
        self[3]
    }

    fn hhll(&self) -> u16 {
        u16::from_le_bytes([self[2], self[3]])
    }
}
