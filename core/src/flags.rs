//! CPU status flags and the branch conditions that test them.
//!
//! When pushed with `PUSHF` the flags are packed into a byte as `NO___ZC_`.

/// Carry - unsigned overflow, borrow, or sprite collision.
pub const C: u8 = 0x02;

/// Zero - result was zero.
pub const Z: u8 = 0x04;

/// Overflow - signed overflow.
pub const O: u8 = 0x40;

/// Negative - bit 15 of the result.
pub const N: u8 = 0x80;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub carry: bool,
    pub zero: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl Flags {
    /// Flags with Z and N derived from `value` and C, O cleared.
    pub fn from_result(value: u16) -> Self {
        Flags {
            carry: false,
            zero: value == 0,
            overflow: false,
            negative: value & 0x8000 != 0,
        }
    }

    pub fn to_byte(self) -> u8 {
        let mut byte = 0;
        if self.carry {
            byte |= C;
        }
        if self.zero {
            byte |= Z;
        }
        if self.overflow {
            byte |= O;
        }
        if self.negative {
            byte |= N;
        }
        byte
    }

    /// Unused bits are ignored.
    pub fn from_byte(byte: u8) -> Self {
        Flags {
            carry: byte & C != 0,
            zero: byte & Z != 0,
            overflow: byte & O != 0,
            negative: byte & N != 0,
        }
    }
}

/// # Conditions
/// The 4-bit selector used by `Jx` and `Cx`.
/// Signed comparisons (`G`, `L`, ...) read O and N, unsigned ones (`A`, `B`, ...) read C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Zero,
    NotZero,
    Negative,
    NotNegative,
    Positive,
    Overflow,
    NotOverflow,
    Above,
    AboveEqual,
    Below,
    BelowEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Reserved,
}

impl Condition {
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0xF {
            0x0 => Condition::Zero,
            0x1 => Condition::NotZero,
            0x2 => Condition::Negative,
            0x3 => Condition::NotNegative,
            0x4 => Condition::Positive,
            0x5 => Condition::Overflow,
            0x6 => Condition::NotOverflow,
            0x7 => Condition::Above,
            0x8 => Condition::AboveEqual,
            0x9 => Condition::Below,
            0xA => Condition::BelowEqual,
            0xB => Condition::Greater,
            0xC => Condition::GreaterEqual,
            0xD => Condition::Less,
            0xE => Condition::LessEqual,
            _ => Condition::Reserved,
        }
    }

    pub fn holds(self, f: Flags) -> bool {
        match self {
            Condition::Zero => f.zero,
            Condition::NotZero => !f.zero,
            Condition::Negative => f.negative,
            Condition::NotNegative => !f.negative,
            Condition::Positive => !f.negative && !f.zero,
            Condition::Overflow => f.overflow,
            Condition::NotOverflow => !f.overflow,
            Condition::Above => !f.carry && !f.zero,
            Condition::AboveEqual => !f.carry,
            Condition::Below => f.carry,
            Condition::BelowEqual => f.carry || f.zero,
            Condition::Greater => f.overflow == f.negative && !f.zero,
            Condition::GreaterEqual => f.overflow == f.negative,
            Condition::Less => f.overflow != f.negative,
            Condition::LessEqual => f.overflow != f.negative || f.zero,
            // never taken
            Condition::Reserved => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_byte_layout() {
        let flags = Flags {
            carry: true,
            zero: true,
            overflow: true,
            negative: true,
        };
        assert_eq!(flags.to_byte(), 0b1100_0110);
        assert_eq!(Flags::from_byte(0b1100_0110), flags);
    }

    #[test]
    fn test_from_byte_ignores_unused_bits() {
        assert_eq!(Flags::from_byte(0b0011_1001), Flags::default());
    }

    #[test]
    fn test_from_result() {
        assert!(Flags::from_result(0).zero);
        assert!(Flags::from_result(0x8000).negative);
        assert_eq!(Flags::from_result(0x1234), Flags::default());
    }

    #[test]
    fn test_every_nibble_decodes() {
        for nibble in 0..=0xF {
            let condition = Condition::from_nibble(nibble);
            assert_eq!(condition == Condition::Reserved, nibble == 0xF);
        }
    }

    #[test]
    fn test_unsigned_conditions() {
        // 5 - 3: no borrow, non-zero
        let above = Flags::default();
        assert!(Condition::Above.holds(above));
        assert!(Condition::AboveEqual.holds(above));
        assert!(!Condition::Below.holds(above));
        assert!(!Condition::BelowEqual.holds(above));

        // 3 - 5: borrow
        let below = Flags {
            carry: true,
            negative: true,
            ..Flags::default()
        };
        assert!(Condition::Below.holds(below));
        assert!(Condition::BelowEqual.holds(below));
        assert!(!Condition::Above.holds(below));
    }

    #[test]
    fn test_signed_conditions() {
        // -1 - 1 = -2: negative, no overflow
        let less = Flags {
            negative: true,
            ..Flags::default()
        };
        assert!(Condition::Less.holds(less));
        assert!(Condition::LessEqual.holds(less));
        assert!(!Condition::Greater.holds(less));
        assert!(!Condition::GreaterEqual.holds(less));

        // 0x7FFF - 0xFFFF overflows to negative but is signed greater
        let greater = Flags {
            carry: true,
            negative: true,
            overflow: true,
            ..Flags::default()
        };
        assert!(Condition::Greater.holds(greater));
        assert!(!Condition::Less.holds(greater));
    }

    #[test]
    fn test_equal_conditions() {
        let equal = Flags {
            zero: true,
            ..Flags::default()
        };
        assert!(Condition::Zero.holds(equal));
        assert!(Condition::GreaterEqual.holds(equal));
        assert!(Condition::LessEqual.holds(equal));
        assert!(Condition::BelowEqual.holds(equal));
        assert!(!Condition::Positive.holds(equal));
        assert!(!Condition::Greater.holds(equal));
        assert!(!Condition::Reserved.holds(equal));
    }
}
