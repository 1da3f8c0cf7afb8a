//! Pure 16-bit arithmetic with the flag rules of every ALU operation.
//!
//! Every operation recomputes all four flags; an operation that has no use
//! for carry or overflow clears them.

use crate::flags::Flags;

/// Binary operations sharing the `I`, `RX,RY` and `RX,RY,RZ` encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    And,
    Or,
    Xor,
    Mul,
    Div,
    Mod,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    /// logical left
    Shl,
    /// logical right
    Shr,
    /// arithmetic right, sign preserving
    Sar,
}

/// Flags left by a division, modulo or remainder with a zero divisor.
/// The destination register is not written.
pub const DIVIDE_BY_ZERO: Flags = Flags {
    carry: true,
    zero: false,
    overflow: true,
    negative: false,
};

/// Applies `op` to `x` and `y`.
/// Returns `None` as the value when the operation has no defined result.
pub fn arith(op: ArithOp, x: u16, y: u16) -> (Option<u16>, Flags) {
    match op {
        ArithOp::Add => lift(add(x, y)),
        ArithOp::Sub => lift(sub(x, y)),
        ArithOp::And => lift(logic(x & y)),
        ArithOp::Or => lift(logic(x | y)),
        ArithOp::Xor => lift(logic(x ^ y)),
        ArithOp::Mul => lift(mul(x, y)),
        ArithOp::Div => div(x, y),
        ArithOp::Mod => modulo(x, y),
        ArithOp::Rem => rem(x, y),
    }
}

fn lift((value, flags): (u16, Flags)) -> (Option<u16>, Flags) {
    (Some(value), flags)
}

/// x + y; C on unsigned overflow, O when both operands share a sign the result lacks
pub fn add(x: u16, y: u16) -> (u16, Flags) {
    let (res, carry) = x.overflowing_add(y);
    let flags = Flags {
        carry,
        overflow: !(x ^ y) & (x ^ res) & 0x8000 != 0,
        ..Flags::from_result(res)
    };
    (res, flags)
}

/// x - y; C on borrow, O when the operand signs differ and the result took the sign of y
pub fn sub(x: u16, y: u16) -> (u16, Flags) {
    let (res, borrow) = x.overflowing_sub(y);
    let flags = Flags {
        carry: borrow,
        overflow: (x ^ y) & (x ^ res) & 0x8000 != 0,
        ..Flags::from_result(res)
    };
    (res, flags)
}

/// Z and N only
pub fn logic(res: u16) -> (u16, Flags) {
    (res, Flags::from_result(res))
}

/// x * y truncated to 16 bits; C when the full product does not fit
pub fn mul(x: u16, y: u16) -> (u16, Flags) {
    let product = u32::from(x) * u32::from(y);
    let res = product as u16;
    let flags = Flags {
        carry: product > 0xFFFF,
        ..Flags::from_result(res)
    };
    (res, flags)
}

/// unsigned x / y; C when the division leaves a remainder
pub fn div(x: u16, y: u16) -> (Option<u16>, Flags) {
    if y == 0 {
        return (None, DIVIDE_BY_ZERO);
    }
    let res = x / y;
    let flags = Flags {
        carry: x % y != 0,
        ..Flags::from_result(res)
    };
    (Some(res), flags)
}

/// signed x mod y, result takes the sign of y
pub fn modulo(x: u16, y: u16) -> (Option<u16>, Flags) {
    if y == 0 {
        return (None, DIVIDE_BY_ZERO);
    }
    let (a, b) = (x as i16, y as i16);
    let mut res = a.wrapping_rem(b);
    if res != 0 && (res < 0) != (b < 0) {
        res += b;
    }
    let res = res as u16;
    (Some(res), Flags::from_result(res))
}

/// signed x rem y, result takes the sign of x
pub fn rem(x: u16, y: u16) -> (Option<u16>, Flags) {
    if y == 0 {
        return (None, DIVIDE_BY_ZERO);
    }
    let res = (x as i16).wrapping_rem(y as i16) as u16;
    (Some(res), Flags::from_result(res))
}

/// Shifts `x` by the low nibble of `amount`
pub fn shift(op: ShiftOp, x: u16, amount: u16) -> (u16, Flags) {
    let n = u32::from(amount & 0xF);
    let res = match op {
        ShiftOp::Shl => x << n,
        ShiftOp::Shr => x >> n,
        ShiftOp::Sar => ((x as i16) >> n) as u16,
    };
    (res, Flags::from_result(res))
}

pub fn not(x: u16) -> (u16, Flags) {
    logic(!x)
}

pub fn neg(x: u16) -> (u16, Flags) {
    logic(0u16.wrapping_sub(x))
}
