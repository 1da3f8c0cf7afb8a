use std::fmt;

use crate::alu::{ArithOp, ShiftOp};
use crate::audio::{Envelope, Waveform};
use crate::flags::Condition;
use crate::opcode::Opcode;
use crate::operations::{self, Operand, Target};
use crate::state::State;

/// # Instructions
/// A decoded Chip16 instruction with its operands.
///
/// Register operands hold the 4-bit index of the register, not its contents;
/// they are read at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Nop,
    Cls,
    Vblnk,
    Bgc { index: u8 },
    Spr { width: u8, height: u8 },
    Drw { x: u8, y: u8, addr: Operand },
    Rnd { x: u8, max: u16 },
    Flip { hflip: bool, vflip: bool },
    Snd0,
    Snd { frequency: u16, duration_ms: u16 },
    Snp { x: u8, duration_ms: u16 },
    Sng { envelope: Envelope },
    Jmp { target: Operand },
    Jmc { addr: u16 },
    Jx { condition: Condition, addr: u16 },
    Jme { x: u8, y: u8, addr: u16 },
    Call { target: Operand },
    Ret,
    Cx { condition: Condition, addr: u16 },
    Ldi { x: u8, imm: u16 },
    LdiSp { imm: u16 },
    Ldm { x: u8, addr: Operand },
    Mov { x: u8, y: u8 },
    Stm { x: u8, addr: Operand },
    Arith { op: ArithOp, x: u8, operand: Operand, target: Target },
    Shift { op: ShiftOp, x: u8, amount: Operand },
    Push { x: u8 },
    Pop { x: u8 },
    PushAll,
    PopAll,
    PushF,
    PopF,
    Pal { addr: Operand },
    Not { x: u8, operand: Operand },
    Neg { x: u8, operand: Operand },
    /// Any opcode byte the instruction set leaves unassigned; executes as a NOP
    Undefined { opcode: u8 },
}

/// The three encodings shared by the ALU families:
/// `_0 Rx, HHLL`, `_1 Rx, Ry` and `_2 Rx, Ry, Rz`
fn alu_form(op: &[u8; 4], kind: ArithOp, form: u8) -> Instruction {
    let (operand, target) = match form {
        0 => (Operand::Imm(op.hhll()), Target::X),
        1 => (Operand::Reg(op.y()), Target::X),
        _ => (Operand::Reg(op.y()), Target::Z(op.z())),
    };
    Instruction::Arith {
        op: kind,
        x: op.x(),
        operand,
        target,
    }
}

fn discard_form(op: &[u8; 4], kind: ArithOp, operand: Operand) -> Instruction {
    Instruction::Arith {
        op: kind,
        x: op.x(),
        operand,
        target: Target::Discard,
    }
}

impl Instruction {
    /// Decodes the four instruction bytes at PC.
    /// Total over every input: unassigned opcodes decode to `Undefined`.
    pub fn decode(op: [u8; 4]) -> Instruction {
        use Instruction::*;

        let imm = Operand::Imm(op.hhll());
        match op.op() {
            0x00 => Nop,
            0x01 => Cls,
            0x02 => Vblnk,
            0x03 => Bgc { index: op.n() },
            0x04 => Spr {
                width: op.ll(),
                height: op.hh(),
            },
            0x05 => Drw {
                x: op.x(),
                y: op.y(),
                addr: imm,
            },
            0x06 => Drw {
                x: op.x(),
                y: op.y(),
                addr: Operand::Reg(op.z()),
            },
            0x07 => Rnd {
                x: op.x(),
                max: op.hhll(),
            },
            0x08 => Flip {
                hflip: op.hh() & 0x2 != 0,
                vflip: op.hh() & 0x1 != 0,
            },
            0x09 => Snd0,
            0x0A => Snd {
                frequency: 500,
                duration_ms: op.hhll(),
            },
            0x0B => Snd {
                frequency: 1000,
                duration_ms: op.hhll(),
            },
            0x0C => Snd {
                frequency: 1500,
                duration_ms: op.hhll(),
            },
            0x0D => Snp {
                x: op.x(),
                duration_ms: op.hhll(),
            },
            0x0E => Sng {
                envelope: Envelope {
                    attack: op.y(),
                    decay: op.x(),
                    volume: op.ll() >> 4,
                    waveform: Waveform::from_nibble(op.z()),
                    sustain: op.hh() >> 4,
                    release: op.hh() & 0xF,
                },
            },

            0x10 => Jmp { target: imm },
            0x11 => Jmc { addr: op.hhll() },
            0x12 => Jx {
                condition: Condition::from_nibble(op.x()),
                addr: op.hhll(),
            },
            0x13 => Jme {
                x: op.x(),
                y: op.y(),
                addr: op.hhll(),
            },
            0x14 => Call { target: imm },
            0x15 => Ret,
            0x16 => Jmp {
                target: Operand::Reg(op.x()),
            },
            0x17 => Cx {
                condition: Condition::from_nibble(op.x()),
                addr: op.hhll(),
            },
            0x18 => Call {
                target: Operand::Reg(op.x()),
            },

            0x20 => Ldi {
                x: op.x(),
                imm: op.hhll(),
            },
            0x21 => LdiSp { imm: op.hhll() },
            0x22 => Ldm { x: op.x(), addr: imm },
            0x23 => Ldm {
                x: op.x(),
                addr: Operand::Reg(op.y()),
            },
            0x24 => Mov {
                x: op.x(),
                y: op.y(),
            },

            0x30 => Stm { x: op.x(), addr: imm },
            0x31 => Stm {
                x: op.x(),
                addr: Operand::Reg(op.y()),
            },

            code @ 0x40..=0x42 => alu_form(&op, ArithOp::Add, code & 0xF),
            code @ 0x50..=0x52 => alu_form(&op, ArithOp::Sub, code & 0xF),
            0x53 => discard_form(&op, ArithOp::Sub, imm),
            0x54 => discard_form(&op, ArithOp::Sub, Operand::Reg(op.y())),
            code @ 0x60..=0x62 => alu_form(&op, ArithOp::And, code & 0xF),
            0x63 => discard_form(&op, ArithOp::And, imm),
            0x64 => discard_form(&op, ArithOp::And, Operand::Reg(op.y())),
            code @ 0x70..=0x72 => alu_form(&op, ArithOp::Or, code & 0xF),
            code @ 0x80..=0x82 => alu_form(&op, ArithOp::Xor, code & 0xF),
            code @ 0x90..=0x92 => alu_form(&op, ArithOp::Mul, code & 0xF),
            code @ 0xA0..=0xA2 => alu_form(&op, ArithOp::Div, code & 0xF),
            code @ 0xA3..=0xA5 => alu_form(&op, ArithOp::Mod, (code & 0xF) - 3),
            code @ 0xA6..=0xA8 => alu_form(&op, ArithOp::Rem, (code & 0xF) - 6),

            code @ 0xB0..=0xB5 => {
                let shift = match (code - 0xB0) % 3 {
                    0 => ShiftOp::Shl,
                    1 => ShiftOp::Shr,
                    _ => ShiftOp::Sar,
                };
                let amount = if code < 0xB3 {
                    Operand::Imm(u16::from(op.n()))
                } else {
                    Operand::Reg(op.y())
                };
                Shift {
                    op: shift,
                    x: op.x(),
                    amount,
                }
            }

            0xC0 => Push { x: op.x() },
            0xC1 => Pop { x: op.x() },
            0xC2 => PushAll,
            0xC3 => PopAll,
            0xC4 => PushF,
            0xC5 => PopF,
            0xC6 => Pal { addr: imm },
            0xC7 => Pal {
                addr: Operand::Reg(op.x()),
            },

            0xD0 => Not {
                x: op.x(),
                operand: imm,
            },
            0xD1 => Not {
                x: op.x(),
                operand: Operand::Reg(op.x()),
            },
            0xD2 => Not {
                x: op.x(),
                operand: Operand::Reg(op.y()),
            },
            0xD3 => Neg {
                x: op.x(),
                operand: imm,
            },
            0xD4 => Neg {
                x: op.x(),
                operand: Operand::Reg(op.x()),
            },
            0xD5 => Neg {
                x: op.x(),
                operand: Operand::Reg(op.y()),
            },

            opcode => Undefined { opcode },
        }
    }

    /// Applies the instruction to `state`.
    /// PC must already point past this instruction.
    pub fn execute(&self, state: &mut State) {
        use Instruction::*;

        match *self {
            Nop | Undefined { .. } => {}
            Cls => operations::cls(state),
            Vblnk => operations::vblnk(state),
            Bgc { index } => operations::bgc(state, index),
            Spr { width, height } => operations::spr(state, width, height),
            Drw { x, y, addr } => operations::drw(state, x, y, addr),
            Rnd { x, max } => operations::rnd(state, x, max),
            Flip { hflip, vflip } => operations::flip(state, hflip, vflip),
            Snd0 => operations::snd0(state),
            Snd {
                frequency,
                duration_ms,
            } => operations::snd(state, frequency, duration_ms),
            Snp { x, duration_ms } => operations::snp(state, x, duration_ms),
            Sng { envelope } => operations::sng(state, envelope),
            Jmp { target } => operations::jump(state, target),
            Jmc { addr } => operations::jump_if(state, Condition::Below, addr),
            Jx { condition, addr } => operations::jump_if(state, condition, addr),
            Jme { x, y, addr } => operations::jme(state, x, y, addr),
            Call { target } => operations::call(state, target),
            Ret => operations::ret(state),
            Cx { condition, addr } => operations::call_if(state, condition, addr),
            Ldi { x, imm } => operations::ldi(state, x, imm),
            LdiSp { imm } => operations::ldi_sp(state, imm),
            Ldm { x, addr } => operations::ldm(state, x, addr),
            Mov { x, y } => operations::mov(state, x, y),
            Stm { x, addr } => operations::stm(state, x, addr),
            Arith {
                op,
                x,
                operand,
                target,
            } => operations::arith(state, op, x, operand, target),
            Shift { op, x, amount } => operations::shift(state, op, x, amount),
            Push { x } => operations::push(state, x),
            Pop { x } => operations::pop(state, x),
            PushAll => operations::push_all(state),
            PopAll => operations::pop_all(state),
            PushF => operations::push_flags(state),
            PopF => operations::pop_flags(state),
            Pal { addr } => operations::pal(state, addr),
            Not { x, operand } => operations::not(state, x, operand),
            Neg { x, operand } => operations::neg(state, x, operand),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(v) => write!(f, "{:#06X}", v),
            Operand::Reg(r) => write!(f, "R{:X}", r),
        }
    }
}

fn condition_suffix(condition: Condition) -> &'static str {
    match condition {
        Condition::Zero => "Z",
        Condition::NotZero => "NZ",
        Condition::Negative => "N",
        Condition::NotNegative => "NN",
        Condition::Positive => "P",
        Condition::Overflow => "O",
        Condition::NotOverflow => "NO",
        Condition::Above => "A",
        Condition::AboveEqual => "AE",
        Condition::Below => "B",
        Condition::BelowEqual => "BE",
        Condition::Greater => "G",
        Condition::GreaterEqual => "GE",
        Condition::Less => "L",
        Condition::LessEqual => "LE",
        Condition::Reserved => "F",
    }
}

fn shift_mnemonic(op: ShiftOp) -> &'static str {
    match op {
        ShiftOp::Shl => "SHL",
        ShiftOp::Shr => "SHR",
        ShiftOp::Sar => "SAR",
    }
}

fn arith_mnemonic(op: ArithOp, target: Target) -> &'static str {
    match (op, target) {
        (ArithOp::Sub, Target::Discard) => "CMP",
        (ArithOp::And, Target::Discard) => "TST",
        (ArithOp::Add, _) => "ADD",
        (ArithOp::Sub, _) => "SUB",
        (ArithOp::And, _) => "AND",
        (ArithOp::Or, _) => "OR",
        (ArithOp::Xor, _) => "XOR",
        (ArithOp::Mul, _) => "MUL",
        (ArithOp::Div, _) => "DIV",
        (ArithOp::Mod, _) => "MOD",
        (ArithOp::Rem, _) => "REM",
    }
}

/// Assembler style mnemonics, used when tracing execution
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Nop => write!(f, "NOP"),
            Cls => write!(f, "CLS"),
            Vblnk => write!(f, "VBLNK"),
            Bgc { index } => write!(f, "BGC {:X}", index),
            Spr { width, height } => write!(f, "SPR {}x{}", width, height),
            Drw { x, y, addr } => write!(f, "DRW R{:X}, R{:X}, {}", x, y, addr),
            Rnd { x, max } => write!(f, "RND R{:X}, {:#06X}", x, max),
            Flip { hflip, vflip } => write!(f, "FLIP {}, {}", hflip as u8, vflip as u8),
            Snd0 => write!(f, "SND0"),
            Snd {
                frequency,
                duration_ms,
            } => write!(f, "SND {}Hz, {}ms", frequency, duration_ms),
            Snp { x, duration_ms } => write!(f, "SNP R{:X}, {}ms", x, duration_ms),
            Sng { envelope } => write!(f, "SNG {:?}", envelope),
            Jmp { target } => write!(f, "JMP {}", target),
            Jmc { addr } => write!(f, "JMC {:#06X}", addr),
            Jx { condition, addr } => write!(f, "J{} {:#06X}", condition_suffix(condition), addr),
            Jme { x, y, addr } => write!(f, "JME R{:X}, R{:X}, {:#06X}", x, y, addr),
            Call { target } => write!(f, "CALL {}", target),
            Ret => write!(f, "RET"),
            Cx { condition, addr } => write!(f, "C{} {:#06X}", condition_suffix(condition), addr),
            Ldi { x, imm } => write!(f, "LDI R{:X}, {:#06X}", x, imm),
            LdiSp { imm } => write!(f, "LDI SP, {:#06X}", imm),
            Ldm { x, addr } => write!(f, "LDM R{:X}, {}", x, addr),
            Mov { x, y } => write!(f, "MOV R{:X}, R{:X}", x, y),
            Stm { x, addr } => write!(f, "STM R{:X}, {}", x, addr),
            Arith {
                op,
                x,
                operand,
                target,
            } => {
                write!(f, "{} R{:X}, {}", arith_mnemonic(op, target), x, operand)?;
                if let Target::Z(z) = target {
                    write!(f, ", R{:X}", z)?;
                }
                Ok(())
            }
            Shift { op, x, amount } => write!(f, "{} R{:X}, {}", shift_mnemonic(op), x, amount),
            Push { x } => write!(f, "PUSH R{:X}", x),
            Pop { x } => write!(f, "POP R{:X}", x),
            PushAll => write!(f, "PUSHALL"),
            PopAll => write!(f, "POPALL"),
            PushF => write!(f, "PUSHF"),
            PopF => write!(f, "POPF"),
            Pal { addr } => write!(f, "PAL {}", addr),
            Not { x, operand } => write!(f, "NOT R{:X}, {}", x, operand),
            Neg { x, operand } => write!(f, "NEG R{:X}, {}", x, operand),
            Undefined { opcode } => write!(f, "??? {:02X}", opcode),
        }
    }
}

#[cfg(test)]
mod test_instruction {
    use super::*;
    use crate::alu::DIVIDE_BY_ZERO;
    use crate::audio::{AudioEvent, Tone};
    use crate::constants::STACK_TOP;
    use crate::flags::Flags;

    fn run(op: [u8; 4], state: &mut State) {
        Instruction::decode(op).execute(state);
    }

    #[test]
    fn test_decode_is_total() {
        let defined: Vec<u8> = (0x00..=0x0E)
            .chain(0x10..=0x18)
            .chain(0x20..=0x24)
            .chain(0x30..=0x31)
            .chain(0x40..=0x42)
            .chain(0x50..=0x54)
            .chain(0x60..=0x64)
            .chain(0x70..=0x72)
            .chain(0x80..=0x82)
            .chain(0x90..=0x92)
            .chain(0xA0..=0xA8)
            .chain(0xB0..=0xB5)
            .chain(0xC0..=0xC7)
            .chain(0xD0..=0xD5)
            .collect();
        for opcode in 0..=0xFF {
            let undefined = Instruction::decode([opcode, 0x12, 0x34, 0x56])
                == Instruction::Undefined { opcode };
            assert_eq!(undefined, !defined.contains(&opcode), "{:02X}", opcode);
        }
    }

    #[test]
    fn test_undefined_opcode_changes_nothing() {
        let mut state = State::new();
        state.r[0x1] = 0x1234;
        state.flags.zero = true;
        run([0xFF, 0x11, 0x22, 0x33], &mut state);
        assert_eq!(state.r[0x1], 0x1234);
        assert!(state.flags.zero);
        assert_eq!(state.sp, STACK_TOP);
    }

    #[test]
    fn test_decode_operand_positions() {
        assert_eq!(
            Instruction::decode([0x42, 0x21, 0x03, 0x00]),
            Instruction::Arith {
                op: ArithOp::Add,
                x: 0x1,
                operand: Operand::Reg(0x2),
                target: Target::Z(0x3),
            }
        );
        assert_eq!(
            Instruction::decode([0xA4, 0x65, 0x00, 0x00]),
            Instruction::Arith {
                op: ArithOp::Mod,
                x: 0x5,
                operand: Operand::Reg(0x6),
                target: Target::X,
            }
        );
        assert_eq!(
            Instruction::decode([0xB5, 0x21, 0x00, 0x00]),
            Instruction::Shift {
                op: ShiftOp::Sar,
                x: 0x1,
                amount: Operand::Reg(0x2),
            }
        );
        assert_eq!(
            Instruction::decode([0x0E, 0x12, 0x32, 0x45]),
            Instruction::Sng {
                envelope: Envelope {
                    attack: 0x1,
                    decay: 0x2,
                    volume: 0x3,
                    waveform: Waveform::Pulse,
                    sustain: 0x4,
                    release: 0x5,
                }
            }
        );
    }

    #[test]
    fn test_display_mnemonics() {
        assert_eq!(
            Instruction::decode([0x42, 0x21, 0x03, 0x00]).to_string(),
            "ADD R1, R2, R3"
        );
        assert_eq!(
            Instruction::decode([0x53, 0x04, 0x10, 0x00]).to_string(),
            "CMP R4, 0x0010"
        );
        assert_eq!(
            Instruction::decode([0x10, 0x00, 0x34, 0x12]).to_string(),
            "JMP 0x1234"
        );
        assert_eq!(
            Instruction::decode([0x12, 0x0D, 0x00, 0x02]).to_string(),
            "JL 0x0200"
        );
        assert_eq!(
            Instruction::decode([0xB4, 0x32, 0x00, 0x00]).to_string(),
            "SHR R2, R3"
        );
        assert_eq!(Instruction::decode([0xEE, 0, 0, 0]).to_string(), "??? EE");
    }

    #[test]
    fn test_01_cls() {
        let mut state = State::new();
        state.video.set_background(0x5);
        run([0x04, 0x00, 0x01, 0x01], &mut state);
        state.memory.write8(0x100, 0xFF);
        run([0x05, 0x00, 0x00, 0x01], &mut state);
        assert_eq!(state.video.pixel(0, 0), 0xF);
        run([0x01, 0, 0, 0], &mut state);
        assert_eq!(state.video.pixel(0, 0), 0);
        assert_eq!(state.video.background, 0);
    }

    #[test]
    fn test_02_vblnk() {
        let mut state = State::new();
        run([0x02, 0, 0, 0], &mut state);
        assert!(state.awaiting_vblank);
    }

    #[test]
    fn test_03_bgc() {
        let mut state = State::new();
        run([0x03, 0x00, 0x0A, 0x00], &mut state);
        assert_eq!(state.video.background, 0xA);
    }

    #[test]
    fn test_04_spr() {
        let mut state = State::new();
        run([0x04, 0x00, 0x08, 0x10], &mut state);
        assert_eq!(state.video.sprite.width, 0x08);
        assert_eq!(state.video.sprite.height, 0x10);
    }

    #[test]
    fn test_05_drw_sets_carry_on_collision() {
        let mut state = State::new();
        state.memory.write8(0x300, 0x11);
        state.r[0x1] = 10;
        state.r[0x2] = 20;
        run([0x04, 0x00, 0x01, 0x01], &mut state);
        run([0x05, 0x21, 0x00, 0x03], &mut state);
        assert_eq!(state.video.pixel(10, 20), 0x1);
        assert_eq!(state.video.pixel(11, 20), 0x1);
        assert!(!state.flags.carry);
        run([0x05, 0x21, 0x00, 0x03], &mut state);
        assert!(state.flags.carry);
    }

    #[test]
    fn test_06_drw_reads_address_from_rz() {
        let mut state = State::new();
        state.memory.write8(0x400, 0x70);
        state.r[0x3] = 0x400;
        state.r[0x1] = (-1i16) as u16;
        run([0x04, 0x00, 0x01, 0x01], &mut state);
        run([0x06, 0x01, 0x03, 0x00], &mut state);
        // the left pixel is off screen, the right one transparent
        assert_eq!(state.video.pixel(0, 0), 0);
        state.r[0x1] = 0;
        run([0x06, 0x01, 0x03, 0x00], &mut state);
        assert_eq!(state.video.pixel(0, 0), 0x7);
    }

    #[test]
    fn test_07_rnd_stays_in_range() {
        let mut state = State::new();
        for _ in 0..100 {
            run([0x07, 0x01, 0x05, 0x00], &mut state);
            assert!(state.r[0x1] <= 5);
        }
        run([0x07, 0x01, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0);
    }

    #[test]
    fn test_08_flip() {
        let mut state = State::new();
        run([0x08, 0x00, 0x00, 0x02], &mut state);
        assert!(state.video.sprite.hflip);
        assert!(!state.video.sprite.vflip);
        run([0x08, 0x00, 0x00, 0x01], &mut state);
        assert!(!state.video.sprite.hflip);
        assert!(state.video.sprite.vflip);
    }

    #[test]
    fn test_09_to_0c_sounds() {
        let mut state = State::new();
        run([0x0B, 0x00, 0xF4, 0x01], &mut state);
        run([0x09, 0, 0, 0], &mut state);
        assert_eq!(
            state.audio.drain(),
            vec![
                AudioEvent::Tone(Tone {
                    waveform: Waveform::Triangle,
                    frequency: 1000,
                    duration_ms: 500,
                    envelope: None,
                }),
                AudioEvent::Stop,
            ]
        );
    }

    #[test]
    fn test_0d_snp_uses_sng_envelope() {
        let mut state = State::new();
        state.memory.write16(0x500, 440);
        state.r[0x2] = 0x500;
        run([0x0E, 0x12, 0xF1, 0x34], &mut state);
        run([0x0D, 0x02, 0x64, 0x00], &mut state);
        let envelope = state.audio.envelope;
        assert_eq!(envelope.waveform, Waveform::Sawtooth);
        assert_eq!(envelope.volume, 0xF);
        assert_eq!(
            state.audio.drain(),
            vec![AudioEvent::Tone(Tone {
                waveform: Waveform::Sawtooth,
                frequency: 440,
                duration_ms: 100,
                envelope: Some(envelope),
            })]
        );
    }

    #[test]
    fn test_10_jmp() {
        let mut state = State::new();
        run([0x10, 0x00, 0xBC, 0x0A], &mut state);
        assert_eq!(state.pc, 0x0ABC);
    }

    #[test]
    fn test_11_jmc() {
        let mut state = State::new();
        run([0x11, 0x00, 0x00, 0x20], &mut state);
        assert_eq!(state.pc, 0x0000);
        state.flags.carry = true;
        run([0x11, 0x00, 0x00, 0x20], &mut state);
        assert_eq!(state.pc, 0x2000);
    }

    #[test]
    fn test_12_jx_takes_branch() {
        let mut state = State::new();
        state.flags.zero = true;
        run([0x12, 0x00, 0x00, 0x30], &mut state);
        assert_eq!(state.pc, 0x3000);
    }

    #[test]
    fn test_12_jx_falls_through() {
        let mut state = State::new();
        state.pc = 0x0104;
        state.flags.zero = true;
        run([0x12, 0x01, 0x00, 0x30], &mut state);
        assert_eq!(state.pc, 0x0104);
    }

    #[test]
    fn test_12_jx_after_cmp() {
        // 3 < 5 unsigned and signed
        let mut state = State::new();
        state.r[0x1] = 3;
        run([0x53, 0x01, 0x05, 0x00], &mut state);
        run([0x12, 0x09, 0x00, 0x40], &mut state);
        assert_eq!(state.pc, 0x4000);
        run([0x12, 0x0D, 0x00, 0x50], &mut state);
        assert_eq!(state.pc, 0x5000);
        run([0x12, 0x07, 0x00, 0x60], &mut state);
        assert_eq!(state.pc, 0x5000);
    }

    #[test]
    fn test_13_jme() {
        let mut state = State::new();
        state.r[0x1] = 0x11;
        state.r[0x2] = 0x12;
        run([0x13, 0x21, 0x00, 0x10], &mut state);
        assert_eq!(state.pc, 0x0000);
        state.r[0x2] = 0x11;
        run([0x13, 0x21, 0x00, 0x10], &mut state);
        assert_eq!(state.pc, 0x1000);
    }

    #[test]
    fn test_14_call_and_15_ret() {
        let mut state = State::new();
        state.pc = 0xABCD;
        run([0x14, 0x00, 0x23, 0x01], &mut state);
        assert_eq!(state.pc, 0x0123);
        assert_eq!(state.sp, STACK_TOP - 2);
        assert_eq!(state.memory.read16(state.sp), 0xABCD);
        run([0x15, 0, 0, 0], &mut state);
        assert_eq!(state.pc, 0xABCD);
        assert_eq!(state.sp, STACK_TOP);
    }

    #[test]
    fn test_16_jmp_register() {
        let mut state = State::new();
        state.r[0xA] = 0x4242;
        run([0x16, 0x0A, 0, 0], &mut state);
        assert_eq!(state.pc, 0x4242);
    }

    #[test]
    fn test_17_cx() {
        let mut state = State::new();
        state.pc = 0x0010;
        run([0x17, 0x00, 0x00, 0x02], &mut state);
        assert_eq!(state.pc, 0x0010);
        assert_eq!(state.sp, STACK_TOP);
        state.flags.zero = true;
        run([0x17, 0x00, 0x00, 0x02], &mut state);
        assert_eq!(state.pc, 0x0200);
        assert_eq!(state.memory.read16(state.sp), 0x0010);
    }

    #[test]
    fn test_18_call_register() {
        let mut state = State::new();
        state.pc = 0x0010;
        state.r[0x3] = 0x0800;
        run([0x18, 0x03, 0, 0], &mut state);
        assert_eq!(state.pc, 0x0800);
        assert_eq!(state.memory.read16(state.sp), 0x0010);
    }

    #[test]
    fn test_20_ldi() {
        let mut state = State::new();
        run([0x20, 0x05, 0x34, 0x12], &mut state);
        assert_eq!(state.r[0x5], 0x1234);
    }

    #[test]
    fn test_21_ldi_sp() {
        let mut state = State::new();
        run([0x21, 0x00, 0x00, 0xFE], &mut state);
        assert_eq!(state.sp, 0xFE00);
    }

    #[test]
    fn test_22_23_ldm() {
        let mut state = State::new();
        state.memory.write16(0x2000, 0xBEEF);
        run([0x22, 0x01, 0x00, 0x20], &mut state);
        assert_eq!(state.r[0x1], 0xBEEF);
        state.r[0x2] = 0x2000;
        run([0x23, 0x23, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x3], 0xBEEF);
    }

    #[test]
    fn test_24_mov() {
        let mut state = State::new();
        state.r[0x2] = 0x55AA;
        run([0x24, 0x21, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x55AA);
    }

    #[test]
    fn test_30_31_stm_round_trips_with_ldm() {
        let mut state = State::new();
        state.r[0x1] = 0xCAFE;
        run([0x30, 0x01, 0x00, 0x30], &mut state);
        assert_eq!(state.memory.read16(0x3000), 0xCAFE);
        state.r[0x2] = 0x3002;
        run([0x31, 0x21, 0x00, 0x00], &mut state);
        run([0x23, 0x24, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x4], 0xCAFE);
    }

    #[test]
    fn test_40_addi_flags() {
        let mut state = State::new();
        state.r[0x1] = 0xFFFF;
        run([0x40, 0x01, 0x01, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x0000);
        assert_eq!(
            state.flags,
            Flags {
                carry: true,
                zero: true,
                overflow: false,
                negative: false
            }
        );
    }

    #[test]
    fn test_41_add() {
        let mut state = State::new();
        state.r[0x1] = 0x7FFF;
        state.r[0x2] = 0x0001;
        run([0x41, 0x21, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x8000);
        assert!(state.flags.overflow);
        assert!(state.flags.negative);
    }

    #[test]
    fn test_42_add_into_rz() {
        let mut state = State::new();
        state.r[0x1] = 2;
        state.r[0x2] = 3;
        run([0x42, 0x21, 0x03, 0x00], &mut state);
        assert_eq!(state.r[0x1], 2);
        assert_eq!(state.r[0x3], 5);
    }

    #[test]
    fn test_50_51_sub() {
        let mut state = State::new();
        state.r[0x1] = 0x0010;
        run([0x50, 0x01, 0x11, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0xFFFF);
        assert!(state.flags.carry);
        state.r[0x2] = 0xFFFF;
        run([0x51, 0x21, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0);
        assert!(state.flags.zero);
        assert!(!state.flags.carry);
    }

    #[test]
    fn test_54_cmp_discards_result() {
        let mut state = State::new();
        state.r[0x1] = 5;
        state.r[0x2] = 5;
        run([0x54, 0x21, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 5);
        assert!(state.flags.zero);
    }

    #[test]
    fn test_63_tsti() {
        let mut state = State::new();
        state.r[0x1] = 0x00F0;
        run([0x63, 0x01, 0x0F, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x00F0);
        assert!(state.flags.zero);
    }

    #[test]
    fn test_logic_ops() {
        let mut state = State::new();
        state.r[0x1] = 0x0FF0;
        state.r[0x2] = 0x00FF;
        state.flags.carry = true;
        run([0x62, 0x21, 0x03, 0x00], &mut state);
        assert_eq!(state.r[0x3], 0x00F0);
        assert!(!state.flags.carry);
        run([0x71, 0x21, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x0FFF);
        run([0x80, 0x01, 0xFF, 0xFF], &mut state);
        assert_eq!(state.r[0x1], 0xF000);
        assert!(state.flags.negative);
    }

    #[test]
    fn test_90_muli() {
        let mut state = State::new();
        state.r[0x1] = 0x0100;
        run([0x90, 0x01, 0x00, 0x01], &mut state);
        assert_eq!(state.r[0x1], 0x0000);
        assert!(state.flags.carry);
        assert!(state.flags.zero);
    }

    #[test]
    fn test_a1_div() {
        let mut state = State::new();
        state.r[0x1] = 7;
        state.r[0x2] = 2;
        run([0xA1, 0x21, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 3);
        assert!(state.flags.carry);
    }

    #[test]
    fn test_a0_divi_by_zero() {
        let mut state = State::new();
        state.r[0x1] = 0x1234;
        run([0xA0, 0x01, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x1234);
        assert_eq!(state.flags, DIVIDE_BY_ZERO);
    }

    #[test]
    fn test_a3_modi_and_a6_remi() {
        let mut state = State::new();
        state.r[0x1] = (-7i16) as u16;
        state.r[0x2] = (-7i16) as u16;
        run([0xA3, 0x01, 0x03, 0x00], &mut state);
        run([0xA6, 0x02, 0x03, 0x00], &mut state);
        assert_eq!(state.r[0x1], 2);
        assert_eq!(state.r[0x2], (-1i16) as u16);
    }

    #[test]
    fn test_b0_to_b5_shifts() {
        let mut state = State::new();
        state.r[0x1] = 0x0001;
        run([0xB0, 0x01, 0x04, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x0010);
        state.r[0x2] = 0x8000;
        run([0xB2, 0x02, 0x01, 0x00], &mut state);
        assert_eq!(state.r[0x2], 0xC000);
        state.r[0x3] = 14;
        run([0xB4, 0x32, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x2], 0x0003);
    }

    #[test]
    fn test_c0_c1_push_pop() {
        let mut state = State::new();
        state.r[0x1] = 0x1111;
        run([0xC0, 0x01, 0, 0], &mut state);
        assert_eq!(state.sp, STACK_TOP - 2);
        run([0xC1, 0x02, 0, 0], &mut state);
        assert_eq!(state.r[0x2], 0x1111);
        assert_eq!(state.sp, STACK_TOP);
    }

    #[test]
    fn test_c2_c3_pushall_popall() {
        let mut state = State::new();
        for i in 0..16 {
            state.r[i] = i as u16 * 0x101;
        }
        let saved = state.r;
        run([0xC2, 0, 0, 0], &mut state);
        assert_eq!(state.sp, STACK_TOP - 32);
        state.r = [0; 16];
        run([0xC3, 0, 0, 0], &mut state);
        assert_eq!(state.r, saved);
        assert_eq!(state.sp, STACK_TOP);
    }

    #[test]
    fn test_c4_c5_pushf_popf() {
        let mut state = State::new();
        let flags = Flags {
            carry: true,
            zero: false,
            overflow: true,
            negative: false,
        };
        state.flags = flags;
        run([0xC4, 0, 0, 0], &mut state);
        assert_eq!(state.memory.read16(state.sp), 0x0042);
        state.flags = Flags::default();
        run([0xC5, 0, 0, 0], &mut state);
        assert_eq!(state.flags, flags);
    }

    #[test]
    fn test_c6_c7_pal() {
        let mut state = State::new();
        for i in 0..48u16 {
            state.memory.write8(0x600 + i, 0xFF);
        }
        run([0xC6, 0x00, 0x00, 0x06], &mut state);
        assert!(state.video.palette.iter().all(|c| c.r == 0xFF && c.b == 0xFF));
        state.r[0x4] = 0x700;
        run([0xC7, 0x04, 0, 0], &mut state);
        assert!(state.video.palette.iter().all(|c| c.g == 0));
    }

    #[test]
    fn test_d0_to_d5_not_neg() {
        let mut state = State::new();
        run([0xD0, 0x01, 0xFF, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0xFF00);
        run([0xD1, 0x01, 0, 0], &mut state);
        assert_eq!(state.r[0x1], 0x00FF);
        state.r[0x2] = 1;
        run([0xD5, 0x21, 0, 0], &mut state);
        assert_eq!(state.r[0x1], 0xFFFF);
        assert!(state.flags.negative);
        run([0xD4, 0x01, 0, 0], &mut state);
        assert_eq!(state.r[0x1], 0x0001);
        run([0xD3, 0x01, 0x00, 0x00], &mut state);
        assert_eq!(state.r[0x1], 0x0000);
        assert!(state.flags.zero);
    }
}
