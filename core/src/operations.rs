use log::trace;

use crate::alu::{self, ArithOp, ShiftOp};
use crate::audio::{AudioEvent, Envelope, Tone, Waveform};
use crate::flags::{Condition, Flags};
use crate::state::State;

/// The source of an operand: an immediate or the contents of a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Imm(u16),
    Reg(u8),
}

/// Where an ALU result is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// back into Rx
    X,
    /// into Rz, leaving both operands intact
    Z(u8),
    /// nowhere; only the flags change (CMP, TST)
    Discard,
}

fn value(state: &State, operand: Operand) -> u16 {
    match operand {
        Operand::Imm(v) => v,
        Operand::Reg(r) => state.r[usize::from(r)],
    }
}

/// clear
/// Empties the foreground layer and resets the background index
pub fn cls(state: &mut State) {
    state.video.clear();
    state.video.set_background(0);
}

/// Park the CPU until the next vsync
pub fn vblnk(state: &mut State) {
    state.awaiting_vblank = true;
}

/// BG = N
pub fn bgc(state: &mut State, index: u8) {
    state.video.set_background(index);
}

/// SPRITE = (LL bytes, HH rows)
pub fn spr(state: &mut State, width: u8, height: u8) {
    state.video.sprite.width = width;
    state.video.sprite.height = height;
}

/// draw_sprite(x=Rx y=Ry addr)
/// Sets C if any opaque pixel landed on a non-zero pixel
pub fn drw(state: &mut State, x: u8, y: u8, addr: Operand) {
    let addr = value(state, addr);
    let px = state.r[usize::from(x)] as i16;
    let py = state.r[usize::from(y)] as i16;
    let sprite = state.video.sprite;
    let outcome = state
        .video
        .blit_sprite(&state.memory, addr, px, py, sprite, true);
    if outcome.clipped {
        trace!("sprite at {:04X} clipped drawing to ({}, {})", addr, px, py);
    }
    state.flags.carry = outcome.collided;
}

/// Rx = random in [0, max]
pub fn rnd(state: &mut State, x: u8, max: u16) {
    state.r[usize::from(x)] = state.rng.next(u32::from(max) + 1) as u16;
}

pub fn flip(state: &mut State, hflip: bool, vflip: bool) {
    state.video.sprite.hflip = hflip;
    state.video.sprite.vflip = vflip;
}

pub fn snd0(state: &mut State) {
    state.audio.enqueue(AudioEvent::Stop);
}

/// Fixed frequency triangle tone
pub fn snd(state: &mut State, frequency: u16, duration_ms: u16) {
    state.audio.enqueue(AudioEvent::Tone(Tone {
        waveform: Waveform::Triangle,
        frequency,
        duration_ms,
        envelope: None,
    }));
}

/// Tone at frequency mem[Rx] shaped by the last SNG
pub fn snp(state: &mut State, x: u8, duration_ms: u16) {
    let frequency = state.memory.read16(state.r[usize::from(x)]);
    let envelope = state.audio.envelope;
    state.audio.enqueue(AudioEvent::Tone(Tone {
        waveform: envelope.waveform,
        frequency,
        duration_ms,
        envelope: Some(envelope),
    }));
}

pub fn sng(state: &mut State, envelope: Envelope) {
    state.audio.envelope = envelope;
}

/// PC = target
pub fn jump(state: &mut State, target: Operand) {
    state.pc = value(state, target);
}

/// if condition then PC = addr
pub fn jump_if(state: &mut State, condition: Condition, addr: u16) {
    if condition.holds(state.flags) {
        state.pc = addr;
    }
}

/// if Rx == Ry then PC = addr
pub fn jme(state: &mut State, x: u8, y: u8, addr: u16) {
    if state.r[usize::from(x)] == state.r[usize::from(y)] {
        state.pc = addr;
    }
}

/// STACK.push(PC); PC = target
pub fn call(state: &mut State, target: Operand) {
    let target = value(state, target);
    state.push(state.pc);
    state.pc = target;
}

/// if condition then CALL addr
pub fn call_if(state: &mut State, condition: Condition, addr: u16) {
    if condition.holds(state.flags) {
        call(state, Operand::Imm(addr));
    }
}

/// PC = STACK.pop()
pub fn ret(state: &mut State) {
    state.pc = state.pop();
}

/// Rx = HHLL
pub fn ldi(state: &mut State, x: u8, imm: u16) {
    state.r[usize::from(x)] = imm;
}

/// SP = HHLL
pub fn ldi_sp(state: &mut State, imm: u16) {
    state.sp = imm;
}

/// Rx = mem[addr]
pub fn ldm(state: &mut State, x: u8, addr: Operand) {
    let addr = value(state, addr);
    state.r[usize::from(x)] = state.memory.read16(addr);
}

/// Rx = Ry
pub fn mov(state: &mut State, x: u8, y: u8) {
    state.r[usize::from(x)] = state.r[usize::from(y)];
}

/// mem[addr] = Rx
pub fn stm(state: &mut State, x: u8, addr: Operand) {
    let addr = value(state, addr);
    state.memory.write16(addr, state.r[usize::from(x)]);
}

/// target = Rx <op> operand
/// A division by zero writes nothing and leaves the divide-by-zero flags
pub fn arith(state: &mut State, op: ArithOp, x: u8, operand: Operand, target: Target) {
    let lhs = state.r[usize::from(x)];
    let rhs = value(state, operand);
    let (res, flags) = alu::arith(op, lhs, rhs);
    state.flags = flags;
    match (res, target) {
        (Some(v), Target::X) => state.r[usize::from(x)] = v,
        (Some(v), Target::Z(z)) => state.r[usize::from(z)] = v,
        (Some(_), Target::Discard) => {}
        (None, _) => trace!("{:?} of {:04X} by zero", op, lhs),
    }
}

/// Rx = Rx <shift> amount
pub fn shift(state: &mut State, op: ShiftOp, x: u8, amount: Operand) {
    let amount = value(state, amount);
    let (res, flags) = alu::shift(op, state.r[usize::from(x)], amount);
    state.r[usize::from(x)] = res;
    state.flags = flags;
}

/// Rx = !operand
pub fn not(state: &mut State, x: u8, operand: Operand) {
    let (res, flags) = alu::not(value(state, operand));
    state.r[usize::from(x)] = res;
    state.flags = flags;
}

/// Rx = -operand
pub fn neg(state: &mut State, x: u8, operand: Operand) {
    let (res, flags) = alu::neg(value(state, operand));
    state.r[usize::from(x)] = res;
    state.flags = flags;
}

/// STACK.push(Rx)
pub fn push(state: &mut State, x: u8) {
    state.push(state.r[usize::from(x)]);
}

/// Rx = STACK.pop()
pub fn pop(state: &mut State, x: u8) {
    state.r[usize::from(x)] = state.pop();
}

/// STACK.push(R0..RF)
pub fn push_all(state: &mut State) {
    for i in 0..state.r.len() {
        state.push(state.r[i]);
    }
}

/// RF..R0 = STACK.pop()
pub fn pop_all(state: &mut State) {
    for i in (0..state.r.len()).rev() {
        state.r[i] = state.pop();
    }
}

/// STACK.push(FLAGS)
pub fn push_flags(state: &mut State) {
    state.push(u16::from(state.flags.to_byte()));
}

/// FLAGS = STACK.pop()
pub fn pop_flags(state: &mut State) {
    state.flags = Flags::from_byte(state.pop() as u8);
}

/// PALETTE = mem[addr..addr + 48]
pub fn pal(state: &mut State, addr: Operand) {
    let addr = value(state, addr);
    state.video.load_palette(&state.memory, addr);
}
