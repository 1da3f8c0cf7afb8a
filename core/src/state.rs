use crate::audio::Audio;
use crate::constants::{CONTROLLER_PORTS, ROM_ORIGIN, STACK_TOP};
use crate::flags::Flags;
use crate::input::{Controller, InputLatch};
use crate::memory::Memory;
use crate::rng::Random;
use crate::video::Video;

/// The complete Chip16 machine state
///
/// ## CPU
/// Registers
/// - (r) 16 general purpose 16-bit registers (R0..RF), none of them special
/// - (flags) carry, zero, overflow and negative
///
/// Counter
/// - (pc) a 16-bit program counter, always pointing at the next instruction
///
/// Pointer
/// - (sp) a 16-bit stack pointer into ordinary memory
///     - the stack grows downward from 0xFFF0
///     - PUSH decrements by 2 then writes, POP reads then increments by 2
///     - SP wraps around the address space rather than faulting
///
/// ## Memory
/// - 64K bytes shared by the ROM, the stack and the controller ports
///
/// ## Video
/// - 320x240 layer of palette indices, a background index and 16 colours
///
/// ## Audio
/// - a bounded queue of tone events and the current `SNG` envelope
///
/// ## Input
/// - two controller masks latched at every vsync
///
/// ## Timing
/// - 1 instruction per cycle at 1MHz, vsync at 60Hz
/// - `VBLNK` parks the CPU until the next vsync
#[derive(Clone)]
pub struct State {
    pub r: [u16; 16],
    pub pc: u16,
    pub sp: u16,
    pub flags: Flags,
    pub memory: Memory,
    pub video: Video,
    pub audio: Audio,
    pub input: InputLatch,
    pub rng: Random,
    pub awaiting_vblank: bool,
}

impl State {
    pub fn new() -> Self {
        State {
            r: [0; 16],
            pc: ROM_ORIGIN,
            sp: STACK_TOP,
            flags: Flags::default(),
            memory: Memory::new(),
            video: Video::new(),
            audio: Audio::new(),
            input: InputLatch::new(),
            rng: Random::default(),
            awaiting_vblank: false,
        }
    }

    pub fn push(&mut self, value: u16) {
        self.sp = self.sp.wrapping_sub(2);
        self.memory.write16(self.sp, value);
    }

    pub fn pop(&mut self) -> u16 {
        let value = self.memory.read16(self.sp);
        self.sp = self.sp.wrapping_add(2);
        value
    }

    /// Captures the pending controller masks and mirrors them into the I/O ports
    pub fn latch_input(&mut self) {
        self.input.latch();
        for (&port, &controller) in CONTROLLER_PORTS
            .iter()
            .zip([Controller::One, Controller::Two].iter())
        {
            self.memory.write16(port, self.input.get(controller));
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
