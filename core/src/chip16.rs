use log::{debug, info, trace};

use crate::audio::AudioEvent;
use crate::constants::{INSTRUCTION_SIZE, ROM_ORIGIN};
use crate::flags::Flags;
use crate::input::Controller;
use crate::instruction::Instruction;
use crate::memory::Memory;
use crate::rng::Random;
use crate::rom::{LoadError, Rom};
use crate::state::State;
use crate::video::VideoSnapshot;

/// What the CPU did (or refused to do) on a call to `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionSignal {
    /// an instruction ran and the next one may follow immediately
    Continue,
    /// `VBLNK` is waiting for the driver to signal vsync
    AwaitingVblank,
    /// stopped until `reset`
    Halted,
}

/// # Chip16
/// Chip16 is a 16-bit fantasy console with a fixed instruction set.
///
/// Tracks:
///  - the current machine `state`
///  - the last loaded `rom` so that `reset` can bring it back
///  - whether the machine was `halted` by its driver
///
/// Supplies interfaces for:
/// - loading headered or raw roms
/// - stepping the CPU one instruction at a time
/// - signalling vsync and setting controller input
/// - taking video snapshots and draining audio for some backend
pub struct Chip16 {
    state: State,
    rom: Option<Rom>,
    seed: u64,
    halted: bool,
}

impl Chip16 {
    pub fn new() -> Self {
        let state = State::new();
        let seed = state.rng.current_seed();
        Chip16 {
            state,
            rom: None,
            seed,
            halted: false,
        }
    }

    /// A machine whose `RND` draws follow `seed`
    pub fn with_seed(seed: u64) -> Self {
        let mut chip16 = Self::new();
        chip16.seed_rng(seed);
        chip16
    }

    /// Reseeds the generator; the seed also survives `reset`
    pub fn seed_rng(&mut self, seed: u64) {
        self.seed = seed;
        self.state.rng.seed(seed);
    }

    /// Validates and loads a `.c16` image.
    /// Nothing changes unless the whole image is valid.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let rom = Rom::parse(bytes)?;
        info!(
            "loaded {} byte ROM, version {}.{}, starting at {:04X}",
            rom.body.len(),
            rom.version >> 4,
            rom.version & 0xF,
            rom.start
        );
        self.install(rom);
        Ok(())
    }

    /// Loads a headerless image at the ROM origin, starting at address 0
    pub fn load_raw(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        let rom = Rom::raw(bytes)?;
        info!("loaded {} byte raw image", rom.body.len());
        self.install(rom);
        Ok(())
    }

    /// Powers the machine back on with the last loaded ROM, if any
    pub fn reset(&mut self) {
        debug!("reset");
        match self.rom.take() {
            Some(rom) => self.install(rom),
            None => {
                self.state = self.fresh_state();
                self.halted = false;
            }
        }
    }

    /// Stops execution until the next `reset`; repeated calls are harmless
    pub fn halt(&mut self) {
        if !self.halted {
            debug!("halted at {:04X}", self.state.pc);
        }
        self.halted = true;
    }

    /// Advances the CPU by a single instruction
    /// - does nothing while halted or waiting for vsync
    /// - fetches from memory on every step so rewritten code takes effect
    /// - moves PC past the instruction before executing it
    pub fn step(&mut self) -> ExecutionSignal {
        if self.halted {
            return ExecutionSignal::Halted;
        }
        if self.state.awaiting_vblank {
            return ExecutionSignal::AwaitingVblank;
        }

        let pc = self.state.pc;
        let op = self.get_op();
        let instruction = Instruction::decode(op);
        if let Instruction::Undefined { opcode } = instruction {
            debug!("undefined opcode {:02X} at {:04X}, skipping", opcode, pc);
        }
        trace!(
            "{:04X} {:02X?} {} r{:04X?} sp{:04X}",
            pc,
            op,
            instruction,
            self.state.r,
            self.state.sp
        );

        self.state.pc = pc.wrapping_add(INSTRUCTION_SIZE);
        instruction.execute(&mut self.state);

        if self.state.awaiting_vblank {
            ExecutionSignal::AwaitingVblank
        } else {
            ExecutionSignal::Continue
        }
    }

    /// The frame boundary: releases a pending `VBLNK` and latches controller input
    pub fn vsync(&mut self) {
        self.state.awaiting_vblank = false;
        self.state.latch_input();
    }

    /// Sets a controller's buttons; programs see them from the next vsync
    pub fn set_input(&mut self, controller: Controller, mask: u16) {
        self.state.input.set(controller, mask);
    }

    pub fn video_snapshot(&self) -> VideoSnapshot {
        self.state.video.snapshot()
    }

    /// Every audio event queued since the last drain, oldest first
    pub fn drain_audio(&mut self) -> Vec<AudioEvent> {
        self.state.audio.drain()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn registers(&self) -> &[u16; 16] {
        &self.state.r
    }

    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    pub fn sp(&self) -> u16 {
        self.state.sp
    }

    pub fn flags(&self) -> Flags {
        self.state.flags
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    fn fresh_state(&self) -> State {
        State {
            rng: Random::new(self.seed),
            ..State::new()
        }
    }

    fn install(&mut self, rom: Rom) {
        let mut state = self.fresh_state();
        state.memory.load(ROM_ORIGIN, &rom.body);
        state.pc = rom.start;
        self.state = state;
        self.rom = Some(rom);
        self.halted = false;
    }

    /// Gets the four instruction bytes pointed at by the pc, wrapping at the end of memory
    fn get_op(&self) -> [u8; 4] {
        let pc = self.state.pc;
        let memory = &self.state.memory;
        [
            memory.read8(pc),
            memory.read8(pc.wrapping_add(1)),
            memory.read8(pc.wrapping_add(2)),
            memory.read8(pc.wrapping_add(3)),
        ]
    }
}

impl Default for Chip16 {
    fn default() -> Self {
        Self::new()
    }
}
