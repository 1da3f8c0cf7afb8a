//! The frame loop that sits between a `Chip16` and its backends.
//!
//! Backends are traits so the core never depends on a windowing, audio or
//! input library.

use log::trace;

use crate::audio::AudioEvent;
use crate::chip16::{Chip16, ExecutionSignal};
use crate::constants::{CLOCK_HZ, FRAME_HZ};
use crate::input::Controller;
use crate::video::VideoSnapshot;

/// Receives one snapshot per frame
pub trait Display {
    fn render(&mut self, frame: &VideoSnapshot);
}

/// Receives the audio events produced during a frame
pub trait Sound {
    fn play(&mut self, events: &[AudioEvent]);
}

/// Polled once per frame for each controller's button mask
pub trait Input {
    fn poll(&mut self, controller: Controller) -> u16;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub clock_hz: u32,
    pub frame_hz: u32,
}

impl Timing {
    /// Instructions the CPU may run between two vsyncs
    pub fn instructions_per_frame(&self) -> u32 {
        if self.frame_hz == 0 {
            return self.clock_hz;
        }
        self.clock_hz / self.frame_hz
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            clock_hz: CLOCK_HZ,
            frame_hz: FRAME_HZ,
        }
    }
}

/// How a frame's instruction budget was spent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub executed: u32,
    /// the signal that ended the frame, `Continue` if the budget ran out
    pub signal: ExecutionSignal,
}

/// # Driver
/// Runs a `Chip16` one frame at a time:
/// - steps the CPU until the budget runs out, it waits for vsync or halts
/// - hands a video snapshot to the display and the drained audio to the sound sink
/// - polls both controllers and signals vsync
pub struct Driver<D, S, I> {
    pub chip16: Chip16,
    pub timing: Timing,
    display: D,
    sound: S,
    input: I,
    frames: u64,
}

impl<D: Display, S: Sound, I: Input> Driver<D, S, I> {
    pub fn new(chip16: Chip16, display: D, sound: S, input: I) -> Self {
        Driver {
            chip16,
            timing: Timing::default(),
            display,
            sound,
            input,
            frames: 0,
        }
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn run_frame(&mut self) -> FrameReport {
        let budget = self.timing.instructions_per_frame();
        let mut executed = 0;
        let mut signal = ExecutionSignal::Continue;
        while executed < budget {
            let pc = self.chip16.pc();
            signal = self.chip16.step();
            match signal {
                ExecutionSignal::Continue => executed += 1,
                ExecutionSignal::AwaitingVblank => {
                    // a VBLNK that just ran moved PC; one left over from before did not
                    if self.chip16.pc() != pc {
                        executed += 1;
                    }
                    break;
                }
                ExecutionSignal::Halted => break,
            }
        }

        self.display.render(&self.chip16.video_snapshot());
        let events = self.chip16.drain_audio();
        if !events.is_empty() {
            self.sound.play(&events);
        }
        for &controller in [Controller::One, Controller::Two].iter() {
            let mask = self.input.poll(controller);
            self.chip16.set_input(controller, mask);
        }
        self.chip16.vsync();
        self.frames += 1;

        trace!(
            "frame {} ran {} instructions, ended with {:?}",
            self.frames,
            executed,
            signal
        );
        FrameReport { executed, signal }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }
}
