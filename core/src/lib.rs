pub use audio::{AudioEvent, Envelope, Tone, Waveform};
pub use chip16::{Chip16, ExecutionSignal};
pub use driver::{Display, Driver, FrameReport, Input, Sound, Timing};
pub use input::{buttons, Controller};
pub use rom::{LoadError, Rom};
pub use video::{Rgb, VideoSnapshot};

pub mod alu;
pub mod audio;
mod chip16;
pub mod constants;
pub mod driver;
pub mod flags;
pub mod input;
pub mod instruction;
pub mod memory;
mod opcode;
pub mod operations;
pub mod rng;
pub mod rom;
pub mod state;
pub mod video;
