use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{info, warn};

use chip16_core::{Chip16, Driver, ExecutionSignal, LoadError, Timing};

use crate::headless::{Idle, LogSpeaker, Screen};

/// Headered `.c16` images are preferred; anything without the magic runs as a raw image
fn load(chip16: &mut Chip16, bytes: &[u8]) -> Result<(), LoadError> {
    match chip16.load(bytes) {
        Err(LoadError::BadMagic(_)) | Err(LoadError::HeaderTooShort(_)) => {
            warn!("no Chip16 header, loading as a raw image");
            chip16.load_raw(bytes)
        }
        result => result,
    }
}

/// Runs `rom` for `frames` frames, or until it halts when no count is given
pub fn run(rom: PathBuf, frames: Option<u64>) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(&rom)?;
    let mut chip16 = Chip16::new();
    load(&mut chip16, &bytes)?;
    info!("running {}", rom.display());

    let timing = Timing::default();
    let mut driver =
        Driver::new(chip16, Screen::default(), LogSpeaker, Idle).with_timing(timing);

    // Set frame timing
    let frame_time = Duration::from_secs(1) / timing.frame_hz.max(1);
    let mut last_frame = Instant::now();

    loop {
        if let Some(limit) = frames {
            if driver.frames() >= limit {
                break;
            }
        }

        let report = driver.run_frame();
        if report.signal == ExecutionSignal::Halted {
            info!("halted after {} frames", driver.frames());
            break;
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_frame_time = current_time - last_frame;
        if frame_time > elapsed_frame_time {
            std::thread::sleep(frame_time - elapsed_frame_time);
        }
        last_frame = Instant::now();
    }

    info!(
        "ran {} frames, last frame checksum {:08X}",
        driver.frames(),
        driver.display().checksum()
    );
    Ok(())
}
