use log::{debug, info};

use chip16_core::rom::crc32;
use chip16_core::{AudioEvent, Controller, Display, Input, Sound, VideoSnapshot};

/// How often the screen reports what it is showing
const REPORT_EVERY: u64 = 60;

/// # Screen
/// A display with no window.
///
/// Formats each frame as RGB24, the layout a real texture would take, and keeps
/// a checksum of it so that runs can be compared.
#[derive(Default)]
pub struct Screen {
    frames: u64,
    checksum: u32,
}

impl Screen {
    pub fn checksum(&self) -> u32 {
        self.checksum
    }
}

impl Display for Screen {
    fn render(&mut self, frame: &VideoSnapshot) {
        let pixels = frame.to_rgb24();
        self.checksum = crc32(&pixels);
        self.frames += 1;
        if self.frames % REPORT_EVERY == 0 {
            let drawn = frame.layer().iter().filter(|&&index| index != 0).count();
            info!(
                "frame {}: {} drawn pixels, background {:X}, checksum {:08X}",
                self.frames, drawn, frame.background, self.checksum
            );
        }
    }
}

/// Logs audio events in place of playing them
pub struct LogSpeaker;

impl Sound for LogSpeaker {
    fn play(&mut self, events: &[AudioEvent]) {
        for event in events {
            match event {
                AudioEvent::Tone(tone) => debug!(
                    "tone {:?} {}Hz for {}ms",
                    tone.waveform, tone.frequency, tone.duration_ms
                ),
                AudioEvent::Stop => debug!("sound off"),
            }
        }
    }
}

/// Controllers with nothing pressed
pub struct Idle;

impl Input for Idle {
    fn poll(&mut self, _controller: Controller) -> u16 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip16_core::Chip16;

    #[test]
    fn test_screen_checksums_each_frame() {
        let mut screen = Screen::default();
        let chip16 = Chip16::new();
        screen.render(&chip16.video_snapshot());
        let blank = screen.checksum();
        assert_eq!(blank, crc32(&vec![0; 320 * 240 * 3]));
        assert_eq!(screen.frames, 1);
    }
}
