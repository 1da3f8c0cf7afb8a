use std::collections::VecDeque;

use log::warn;

use crate::constants::AUDIO_QUEUE_CAPACITY;

/// Attack times in milliseconds, indexed by the `A` nibble of `SNG`
const ATTACK_MS: [u16; 16] = [
    2, 8, 16, 24, 38, 56, 68, 80, 100, 250, 500, 800, 1000, 3000, 5000, 8000,
];

/// Decay and release times in milliseconds, indexed by the `D`/`R` nibbles of `SNG`
const DECAY_RELEASE_MS: [u16; 16] = [
    6, 24, 48, 72, 114, 168, 204, 240, 300, 750, 1500, 2400, 3000, 9000, 15000, 24000,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Triangle,
    Sawtooth,
    Pulse,
    Noise,
}

impl Waveform {
    /// The `T` nibble of `SNG`; unknown types play as a triangle
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble {
            1 => Waveform::Sawtooth,
            2 => Waveform::Pulse,
            3 => Waveform::Noise,
            _ => Waveform::Triangle,
        }
    }
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Triangle
    }
}

/// # Envelope
/// The settings of the last `SNG`, applied to every following `SNP`.
/// Every field is a raw 4-bit value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Envelope {
    pub attack: u8,
    pub decay: u8,
    pub sustain: u8,
    pub release: u8,
    pub volume: u8,
    pub waveform: Waveform,
}

impl Envelope {
    pub fn attack_ms(&self) -> u16 {
        ATTACK_MS[usize::from(self.attack & 0xF)]
    }

    pub fn decay_ms(&self) -> u16 {
        DECAY_RELEASE_MS[usize::from(self.decay & 0xF)]
    }

    pub fn release_ms(&self) -> u16 {
        DECAY_RELEASE_MS[usize::from(self.release & 0xF)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub waveform: Waveform,
    pub frequency: u16,
    pub duration_ms: u16,
    /// `None` for the fixed tones of `SND1`..`SND3`
    pub envelope: Option<Envelope>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Tone(Tone),
    Stop,
}

/// # Audio
/// Events queued by the CPU until the driver drains them once per frame.
///
/// The queue holds at most `AUDIO_QUEUE_CAPACITY` events; when full the oldest
/// event is dropped to make room for the newest.
#[derive(Debug, Clone)]
pub struct Audio {
    pub envelope: Envelope,
    queue: VecDeque<AudioEvent>,
    capacity: usize,
}

impl Audio {
    pub fn new() -> Self {
        Self::with_capacity(AUDIO_QUEUE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Audio {
            envelope: Envelope::default(),
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queues `event`, returning the event dropped to make room for it
    pub fn enqueue(&mut self, event: AudioEvent) -> Option<AudioEvent> {
        if self.capacity == 0 {
            warn!("audio queue has no capacity, dropping {:?}", event);
            return Some(event);
        }
        let dropped = if self.queue.len() == self.capacity {
            self.queue.pop_front()
        } else {
            None
        };
        if let Some(old) = dropped {
            warn!("audio queue full, dropping {:?}", old);
        }
        self.queue.push_back(event);
        dropped
    }

    /// Takes every pending event, oldest first
    pub fn drain(&mut self) -> Vec<AudioEvent> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}
