/// Size of the flat address space in bytes
pub const MEMORY_SIZE: usize = 0x1_0000;

/// ROM bodies are copied here on load
pub const ROM_ORIGIN: u16 = 0x0000;

/// Lowest address of the nominal stack region
pub const STACK_BASE: u16 = 0xFDF0;

/// SP on reset; the stack grows down from here towards `STACK_BASE`
pub const STACK_TOP: u16 = 0xFFF0;

/// Memory mapped controller ports, one 16-bit word per pad
pub const CONTROLLER_PORTS: [u16; 2] = [0xFFF0, 0xFFF2];

/// Every instruction is exactly four bytes wide
pub const INSTRUCTION_SIZE: u16 = 4;

/// The CPU executes one instruction per cycle at 1MHz
pub const CLOCK_HZ: u32 = 1_000_000;

/// Video refresh (and vsync interrupt) rate
pub const FRAME_HZ: u32 = 60;

pub const DISPLAY_WIDTH: usize = 320;
pub const DISPLAY_HEIGHT: usize = 240;

/// Maximum number of tone events held between two drains
pub const AUDIO_QUEUE_CAPACITY: usize = 64;

/// Seed used by a freshly constructed machine
pub const DEFAULT_RNG_SEED: u64 = 0xC16;

/// Size of a `PAL` block: 16 entries of R, G, B
pub const PALETTE_BYTES: usize = 16 * 3;

/// # Default palette
/// Entry 0 is transparent when drawing sprites; it is black when displayed.
pub const DEFAULT_PALETTE: [u32; 16] = [
    0x000000, // transparent
    0x000000, // black
    0x888888, // gray
    0xBF3932, // red
    0xDE7AAE, // pink
    0x4C3D21, // dark brown
    0x905F25, // brown
    0xE49452, // orange
    0xEAD979, // yellow
    0x537A3B, // green
    0xABD54A, // light green
    0x252E38, // dark blue
    0x00467F, // blue
    0x68ABCC, // light blue
    0xBCDEE4, // sky blue
    0xFFFFFF, // white
];

pub const ROM_MAGIC: [u8; 4] = *b"CH16";
pub const ROM_HEADER_SIZE: usize = 16;
