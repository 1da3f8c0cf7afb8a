use crate::constants::{DEFAULT_PALETTE, DISPLAY_HEIGHT, DISPLAY_WIDTH, PALETTE_BYTES};
use crate::memory::Memory;

/// A palette entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_u32(rgb: u32) -> Self {
        Rgb {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        }
    }
}

pub type Palette = [Rgb; 16];

pub fn default_palette() -> Palette {
    let mut palette = [Rgb::default(); 16];
    for (entry, &rgb) in palette.iter_mut().zip(DEFAULT_PALETTE.iter()) {
        *entry = Rgb::from_u32(rgb);
    }
    palette
}

/// Dimensions set by `SPR`, flips set by `FLIP`; both persist until changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sprite {
    /// in bytes; each byte packs two pixels, high nibble first
    pub width: u8,
    /// in rows
    pub height: u8,
    pub hflip: bool,
    pub vflip: bool,
}

impl Sprite {
    pub fn pixel_width(&self) -> usize {
        usize::from(self.width) * 2
    }
}

/// What happened while blitting a sprite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlitOutcome {
    /// an opaque source pixel landed on a non-zero framebuffer pixel
    pub collided: bool,
    /// at least one source pixel fell outside the framebuffer
    pub clipped: bool,
}

/// # Video
/// A 320x240 layer of palette indices drawn over a single background colour.
///
/// Index 0 in the layer is transparent: the background colour shows through.
/// Clearing the layer therefore leaves the screen filled with the background.
#[derive(Clone)]
pub struct Video {
    pub palette: Palette,
    pub background: u8,
    pub sprite: Sprite,
    frame_buffer: Box<[u8]>,
}

impl Video {
    pub fn new() -> Self {
        Video {
            palette: default_palette(),
            background: 0,
            sprite: Sprite::default(),
            frame_buffer: vec![0; DISPLAY_WIDTH * DISPLAY_HEIGHT].into_boxed_slice(),
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer.iter_mut().for_each(|px| *px = 0);
    }

    pub fn set_background(&mut self, index: u8) {
        self.background = index & 0xF;
    }

    pub fn set_palette(&mut self, index: u8, rgb: Rgb) {
        self.palette[usize::from(index & 0xF)] = rgb;
    }

    /// Replaces all 16 entries with the R, G, B triples stored at `addr`
    pub fn load_palette(&mut self, memory: &Memory, addr: u16) {
        let block = memory.read_block(addr, PALETTE_BYTES);
        for (index, rgb) in block.chunks(3).enumerate() {
            self.set_palette(
                index as u8,
                Rgb {
                    r: rgb[0],
                    g: rgb[1],
                    b: rgb[2],
                },
            );
        }
    }

    /// Layer index at (x, y); 0 when transparent
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame_buffer[y * DISPLAY_WIDTH + x]
    }

    /// Blits a `sprite` sized block of packed pixels from `addr` with its top left at (x, y).
    ///
    /// Pixels landing outside the framebuffer are skipped, never wrapped.
    /// With `transparency` on, source pixels of index 0 leave the destination untouched.
    pub fn blit_sprite(
        &mut self,
        memory: &Memory,
        addr: u16,
        x: i16,
        y: i16,
        sprite: Sprite,
        transparency: bool,
    ) -> BlitOutcome {
        let mut outcome = BlitOutcome::default();
        let width = sprite.pixel_width();
        let height = usize::from(sprite.height);

        for row in 0..height {
            let src_row = if sprite.vflip { height - 1 - row } else { row };
            let dst_y = i32::from(y) + row as i32;

            for col in 0..width {
                let dst_x = i32::from(x) + col as i32;
                if dst_x < 0
                    || dst_y < 0
                    || dst_x >= DISPLAY_WIDTH as i32
                    || dst_y >= DISPLAY_HEIGHT as i32
                {
                    outcome.clipped = true;
                    continue;
                }

                let src_col = if sprite.hflip { width - 1 - col } else { col };
                let offset = src_row * usize::from(sprite.width) + src_col / 2;
                let byte = memory.read8(addr.wrapping_add(offset as u16));
                let pixel = if src_col % 2 == 0 { byte >> 4 } else { byte & 0xF };
                if pixel == 0 && transparency {
                    continue;
                }

                let dst = dst_y as usize * DISPLAY_WIDTH + dst_x as usize;
                if pixel != 0 && self.frame_buffer[dst] != 0 {
                    outcome.collided = true;
                }
                self.frame_buffer[dst] = pixel;
            }
        }
        outcome
    }

    /// A frozen copy for a renderer; later drawing does not affect it
    pub fn snapshot(&self) -> VideoSnapshot {
        VideoSnapshot {
            palette: self.palette,
            background: self.background,
            frame_buffer: self.frame_buffer.clone(),
        }
    }
}

impl Default for Video {
    fn default() -> Self {
        Self::new()
    }
}

/// # Video snapshot
/// The palette, background and layer as they stood at a frame boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSnapshot {
    pub palette: Palette,
    pub background: u8,
    frame_buffer: Box<[u8]>,
}

impl VideoSnapshot {
    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }

    /// The raw layer, row major, 0 meaning transparent
    pub fn layer(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// The palette index visible at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        match self.frame_buffer[y * DISPLAY_WIDTH + x] {
            0 => self.background,
            index => index,
        }
    }

    /// Visible palette indices, row major
    pub fn indices(&self) -> Vec<u8> {
        self.frame_buffer
            .iter()
            .map(|&index| if index == 0 { self.background } else { index })
            .collect()
    }

    /// Formats the frame as concatenated rows of RGB24 pixels,
    /// the layout expected by most streaming textures.
    pub fn to_rgb24(&self) -> Vec<u8> {
        self.indices()
            .into_iter()
            .flat_map(|index| {
                let rgb = self.palette[usize::from(index)];
                [rgb.r, rgb.g, rgb.b]
            })
            .collect()
    }
}
