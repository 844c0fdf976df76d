// PPU scanline rendering - background tiles, sprites, and sprite-zero hit

use super::constants::*;
use super::Ppu;
use crate::display::{palette_rgb, FrameSink};

impl Ppu {
    /// Render one scanline of background tiles
    ///
    /// Walks the 32 tile columns of the selected nametable row: nametable
    /// byte, the two pattern bit-planes for this row of the tile, and the
    /// attribute quadrant that picks the palette. Opaque pixels are recorded
    /// in the opacity grid used later for sprite-zero evaluation, then pushed
    /// to the sink shifted left by the X scroll.
    pub(super) fn render_background(&mut self, sink: &mut dyn FrameSink) {
        let sl = self.scanline as usize;
        let y = sl + 1;
        let tile_row = sl / 8;
        let fine_y = (sl % 8) as u16;

        let nametable_base =
            NAMETABLE_BASE_ADDR + (self.ppuctrl & CTRL_NAMETABLE_MASK) as u16 * 0x400;
        let pattern_base: u16 = if self.ppuctrl & CTRL_BG_PATTERN_TABLE != 0 {
            0x1000
        } else {
            0x0000
        };

        for tile_x in 0..TILES_PER_ROW {
            let nt_addr = nametable_base + (tile_row * 32 + tile_x) as u16;
            let tile = self.bus.read(nt_addr) as u16;

            let pattern_addr = pattern_base + tile * 16 + fine_y;
            let low = self.bus.read(pattern_addr);
            let high = self.bus.read(pattern_addr + 8);

            // One attribute byte covers a 4x4 tile area; two bits per 2x2
            // tile quadrant
            let attr_addr = nametable_base
                + ATTRIBUTE_TABLE_OFFSET
                + (tile_row / 4 * 8 + tile_x / 4) as u16;
            let attr = self.bus.read(attr_addr);
            let shift = ((tile_row % 4) / 2) * 4 + ((tile_x % 4) / 2) * 2;
            let palette = (attr >> shift) & 0x03;

            for px in 0..8usize {
                let bit = 7 - px;
                let color = (((high >> bit) & 1) << 1) | ((low >> bit) & 1);
                if color == 0 {
                    // Transparent: backdrop shows through
                    continue;
                }

                let entry = self
                    .bus
                    .read(PALETTE_BASE_ADDR + palette as u16 * 4 + color as u16);
                let (r, g, b) = palette_rgb(entry);

                let x = (tile_x * 8 + px) as i32 - self.scroll_x as i32;
                if (0..SCREEN_WIDTH as i32).contains(&x) && y < SCREEN_HEIGHT {
                    self.bg_opacity[y][x as usize] = color;
                }
                sink.set_pixel(x, y as i32, r, g, b);
            }
        }
    }

    /// Render the sprites overlapping this scanline
    ///
    /// Walks OAM in 4-byte strides (Y, tile, attributes, X). More than eight
    /// sprites on the line sets the overflow flag. Sprite zero additionally
    /// checks its opaque pixels against the background opacity grid to set
    /// the sprite-zero hit flag.
    pub(super) fn render_sprites(&mut self, sink: &mut dyn FrameSink) {
        let sl = self.scanline;
        let height: i16 = if self.ppuctrl & CTRL_SPRITE_SIZE != 0 {
            16
        } else {
            8
        };

        let mut count = 0;

        for index in 0..SPRITE_COUNT {
            let base = index * 4;
            let sprite_y = self.oam[base] as i16;
            let tile = self.oam[base + 1];
            let attr = self.oam[base + 2];
            let sprite_x = self.oam[base + 3] as i16;

            if sl < sprite_y || sl >= sprite_y + height {
                continue;
            }

            count += 1;
            if count > SPRITES_PER_SCANLINE {
                self.ppustatus |= STATUS_SPRITE_OVERFLOW;
            }

            let mut row = (sl - sprite_y) as u16;
            if attr & OAM_ATTR_FLIP_V != 0 {
                row = (height as u16 - 1) - row;
            }

            let pattern_addr = if height == 16 {
                // 8x16 sprites select their pattern table from tile bit 0
                let table = (tile as u16 & 1) * 0x1000;
                let tile_index = (tile & 0xFE) as u16 + (row >= 8) as u16;
                table + tile_index * 16 + (row & 7)
            } else {
                let table: u16 = if self.ppuctrl & CTRL_SPRITE_PATTERN_TABLE != 0 {
                    0x1000
                } else {
                    0x0000
                };
                table + tile as u16 * 16 + row
            };

            let low = self.bus.read(pattern_addr);
            let high = self.bus.read(pattern_addr + 8);
            let palette = attr & OAM_ATTR_PALETTE;

            for px in 0..8usize {
                let bit = if attr & OAM_ATTR_FLIP_H != 0 { px } else { 7 - px };
                let color = (((high >> bit) & 1) << 1) | ((low >> bit) & 1);
                if color == 0 {
                    continue;
                }

                let x = sprite_x + px as i16;
                let y = sl + 1;

                if index == 0
                    && self.ppumask & MASK_SHOW_BG != 0
                    && self.ppustatus & STATUS_SPRITE0_HIT == 0
                    && (0..SCREEN_WIDTH as i16).contains(&x)
                    && (0..SCREEN_HEIGHT as i16).contains(&y)
                    && self.bg_opacity[y as usize][x as usize] == color
                {
                    self.ppustatus |= STATUS_SPRITE0_HIT;
                }

                let entry = self
                    .bus
                    .read(SPRITE_PALETTE_BASE_ADDR + palette as u16 * 4 + color as u16);
                let (r, g, b) = palette_rgb(entry);
                sink.set_pixel(x as i32, y as i32, r, g, b);
            }
        }
    }
}
