use alloc::{vec, vec::Vec};

use bit_field::BitField;
use log::warn;

use super::{RegisterSurface, SPRITE_BLOCK_WORDS, TILE_WINDOW_STRIDE, TILE_WINDOW_WORDS};
use crate::{MAX_SPRITES, scr::BgControl, sprites::SpriteRecord};

/// Bits of the BG scroll register the video controller decodes.
pub const SCROLL_X_BITS: usize = 10;

/// Writes seen per region, in words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteCounts {
    pub control: usize,
    pub sprite_words: usize,
    pub scroll_x: usize,
    pub tile_words: usize,
    /// Sprite/scroll/tile words written while the display was enabled.
    pub while_enabled: usize,
}

/// In-memory image of the display registers.
///
/// Holds what the hardware would hold after the same writes, and counts
/// them. Writes landing outside a region are dropped with a warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VirtualRegisters {
    sprites: Vec<u16>,
    scroll_x: u16,
    control: BgControl,
    tiles: Vec<u16>,
    writes: WriteCounts,
}

impl Default for VirtualRegisters {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualRegisters {
    pub fn new() -> Self {
        Self {
            sprites: vec![0; SPRITE_BLOCK_WORDS],
            scroll_x: 0,
            control: BgControl::DISABLED,
            tiles: vec![0; TILE_WINDOW_WORDS],
            writes: WriteCounts::default(),
        }
    }

    #[inline(always)]
    pub fn sprites(&self) -> &[u16] {
        &self.sprites
    }

    pub fn sprite(&self, slot: usize) -> SpriteRecord {
        let base = slot * SpriteRecord::WORDS;
        SpriteRecord::from_words(&self.sprites[base..base + SpriteRecord::WORDS])
    }

    #[inline(always)]
    pub fn scroll_x(&self) -> u16 {
        self.scroll_x
    }

    #[inline(always)]
    pub fn control(&self) -> BgControl {
        self.control
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Text area word at `(row, column)`.
    #[inline]
    pub fn tile(&self, row: usize, column: usize) -> u16 {
        self.tiles[row * TILE_WINDOW_STRIDE + column]
    }

    #[inline(always)]
    pub fn writes(&self) -> WriteCounts {
        self.writes
    }

    /// The whole surface as one run of words: sprite block, scroll X,
    /// control, text area.
    pub fn image(&self) -> Vec<u16> {
        let mut image = Vec::with_capacity(SPRITE_BLOCK_WORDS + 2 + TILE_WINDOW_WORDS);
        image.extend_from_slice(&self.sprites);
        image.push(self.scroll_x);
        image.push(self.control.bits());
        image.extend_from_slice(&self.tiles);
        image
    }

    #[inline(always)]
    fn note_data_write(&mut self, words: usize) {
        if self.control != BgControl::DISABLED {
            self.writes.while_enabled += words;
        }
    }
}

impl RegisterSurface for VirtualRegisters {
    fn write_control(&mut self, control: BgControl) {
        self.control = control;
        self.writes.control += 1;
    }

    fn write_sprite(&mut self, slot: usize, record: &SpriteRecord) {
        if slot >= MAX_SPRITES {
            warn!("sprite write to slot {} dropped", slot);
            return;
        }
        let base = slot * SpriteRecord::WORDS;
        self.sprites[base..base + SpriteRecord::WORDS]
            .copy_from_slice(bytemuck::cast_slice(core::slice::from_ref(record)));
        self.writes.sprite_words += SpriteRecord::WORDS;
        self.note_data_write(SpriteRecord::WORDS);
    }

    fn write_scroll_x(&mut self, x: u16) {
        self.scroll_x = x.get_bits(0..SCROLL_X_BITS);
        self.writes.scroll_x += 1;
        self.note_data_write(1);
    }

    fn write_tile(&mut self, offset: usize, cell: u16) {
        let Some(word) = self.tiles.get_mut(offset) else {
            warn!("text area write at ${:04X} dropped", offset);
            return;
        };
        *word = cell;
        self.writes.tile_words += 1;
        self.note_data_write(1);
    }

    fn write_sprite_block(&mut self, words: &[u16]) {
        let len = words.len().min(SPRITE_BLOCK_WORDS);
        if len < words.len() {
            warn!("sprite block of {} words truncated to {}", words.len(), len);
        }
        self.sprites[..len].copy_from_slice(&words[..len]);
        self.writes.sprite_words += len;
        self.note_data_write(len);
    }

    fn write_tile_strip(&mut self, column: usize, cells: &[u16]) {
        let rows = self.tiles.get_mut(column..).unwrap_or(&mut []).iter_mut().step_by(TILE_WINDOW_STRIDE);

        let mut written = 0;
        for (word, &cell) in rows.zip(cells) {
            *word = cell;
            written += 1;
        }
        if written < cells.len() {
            warn!("{} of {} strip cells at column {} dropped", cells.len() - written, cells.len(), column);
        }

        self.writes.tile_words += written;
        self.note_data_write(written);
    }
}
