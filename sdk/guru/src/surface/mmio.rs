//! # Memory-Mapped Registers
//!
//! Volatile stores into the X68000 video controller. Requires supervisor
//! mode; the caller is responsible for entering it before building
//! [`MmioRegisters`] and for keeping it until the value is dropped.

use volatile_register::WO;

use super::{RegisterSurface, SPRITE_BLOCK_WORDS, TILE_WINDOW_STRIDE, TILE_WINDOW_WORDS};
use crate::{MAX_SPRITES, scr::BgControl, sprites::SpriteRecord};

/// Sprite scroll registers.
pub const SPRITE_SCROLL: usize = 0xEB0000;
/// BG0 scroll X.
pub const BG_SCROLL_X0: usize = 0xEB0800;
/// BG control.
pub const BG_CONTROL: usize = 0xEB0808;
/// BG text area 1.
pub const BG_DATA_AREA_1: usize = 0xEBE000;

pub struct MmioRegisters {
    sprites: &'static [WO<u16>; SPRITE_BLOCK_WORDS],
    scroll_x: &'static WO<u16>,
    control: &'static WO<u16>,
    tiles: &'static [WO<u16>; TILE_WINDOW_WORDS],
}

impl MmioRegisters {
    /// The real register map.
    ///
    /// # Safety
    ///
    /// The video controller must be mapped at its fixed addresses and the
    /// CPU must be in supervisor mode for as long as the value lives. Only
    /// one `MmioRegisters` may exist at a time.
    pub unsafe fn new() -> Self {
        unsafe { Self::from_addresses(SPRITE_SCROLL, BG_SCROLL_X0, BG_CONTROL, BG_DATA_AREA_1) }
    }

    /// Registers at arbitrary addresses.
    ///
    /// # Safety
    ///
    /// Each address must be valid, 2-byte aligned and writable for the size
    /// of its region for `'static`, and not otherwise referenced.
    pub unsafe fn from_addresses(sprites: usize, scroll_x: usize, control: usize, tiles: usize) -> Self {
        unsafe {
            Self {
                sprites: &*(sprites as *const [WO<u16>; SPRITE_BLOCK_WORDS]),
                scroll_x: &*(scroll_x as *const WO<u16>),
                control: &*(control as *const WO<u16>),
                tiles: &*(tiles as *const [WO<u16>; TILE_WINDOW_WORDS]),
            }
        }
    }
}

impl RegisterSurface for MmioRegisters {
    #[inline(always)]
    fn write_control(&mut self, control: BgControl) {
        unsafe { self.control.write(control.bits()) }
    }

    #[inline(always)]
    fn write_sprite(&mut self, slot: usize, record: &SpriteRecord) {
        if slot >= MAX_SPRITES {
            return;
        }
        let regs = &self.sprites[slot * SpriteRecord::WORDS..][..SpriteRecord::WORDS];
        unsafe {
            regs[0].write(record.x);
            regs[1].write(record.y);
            regs[2].write(record.attr1);
            regs[3].write(record.attr2);
        }
    }

    #[inline(always)]
    fn write_scroll_x(&mut self, x: u16) {
        unsafe { self.scroll_x.write(x) }
    }

    #[inline(always)]
    fn write_tile(&mut self, offset: usize, cell: u16) {
        if let Some(reg) = self.tiles.get(offset) {
            unsafe { reg.write(cell) }
        }
    }

    #[inline]
    fn write_sprite_block(&mut self, words: &[u16]) {
        for (reg, &word) in self.sprites.iter().zip(words) {
            unsafe { reg.write(word) }
        }
    }

    #[inline]
    fn write_tile_strip(&mut self, column: usize, cells: &[u16]) {
        let rows = self.tiles.get(column..).unwrap_or(&[]).iter().step_by(TILE_WINDOW_STRIDE);
        for (reg, &cell) in rows.zip(cells) {
            unsafe { reg.write(cell) }
        }
    }
}
