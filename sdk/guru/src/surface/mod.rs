//! # Register Surface
//!
//! Everything the compositor writes goes through [`RegisterSurface`]. The
//! hardware exposes four regions, all write-only as far as this crate is
//! concerned:
//!
//! | Region           | Address   | Size                            |
//! |------------------|-----------|---------------------------------|
//! | Sprite scroll    | `$EB0000` | 128 slots × 4 words             |
//! | BG0 scroll X     | `$EB0800` | 1 word                          |
//! | BG control       | `$EB0808` | 1 word                          |
//! | BG text area 1   | `$EBE000` | 64 rows × 64 words              |
//!
//! Two backends implement it:
//!
//! - [`MmioRegisters`]: volatile stores to the addresses above.
//! - [`VirtualRegisters`]: an in-memory image, for the host runner and tests.

pub mod mmio;
pub mod virtual_regs;

pub use mmio::MmioRegisters;
pub use virtual_regs::{VirtualRegisters, WriteCounts};

use crate::{MAX_SPRITES, scr::BgControl, sprites::SpriteRecord};

pub const SPRITE_BLOCK_WORDS: usize = MAX_SPRITES * SpriteRecord::WORDS;

/// Words between vertically adjacent cells of the text area.
pub const TILE_WINDOW_STRIDE: usize = 64;
pub const TILE_WINDOW_ROWS: usize = 64;
pub const TILE_WINDOW_WORDS: usize = TILE_WINDOW_ROWS * TILE_WINDOW_STRIDE;

/// Named writes into the display hardware.
///
/// The block methods have record-at-a-time defaults; backends override them
/// when they can move a block faster.
pub trait RegisterSurface {
    fn write_control(&mut self, control: BgControl);

    fn write_sprite(&mut self, slot: usize, record: &SpriteRecord);

    fn write_scroll_x(&mut self, x: u16);

    /// Write one text area word at `offset` (`row * 64 + column`).
    fn write_tile(&mut self, offset: usize, cell: u16);

    /// Write consecutive sprite slots from slot 0, four words per slot.
    fn write_sprite_block(&mut self, words: &[u16]) {
        for (slot, record) in words.chunks_exact(SpriteRecord::WORDS).enumerate() {
            self.write_sprite(slot, &SpriteRecord::from_words(record));
        }
    }

    /// Write `cells` down text area column `column`, one row apart.
    fn write_tile_strip(&mut self, column: usize, cells: &[u16]) {
        for (row, &cell) in cells.iter().enumerate() {
            self.write_tile(column + row * TILE_WINDOW_STRIDE, cell);
        }
    }
}

impl<S: RegisterSurface + ?Sized> RegisterSurface for &mut S {
    #[inline(always)]
    fn write_control(&mut self, control: BgControl) {
        (**self).write_control(control)
    }

    #[inline(always)]
    fn write_sprite(&mut self, slot: usize, record: &SpriteRecord) {
        (**self).write_sprite(slot, record)
    }

    #[inline(always)]
    fn write_scroll_x(&mut self, x: u16) {
        (**self).write_scroll_x(x)
    }

    #[inline(always)]
    fn write_tile(&mut self, offset: usize, cell: u16) {
        (**self).write_tile(offset, cell)
    }

    #[inline(always)]
    fn write_sprite_block(&mut self, words: &[u16]) {
        (**self).write_sprite_block(words)
    }

    #[inline(always)]
    fn write_tile_strip(&mut self, column: usize, cells: &[u16]) {
        (**self).write_tile_strip(column, cells)
    }
}
