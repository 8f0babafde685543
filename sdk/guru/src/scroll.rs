//! # BG Scroll State
//!
//! The BG scrolls one pixel per frame. Every 16 pixels a fresh 32-cell
//! strip of tile data has to appear at the leading edge, so the state
//! tracks three things besides the scroll position itself:
//!
//! - `scroll_counter`: frames since the last strip copy (`0..16`); a strip
//!   is copied on the frame it reads 0.
//! - `source_index`: word offset of the next strip in the tile table.
//! - `dest_ring_index`: BG text area column the next strip lands in
//!   (`0..64`, wrapping).
//!
//! `wrap_index` rides along for the sprites: the motion table offset the
//! shadow table was last built from.

/// Frames between strip copies.
pub const SCROLL_PERIOD: u8 = 16;

/// Columns in the BG text area ring.
pub const RING_COLUMNS: usize = 64;

/// Ring column the first strip lands in.
pub const FIRST_RING_COLUMN: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScrollState {
    pub wrap_index: usize,
    pub scroll_counter: u8,
    /// Written verbatim to the 16-bit BG scroll register, which only
    /// decodes its low bits.
    pub scroll_x: u16,
    pub source_index: usize,
    pub dest_ring_index: usize,
}

impl ScrollState {
    pub const fn new(initial_wrap: usize) -> Self {
        Self {
            wrap_index: initial_wrap,
            scroll_counter: 0,
            scroll_x: 0,
            source_index: 0,
            dest_ring_index: FIRST_RING_COLUMN,
        }
    }

    /// A strip copy belongs to this frame.
    #[inline(always)]
    pub const fn strip_due(&self) -> bool {
        self.scroll_counter == 0
    }
}
