use log::trace;

use crate::{
    assets::{AssetStore, MotionPoint, STRIP_WORDS},
    console::Frame,
    scroll::{RING_COLUMNS, SCROLL_PERIOD, ScrollState},
    sprites::ShadowSprites,
    transfer::Transfer,
};

/// Produces the next frame: steps [`ScrollState`] and rebuilds the shadow
/// sprite table from the motion table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotionAdvancer {
    initial_wrap: usize,
    tile_words: usize,
    refresh: Transfer,
}

impl MotionAdvancer {
    pub fn new(assets: &AssetStore, refresh: Transfer) -> Self {
        Self::with_bounds(assets.initial_wrap_index(), assets.tile_words(), refresh)
    }

    pub const fn with_bounds(initial_wrap: usize, tile_words: usize, refresh: Transfer) -> Self {
        Self {
            initial_wrap,
            tile_words,
            refresh,
        }
    }

    #[inline(always)]
    pub const fn initial_wrap(&self) -> usize {
        self.initial_wrap
    }

    /// Step the scroll state by one frame.
    ///
    /// The wrap index counts down from the initial wrap to 0 and restarts;
    /// the strip indices move only on the frame the counter read 0.
    pub fn advance(&self, scroll: &mut ScrollState) {
        scroll.wrap_index = match scroll.wrap_index.checked_sub(1) {
            Some(wrap) => wrap,
            None => self.initial_wrap,
        };

        scroll.scroll_x = scroll.scroll_x.wrapping_add(1);

        let counter = scroll.scroll_counter;
        scroll.scroll_counter = (counter + 1) % SCROLL_PERIOD;

        if counter == 0 {
            let source = scroll.source_index + STRIP_WORDS;
            scroll.source_index = if source >= self.tile_words { 0 } else { source };
            scroll.dest_ring_index = (scroll.dest_ring_index + 1) % RING_COLUMNS;
        }
    }

    pub fn refresh_shadow(&self, shadow: &mut ShadowSprites, motion: &[MotionPoint], wrap_index: usize) {
        shadow.refresh(motion, wrap_index, self.refresh);
    }

    /// Build the shadow table for the current wrap index without stepping:
    /// the pass that makes the very first frame valid.
    pub fn first_motion(&self, frame: &mut Frame, assets: &AssetStore) {
        self.refresh_shadow(&mut frame.sprites, assets.motion(), frame.scroll.wrap_index);
    }

    /// One full advance: step, then rebuild the shadow table.
    pub fn step(&self, frame: &mut Frame, assets: &AssetStore) {
        self.advance(&mut frame.scroll);
        trace!("advanced to {:?}", frame.scroll);
        self.refresh_shadow(&mut frame.sprites, assets.motion(), frame.scroll.wrap_index);
    }
}
