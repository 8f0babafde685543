use log::{debug, trace};

use crate::{
    assets::AssetStore, console::Frame, scr::BgControl, surface::RegisterSurface, transfer::Transfer,
};

/// Pushes a prepared [`Frame`] into the display registers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Compositor {
    transfer: Transfer,
}

impl Compositor {
    pub const fn new(transfer: Transfer) -> Self {
        Self { transfer }
    }

    /// Show `frame`.
    ///
    /// Everything between the two control writes happens with the video
    /// controller off the sprite/BG registers:
    ///
    /// 1. display off
    /// 2. shadow sprite table into sprite slots `0..frame.sprites.len()`
    /// 3. BG scroll X
    /// 4. on strip frames, strip `source_index` into ring column
    ///    `dest_ring_index`
    /// 5. display on
    ///
    /// Only `surface` is written.
    pub fn composite<S: RegisterSurface + ?Sized>(&self, frame: &Frame, assets: &AssetStore, surface: &mut S) {
        surface.write_control(BgControl::DISABLED);

        self.transfer.copy_sprites(surface, frame.sprites.as_slice());
        surface.write_scroll_x(frame.scroll.scroll_x);

        let scroll = &frame.scroll;
        if scroll.strip_due() {
            debug!(
                "strip {} -> column {}",
                scroll.source_index / crate::assets::STRIP_WORDS,
                scroll.dest_ring_index
            );
            self.transfer
                .copy_tile_strip(surface, assets.strip(scroll.source_index), scroll.dest_ring_index);
        }

        surface.write_control(BgControl::ENABLED);
        trace!("composited scroll_x {}", scroll.scroll_x);
    }
}
