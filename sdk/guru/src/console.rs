use log::info;

use crate::{
    assets::{AssetError, AssetStore},
    compositor::Compositor,
    config::{Config, SpriteCount},
    motion::MotionAdvancer,
    scroll::ScrollState,
    sprites::ShadowSprites,
    surface::RegisterSurface,
};

/// Everything the next composite reads and the next advance writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub sprites: ShadowSprites,
    pub scroll: ScrollState,
}

impl Frame {
    pub fn new(sprites: SpriteCount, initial_wrap: usize) -> Self {
        Self {
            sprites: ShadowSprites::new(sprites),
            scroll: ScrollState::new(initial_wrap),
        }
    }
}

/// The demo's whole state, built once at startup.
///
/// Holds the read-only asset tables, the shadow frame and the configured
/// compositor/advancer. Every operation takes it (or the parts it split
/// into) explicitly.
pub struct Console {
    pub assets: AssetStore,
    pub frame: Frame,
    pub compositor: Compositor,
    pub advancer: MotionAdvancer,
}

impl Console {
    /// Validate the tables against `config`, apply tile inversion and prime
    /// the shadow table so the first composite shows valid positions.
    pub fn new(mut assets: AssetStore, config: &Config) -> Result<Self, AssetError> {
        assets.check_sprite_count(config.sprite_count.get())?;

        if config.invert_tiles {
            info!("inverting tile table");
            assets.invert_tiles();
        }

        let advancer = MotionAdvancer::new(&assets, config.refresh_transfer);
        let mut frame = Frame::new(config.sprite_count, advancer.initial_wrap());
        advancer.first_motion(&mut frame, &assets);

        info!(
            "{} sprites, composite {:?}, refresh {:?}",
            frame.sprites.len(),
            config.composite_transfer,
            config.refresh_transfer
        );

        Ok(Self {
            assets,
            frame,
            compositor: Compositor::new(config.composite_transfer),
            advancer,
        })
    }

    #[inline]
    pub fn composite<S: RegisterSurface + ?Sized>(&self, surface: &mut S) {
        self.compositor.composite(&self.frame, &self.assets, surface);
    }

    #[inline]
    pub fn advance(&mut self) {
        self.advancer.step(&mut self.frame, &self.assets);
    }
}
