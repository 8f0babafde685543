use crate::{MAX_SPRITES, transfer::Transfer};

/// How the frame halves are scheduled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Wait for vblank, composite, advance; all on one flow.
    Polled,
    /// Composite from the vblank handler, advance in a deferred task.
    #[default]
    Interrupt,
}

/// Active sprite count, `1..=128`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpriteCount(usize);

impl SpriteCount {
    pub const MAX: Self = Self(MAX_SPRITES);

    pub const fn new(count: usize) -> Option<Self> {
        if count >= 1 && count <= MAX_SPRITES {
            Some(Self(count))
        } else {
            None
        }
    }

    /// Parse a command-line value; anything unusable yields `None` and the
    /// caller keeps its default.
    pub fn parse(arg: &str) -> Option<Self> {
        arg.trim().parse().ok().and_then(Self::new)
    }

    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for SpriteCount {
    fn default() -> Self {
        Self::MAX
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub sprite_count: SpriteCount,
    /// Strategy for the sprite block and tile strip copies.
    pub composite_transfer: Transfer,
    /// Strategy for rebuilding the shadow sprite table.
    pub refresh_transfer: Transfer,
    /// XOR bit 0 of every tile word before the first frame.
    pub invert_tiles: bool,
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_hardware_pool() {
        let config = Config::default();
        assert_eq!(config.sprite_count.get(), 128);
        assert_eq!(config.composite_transfer, Transfer::Bulk);
        assert_eq!(config.refresh_transfer, Transfer::Bulk);
        assert!(!config.invert_tiles);
        assert_eq!(config.mode, Mode::Interrupt);
    }

    #[test]
    fn sprite_count_parse_is_lenient() {
        assert_eq!(SpriteCount::parse("64"), SpriteCount::new(64));
        assert_eq!(SpriteCount::parse(" 1 "), SpriteCount::new(1));
        assert_eq!(SpriteCount::parse("0"), None);
        assert_eq!(SpriteCount::parse("129"), None);
        assert_eq!(SpriteCount::parse("-3"), None);
        assert_eq!(SpriteCount::parse("lots"), None);
    }
}
