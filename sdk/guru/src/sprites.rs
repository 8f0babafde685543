//! # Shadow Sprite Table
//!
//! The sprite scroll registers (`$EB0000`) hold four words per slot:
//!
//! | Word | Field   | Written by                         |
//! |------|---------|------------------------------------|
//! | 0    | `x`     | every advance                      |
//! | 1    | `y`     | every advance                      |
//! | 2    | `attr1` | construction only (pattern/colour) |
//! | 3    | `attr2` | construction only (priority)       |
//!
//! [`ShadowSprites`] is the off-screen copy: the advancer rebuilds it, the
//! compositor copies it to the registers record-for-record.

use bytemuck::{Pod, Zeroable};
use heapless::Vec;

use crate::{MAX_SPRITES, assets::MotionPoint, config::SpriteCount, transfer::Transfer};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct SpriteRecord {
    pub x: u16,
    pub y: u16,
    pub attr1: u16,
    pub attr2: u16,
}

impl SpriteRecord {
    pub const WORDS: usize = 4;

    /// Pattern 1, palette 1; priority 3.
    pub const INITIAL: Self = Self {
        x: 0,
        y: 0,
        attr1: 0x0101,
        attr2: 0x0003,
    };

    #[inline(always)]
    pub fn from_words(words: &[u16]) -> Self {
        Self {
            x: words[0],
            y: words[1],
            attr1: words[2],
            attr2: words[3],
        }
    }
}

impl Default for SpriteRecord {
    fn default() -> Self {
        Self::INITIAL
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowSprites {
    records: Vec<SpriteRecord, MAX_SPRITES>,
}

impl ShadowSprites {
    pub fn new(count: SpriteCount) -> Self {
        Self {
            records: core::iter::repeat_n(SpriteRecord::INITIAL, count.get()).collect(),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[SpriteRecord] {
        &self.records
    }

    /// The table as the register block sees it: `x, y, attr1, attr2` per slot.
    #[inline(always)]
    pub fn as_words(&self) -> &[u16] {
        bytemuck::cast_slice(&self.records)
    }

    /// Point every record at the motion table, sprite `i` sampling pair
    /// `wrap_index + 3 * i`. Attributes are left alone.
    #[inline]
    pub fn refresh(&mut self, motion: &[MotionPoint], wrap_index: usize, transfer: Transfer) {
        transfer.refresh_shadow(&mut self.records, motion, wrap_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_default_attributes() {
        let shadow = ShadowSprites::new(SpriteCount::new(3).unwrap());

        assert_eq!(shadow.len(), 3);
        assert_eq!(
            shadow.as_words(),
            &[0, 0, 0x0101, 0x0003, 0, 0, 0x0101, 0x0003, 0, 0, 0x0101, 0x0003]
        );
    }

    #[test]
    fn full_pool_fits() {
        let shadow = ShadowSprites::new(SpriteCount::MAX);
        assert_eq!(shadow.len(), MAX_SPRITES);
        assert_eq!(shadow.as_words().len(), MAX_SPRITES * SpriteRecord::WORDS);
    }
}
