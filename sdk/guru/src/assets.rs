//! # Asset Tables
//!
//! Two binary files feed the demo, both flat sequences of 16-bit words:
//!
//! - **Sprite motion table** (`spdat.bin`): `(x, y)` pairs. The second half
//!   is a copy of the first, so a sprite sampling `wrap + 3 * i` never needs
//!   to wrap while reading.
//! - **Tile table** (`bgdat.bin`): BG cells in strips of 32 words. Each
//!   strip is one column of the BG; cell values carry a bias of 256.
//!
//! Both are immutable once loaded (tile inversion aside, which happens
//! before the first frame).

use alloc::vec::Vec;

use bit_field::BitField;
use bytemuck::{Pod, Zeroable};
use log::debug;
use thiserror::Error;

/// Words per tile strip; one strip is copied into the BG per band.
pub const STRIP_WORDS: usize = 32;

/// Bias added to every cell value by the tile generator.
pub const TILE_BIAS: u16 = 256;

/// One entry of the sprite motion table.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct MotionPoint {
    pub x: u16,
    pub y: u16,
}

impl MotionPoint {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Word order of the files on disk.
///
/// The generator writes the tables on a 68000, so they are big-endian
/// unless regenerated on the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    fn words(self, bytes: &[u8]) -> Vec<u16> {
        match self {
            ByteOrder::Native => bytemuck::pod_collect_to_vec(bytes),
            ByteOrder::Little => bytes
                .chunks_exact(2)
                .map(|w| u16::from_le_bytes([w[0], w[1]]))
                .collect(),
            ByteOrder::Big => bytes
                .chunks_exact(2)
                .map(|w| u16::from_be_bytes([w[0], w[1]]))
                .collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("{table} is {len} bytes, not a whole number of {unit}-byte entries")]
    Misaligned {
        table: &'static str,
        len: usize,
        unit: usize,
    },

    #[error("{table} is empty")]
    Empty { table: &'static str },

    #[error("tile table has {words} words, not a whole number of {cols}-word strips", cols = STRIP_WORDS)]
    TileStrips { words: usize },

    #[error("motion table has {pairs} pairs but {sprites} sprites need {needed}")]
    MotionTableTooShort {
        pairs: usize,
        needed: usize,
        sprites: usize,
    },
}

#[derive(Clone, Debug)]
pub struct AssetStore {
    motion: Vec<MotionPoint>,
    tiles: Vec<u16>,
}

impl AssetStore {
    pub fn new(motion: Vec<MotionPoint>, tiles: Vec<u16>) -> Result<Self, AssetError> {
        if motion.is_empty() {
            return Err(AssetError::Empty { table: "motion table" });
        }
        if tiles.is_empty() {
            return Err(AssetError::Empty { table: "tile table" });
        }
        if tiles.len() % STRIP_WORDS != 0 {
            return Err(AssetError::TileStrips { words: tiles.len() });
        }

        debug!(
            "assets: {} motion pairs (wrap at {}), {} tile strips",
            motion.len(),
            motion.len() / 2,
            tiles.len() / STRIP_WORDS
        );

        Ok(Self { motion, tiles })
    }

    /// Parse the raw contents of `spdat.bin` and `bgdat.bin`.
    pub fn from_bytes(motion: &[u8], tiles: &[u8], order: ByteOrder) -> Result<Self, AssetError> {
        let pair_bytes = size_of::<MotionPoint>();
        if motion.len() % pair_bytes != 0 {
            return Err(AssetError::Misaligned {
                table: "motion table",
                len: motion.len(),
                unit: pair_bytes,
            });
        }
        if tiles.len() % size_of::<u16>() != 0 {
            return Err(AssetError::Misaligned {
                table: "tile table",
                len: tiles.len(),
                unit: size_of::<u16>(),
            });
        }

        let motion = bytemuck::pod_collect_to_vec(&order.words(motion));
        Self::new(motion, order.words(tiles))
    }

    #[inline(always)]
    pub fn motion(&self) -> &[MotionPoint] {
        &self.motion
    }

    #[inline(always)]
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Half the motion table: where the wrap index starts and restarts.
    #[inline(always)]
    pub fn initial_wrap_index(&self) -> usize {
        self.motion.len() / 2
    }

    /// Bound of the band source index, in words.
    #[inline(always)]
    pub fn tile_words(&self) -> usize {
        self.tiles.len()
    }

    #[inline(always)]
    pub fn tile_strips(&self) -> usize {
        self.tiles.len() / STRIP_WORDS
    }

    /// The strip starting at word `source`.
    ///
    /// `source` is always a multiple of [`STRIP_WORDS`] below
    /// [`tile_words`](Self::tile_words); the scroll state never produces
    /// anything else.
    #[inline(always)]
    pub fn strip(&self, source: usize) -> &[u16] {
        &self.tiles[source..source + STRIP_WORDS]
    }

    /// Reject tables too short for `sprites` stride-3 samples starting at
    /// the initial wrap index.
    pub fn check_sprite_count(&self, sprites: usize) -> Result<(), AssetError> {
        let needed = self.initial_wrap_index() + 3 * sprites.saturating_sub(1) + 1;
        if self.motion.len() < needed {
            return Err(AssetError::MotionTableTooShort {
                pairs: self.motion.len(),
                needed,
                sprites,
            });
        }
        Ok(())
    }

    /// Flip bit 0 of every tile word.
    pub fn invert_tiles(&mut self) {
        for cell in &mut self.tiles {
            let bit = cell.get_bit(0);
            cell.set_bit(0, !bit);
        }
    }
}

/// Strip the generator's bias from a stored cell.
#[inline]
pub fn decode_cell(stored: u16) -> i16 {
    stored.wrapping_sub(TILE_BIAS) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn be_words(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_be_bytes()).collect()
    }

    #[test]
    fn big_endian_files_decode() {
        let motion = be_words(&[1, 2, 3, 4]);
        let tiles = be_words(&[0x0101; 32]);
        let assets = AssetStore::from_bytes(&motion, &tiles, ByteOrder::Big).unwrap();

        assert_eq!(assets.motion(), &[MotionPoint::new(1, 2), MotionPoint::new(3, 4)]);
        assert_eq!(assets.tiles(), &[0x0101; 32]);
        assert_eq!(assets.initial_wrap_index(), 1);
        assert_eq!(assets.tile_strips(), 1);
    }

    #[test]
    fn native_and_explicit_order_agree() {
        let words: Vec<u16> = (0..64).map(|w| w * 0x0102).collect();
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_ne_bytes()).collect();
        let order = if cfg!(target_endian = "big") { ByteOrder::Big } else { ByteOrder::Little };

        let native = AssetStore::from_bytes(&bytes, &bytes, ByteOrder::Native).unwrap();
        let explicit = AssetStore::from_bytes(&bytes, &bytes, order).unwrap();
        assert_eq!(native.motion(), explicit.motion());
        assert_eq!(native.tiles(), explicit.tiles());
        assert_eq!(native.tiles(), &words[..]);
    }

    #[test]
    fn rejects_malformed_tables() {
        let tiles = be_words(&[0; 32]);

        assert_eq!(
            AssetStore::from_bytes(&[0; 6], &tiles, ByteOrder::Big).unwrap_err(),
            AssetError::Misaligned { table: "motion table", len: 6, unit: 4 }
        );
        assert_eq!(
            AssetStore::from_bytes(&[0; 4], &[0; 3], ByteOrder::Big).unwrap_err(),
            AssetError::Misaligned { table: "tile table", len: 3, unit: 2 }
        );
        assert_eq!(
            AssetStore::from_bytes(&[], &tiles, ByteOrder::Big).unwrap_err(),
            AssetError::Empty { table: "motion table" }
        );
        assert_eq!(
            AssetStore::new(vec![MotionPoint::default()], vec![0; 33]).unwrap_err(),
            AssetError::TileStrips { words: 33 }
        );
    }

    #[test]
    fn sprite_count_bounded_by_table_length() {
        // 2 * 512 pairs, as generated
        let assets = AssetStore::new(vec![MotionPoint::default(); 1024], vec![0; 32]).unwrap();
        assert!(assets.check_sprite_count(128).is_ok());

        let short = AssetStore::new(vec![MotionPoint::default(); 20], vec![0; 32]).unwrap();
        assert!(short.check_sprite_count(4).is_ok());
        assert_eq!(
            short.check_sprite_count(5).unwrap_err(),
            AssetError::MotionTableTooShort { pairs: 20, needed: 23, sprites: 5 }
        );
    }

    #[test]
    fn inversion_flips_only_bit_zero() {
        let mut assets =
            AssetStore::new(vec![MotionPoint::default()], (0..32).map(|c| 0x0100 + c).collect()).unwrap();
        assets.invert_tiles();

        for (c, cell) in assets.tiles().iter().enumerate() {
            assert_eq!(*cell, (0x0100 + c as u16) ^ 1);
        }
    }

    #[test]
    fn cells_decode_without_bias() {
        assert_eq!(decode_cell(256), 0);
        assert_eq!(decode_cell(256 + 15), 15);
        assert_eq!(decode_cell(255), -1);
    }
}
