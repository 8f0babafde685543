//! # Transfer Strategies
//!
//! Each bulk copy in a frame has two implementations that must leave the
//! same words behind:
//!
//! - [`Transfer::Bulk`] moves whole blocks: the sprite table as one run of
//!   words, a tile strip through the surface's strided copy, and motion
//!   points as two-word moves.
//! - [`Transfer::Recordwise`] goes one sprite record, one tile cell, one
//!   motion sample at a time.
//!
//! The choice is made once from [`Config`](crate::Config) and only changes
//! how fast a frame is built.

use crate::{
    assets::MotionPoint,
    sprites::SpriteRecord,
    surface::{RegisterSurface, TILE_WINDOW_STRIDE},
};

/// Motion table entries between consecutive sprites.
pub const SPRITE_STRIDE: usize = 3;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Transfer {
    #[default]
    Bulk,
    Recordwise,
}

impl Transfer {
    /// Copy the shadow table into sprite slots `0..records.len()`.
    #[inline]
    pub fn copy_sprites<S: RegisterSurface + ?Sized>(self, surface: &mut S, records: &[SpriteRecord]) {
        match self {
            Transfer::Bulk => surface.write_sprite_block(bytemuck::cast_slice(records)),
            Transfer::Recordwise => {
                for (slot, record) in records.iter().enumerate() {
                    surface.write_sprite(slot, record);
                }
            }
        }
    }

    /// Copy one strip into text area column `column`, cell `k` landing one
    /// window row (64 words) below cell `k - 1`.
    #[inline]
    pub fn copy_tile_strip<S: RegisterSurface + ?Sized>(self, surface: &mut S, strip: &[u16], column: usize) {
        match self {
            Transfer::Bulk => surface.write_tile_strip(column, strip),
            Transfer::Recordwise => {
                let mut offset = column;
                for &cell in strip {
                    surface.write_tile(offset, cell);
                    offset += TILE_WINDOW_STRIDE;
                }
            }
        }
    }

    /// Set `records[i].x, .y` from `motion[wrap_index + 3 * i]`.
    ///
    /// Samples past the end of `motion` leave their record untouched.
    #[inline]
    pub fn refresh_shadow(self, records: &mut [SpriteRecord], motion: &[MotionPoint], wrap_index: usize) {
        match self {
            Transfer::Bulk => {
                let src: &[u16] = bytemuck::cast_slice(motion.get(wrap_index..).unwrap_or(&[]));
                let dst: &mut [u16] = bytemuck::cast_slice_mut(records);

                for (record, point) in dst
                    .chunks_exact_mut(SpriteRecord::WORDS)
                    .zip(src.chunks_exact(2).step_by(SPRITE_STRIDE))
                {
                    record[..2].copy_from_slice(point);
                }
            }
            Transfer::Recordwise => {
                for (i, record) in records.iter_mut().enumerate() {
                    if let Some(point) = motion.get(wrap_index + i * SPRITE_STRIDE) {
                        record.x = point.x;
                        record.y = point.y;
                    }
                }
            }
        }
    }
}
