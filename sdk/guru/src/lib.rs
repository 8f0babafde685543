//! # guru
//!
//! Drives the X68000 sprite and BG hardware in lock-step with vertical
//! blank: 128 sprites circling along a precomputed trajectory over a
//! horizontally scrolling BG.
//!
//! Every frame has two halves:
//!
//! 1. **Composite** ([`Compositor`]): with the display switched off, copy
//!    the shadow sprite table into the sprite scroll registers, write the BG
//!    scroll position and, every 16th frame, copy one 32-cell strip of tile
//!    data into the BG text area. Then switch the display back on.
//! 2. **Advance** ([`MotionAdvancer`]): step the scroll state and rebuild
//!    the shadow sprite table for the next frame.
//!
//! Two schedules are supported:
//!
//! - **Polled** ([`Orchestrator`]): wait for vblank, composite, advance.
//! - **Interrupt** ([`VsyncDriver`]): the vblank handler composites only if
//!   the previous advance has finished, and hands the next advance to a
//!   lower-priority task. A late advance costs a repeated frame, never a
//!   torn one.
//!
//! The hardware itself sits behind [`RegisterSurface`], so the same code
//! writes to real registers ([`MmioRegisters`]) or to an in-memory image
//! ([`VirtualRegisters`]).
//!
//! ```ignore
//! let assets = AssetStore::from_bytes(&spdat, &bgdat, ByteOrder::Native)?;
//! let console = Console::new(assets, &Config::default())?;
//! let mut regs = VirtualRegisters::new();
//!
//! console.composite(&mut regs);
//! ```

#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod assets;
pub mod clock;
pub mod compositor;
pub mod config;
pub mod console;
pub mod input;
pub mod motion;
pub mod orchestrator;
pub mod scr;
pub mod scroll;
pub mod sprites;
pub mod surface;
pub mod transfer;
pub mod vsync;

pub use assets::{AssetError, AssetStore, ByteOrder, MotionPoint};
pub use clock::FrameClock;
pub use compositor::Compositor;
pub use config::{Config, Mode, SpriteCount};
pub use console::{Console, Frame};
pub use input::{ExitTrigger, FrameLimit};
pub use motion::MotionAdvancer;
pub use orchestrator::{Orchestrator, RunState, RunStats};
pub use scr::BgControl;
pub use scroll::ScrollState;
pub use sprites::{ShadowSprites, SpriteRecord};
pub use surface::{MmioRegisters, RegisterSurface, VirtualRegisters};
pub use transfer::Transfer;
pub use vsync::{AdvanceTicket, Vsync, VsyncDriver};

/// Number of hardware sprite slots.
pub const MAX_SPRITES: usize = 128;
