//! # Interrupt Frame Model
//!
//! The vblank handler and the advance run in different contexts:
//!
//! ```text
//!  vblank ──► on_vsync ──ready?──no──► skip (nothing written)
//!                           │
//!                          yes
//!                           │
//!                 clear ready, composite
//!                           │
//!                           ▼
//!                    AdvanceTicket ──► deferred task: run()
//!                                               │
//!                                      advance, then set ready
//! ```
//!
//! `ready` is the only thing shared between the two. While it is clear the
//! deferred task owns the frame; while it is set the handler does. Only a
//! finished advance sets it, so the handler never sees a half-built frame
//! and shows each frame at most once: an advance that misses the edge
//! costs one repeated edge with nothing written. A ticket that is dropped
//! without running, or panics while running, leaves `ready` clear and every
//! later edge skips.

use core::{
    cell::UnsafeCell,
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

use log::{debug, info};

use crate::{
    assets::AssetStore,
    compositor::Compositor,
    console::{Console, Frame},
    motion::MotionAdvancer,
    orchestrator::RunStats,
    surface::RegisterSurface,
};

pub struct VsyncDriver {
    assets: AssetStore,
    compositor: Compositor,
    advancer: MotionAdvancer,
    frame: UnsafeCell<Frame>,
    ready: AtomicBool,
    ticks: AtomicUsize,
    composited: AtomicUsize,
    skipped: AtomicUsize,
}

// `frame` is only touched by whoever cleared `ready`, see `on_vsync`.
unsafe impl Sync for VsyncDriver {}

/// What one vblank did.
#[must_use]
pub enum Vsync<'a> {
    /// The frame was shown; the ticket schedules the next advance.
    Composited(AdvanceTicket<'a>),
    /// The previous advance hadn't finished. Nothing was written.
    Skipped,
}

/// Exclusive right to advance the frame, handed out by a composite.
///
/// Only [`run`](Self::run) marks the frame ready again; dropping the ticket
/// unrun leaves the display holding the last frame.
#[must_use]
pub struct AdvanceTicket<'a> {
    driver: &'a VsyncDriver,
}

impl<'a> AdvanceTicket<'a> {
    /// Step the scroll state and rebuild the shadow table.
    pub fn run(self) {
        let driver = self.driver;
        // SAFETY: `ready` was cleared to issue this ticket and is only set
        // again below, so nothing else reads or writes the frame.
        let frame = unsafe { &mut *driver.frame.get() };
        driver.advancer.step(frame, &driver.assets);
        driver.ready.store(true, Ordering::Release);
    }
}

impl VsyncDriver {
    /// Starts ready: the console's first motion has already primed the frame.
    pub fn new(console: Console) -> Self {
        let Console {
            assets,
            frame,
            compositor,
            advancer,
        } = console;

        info!("running on vsync");
        Self {
            assets,
            compositor,
            advancer,
            frame: UnsafeCell::new(frame),
            ready: AtomicBool::new(true),
            ticks: AtomicUsize::new(0),
            composited: AtomicUsize::new(0),
            skipped: AtomicUsize::new(0),
        }
    }

    /// The vblank handler body.
    pub fn on_vsync<S: RegisterSurface + ?Sized>(&self, surface: &mut S) -> Vsync<'_> {
        self.ticks.fetch_add(1, Ordering::Relaxed);

        if self
            .ready
            .compare_exchange(true, false, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            let skipped = self.skipped.fetch_add(1, Ordering::Relaxed) + 1;
            debug!("advance still running, {} frames skipped", skipped);
            return Vsync::Skipped;
        }

        // SAFETY: we just cleared `ready`; the previous ticket has run.
        let frame = unsafe { &*self.frame.get() };
        self.compositor.composite(frame, &self.assets, surface);
        self.composited.fetch_add(1, Ordering::Relaxed);

        Vsync::Composited(AdvanceTicket { driver: self })
    }

    /// `true` when no advance is outstanding.
    #[inline(always)]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            ticks: self.ticks.load(Ordering::Relaxed) as u64,
            composited: self.composited.load(Ordering::Relaxed) as u64,
            skipped: self.skipped.load(Ordering::Relaxed) as u64,
        }
    }

    /// The frame the next composite will show. Needs `&mut self`, so no
    /// ticket can be outstanding.
    #[inline(always)]
    pub fn frame(&mut self) -> &Frame {
        self.frame.get_mut()
    }
}
