//! # Polled Frame Loop
//!
//! One flow does everything, in order:
//!
//! ```text
//! loop {
//!     if exit requested { stop }
//!     wait for vblank
//!     composite
//!     advance
//! }
//! ```
//!
//! Nothing else touches the frame, so no flag is needed. A frame that
//! takes longer than one refresh period simply makes the next wait run to
//! the following edge.

use log::info;

use crate::{clock::FrameClock, console::Console, input::ExitTrigger, surface::RegisterSurface};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Tables loaded and shadow primed; no frame shown yet.
    Init,
    Running,
    /// Terminal; no further register writes.
    Exiting,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Refresh edges handled.
    pub ticks: u64,
    pub composited: u64,
    /// Edges that found the next frame unfinished (interrupt model only).
    pub skipped: u64,
}

pub struct Orchestrator<C, S, E> {
    console: Console,
    clock: C,
    surface: S,
    exit: E,
    state: RunState,
    stats: RunStats,
}

impl<C: FrameClock, S: RegisterSurface, E: ExitTrigger> Orchestrator<C, S, E> {
    /// Takes a [`Console`], which has already loaded the tables and run the
    /// first-motion pass. Starts in `Init`; the first tick moves to
    /// `Running`.
    pub fn new(console: Console, clock: C, surface: S, exit: E) -> Self {
        Self {
            console,
            clock,
            surface,
            exit,
            state: RunState::Init,
            stats: RunStats::default(),
        }
    }

    #[inline(always)]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline(always)]
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    #[inline(always)]
    pub fn console(&self) -> &Console {
        &self.console
    }

    #[inline(always)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run one iteration of the loop.
    pub fn tick(&mut self) -> RunState {
        match self.state {
            RunState::Init => {
                info!("running polled");
                self.state = RunState::Running;
            }
            RunState::Running => {}
            RunState::Exiting => return self.state,
        }

        if self.exit.exit_requested() {
            info!("exit requested after {} frames", self.stats.ticks);
            self.state = RunState::Exiting;
            return self.state;
        }

        self.clock.wait_next_frame();
        self.console.composite(&mut self.surface);
        self.console.advance();

        self.stats.ticks += 1;
        self.stats.composited += 1;
        self.state
    }

    /// Tick until the exit trigger fires.
    pub fn run(mut self) -> (RunStats, S) {
        while self.tick() == RunState::Running {}
        (self.stats, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        assets::{AssetStore, MotionPoint},
        config::Config,
        input::FrameLimit,
        scr::BgControl,
        surface::VirtualRegisters,
    };
    use alloc::vec;

    #[derive(Default)]
    struct CountingClock {
        edges: u64,
    }

    impl FrameClock for CountingClock {
        fn wait_next_frame(&mut self) {
            self.edges += 1;
        }
    }

    fn console() -> Console {
        let motion = (0..1024).map(|i| MotionPoint::new(i, i)).collect();
        let assets = AssetStore::new(motion, vec![0x0100; 32 * 16]).unwrap();
        Console::new(assets, &Config::default()).unwrap()
    }

    #[test]
    fn runs_until_exit_and_stops_writing() {
        let mut clock = CountingClock::default();
        let orchestrator = Orchestrator::new(console(), &mut clock, VirtualRegisters::new(), FrameLimit::new(20));

        let (stats, regs) = orchestrator.run();

        assert_eq!(stats, RunStats { ticks: 20, composited: 20, skipped: 0 });
        assert_eq!(clock.edges, 20);
        assert_eq!(regs.writes().control, 40);
        assert_eq!(regs.writes().scroll_x, 20);
        // strips on frames 0 and 16
        assert_eq!(regs.writes().tile_words, 64);
        assert_eq!(regs.writes().while_enabled, 0);
        assert_eq!(regs.control(), BgControl::ENABLED);
        // frame 19 showed scroll_x 19
        assert_eq!(regs.scroll_x(), 19);
    }

    #[test]
    fn exit_is_checked_before_waiting() {
        let mut clock = CountingClock::default();
        let mut orchestrator = Orchestrator::new(console(), &mut clock, VirtualRegisters::new(), FrameLimit::new(0));

        assert_eq!(orchestrator.tick(), RunState::Exiting);
        assert_eq!(orchestrator.tick(), RunState::Exiting);
        assert_eq!(orchestrator.surface().writes(), Default::default());
        drop(orchestrator);
        assert_eq!(clock.edges, 0);
    }

    #[test]
    fn starts_in_init_until_first_tick() {
        let mut clock = CountingClock::default();
        let mut orchestrator = Orchestrator::new(console(), &mut clock, VirtualRegisters::new(), FrameLimit::new(3));

        assert_eq!(orchestrator.state(), RunState::Init);
        assert_eq!(orchestrator.surface().writes(), Default::default());
        assert_eq!(orchestrator.tick(), RunState::Running);
        assert_eq!(orchestrator.stats().composited, 1);
    }

    #[test]
    fn first_frame_shows_primed_shadow() {
        let mut clock = CountingClock::default();
        let mut orchestrator = Orchestrator::new(console(), &mut clock, VirtualRegisters::new(), FrameLimit::new(1));

        orchestrator.tick();
        let regs = orchestrator.surface();
        assert_eq!(regs.sprite(0).x, 512);
        assert_eq!(regs.sprite(1).x, 515);
        assert_eq!(regs.scroll_x(), 0);
        assert_eq!(regs.tile(0, 32), 0x0100);
        assert_eq!(orchestrator.console().frame.scroll.scroll_x, 1);
    }
}
