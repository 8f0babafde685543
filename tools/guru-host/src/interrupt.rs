use std::{thread, time::Duration};

use anyhow::{Result, anyhow};
use crossbeam_channel::bounded;
use guru::{AdvanceTicket, Console, ExitTrigger, FrameClock, RunStats, VirtualRegisters, Vsync, VsyncDriver};
use thread_priority::{ThreadPriority, set_current_thread_priority};
use tracing::{debug, info};

use crate::clock::PacedClock;

/// Run the interrupt model until `exit` fires.
///
/// A high-priority thread stands in for the vblank interrupt: it waits for
/// each edge and calls [`VsyncDriver::on_vsync`]. Tickets go to a worker
/// thread through a one-slot channel; the worker runs the advance.
pub fn run<E: ExitTrigger + Send>(console: Console, period: Duration, mut exit: E) -> Result<(RunStats, VirtualRegisters)> {
    let driver = VsyncDriver::new(console);
    let (tx, rx) = bounded::<AdvanceTicket<'_>>(1);

    let regs = thread::scope(|s| {
        let driver = &driver;

        s.spawn(move || {
            for ticket in rx {
                ticket.run();
            }
            debug!("advance worker done");
        });

        let vsync = s.spawn(move || {
            // if it didn't work, oh well
            let _ = set_current_thread_priority(ThreadPriority::Max);

            let mut clock = PacedClock::new(period);
            let mut regs = VirtualRegisters::new();

            while !exit.exit_requested() {
                clock.wait_next_frame();
                match driver.on_vsync(&mut regs) {
                    Vsync::Composited(ticket) => {
                        if tx.send(ticket).is_err() {
                            break;
                        }
                    }
                    Vsync::Skipped => {}
                }
            }
            info!("exit requested, {} edges missed by the clock", clock.missed());
            regs
        });

        vsync.join().map_err(|_| anyhow!("vsync thread panicked"))
    })?;

    Ok((driver.stats(), regs))
}
