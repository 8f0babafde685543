mod assets;
mod cli;
mod clock;
mod interrupt;
mod keyboard;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use guru::{
    Console, ExitTrigger, FrameLimit, Mode, Orchestrator, RunStats, VirtualRegisters,
    assets::decode_cell,
    input::{Either, Never},
};
use tracing::{Level, debug, info, warn};
use tracing_subscriber::util::SubscriberInitExt;

use crate::{
    cli::Cli,
    clock::PacedClock,
    keyboard::{KeyPress, raw_mode_stderr},
};

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(raw_mode_stderr)
        .compact()
        .finish()
        .init();
}

/// Where the tables and the shadow buffer ended up.
fn report_buffers(console: &Console) {
    let motion = console.assets.motion();
    let tiles = console.assets.tiles();
    let sprites = console.frame.sprites.as_words();

    debug!("motion table  {:p} {:>6} bytes", motion.as_ptr(), size_of_val(motion));
    debug!("tile table    {:p} {:>6} bytes", tiles.as_ptr(), size_of_val(tiles));
    debug!("shadow sprite {:p} {:>6} bytes", sprites.as_ptr(), size_of_val(sprites));

    let first: Vec<i16> = console.assets.strip(0).iter().copied().map(decode_cell).collect();
    debug!("first strip {:?}", first);
}

fn exit_trigger(frames: Option<u64>) -> Box<dyn ExitTrigger + Send> {
    let limit: Box<dyn ExitTrigger + Send> = match frames {
        Some(n) => Box::new(FrameLimit::new(n)),
        None => Box::new(Never),
    };

    match KeyPress::new() {
        Some(keys) => Box::new(Either(keys, limit)),
        None => {
            if frames.is_none() {
                warn!("stdin is not a terminal and no --frames given, running until killed");
            }
            limit
        }
    }
}

fn dump(path: &Path, regs: &VirtualRegisters) -> Result<()> {
    let image = regs.image();
    std::fs::write(path, bytemuck::cast_slice::<u16, u8>(&image))
        .with_context(|| format!("failed to write register dump {}", path.display()))?;
    info!("wrote {} register words to {}", image.len(), path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = cli.config();
    let period = cli.refresh_period()?;

    let assets = assets::load(&cli.sprite_data, &cli.tile_data, cli.byte_order.into())?;
    let console = Console::new(assets, &config).context("assets don't fit the configuration")?;
    report_buffers(&console);

    let exit = exit_trigger(cli.frames);

    let (stats, regs): (RunStats, VirtualRegisters) = match config.mode {
        Mode::Polled => Orchestrator::new(console, PacedClock::new(period), VirtualRegisters::new(), exit).run(),
        Mode::Interrupt => interrupt::run(console, period, exit)?,
    };

    info!(
        "{} ticks, {} composited, {} skipped",
        stats.ticks, stats.composited, stats.skipped
    );

    if let Some(path) = &cli.dump {
        dump(path, &regs)?;
    }

    Ok(())
}
