use std::{path::PathBuf, time::Duration};

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use guru::{ByteOrder, Config, Mode, SpriteCount, Transfer};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "guru")]
#[command(version, about = "Sprites circling over a scrolling BG, in lock-step with vsync", long_about = None)]
pub struct Cli {
    /// Number of active sprites (1-128); anything else keeps the default
    #[arg(long, value_name = "N")]
    pub sprites: Option<String>,

    /// Copy sprites and tile strips one record at a time
    #[arg(long, alias = "no-asm-int")]
    pub no_bulk_composite: bool,

    /// Rebuild the shadow sprite table one record at a time
    #[arg(long, alias = "no-asm-move")]
    pub no_bulk_refresh: bool,

    /// Flip bit 0 of every tile word before the first frame
    #[arg(long)]
    pub invert_tiles: bool,

    /// Scheduling model
    #[arg(long, value_enum, default_value_t = ModeArg::Interrupt)]
    pub mode: ModeArg,

    /// Sprite motion table
    #[arg(long, default_value = "spdat.bin")]
    pub sprite_data: PathBuf,

    /// Tile table
    #[arg(long, default_value = "bgdat.bin")]
    pub tile_data: PathBuf,

    /// Word order of both asset files
    #[arg(long, value_enum, default_value_t = ByteOrderArg::Native)]
    pub byte_order: ByteOrderArg,

    /// Vertical refresh rate of the simulated display
    #[arg(long, value_name = "HZ", default_value_t = 55.46)]
    pub refresh_hz: f64,

    /// Stop after this many frames
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Write the final register image here on exit
    #[arg(long, value_name = "PATH")]
    pub dump: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Polled,
    Interrupt,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Polled => Mode::Polled,
            ModeArg::Interrupt => Mode::Interrupt,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ByteOrderArg {
    Native,
    Little,
    Big,
}

impl From<ByteOrderArg> for ByteOrder {
    fn from(arg: ByteOrderArg) -> Self {
        match arg {
            ByteOrderArg::Native => ByteOrder::Native,
            ByteOrderArg::Little => ByteOrder::Little,
            ByteOrderArg::Big => ByteOrder::Big,
        }
    }
}

fn transfer(bulk: bool) -> Transfer {
    if bulk { Transfer::Bulk } else { Transfer::Recordwise }
}

impl Cli {
    pub fn config(&self) -> Config {
        let sprite_count = match self.sprites.as_deref() {
            None => SpriteCount::default(),
            Some(arg) => SpriteCount::parse(arg).unwrap_or_else(|| {
                warn!("ignoring --sprites {:?}, using {}", arg, SpriteCount::default().get());
                SpriteCount::default()
            }),
        };

        Config {
            sprite_count,
            composite_transfer: transfer(!self.no_bulk_composite),
            refresh_transfer: transfer(!self.no_bulk_refresh),
            invert_tiles: self.invert_tiles,
            mode: self.mode.into(),
        }
    }

    pub fn refresh_period(&self) -> Result<Duration> {
        if !self.refresh_hz.is_finite() || self.refresh_hz <= 0.0 {
            bail!("--refresh-hz must be a positive number, got {}", self.refresh_hz);
        }
        Ok(Duration::from_secs_f64(1.0 / self.refresh_hz))
    }
}
