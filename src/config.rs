use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use simplelog::LevelFilter;

use crate::grid::Grid;
use crate::term::Palette;

#[derive(Parser, Debug)]
#[command(author, version, about = "Snake on a wrap-around board, in your terminal")]
pub struct Args {
    /// board width in cells
    #[arg(long, default_value_t = 32)]
    pub width: u16,

    /// board height in cells
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// terminal columns per cell
    #[arg(long, default_value_t = 2)]
    pub cell_width: u16,

    /// terminal rows per cell
    #[arg(long, default_value_t = 1)]
    pub cell_height: u16,

    /// simulation ticks per second
    #[arg(long, default_value_t = 20)]
    pub tps: u32,

    /// seed for food placement (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

/// Fixed for the whole session and shared by reference with the loop,
/// the renderer and the clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameContext {
    pub grid: Grid,
    pub palette: Palette,
    pub tick_interval: Duration,
}

impl GameContext {
    pub fn from_args(args: &Args) -> Result<Self> {
        if args.width == 0 || args.height == 0 {
            bail!("board must be at least 1x1 cells, got {}x{}", args.width, args.height);
        }
        if args.cell_width == 0 || args.cell_height == 0 {
            bail!("cell size must be at least 1x1, got {}x{}", args.cell_width, args.cell_height);
        }
        if args.width.checked_mul(args.cell_width).is_none() || args.height.checked_mul(args.cell_height).is_none() {
            bail!("board does not fit in a terminal");
        }
        if args.tps == 0 {
            bail!("tick rate must be positive");
        }

        Ok(GameContext {
            grid: Grid::new(args.width, args.height, args.cell_width, args.cell_height),
            palette: Palette::default(),
            tick_interval: Duration::from_secs(1) / args.tps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("torus-snake").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_classic_board() {
        let args = parse(&[]);
        assert_eq!((args.width, args.height), (32, 24));
        assert_eq!(args.tps, 20);
        assert_eq!(args.seed, None);
        assert_eq!(args.log_level, LevelFilter::Info);

        let ctx = GameContext::from_args(&args).unwrap();
        assert_eq!(ctx.grid.center().col, 16);
        assert_eq!(ctx.grid.center().row, 12);
        assert_eq!(ctx.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn flags_override_defaults() {
        let args = parse(&["--width", "10", "--height", "5", "--tps", "4", "--seed", "9", "--log-level", "debug"]);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.log_level, LevelFilter::Debug);

        let ctx = GameContext::from_args(&args).unwrap();
        assert_eq!((ctx.grid.width(), ctx.grid.height()), (10, 5));
        assert_eq!(ctx.tick_interval, Duration::from_millis(250));
    }

    #[test]
    fn degenerate_settings_are_rejected() {
        assert!(GameContext::from_args(&parse(&["--width", "0"])).is_err());
        assert!(GameContext::from_args(&parse(&["--cell-height", "0"])).is_err());
        assert!(GameContext::from_args(&parse(&["--tps", "0"])).is_err());
        assert!(GameContext::from_args(&parse(&["--width", "40000", "--cell-width", "2"])).is_err());
    }

    #[test]
    fn bad_flags_fail_to_parse() {
        assert!(Args::try_parse_from(["torus-snake", "--width", "-3"]).is_err());
        assert!(Args::try_parse_from(["torus-snake", "--log-level", "loud"]).is_err());
    }
}
