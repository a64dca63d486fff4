mod config;
mod food;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use simplelog::WriteLogger;

use config::{Args, GameContext};
use game::{FixedRateClock, GameLoop};
use input::TerminalInput;
use term::TermManager;

fn main() -> Result<()> {
    let args = Args::parse();

    // The screen belongs to the game, so logs only ever go to a file
    if let Some(path) = &args.log_file {
        let file = File::create(path).with_context(|| format!("cannot create log file {}", path.display()))?;
        WriteLogger::init(args.log_level, simplelog::Config::default(), file).context("cannot install logger")?;
    }

    let ctx = GameContext::from_args(&args)?;
    info!(
        "Starting: {}x{} board, {:?} per tick, seed {:?}",
        ctx.grid.width(), ctx.grid.height(), ctx.tick_interval, args.seed
    );

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut term = TermManager::new(ctx.grid, ctx.palette);
    term.setup()?;

    let mut game = GameLoop::new(&ctx, rng);
    let played = game.run(&mut TerminalInput, &mut term, &mut FixedRateClock::new(&ctx));

    // Put the terminal back before reporting anything
    term.restore()?;
    played?;
    Ok(())
}
