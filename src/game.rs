use std::{thread::sleep, time::{Duration, Instant}};

use anyhow::Result;
use log::{debug, info, warn};
use rand::Rng;

use crate::config::GameContext;
use crate::food::Food;
use crate::input::{translate, Command, InputSource};
use crate::snake::Snake;
use crate::term::{Drawable, Frame, Renderer};

/// Paces the loop to a fixed tick rate.
pub trait Throttle {
    /// Blocks until one interval has passed since the previous call returned.
    fn wait(&mut self);
}

pub struct FixedRateClock {
    interval: Duration,
    last: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(ctx: &GameContext) -> Self {
        FixedRateClock { interval: ctx.tick_interval, last: None }
    }
}

impl Throttle for FixedRateClock {
    fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Continue { ate: bool, collided: bool },
    Quit,
}

pub struct GameLoop<'a, R> {
    ctx: &'a GameContext,
    snake: Snake,
    food: Food,
    rng: R,
    ticks: u64,
    quit: bool,
    needs_clear: bool,
}

impl<'a, R: Rng> GameLoop<'a, R> {
    pub fn new(ctx: &'a GameContext, mut rng: R) -> Self {
        let snake = Snake::new(ctx.grid.center());
        let food = Food::spawn(&ctx.grid, &[snake.head()], &mut rng);
        GameLoop::with_state(ctx, snake, food, rng)
    }

    pub fn with_state(ctx: &'a GameContext, snake: Snake, food: Food, rng: R) -> Self {
        GameLoop { ctx, snake, food, rng, ticks: 0, quit: false, needs_clear: true }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    /// Runs until a quit request comes in. Returns the number of ticks played.
    pub fn run<I, D, T>(&mut self, input: &mut I, renderer: &mut D, clock: &mut T) -> Result<u64>
    where
        I: InputSource,
        D: Renderer,
        T: Throttle,
    {
        loop {
            clock.wait();
            if self.tick(input, renderer)? == TickOutcome::Quit {
                info!("Quit after {} ticks", self.ticks);
                return Ok(self.ticks);
            }
        }
    }

    pub fn tick<I, D>(&mut self, input: &mut I, renderer: &mut D) -> Result<TickOutcome>
    where
        I: InputSource,
        D: Renderer,
    {
        if self.quit {
            return Ok(TickOutcome::Quit);
        }

        for ev in input.poll_events()? {
            match translate(&ev) {
                Some(Command::Turn(heading)) => self.snake.set_pending_heading(heading),
                Some(Command::Quit) => {
                    self.quit = true;
                    return Ok(TickOutcome::Quit);
                }
                None => {}
            }
        }

        let ctx = self.ctx;
        let grid = &ctx.grid;
        self.snake.step(grid);
        self.ticks += 1;

        let ate = self.snake.head() == self.food.position();
        if ate {
            self.snake.grow();
            if !self.food.relocate(grid, self.snake.body(), &mut self.rng) {
                warn!("No free cell left for food, leaving it under the snake");
            }
            debug!("Ate at tick {}, length now {}", self.ticks, self.snake.length());
        }

        let collided = self.snake.has_self_collision();
        if collided {
            debug!("Self-collision at {:?} with length {}, resetting", self.snake.head(), self.snake.length());
            self.snake.reset();
            self.needs_clear = true;
        }

        renderer.render(&self.frame())?;
        self.needs_clear = false;

        Ok(TickOutcome::Continue { ate, collided })
    }

    fn frame(&self) -> Frame {
        let mut frame = Frame { clear: self.needs_clear, commands: vec![] };
        self.snake.draw(&self.ctx.palette, &mut frame);
        self.food.draw(&self.ctx.palette, &mut frame);
        frame
    }
}
