use std::time::Duration;

use tracing::{debug, info};

use crate::error::GameResult;
use crate::game::Game;
use crate::input::{InputEvent, InputSource};
use crate::platform;
use crate::render::{render_snapshot, Renderer};

/// Schedules ticks at a fixed delay after the previous frame was drawn.
///
/// The ticker stops on game over and is started again by the input that restarts the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    period: Duration,
    running: bool,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { period, running: true }
    }

    pub fn start(&mut self) {
        if !self.running {
            debug!("Ticker started");
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        if self.running {
            debug!("Ticker stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

/// What the loop should do after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Drives a [`Game`] against a frontend.
pub struct App<R: Renderer, I: InputSource> {
    game: Game,
    renderer: R,
    input: I,
    ticker: Ticker,
}

impl<R: Renderer, I: InputSource> App<R, I> {
    pub fn new(game: Game, renderer: R, input: I) -> Self {
        let ticker = Ticker::new(game.config().tick_period);
        Self {
            game,
            renderer,
            input,
            ticker,
        }
    }

    /// Draws the initial frame before any tick runs.
    pub fn draw(&mut self) -> GameResult<()> {
        let snapshot = self.game.snapshot();
        render_snapshot(&mut self.renderer, &snapshot)
    }

    /// Handles pending input, then runs and draws one tick if the ticker is running.
    pub fn step(&mut self) -> GameResult<Flow> {
        while let Some(event) = self.input.poll() {
            if event == InputEvent::Quit {
                info!("Exit requested. Exiting...");
                return Ok(Flow::Exit);
            }

            if self.game.handle_input(event) {
                self.ticker.start();
                self.draw()?;
            }
        }

        if !self.ticker.is_running() {
            return Ok(Flow::Continue);
        }

        self.game.tick();
        self.draw()?;

        if self.game.is_game_over() {
            info!(score = self.game.score(), "Game over");
            self.ticker.stop();
        }

        Ok(Flow::Continue)
    }

    /// Runs until the input source asks to quit, sleeping one period after every step.
    pub fn run(&mut self) -> GameResult<()> {
        self.draw()?;
        loop {
            if self.step()? == Flow::Exit {
                return Ok(());
            }
            platform::sleep(self.ticker.period());
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }
}
