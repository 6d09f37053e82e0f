use log::{info, warn};
use rand::Rng;

use crate::config::{Config, ConfigError};
use crate::game::{Game, TickOutcome};
use crate::grid::{Direction, Geometry};
use crate::timer::{Ticker, TimerHandle};

#[derive(Debug)]
pub enum SessionState {
    NotStarted,
    Running(Game),
    /// Frozen last frame of the finished game.
    GameOver(Game),
}

/// Owns everything a game needs between ticks: the current play-through,
/// the random source for food and the one repeating timer.
#[derive(Debug)]
pub struct Session<R, T> {
    config: Config,
    geometry: Geometry,
    rng: R,
    ticker: T,
    timer: Option<TimerHandle>,
    state: SessionState,
    games_played: u32,
}

impl<R: Rng, T: Ticker> Session<R, T> {
    /// Validates the configuration; the session starts in `NotStarted`.
    pub fn new(config: Config, rng: R, ticker: T) -> Result<Self, ConfigError> {
        let geometry = config.geometry()?;
        info!(
            "Grid is {}x{} cells, ticking every {:?}",
            geometry.width(),
            geometry.height(),
            config.tick_period
        );

        Ok(Session {
            config,
            geometry,
            rng,
            ticker,
            timer: None,
            state: SessionState::NotStarted,
            games_played: 0,
        })
    }

    /// Starts the first game. Does nothing once a game has been started.
    pub fn start(&mut self) {
        if matches!(self.state, SessionState::NotStarted) {
            self.begin();
        }
    }

    /// Replaces a finished game with a fresh one. Ignored while a game runs.
    pub fn restart(&mut self) -> bool {
        if matches!(self.state, SessionState::GameOver(_)) {
            info!("Restarting");
            self.begin();
            true
        } else {
            false
        }
    }

    fn begin(&mut self) {
        self.stop_timer();
        self.state = SessionState::Running(Game::new(self.geometry));
        self.timer = Some(self.ticker.schedule(self.config.tick_period));
        self.games_played += 1;
        info!("Game {} started", self.games_played);
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.ticker.cancel(handle);
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if let SessionState::Running(game) = &mut self.state {
            game.set_direction(direction);
        }
    }

    /// Runs one tick for the timer `handle`.
    ///
    /// Returns `None` if the handle is not the session's active timer.
    pub fn on_tick(&mut self, handle: TimerHandle) -> Option<TickOutcome> {
        if self.timer != Some(handle) {
            warn!("Ignoring tick from inactive timer {:?}", handle);
            return None;
        }

        let SessionState::Running(game) = &mut self.state else {
            return None;
        };

        let outcome = game.tick(&mut self.rng);
        if let TickOutcome::Collided(_) = outcome {
            self.stop_timer();
            if let SessionState::Running(game) =
                std::mem::replace(&mut self.state, SessionState::NotStarted)
            {
                info!("Game over, final score {}", game.score());
                self.state = SessionState::GameOver(game);
            }
        }
        Some(outcome)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The running or finished game, if any.
    pub fn game(&self) -> Option<&Game> {
        match &self.state {
            SessionState::NotStarted => None,
            SessionState::Running(game) | SessionState::GameOver(game) => Some(game),
        }
    }

    pub fn score(&self) -> u32 {
        self.game().map_or(0, Game::score)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running(_))
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.state, SessionState::GameOver(_))
    }

    /// Whether the restart prompt should be shown.
    pub fn restart_visible(&self) -> bool {
        self.is_game_over()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }
}
