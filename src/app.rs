use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use log::info;
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};

use crate::input::{key_action, KeyAction};
use crate::session::Session;
use crate::timer::IntervalTicker;

/// How long to wait for input when no timer is running (after game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Applies one key press to the session.
pub fn handle_key<R: Rng>(session: &mut Session<R, IntervalTicker>, action: KeyAction) -> Control {
    match action {
        KeyAction::Turn(direction) => session.set_direction(direction),
        KeyAction::Restart => {
            session.restart();
        }
        KeyAction::Quit => {
            info!("Quit requested");
            return Control::Exit;
        }
        KeyAction::None => {}
    }
    Control::Continue
}

/// Fires the session's tick if its interval has elapsed.
pub fn tick_if_due<R: Rng>(session: &mut Session<R, IntervalTicker>, now: Instant) {
    if let Some(handle) = session.ticker_mut().poll(now) {
        session.on_tick(handle);
    }
}

fn render<R: Rng>(frame: &mut Frame, session: &Session<R, IntervalTicker>) {
    frame.render_widget(session, frame.area());
}

/// Runs the game until the player quits. Starts the first game immediately.
pub fn run<B: Backend, R: Rng>(
    terminal: &mut Terminal<B>,
    mut session: Session<R, IntervalTicker>,
) -> io::Result<()> {
    session.start();

    loop {
        terminal.draw(|frame| render(frame, &session))?;

        let timeout = session
            .ticker()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(&mut session, key_action(key)) == Control::Exit {
                    break;
                }
            }
        }

        tick_if_due(&mut session, Instant::now());
    }

    info!(
        "Leaving after {} game(s), last score {}",
        session.games_played(),
        session.score()
    );
    Ok(())
}
