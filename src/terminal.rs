use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;

/// Puts the terminal into raw mode on the alternate screen and puts it back
/// when dropped, including while unwinding from a panic.
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on a failure still has to undo raw mode.
        let guard = TerminalGuard { active: true };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }

    /// Restores the terminal now and reports the first failing step.
    pub fn restore(mut self) -> io::Result<()> {
        self.active = false;
        restore_terminal(&mut io::stdout())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = restore_terminal(&mut io::stdout()) {
                error!("Failed to restore terminal: {}", e);
            }
        }
    }
}

fn restore_terminal(out: &mut impl Write) -> io::Result<()> {
    run_all([
        disable_raw_mode(),
        execute!(out, LeaveAlternateScreen),
        execute!(out, Show),
    ])
}

/// Every step has already run; keeps the first error.
fn run_all(steps: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    let mut first = Ok(());
    for step in steps {
        if let Err(e) = step {
            error!("Terminal cleanup step failed: {}", e);
            if first.is_ok() {
                first = Err(e);
            }
        }
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail(msg: &str) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, msg.to_string()))
    }

    #[test]
    fn test_run_all_ok() {
        assert!(run_all([Ok(()), Ok(()), Ok(())]).is_ok());
    }

    #[test]
    fn test_run_all_keeps_first_error() {
        let err = run_all([fail("raw mode"), Ok(()), fail("cursor")]).unwrap_err();
        assert_eq!(err.to_string(), "raw mode");
    }

    #[test]
    fn test_later_steps_run_after_a_failure() {
        let mut ran = Vec::new();
        let steps = ["raw mode", "screen", "cursor"].into_iter().map(|step| {
            ran.push(step);
            if step == "raw mode" {
                fail(step)
            } else {
                Ok(())
            }
        });

        assert!(run_all(steps).is_err());
        assert_eq!(ran, vec!["raw mode", "screen", "cursor"]);
    }

    #[test]
    fn test_restore_leaves_screen_and_shows_cursor() {
        let mut out = Vec::new();
        // Raw mode may not be available under the test harness; the writes
        // must happen either way.
        let _ = restore_terminal(&mut out);

        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\x1b[?1049l"), "{:?}", written);
        assert!(written.contains("\x1b[?25h"), "{:?}", written);
    }
}
