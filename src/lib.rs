//! Grid snake for the terminal.
//!
//! The game itself (`grid`, `snake`, `food`, `game`) has no I/O. A `session`
//! wraps it in the start / game-over / restart lifecycle and owns the tick
//! timer; `render`, `input` and `app` connect it to a ratatui terminal.

pub mod app;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod render;
pub mod session;
pub mod snake;
pub mod terminal;
pub mod timer;
