//! Falling-block puzzle engine.
//!
//! [`game`] is the pure transition engine. [`session`], [`config`],
//! [`replay`] and [`ui`] make up the terminal host around it.

pub mod config;
pub mod game;
pub mod replay;
pub mod session;
pub mod ui;
