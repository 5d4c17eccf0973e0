//! Procedurally generated maze game.
//!
//! The core ([`grid`], [`maze`], [`goal`], [`game`]) is synchronous and
//! I/O free. [`input`] and [`render`] adapt it to a crossterm terminal.

pub mod config;
pub mod error;
pub mod game;
pub mod goal;
pub mod grid;
pub mod input;
pub mod maze;
pub mod render;

pub use error::MazeError;
pub use game::{new_game, Game, GameState, MoveOutcome, Status};
pub use grid::{Cell, Direction, Grid, Pos};
