//! Console minesweeper driven by a seed file.
//!
//! A [`seed::Seed`] describes the field, [`data::Board`] derives the
//! adjacency counts, [`logic::Game`] applies player commands and
//! [`session::Session`] runs the prompt loop over any reader and writer.

pub mod banner;
pub mod config;
pub mod data;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod session;
