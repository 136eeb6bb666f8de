//! Core library for the ladder-split command line application.
//!
//! A career ladder is a table whose rows are competency areas and whose
//! columns are job levels. The library turns every level column into a flat
//! list of behavior statements. Table loading and per-level writers live under
//! [`io`], the table and statement types inside [`model`], the cell splitting
//! rules in [`split`], and the run orchestration under [`ladder`].

pub mod error;
pub mod io;
pub mod ladder;
pub mod model;
pub mod split;

pub use error::{Result, ToolError};
