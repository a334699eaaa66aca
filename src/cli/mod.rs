//! CLI layer: argument parsing and top-level command surface.

pub mod args;

pub use args::{Args, Commands, Verbosity};
