//! Command-line interface module.

mod args;
pub mod batch;
pub mod transform;

pub use args::{BatchArgs, Cli, Commands, Mode, ScaleArgs, TransformArgs};
