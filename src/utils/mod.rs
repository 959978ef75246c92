//! Utility modules shared across commands.

mod plural;

pub use plural::plural_count;
