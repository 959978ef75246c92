//! Resolution scaling engine.
//!
//! # Modules
//!
//! - `policy`: name → [`ScalePolicy`] table and the scalable-name set
//! - `value`: rescales the numbers inside one raw value
//! - `factors`: [`Resolution`] and [`ScaleFactors`]
//! - `transform`: tree walk producing a new document plus a [`ScaleReport`]
//! - `stretch`: safe-area inset in front of `transform`

mod error;
mod factors;
mod policy;
mod stretch;
mod transform;
pub mod value;

pub use error::ScaleError;
pub use factors::{DEFAULT_SOURCE, Resolution, ScaleFactors};
pub use policy::{ScalePolicy, ScaleRules};
pub use stretch::{SafeArea, stretch};
pub use transform::{ScaleReport, Transformed, Transformer, ValueChange, transform};
pub use value::scale_value;
