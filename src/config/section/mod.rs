//! Configuration section definitions.
//!
//! Each module corresponds to a section in `layscale.toml`:
//!
//! | Module   | TOML Section | Purpose                                   |
//! |----------|--------------|-------------------------------------------|
//! | `source` | `[source]`   | Reference resolution the layout targets   |
//! | `scale`  | `[scale]`    | Extra names, precision, safe-area inset   |
//!
//! The free-form `[policies]` table lives on the root config.

mod scale;
mod source;

pub use scale::ScaleSectionConfig;
pub use source::SourceConfig;
