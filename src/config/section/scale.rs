//! `[scale]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scale]
//! extra_names = ["gameCount"] # Extra element names whose text is scaled
//! precision = 6               # Advisory, output is always 6 decimals
//! safe_area = 5.0             # Stretch inset percent, 0 to 10
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::scale::value::OUTPUT_PRECISION;
use crate::scale::{SafeArea, ScaleError};

/// Largest accepted safe-area inset (exclusive).
pub const MAX_SAFE_AREA: f64 = 10.0;

/// f64 cannot carry more significant decimals than this.
const MAX_PRECISION: u32 = 15;

/// Value-scaling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSectionConfig {
    /// Element names scaled in addition to the built-in set.
    pub extra_names: Vec<String>,

    /// Requested decimal precision (advisory).
    pub precision: u32,

    /// Safe-area inset percentage used by `stretch`.
    pub safe_area: f64,
}

impl Default for ScaleSectionConfig {
    fn default() -> Self {
        Self {
            extra_names: Vec::new(),
            precision: OUTPUT_PRECISION as u32,
            safe_area: 0.0,
        }
    }
}

impl ScaleSectionConfig {
    pub fn safe_area(&self) -> Result<SafeArea, ScaleError> {
        SafeArea::new(self.safe_area)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(0.0..MAX_SAFE_AREA).contains(&self.safe_area) {
            diag.error_with_hint(
                FieldPath::new("scale.safe_area"),
                format!("safe area {}% is out of range", self.safe_area),
                format!("use a percentage from 0 up to (not including) {MAX_SAFE_AREA}"),
            );
        }

        if self.precision > MAX_PRECISION {
            diag.error(
                FieldPath::new("scale.precision"),
                format!("precision {} exceeds {MAX_PRECISION} digits", self.precision),
            );
        } else if self.precision as usize != OUTPUT_PRECISION {
            diag.warn(
                FieldPath::new("scale.precision"),
                format!("precision is advisory, output uses {OUTPUT_PRECISION} decimals"),
            );
        }
    }
}
