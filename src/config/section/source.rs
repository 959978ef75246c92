//! `[source]` section configuration.
//!
//! The resolution the input layout was authored for.
//!
//! # Example
//!
//! ```toml
//! [source]
//! width = 1920                # Reference width in pixels
//! height = 1080               # Reference height in pixels
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::scale::{DEFAULT_SOURCE, Resolution, ScaleError};

/// Source resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Reference width in pixels.
    pub width: u32,

    /// Reference height in pixels.
    pub height: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SOURCE.width(),
            height: DEFAULT_SOURCE.height(),
        }
    }
}

impl SourceConfig {
    pub fn resolution(&self) -> Result<Resolution, ScaleError> {
        Resolution::new(self.width, self.height)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let fields = [
            (FieldPath::new("source.width"), self.width),
            (FieldPath::new("source.height"), self.height),
        ];
        for (field, value) in fields {
            if value == 0 {
                diag.error_with_hint(
                    field,
                    "source dimension must be positive",
                    format!("the default reference resolution is {DEFAULT_SOURCE}"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_source_config() {
        let config = test_parse_config("[source]\nwidth = 1280\nheight = 720");
        assert_eq!(config.source.width, 1280);
        assert_eq!(config.source.height, 720);
        assert_eq!(config.source.resolution().unwrap().to_string(), "1280x720");
    }

    #[test]
    fn test_source_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.source.width, 1920);
        assert_eq!(config.source.height, 1080);
    }

    #[test]
    fn test_source_config_partial() {
        let config = test_parse_config("[source]\nheight = 1200");
        assert_eq!(config.source.width, 1920);
        assert_eq!(config.source.height, 1200);
    }

    #[test]
    fn test_zero_dimension_is_reported() {
        let config = test_parse_config("[source]\nwidth = 0");
        let mut diag = ConfigDiagnostics::new();
        config.source.validate(&mut diag);
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].field.as_str(), "source.width");
    }
}
