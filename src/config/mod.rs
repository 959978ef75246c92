//! Layout scaling configuration for `layscale.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── source     # [source]
//! │   └── scale      # [scale]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # LayoutConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                           |
//! |--------------|---------------------------------------------------|
//! | `[source]`   | Resolution the layout was authored for            |
//! | `[scale]`    | Extra scalable names, precision, safe-area inset  |
//! | `[policies]` | Per-name scaling policy overrides                 |
//!
//! Every value can be overridden from the command line; CLI flags win over
//! the file, and the file wins over built-in defaults.

pub mod section;
pub mod types;

pub use section::{ScaleSectionConfig, SourceConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, ScaleArgs},
    log,
    scale::{Resolution, SafeArea, ScalePolicy, ScaleRules},
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the current directory when `-C` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "layscale.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing layscale.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Path of the loaded config file (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Source resolution
    #[serde(default)]
    pub source: SourceConfig,

    /// Value scaling settings
    #[serde(default)]
    pub scale: ScaleSectionConfig,

    /// Per-name policy overrides, applied on top of the built-in table
    #[serde(default)]
    pub policies: BTreeMap<String, ScalePolicy>,
}

impl LayoutConfig {
    /// Load configuration and merge the command-line overrides into it.
    ///
    /// An explicit `-C` path must exist. Without it, `layscale.toml` in the
    /// current directory is used when present, built-in defaults otherwise.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = match Self::resolve_config_path(cli)? {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.config_path = Some(path);
                config
            }
            None => Self::default(),
        };

        config.apply_command_options(cli);
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config file to read, if any.
    fn resolve_config_path(cli: &Cli) -> Result<Option<PathBuf>> {
        if let Some(path) = &cli.config {
            if !path.exists() {
                bail!(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    path.display()
                )));
            }
            return Ok(Some(path.clone()));
        }

        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let path = cwd.join(DEFAULT_CONFIG_FILE);
        Ok(path.is_file().then_some(path))
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// Unknown fields are reported and skipped; loading continues.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    pub(crate) fn apply_command_options(&mut self, cli: &Cli) {
        self.apply_scale_args(cli.command.scale_args());
        Self::update_option(&mut self.scale.safe_area, cli.command.safe_area().as_ref());
    }

    /// Apply shared scaling arguments from CLI.
    fn apply_scale_args(&mut self, args: &ScaleArgs) {
        Self::update_option(&mut self.source.width, args.source_width.as_ref());
        Self::update_option(&mut self.source.height, args.source_height.as_ref());
        Self::update_option(&mut self.scale.precision, args.precision.as_ref());

        // Names from the command line extend the configured ones.
        for name in &args.tags {
            if !self.scale.extra_names.contains(name) {
                self.scale.extra_names.push(name.clone());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // derived values
    // ========================================================================

    /// Built-in rules extended with the configured names and policy overrides.
    pub fn rules(&self) -> ScaleRules {
        let rules = ScaleRules::builtin().with_extra_names(self.scale.extra_names.iter().cloned());
        self.policies
            .iter()
            .fold(rules, |rules, (name, policy)| rules.with_policy(name.clone(), *policy))
    }

    pub fn source_resolution(&self) -> Result<Resolution> {
        Ok(self.source.resolution()?)
    }

    pub fn safe_area(&self) -> Result<SafeArea> {
        Ok(self.scale.safe_area()?)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the merged configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.source.validate(&mut diag);
        self.scale.validate(&mut diag);

        for name in self.policies.keys() {
            if name.trim().is_empty() {
                diag.error(FieldPath::new("policies"), "policy names must not be empty");
            }
        }

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> LayoutConfig {
    let (parsed, ignored) = LayoutConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
