//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::log;
use crate::scale::Resolution;

/// Rescale XML layout descriptions to another screen resolution
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: layscale.toml in the current directory, if present)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print every changed value and other debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scale a layout proportionally to a target resolution
    #[command(visible_alias = "s")]
    Scale {
        #[command(flatten)]
        args: TransformArgs,
    },

    /// Stretch a layout to fill a target resolution, with an optional safe-area inset
    Stretch {
        #[command(flatten)]
        args: TransformArgs,

        /// Inset the target by this percentage on both axes (0 to 10)
        #[arg(long, value_name = "PERCENT")]
        safe_area: Option<f64>,
    },

    /// Transform one layout to several target resolutions at once
    #[command(visible_alias = "b")]
    Batch {
        #[command(flatten)]
        args: BatchArgs,
    },
}

/// How a layout is mapped onto the target resolution.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Proportional scaling
    #[default]
    Scale,
    /// Independent axis stretching with safe-area inset
    Stretch,
}

impl Mode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scale => "scale",
            Self::Stretch => "stretch",
        }
    }
}

/// Arguments for the single-target `scale` and `stretch` commands.
#[derive(clap::Args, Debug, Clone)]
pub struct TransformArgs {
    /// Layout document to transform
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Target width in pixels
    #[arg(value_name = "WIDTH", value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Target height in pixels
    #[arg(value_name = "HEIGHT", value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub scale: ScaleArgs,

    /// Unrecognized options, reported and ignored
    #[arg(hide = true, allow_hyphen_values = true, value_name = "OPTION")]
    pub unknown: Vec<String>,
}

/// Arguments for the `batch` command.
#[derive(clap::Args, Debug, Clone)]
pub struct BatchArgs {
    /// Layout document to transform
    #[arg(value_name = "INPUT", value_hint = clap::ValueHint::FilePath)]
    pub input: PathBuf,

    /// Target resolutions, e.g. `1366x768,1280x720`
    #[arg(short, long, value_delimiter = ',', required = true, value_name = "WxH")]
    pub targets: Vec<Resolution>,

    /// Transformation applied to every target
    #[arg(short, long, value_enum, default_value_t = Mode::Scale)]
    pub mode: Mode,

    /// Safe-area inset percentage used by `--mode stretch`
    #[arg(long, value_name = "PERCENT")]
    pub safe_area: Option<f64>,

    /// Directory receiving `{W}x{H}_{mode}.xml` files
    #[arg(short = 'd', long, default_value = ".", value_hint = clap::ValueHint::DirPath)]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub scale: ScaleArgs,

    /// Unrecognized options, reported and ignored
    #[arg(hide = true, allow_hyphen_values = true, value_name = "OPTION")]
    pub unknown: Vec<String>,
}

/// Scaling options shared by every command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScaleArgs {
    /// Width the layout was authored for (default: 1920)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub source_width: Option<u32>,

    /// Height the layout was authored for (default: 1080)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(1..))]
    pub source_height: Option<u32>,

    /// Extra element names whose text is scaled, comma separated
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub tags: Vec<String>,

    /// Requested decimal precision (advisory, output uses 6)
    #[arg(long)]
    pub precision: Option<u32>,

    /// Report scale factors and changes without producing output
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Commands {
    /// Options shared by every command.
    pub fn scale_args(&self) -> &ScaleArgs {
        match self {
            Self::Scale { args } | Self::Stretch { args, .. } => &args.scale,
            Self::Batch { args } => &args.scale,
        }
    }

    /// Command-line arguments that matched no option.
    pub fn unknown_options(&self) -> &[String] {
        match self {
            Self::Scale { args } | Self::Stretch { args, .. } => &args.unknown,
            Self::Batch { args } => &args.unknown,
        }
    }

    /// Log every unrecognized option. Processing continues without them.
    pub fn warn_unknown_options(&self) {
        for option in self.unknown_options() {
            log!("warning"; "unknown option: {option}");
        }
    }

    /// Safe-area override given on the command line, if any.
    pub fn safe_area(&self) -> Option<f64> {
        match self {
            Self::Scale { .. } => None,
            Self::Stretch { safe_area, .. } => *safe_area,
            Self::Batch { args } => args.safe_area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scale() {
        let cli = Cli::try_parse_from([
            "layscale", "scale", "theme.xml", "1280", "720", "--tags", "gameCount,origin", "-n",
        ])
        .unwrap();
        let Commands::Scale { args } = &cli.command else {
            panic!("expected scale command");
        };
        assert_eq!(args.input, PathBuf::from("theme.xml"));
        assert_eq!((args.width, args.height), (1280, 720));
        assert_eq!(args.scale.tags, ["gameCount", "origin"]);
        assert!(args.scale.dry_run);
        assert!(cli.command.safe_area().is_none());
    }

    #[test]
    fn test_parse_stretch_with_global_options() {
        let cli = Cli::try_parse_from([
            "layscale", "stretch", "theme.xml", "1920", "1080", "--safe-area", "5", "-v", "-C",
            "custom.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(cli.command.safe_area(), Some(5.0));
    }

    #[test]
    fn test_parse_batch_targets() {
        let cli = Cli::try_parse_from([
            "layscale", "batch", "theme.xml", "--targets", "1366x768,1280x720", "--mode", "stretch",
        ])
        .unwrap();
        let Commands::Batch { args } = &cli.command else {
            panic!("expected batch command");
        };
        let targets: Vec<String> = args.targets.iter().map(ToString::to_string).collect();
        assert_eq!(targets, ["1366x768", "1280x720"]);
        assert_eq!(args.mode, Mode::Stretch);
        assert_eq!(args.out_dir, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_options_are_collected() {
        let cli = Cli::try_parse_from([
            "layscale", "scale", "theme.xml", "1280", "720", "--bogus", "-n", "--color-depth=8",
        ])
        .unwrap();
        assert_eq!(cli.command.unknown_options(), ["--bogus", "--color-depth=8"]);
        assert!(cli.command.scale_args().dry_run);

        let cli = Cli::try_parse_from([
            "layscale", "batch", "theme.xml", "--targets", "1280x720", "--fast",
        ])
        .unwrap();
        assert_eq!(cli.command.unknown_options(), ["--fast"]);
        cli.command.warn_unknown_options();
    }

    #[test]
    fn test_malformed_positional_arguments() {
        for argv in [
            vec!["layscale", "scale", "theme.xml", "wide", "720"],
            vec!["layscale", "scale", "theme.xml", "0", "720"],
            vec!["layscale", "scale", "theme.xml", "1280"],
            vec!["layscale", "batch", "theme.xml", "--targets", "1280by720"],
        ] {
            assert!(Cli::try_parse_from(argv.iter().copied()).is_err(), "{argv:?}");
        }
    }
}
