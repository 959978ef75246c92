//! Single-target `scale` and `stretch` commands.

use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};

use crate::{
    cli::TransformArgs,
    config::LayoutConfig,
    debug,
    layout::{Document, parse_document, write_document},
    log,
    logger::is_verbose,
    scale::{self, Resolution, ScaleError, Transformed},
};

/// Read and parse a layout file.
pub fn load_document(path: &Path) -> Result<Document> {
    if !path.is_file() {
        return Err(ScaleError::InputNotFound(path.to_path_buf()).into());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read `{}`", path.display()))?;
    let doc = parse_document(&content)
        .with_context(|| format!("Failed to parse `{}`", path.display()))?;

    debug!("parse"; "{} elements in {}", doc.element_count(), path.display());
    Ok(doc)
}

/// Scale the input proportionally to `WIDTH`x`HEIGHT`.
pub fn run_scale(args: &TransformArgs, config: &LayoutConfig) -> Result<()> {
    let doc = load_document(&args.input)?;
    let target = Resolution::new(args.width, args.height)?;

    let result = scale::transform(
        &doc,
        target,
        config.source_resolution()?,
        config.rules(),
        args.scale.dry_run,
    );
    emit(result, args.output.as_deref())
}

/// Stretch the input to `WIDTH`x`HEIGHT`, shrunk by the configured safe area.
pub fn run_stretch(args: &TransformArgs, config: &LayoutConfig) -> Result<()> {
    let doc = load_document(&args.input)?;
    let target = Resolution::new(args.width, args.height)?;

    let result = scale::stretch(
        &doc,
        target,
        config.source_resolution()?,
        config.safe_area()?,
        config.rules(),
        args.scale.dry_run,
    )?;
    emit(result, args.output.as_deref())
}

/// Write the transformed document to `output` or stdout.
///
/// For a dry run only the report is printed.
fn emit(result: Transformed, output: Option<&Path>) -> Result<()> {
    let Transformed { document, report } = result;

    if report.dry_run || is_verbose() {
        report.log_summary();
    }

    let Some(document) = document else {
        log!("dry-run"; "dry run complete, no output written");
        return Ok(());
    };

    let xml = write_document(&document)?;
    match output {
        Some(path) => {
            fs::write(path, &xml)
                .with_context(|| format!("Failed to write `{}`", path.display()))?;
            log!("scale"; "{} written ({})", path.display(), report.target);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const THEME: &str = r#"<theme>
    <view name="system">
        <image name="logo" extra="1 2">
            <pos>0.5 0.5</pos>
            <size>1920 1080</size>
            <maxLogoCount>4</maxLogoCount>
        </image>
        <text name="title">
            <fontSize>0.045</fontSize>
            <lineSpacing>1.5</lineSpacing>
        </text>
    </view>
</theme>"#;

    fn setup(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("theme.xml");
        fs::write(&input, content).unwrap();
        (dir, input)
    }

    fn transform_args(argv: &[&str]) -> (TransformArgs, LayoutConfig) {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        let mut config = LayoutConfig::default();
        config.apply_command_options(&cli);
        let (Commands::Scale { args } | Commands::Stretch { args, .. }) = cli.command else {
            panic!("expected a single-target command");
        };
        (args, config)
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.xml");
        let err = load_document(&missing).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaleError>(),
            Some(ScaleError::InputNotFound(path)) if path == &missing
        ));
    }

    #[test]
    fn test_malformed_input_is_reported() {
        let (_dir, input) = setup("<theme><view></theme>");
        let err = load_document(&input).unwrap_err();
        assert!(err.downcast_ref::<ScaleError>().is_some());
    }

    #[test]
    fn test_scale_writes_output_file() {
        let (dir, input) = setup(THEME);
        let output = dir.path().join("out.xml");
        let (input, output) = (input.to_str().unwrap(), output.to_str().unwrap());
        let (args, config) =
            transform_args(&["layscale", "scale", input, "960", "540", "-o", output]);

        run_scale(&args, &config).unwrap();

        let written = fs::read_to_string(args.output.unwrap()).unwrap();
        let doc = parse_document(&written).unwrap();
        assert_eq!(doc.root.find("size").unwrap().text.as_deref(), Some("960 540"));
        assert_eq!(doc.root.find("maxLogoCount").unwrap().text.as_deref(), Some("4"));
        assert!(written.contains("Layout: 960x540"));

        let image = doc.root.find("image").unwrap();
        assert_eq!(image.get_attr("extra"), Some("0.5 1"));
        assert_eq!(image.get_attr("name"), Some("logo"));
    }

    #[test]
    fn test_unknown_option_is_ignored() {
        let (dir, input) = setup(THEME);
        let output = dir.path().join("out.xml");
        let (input, output) = (input.to_str().unwrap(), output.to_str().unwrap());
        let (args, config) =
            transform_args(&["layscale", "scale", input, "1280", "720", "--bogus", "-o", output]);
        assert_eq!(args.unknown, ["--bogus"]);

        run_scale(&args, &config).unwrap();

        let written = fs::read_to_string(output).unwrap();
        assert!(written.contains("Layout: 1280x720"));
    }

    #[test]
    fn test_stretch_applies_safe_area() {
        let (dir, input) = setup(THEME);
        let output = dir.path().join("out.xml");
        let (input, output) = (input.to_str().unwrap(), output.to_str().unwrap());
        let (args, config) = transform_args(&[
            "layscale", "stretch", input, "1920", "1080", "--safe-area", "10", "-o", output,
        ]);

        run_stretch(&args, &config).unwrap();

        let written = fs::read_to_string(args.output.unwrap()).unwrap();
        let doc = parse_document(&written).unwrap();
        assert_eq!(doc.root.find("size").unwrap().text.as_deref(), Some("1728 972"));
        assert!(written.contains("Safe area: 10% of 1920x1080"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (dir, input) = setup(THEME);
        let output = dir.path().join("out.xml");
        let (input_arg, output_arg) = (input.to_str().unwrap(), output.to_str().unwrap());
        let (args, config) = transform_args(&[
            "layscale", "scale", input_arg, "1280", "720", "--dry-run", "-o", output_arg,
        ]);

        run_scale(&args, &config).unwrap();

        assert!(!output.exists());
        assert_eq!(fs::read_to_string(&input).unwrap(), THEME);
    }

    #[test]
    fn test_no_output_on_failure() {
        let (dir, input) = setup("<theme><pos>1 2</pos>");
        let output = dir.path().join("out.xml");
        let (input, output_arg) = (input.to_str().unwrap(), output.to_str().unwrap());
        let (args, config) =
            transform_args(&["layscale", "scale", input, "1280", "720", "-o", output_arg]);

        assert!(run_scale(&args, &config).is_err());
        assert!(!output.exists());
    }
}
