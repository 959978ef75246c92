//! `batch` command: one source layout, many target resolutions.
//!
//! All targets are transformed in parallel before anything is written, so a
//! failing target leaves the output directory untouched.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::{
    cli::{BatchArgs, Mode},
    config::LayoutConfig,
    layout::{Document, write_document},
    log,
    scale::{Resolution, Transformed, Transformer},
    utils::plural_count,
};

use super::transform::load_document;

/// One finished target, ready to be written.
struct Rendered {
    path: PathBuf,
    xml: String,
}

/// Transform the input for every `--targets` entry.
pub fn run_batch(args: &BatchArgs, config: &LayoutConfig) -> Result<()> {
    let doc = load_document(&args.input)?;
    let transformers = build_transformers(args, config)?;

    let results: Vec<(Resolution, Transformed)> = transformers
        .par_iter()
        .map(|(requested, transformer)| (*requested, transformer.transform(&doc)))
        .collect();

    if args.scale.dry_run {
        for (requested, result) in &results {
            log!("batch"; "{} ({})", requested, args.mode.as_str());
            result.report.log_summary();
        }
        log!("dry-run"; "dry run complete, {} checked", plural_count(results.len(), "target"));
        return Ok(());
    }

    let rendered = results
        .into_par_iter()
        .filter_map(|(requested, result)| {
            let Transformed { document, .. } = result;
            document.map(|doc| render(&doc, requested, args.mode, &args.out_dir))
        })
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create `{}`", args.out_dir.display()))?;
    for Rendered { path, xml } in &rendered {
        fs::write(path, xml).with_context(|| format!("Failed to write `{}`", path.display()))?;
        log!("batch"; "{}", path.display());
    }
    log!("batch"; "{} written", plural_count(rendered.len(), "layout"));
    Ok(())
}

/// Build one transformer per requested target, failing before any work is done.
fn build_transformers(
    args: &BatchArgs,
    config: &LayoutConfig,
) -> Result<Vec<(Resolution, Transformer)>> {
    let source = config.source_resolution()?;
    let safe_area = config.safe_area()?;
    let rules = config.rules();

    args.targets
        .iter()
        .map(|&target| -> Result<_> {
            let transformer = match args.mode {
                Mode::Scale => Transformer::new(target, source, rules.clone()),
                Mode::Stretch => Transformer::stretched(target, source, safe_area, rules.clone())
                    .with_context(|| format!("Invalid target {target}"))?,
            };
            Ok((target, transformer.dry_run(args.scale.dry_run)))
        })
        .collect()
}

fn render(doc: &Document, requested: Resolution, mode: Mode, out_dir: &Path) -> Result<Rendered> {
    Ok(Rendered {
        path: out_dir.join(output_file_name(requested, mode)),
        xml: write_document(doc)?,
    })
}

/// `{W}x{H}_{mode}.xml`, named after the requested (not inset) resolution.
pub fn output_file_name(target: Resolution, mode: Mode) -> String {
    format!("{target}_{}.xml", mode.as_str())
}
