//! Tree transformer.
//!
//! Walks a layout pre-order in document order and rebuilds it with every
//! scalable value rescaled. The input document is never mutated, so one
//! parsed source can be scaled to many targets.
//!
//! - Element text is scaled only when the element name is in the scalable
//!   set, classified by the element name.
//! - Attribute values containing a digit are always scaled, classified by
//!   the attribute name (not the owning element).

use std::collections::HashMap;

use super::value::scale_value;
use super::{Resolution, ScaleFactors, ScaleRules};
use crate::layout::{Content, Document, Node};
use crate::log;
use crate::utils::plural_count;

/// Tool name recorded in the provenance comment.
const GENERATOR: &str = env!("CARGO_PKG_NAME");

/// Safe-area inset applied before a stretch, kept for provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inset {
    pub percent: f64,
    pub original: Resolution,
}

/// One rescaled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    /// Element path, e.g. `theme/view[0]/image[1]`.
    pub path: String,
    /// `text` for element text, `@name` for attributes.
    pub key: String,
    pub before: String,
    pub after: String,
}

/// What a transformation did (or would do, for a dry run).
#[derive(Debug, Clone)]
pub struct ScaleReport {
    pub source: Resolution,
    pub target: Resolution,
    pub factors: ScaleFactors,
    pub inset: Option<Inset>,
    pub dry_run: bool,
    pub changes: Vec<ValueChange>,
}

impl ScaleReport {
    /// Provenance comment body placed first in the root element.
    pub fn provenance(&self) -> String {
        let safe_area = self
            .inset
            .map(|inset| format!("Safe area: {}% of {}\n", inset.percent, inset.original))
            .unwrap_or_default();
        format!(
            "\nLayout: {}\nGenerated by {GENERATOR} from {}\nScale factors: X={:.6}, Y={:.6}\n{safe_area}",
            self.target, self.source, self.factors.x, self.factors.y
        )
    }

    /// Print factors and resolutions (and every change when verbose or dry).
    pub fn log_summary(&self) {
        let module = if self.dry_run { "dry-run" } else { "scale" };
        log!(module; "scaling factors: X={:.6}, Y={:.6}", self.factors.x, self.factors.y);
        log!(module; "source: {}", self.source);
        if let Some(inset) = self.inset {
            log!(module; "safe area: {}%", inset.percent);
            log!(module; "adjusted to: {}", self.target);
        } else {
            log!(module; "target: {}", self.target);
        }

        if self.dry_run || crate::logger::is_verbose() {
            for change in &self.changes {
                log!(module; "{} {}: {} -> {}", change.path, change.key, change.before, change.after);
            }
        }
        log!(module; "{}", plural_count(self.changes.len(), "value change"));
    }
}

/// Result of a transformation. `document` is `None` for a dry run.
#[derive(Debug, Clone)]
pub struct Transformed {
    pub document: Option<Document>,
    pub report: ScaleReport,
}

/// Scales layouts from one resolution to another.
///
/// Factors and rules are fixed at construction and shared read-only by the
/// whole walk.
#[derive(Debug, Clone)]
pub struct Transformer {
    source: Resolution,
    target: Resolution,
    factors: ScaleFactors,
    rules: ScaleRules,
    inset: Option<Inset>,
    dry_run: bool,
}

impl Transformer {
    pub fn new(target: Resolution, source: Resolution, rules: ScaleRules) -> Self {
        Self {
            source,
            target,
            factors: ScaleFactors::between(target, source),
            rules,
            inset: None,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub(super) fn with_inset(mut self, inset: Inset) -> Self {
        self.inset = Some(inset);
        self
    }

    /// Run the full walk. A dry run computes everything but emits no document.
    pub fn transform(&self, doc: &Document) -> Transformed {
        let mut changes = Vec::new();
        let root_path = doc.root.name.clone();
        let mut root = self.scale_node(&doc.root, &root_path, &mut changes);

        let report = ScaleReport {
            source: self.source,
            target: self.target,
            factors: self.factors,
            inset: self.inset,
            dry_run: self.dry_run,
            changes,
        };

        let document = if self.dry_run {
            None
        } else {
            root.children
                .insert(0, Content::Comment(report.provenance()));
            Some(Document::new(root))
        };

        Transformed { document, report }
    }

    fn scale_node(&self, node: &Node, path: &str, changes: &mut Vec<ValueChange>) -> Node {
        let mut out = Node {
            name: node.name.clone(),
            text: node.text.clone(),
            attributes: node.attributes.clone(),
            children: Vec::with_capacity(node.children.len()),
        };

        if self.rules.is_scalable(&node.name)
            && let Some(text) = node.text.as_deref().map(str::trim)
            && !text.is_empty()
        {
            let scaled = scale_value(text, self.factors, self.rules.policy(&node.name));
            if scaled != text {
                changes.push(ValueChange {
                    path: path.to_string(),
                    key: "text".to_string(),
                    before: text.to_string(),
                    after: scaled.to_string(),
                });
                out.text = Some(scaled.into_owned());
            }
        }

        for attr in &mut out.attributes {
            if !attr.value.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }
            let scaled = scale_value(&attr.value, self.factors, self.rules.policy(&attr.name));
            if scaled != attr.value.as_str() {
                let scaled = scaled.into_owned();
                changes.push(ValueChange {
                    path: path.to_string(),
                    key: format!("@{}", attr.name),
                    before: std::mem::replace(&mut attr.value, scaled.clone()),
                    after: scaled,
                });
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for child in &node.children {
            match child {
                Content::Element(child) => {
                    let index = seen.entry(child.name.as_str()).or_default();
                    let child_path = format!("{path}/{}[{index}]", child.name);
                    *index += 1;
                    out.children
                        .push(Content::Element(self.scale_node(child, &child_path, changes)));
                }
                Content::Comment(_) | Content::Text(_) => out.children.push(child.clone()),
            }
        }

        out
    }
}

/// Scale `doc` from `source` to `target` using `rules`.
pub fn transform(
    doc: &Document,
    target: Resolution,
    source: Resolution,
    rules: ScaleRules,
    dry_run: bool,
) -> Transformed {
    Transformer::new(target, source, rules)
        .dry_run(dry_run)
        .transform(doc)
}
