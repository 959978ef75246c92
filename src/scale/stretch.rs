//! Stretch entry point: non-uniform fill with an optional safe-area inset.
//!
//! The inset shrinks the target resolution before the ordinary transform;
//! the source resolution is left alone.

use super::transform::{Inset, Transformed, Transformer};
use super::{Resolution, ScaleError, ScaleRules};
use crate::layout::Document;

/// Safe-area inset percentage in `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct SafeArea(f64);

impl SafeArea {
    pub const NONE: Self = Self(0.0);

    pub fn new(percent: f64) -> Result<Self, ScaleError> {
        if !(0.0..100.0).contains(&percent) {
            return Err(ScaleError::InvalidSafeArea(percent));
        }
        Ok(Self(percent))
    }

    #[inline]
    pub const fn percent(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Shrink `target` by the inset, rounding each axis down.
    pub fn apply(self, target: Resolution) -> Result<Resolution, ScaleError> {
        if self.is_none() {
            return Ok(target);
        }
        let keep = 1.0 - self.0 / 100.0;
        let shrink = |px: u32| (f64::from(px) * keep).floor() as u32;
        Resolution::new(shrink(target.width()), shrink(target.height()))
    }
}

impl Transformer {
    /// A transformer for `target` after applying `safe_area`.
    pub fn stretched(
        target: Resolution,
        source: Resolution,
        safe_area: SafeArea,
        rules: ScaleRules,
    ) -> Result<Self, ScaleError> {
        let adjusted = safe_area.apply(target)?;
        let transformer = Self::new(adjusted, source, rules);
        if safe_area.is_none() {
            return Ok(transformer);
        }
        Ok(transformer.with_inset(Inset {
            percent: safe_area.percent(),
            original: target,
        }))
    }
}

/// Stretch `doc` to fill `target`, shrunk by `safe_area`.
pub fn stretch(
    doc: &Document,
    target: Resolution,
    source: Resolution,
    safe_area: SafeArea,
    rules: ScaleRules,
    dry_run: bool,
) -> Result<Transformed, ScaleError> {
    let transformer = Transformer::stretched(target, source, safe_area, rules)?;
    Ok(transformer.dry_run(dry_run).transform(doc))
}
