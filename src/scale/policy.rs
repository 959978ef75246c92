//! Name classification: which numbers of a value scale by which axis.
//!
//! Every element or attribute name resolves to exactly one [`ScalePolicy`]
//! through an exact-match, case-sensitive table. Names missing from the table
//! fall back to [`ScalePolicy::DefaultAlternating`].
//!
//! | Policy               | Built-in names                                              |
//! |----------------------|-------------------------------------------------------------|
//! | `y-axis-single`      | fontSize, selectorHeight, selectorOffsetY, horizontalMargin, lineSpacing |
//! | `xy-pair`            | pos, size, maxSize, minSize, logoSize, padding, margin, cornerSize |
//! | `count-only`         | maxLogoCount                                                |
//! | `default-alternating`| everything else                                             |

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// How the numeric tokens of a value are rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalePolicy {
    /// Exactly one number, scaled by the vertical factor.
    YAxisSingle,
    /// `x y` scaled by (X, Y); a lone number scales by X.
    XyPair,
    /// Cardinality, never scaled.
    CountOnly,
    /// Even positions by X, odd positions by Y.
    DefaultAlternating,
}

/// Height-anchored single metrics. `horizontalMargin` historically follows Y.
const Y_AXIS_SINGLE: &[&str] = &[
    "fontSize",
    "selectorHeight",
    "selectorOffsetY",
    "horizontalMargin",
    "lineSpacing",
];

const XY_PAIR: &[&str] = &[
    "pos",
    "size",
    "maxSize",
    "minSize",
    "logoSize",
    "padding",
    "margin",
    "cornerSize",
];

const COUNT_ONLY: &[&str] = &["maxLogoCount"];

/// Policy table plus the set of element names whose text is scaled.
///
/// Built per transformation; extra names never leak into another run.
#[derive(Debug, Clone)]
pub struct ScaleRules {
    policies: HashMap<String, ScalePolicy>,
    scalable: HashSet<String>,
}

impl ScaleRules {
    /// Built-in table. Every built-in name is also scalable.
    pub fn builtin() -> Self {
        let groups = [
            (Y_AXIS_SINGLE, ScalePolicy::YAxisSingle),
            (XY_PAIR, ScalePolicy::XyPair),
            (COUNT_ONLY, ScalePolicy::CountOnly),
        ];

        let mut policies = HashMap::new();
        for (names, policy) in groups {
            for name in names {
                policies.insert((*name).to_string(), policy);
            }
        }
        let scalable = policies.keys().cloned().collect();

        Self { policies, scalable }
    }

    /// Add element names whose text should be scaled.
    ///
    /// Names without a table entry classify as `DefaultAlternating`.
    pub fn with_extra_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scalable.extend(
            names
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.is_empty()),
        );
        self
    }

    /// Classify `name` explicitly and mark it scalable.
    pub fn with_policy(mut self, name: impl Into<String>, policy: ScalePolicy) -> Self {
        let name = name.into();
        self.scalable.insert(name.clone());
        self.policies.insert(name, policy);
        self
    }

    /// Resolve the policy for an element or attribute name.
    #[inline]
    pub fn policy(&self, name: &str) -> ScalePolicy {
        self.policies
            .get(name)
            .copied()
            .unwrap_or(ScalePolicy::DefaultAlternating)
    }

    /// Whether the text content of an element called `name` is scaled.
    #[inline]
    pub fn is_scalable(&self, name: &str) -> bool {
        self.scalable.contains(name)
    }

    pub fn scalable_len(&self) -> usize {
        self.scalable.len()
    }
}

impl Default for ScaleRules {
    fn default() -> Self {
        Self::builtin()
    }
}
