//! Config field path used in diagnostics.

/// Dotted path of a config field, e.g. `source.width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}
