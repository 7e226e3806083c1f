//! Core type definitions for blockmerge

use std::collections::BTreeSet;

/// Set of lowercase domain names extracted from one document.
///
/// Ordered so that walking a source is deterministic from run to run.
pub type NameSet = BTreeSet<String>;

/// A loaded and parsed block list source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Reference the source was loaded from (URL or `file:` path).
    pub id: String,
    /// Loaded from a local origin; exempt from HTTP status checks.
    pub trusted: bool,
    pub names: NameSet,
}

impl Source {
    pub fn new(id: impl Into<String>, trusted: bool, names: NameSet) -> Self {
        Self {
            id: id.into(),
            trusted,
            names,
        }
    }
}
