use std::collections::HashSet;

use serde::Serialize;

use bm_core::suffix::{cmp_names, has_suffix};
use bm_core::types::Source;

/// Outcome for one name during the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Already written under an earlier source, or covered by a broader
    /// name present in any source.
    Duplicate,
    /// Equal to, or a sub-domain of, an excluded name.
    Whitelisted,
    /// Written under the current source.
    Kept,
}

/// State threaded through both merge passes.
#[derive(Debug, Default)]
pub struct AggregateState {
    /// Union of every source's names.
    pub all_names: HashSet<String>,
    /// Names already written under some source.
    pub unique_names: HashSet<String>,
}

impl AggregateState {
    /// First pass: collect every name from every source.
    pub fn from_sources(sources: &[Source]) -> Self {
        let mut state = Self::default();
        for source in sources {
            state.all_names.extend(source.names.iter().cloned());
        }
        state
    }

    /// Decide what happens to `name`, committing it when kept.
    ///
    /// Duplicates are checked before exclusions, so a name already covered
    /// elsewhere is counted as a duplicate even if it is also whitelisted.
    pub fn classify(&mut self, name: &str, exclusions: &HashSet<String>) -> Disposition {
        if has_suffix(&self.all_names, name) || self.unique_names.contains(name) {
            return Disposition::Duplicate;
        }

        if has_suffix(exclusions, name) || exclusions.contains(name) {
            return Disposition::Whitelisted;
        }

        self.unique_names.insert(name.to_string());
        Disposition::Kept
    }
}

/// Merge result for one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub ignored_duplicates: usize,
    pub ignored_whitelisted: usize,
    /// Names written for this source, in reversed-label order.
    pub names: Vec<String>,
}

impl SourceReport {
    pub fn blacklisted(&self) -> usize {
        self.names.len()
    }
}

/// Merge sources into per-source reports.
///
/// Source order matters: a name is written under the first source that
/// contributes it and survives `exclusions`.
pub fn merge_sources(sources: &[Source], exclusions: &HashSet<String>) -> Vec<SourceReport> {
    let mut state = AggregateState::from_sources(sources);

    sources
        .iter()
        .map(|source| merge_source(&mut state, source, exclusions))
        .collect()
}

fn merge_source(state: &mut AggregateState, source: &Source, exclusions: &HashSet<String>) -> SourceReport {
    let mut ignored_duplicates = 0usize;
    let mut ignored_whitelisted = 0usize;
    let mut names = Vec::new();

    for name in &source.names {
        match state.classify(name, exclusions) {
            Disposition::Duplicate => ignored_duplicates += 1,
            Disposition::Whitelisted => ignored_whitelisted += 1,
            Disposition::Kept => names.push(name.clone()),
        }
    }

    names.sort_by(|a, b| cmp_names(a, b));

    SourceReport {
        source: source.id.clone(),
        ignored_duplicates,
        ignored_whitelisted,
        names,
    }
}
