//! Run driver: load every source, then merge.

use std::collections::HashSet;

use log::{error, info};
use serde::Serialize;

use bm_core::types::Source;

use crate::aggregator::{merge_sources, SourceReport};
use crate::loader::{ContentLoader, LoadedContent, RetrievalError};
use crate::parser::{ListParser, TimeRestrictedList};

/// Error type for a blacklist build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
    #[error("Invalid recognizer pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// What to load. References are URLs or `file:` paths, already resolved.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Block list sources in priority order.
    pub sources: Vec<String>,
    pub whitelist: Option<String>,
    pub time_restricted: Option<String>,
    /// Skip sources that fail to load instead of aborting.
    pub ignore_retrieval_failure: bool,
}

#[derive(Debug)]
pub struct BuildOutput {
    pub time_restricted: Option<TimeRestrictedList>,
    pub reports: Vec<SourceReport>,
    /// Failures tolerated in `ignore_retrieval_failure` mode.
    pub failures: Vec<RetrievalError>,
}

/// Machine-readable totals for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub sources: Vec<SourceSummary>,
    pub failed_sources: Vec<String>,
    pub time_restricted_names: usize,
    pub total_blacklisted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub source: String,
    pub ignored_duplicates: usize,
    pub ignored_whitelisted: usize,
    pub blacklisted: usize,
}

impl BuildOutput {
    pub fn summary(&self) -> RunSummary {
        let sources: Vec<SourceSummary> = self
            .reports
            .iter()
            .map(|r| SourceSummary {
                source: r.source.clone(),
                ignored_duplicates: r.ignored_duplicates,
                ignored_whitelisted: r.ignored_whitelisted,
                blacklisted: r.blacklisted(),
            })
            .collect();

        RunSummary {
            total_blacklisted: sources.iter().map(|s| s.blacklisted).sum(),
            sources,
            failed_sources: self.failures.iter().map(|e| e.reference().to_string()).collect(),
            time_restricted_names: self.time_restricted.as_ref().map_or(0, |t| t.names.len()),
        }
    }
}

/// Build the merged blacklist.
///
/// Sources load one at a time in configured order, followed by the
/// time-restricted list and the whitelist. Every time-restricted name,
/// labelled or not, is excluded from the output along with the whitelist.
pub fn build_blacklist<L: ContentLoader + ?Sized>(
    loader: &L,
    options: &BuildOptions,
) -> Result<BuildOutput, BuildError> {
    let parser = ListParser::new()?;
    let mut failures = Vec::new();

    let mut sources = Vec::with_capacity(options.sources.len());
    for reference in &options.sources {
        if let Some(content) = load_or_skip(loader, reference, options, &mut failures)? {
            let names = parser.parse_list(&content.text, content.trusted);
            info!("[{}]: {} names", reference, names.len());
            sources.push(Source::new(reference.clone(), content.trusted, names));
        }
    }

    let mut exclusions: HashSet<String> = HashSet::new();

    let mut time_restricted = None;
    if let Some(reference) = &options.time_restricted {
        if let Some(content) = load_or_skip(loader, reference, options, &mut failures)? {
            let list = parser.parse_time_restricted_list(&content.text);
            exclusions.extend(list.names.iter().cloned());
            time_restricted = Some(list);
        }
    }

    if let Some(reference) = &options.whitelist {
        if let Some(content) = load_or_skip(loader, reference, options, &mut failures)? {
            exclusions.extend(parser.parse_list(&content.text, content.trusted));
        }
    }

    let reports = merge_sources(&sources, &exclusions);

    Ok(BuildOutput {
        time_restricted,
        reports,
        failures,
    })
}

fn load_or_skip<L: ContentLoader + ?Sized>(
    loader: &L,
    reference: &str,
    options: &BuildOptions,
    failures: &mut Vec<RetrievalError>,
) -> Result<Option<LoadedContent>, BuildError> {
    info!("Loading data from [{}]", reference);

    match loader.load(reference) {
        Ok(content) => Ok(Some(content)),
        Err(e) => {
            error!("{}", e);
            if !options.ignore_retrieval_failure {
                return Err(e.into());
            }
            failures.push(e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::report::render_blacklist;

    #[derive(Default)]
    struct MemoryLoader {
        documents: HashMap<String, String>,
    }

    impl MemoryLoader {
        fn with(mut self, reference: &str, text: &str) -> Self {
            self.documents.insert(reference.to_string(), text.to_string());
            self
        }
    }

    impl ContentLoader for MemoryLoader {
        fn load(&self, reference: &str) -> Result<LoadedContent, RetrievalError> {
            match self.documents.get(reference) {
                Some(text) => Ok(LoadedContent {
                    text: text.clone(),
                    trusted: reference.starts_with("file:"),
                }),
                None => Err(RetrievalError::HttpStatus {
                    reference: reference.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn options(sources: &[&str]) -> BuildOptions {
        BuildOptions {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_whitelisted_suffix() {
        let loader = MemoryLoader::default()
            .with("https://lists.example/x.txt", "||ads.example.com^\n# comment\ntracker.test.io\n")
            .with("file:whitelist.txt", "example.com\n");
        let mut opts = options(&["https://lists.example/x.txt"]);
        opts.whitelist = Some("file:whitelist.txt".into());

        let output = build_blacklist(&loader, &opts).unwrap();
        let report = &output.reports[0];
        assert_eq!(report.names, vec!["tracker.test.io"]);
        assert_eq!(report.ignored_whitelisted, 1);
        assert_eq!(report.ignored_duplicates, 0);
    }

    #[test]
    fn test_time_restricted_names_never_blocked() {
        let loader = MemoryLoader::default()
            .with("https://a.example/list", "games.example.com\nsocial.example.net\nkeep.example.org\n")
            .with("file:time.txt", "games.example.com @evenings\nsocial.example.net\n");
        let mut opts = options(&["https://a.example/list"]);
        opts.time_restricted = Some("file:time.txt".into());

        let output = build_blacklist(&loader, &opts).unwrap();
        assert_eq!(output.reports[0].names, vec!["keep.example.org"]);
        assert_eq!(output.reports[0].ignored_whitelisted, 2);

        let list = output.time_restricted.unwrap();
        assert_eq!(list.label("games.example.com"), Some("@evenings"));
        assert_eq!(list.label("social.example.net"), None);
    }

    #[test]
    fn test_strict_mode_aborts_on_failure() {
        let loader = MemoryLoader::default().with("https://a.example/list", "a.example.com\n");
        let opts = options(&["https://a.example/list", "https://missing.example/list"]);

        let err = build_blacklist(&loader, &opts).unwrap_err();
        assert!(matches!(err, BuildError::Retrieval(RetrievalError::HttpStatus { status: 404, .. })));
    }

    #[test]
    fn test_tolerant_mode_skips_failed_source() {
        let loader = MemoryLoader::default().with("https://a.example/list", "a.example.com\n");
        let mut opts = options(&["https://missing.example/list", "https://a.example/list"]);
        opts.ignore_retrieval_failure = true;
        opts.whitelist = Some("file:absent.txt".into());

        let output = build_blacklist(&loader, &opts).unwrap();
        assert_eq!(output.reports.len(), 1);
        assert_eq!(output.reports[0].source, "https://a.example/list");
        assert_eq!(output.failures.len(), 2);

        let summary = output.summary();
        assert_eq!(summary.failed_sources, vec!["https://missing.example/list", "file:absent.txt"]);
        assert_eq!(summary.total_blacklisted, 1);
    }

    #[test]
    fn test_trusted_source_uses_plain_dialect() {
        let loader = MemoryLoader::default()
            .with("file:local.txt", "local.example.com\n||adblock.example.com^\n");
        let output = build_blacklist(&loader, &options(&["file:local.txt"])).unwrap();

        assert_eq!(output.reports[0].names, vec!["local.example.com"]);
    }

    #[test]
    fn test_remote_whitelist_uses_full_dialects() {
        let loader = MemoryLoader::default()
            .with("https://a.example/list", "ads.example.com\n")
            .with("https://w.example/allow", "@@||ads.example.com^\n");
        let mut opts = options(&["https://a.example/list"]);
        opts.whitelist = Some("https://w.example/allow".into());

        let output = build_blacklist(&loader, &opts).unwrap();
        assert!(output.reports[0].names.is_empty());
        assert_eq!(output.reports[0].ignored_whitelisted, 1);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let loader = MemoryLoader::default()
            .with("https://a.example/list", "one.example.com\ntwo.example.com\n")
            .with("https://b.example/list", "0.0.0.0 one.example.com\nexample.com\n");
        let opts = options(&["https://a.example/list", "https://b.example/list"]);

        let first = build_blacklist(&loader, &opts).unwrap();
        let second = build_blacklist(&loader, &opts).unwrap();
        assert_eq!(render_blacklist(&first.reports), render_blacklist(&second.reports));
        assert_eq!(first.summary(), second.summary());
    }
}
