use std::collections::BTreeMap;

use log::debug;

use bm_core::types::NameSet;

use crate::normalize::Normalizer;
use crate::recognizer::{Dialect, Extracted};

/// Names from the time-restricted list plus their restriction labels.
///
/// Names without a label are still present in `names`; they are excluded
/// from blocking but reported as ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRestrictedList {
    pub names: NameSet,
    pub restrictions: BTreeMap<String, String>,
}

impl TimeRestrictedList {
    pub fn label(&self, name: &str) -> Option<&str> {
        self.restrictions.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Parses whole documents in one of the supported dialects.
#[derive(Debug)]
pub struct ListParser {
    normalizer: Normalizer,
    blocklist: Dialect,
    time_restricted: Dialect,
}

impl ListParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            normalizer: Normalizer::new()?,
            blocklist: Dialect::blocklist()?,
            time_restricted: Dialect::time_restricted()?,
        })
    }

    /// Parse a block list. Trusted (local) documents only accept the plain
    /// name form.
    pub fn parse_list(&self, content: &str, trusted: bool) -> NameSet {
        if trusted {
            return self.parse_trusted_list(content);
        }

        self.extract_all(content, &self.blocklist)
            .map(|e| e.name)
            .collect()
    }

    /// Parse a local list: names and wildcards, restriction labels dropped.
    pub fn parse_trusted_list(&self, content: &str) -> NameSet {
        self.parse_time_restricted_list(content).names
    }

    pub fn parse_time_restricted_list(&self, content: &str) -> TimeRestrictedList {
        let mut list = TimeRestrictedList::default();

        for Extracted { name, label } in self.extract_all(content, &self.time_restricted) {
            if let Some(label) = label {
                list.restrictions.insert(name.clone(), label);
            }
            list.names.insert(name);
        }

        list
    }

    fn extract_all(&self, content: &str, dialect: &Dialect) -> impl Iterator<Item = Extracted> {
        let mut extracted = Vec::new();
        let mut skipped = 0usize;
        let mut unrecognized = 0usize;

        for raw_line in content.lines() {
            let Some(line) = self.normalizer.normalize(raw_line) else {
                skipped += 1;
                continue;
            };

            match dialect.extract(&line) {
                Some(e) => extracted.push(e),
                None => unrecognized += 1,
            }
        }

        debug!(
            "{} dialect: {} entries, {} comment/blank lines, {} unrecognized lines",
            dialect.name(),
            extracted.len(),
            skipped,
            unrecognized
        );

        extracted.into_iter()
    }
}
