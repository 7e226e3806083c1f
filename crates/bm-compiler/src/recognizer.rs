//! Line recognizers for the supported list dialects
//!
//! Each recognizer is a pure function from a normalized line to an optional
//! extracted name. A [`Dialect`] tries its recognizers in order and the first
//! match claims the line. Supporting a new list format means appending a
//! recognizer, never branching on the format elsewhere.

use regex::Regex;

/// Lexical shape of a plausible domain: dot-separated labels with a final
/// label of at least two letters.
const DOMAIN: &str = r"[a-z0-9.-]+[.][a-z]{2,}";

/// Name (and optional restriction label) pulled out of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub name: String,
    pub label: Option<String>,
}

/// Recognizes a single list syntax.
pub trait LineRecognizer: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Extract a name from a normalized line, or `None` if the line is not
    /// in this syntax.
    fn extract(&self, line: &str) -> Option<Extracted>;
}

/// Regex-backed recognizer. Group 1 holds the name; an optional second
/// group holds the restriction label.
#[derive(Debug, Clone)]
pub struct PatternRecognizer {
    name: &'static str,
    regex: Regex,
    label_group: Option<usize>,
}

impl PatternRecognizer {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            name,
            regex: Regex::new(pattern)?,
            label_group: None,
        })
    }

    pub fn with_label_group(mut self, group: usize) -> Self {
        self.label_group = Some(group);
        self
    }
}

impl LineRecognizer for PatternRecognizer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn extract(&self, line: &str) -> Option<Extracted> {
        let caps = self.regex.captures(line)?;
        let name = caps.get(1)?.as_str().to_string();
        let label = self
            .label_group
            .and_then(|group| caps.get(group))
            .map(|m| m.as_str().to_string());
        Some(Extracted { name, label })
    }
}

/// Adblock rule: `||ads.example.com^`, `@@||x.com^$third-party`.
pub fn adblock() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new(
        "adblock",
        &format!(r"^@*\|\|({DOMAIN})\^?(\$(popup|third-party))?$"),
    )
}

/// The whole line is a domain.
pub fn bare_domain() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new("domain", &format!(r"^({DOMAIN})$"))
}

/// Hosts file: `0.0.0.0 ads.example.com`.
pub fn hosts() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new(
        "hosts",
        &format!(r"^[0-9]{{1,3}}[.][0-9]{{1,3}}[.][0-9]{{1,3}}[.][0-9]{{1,3}}\s+({DOMAIN})$"),
    )
}

/// Quoted CSV / markdown export: `"id","ads.example.com",...`.
pub fn quoted_csv() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new("quoted-csv", &format!(r#"^"[^"]+","({DOMAIN})","#))
}

/// CSV with a date column: `ads.example.com,malware,2019-01-01 10:00,`.
pub fn dated_csv() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new("csv", &format!(r"^({DOMAIN}),.+,[0-9: /-]+,"))
}

/// dnsmasq directive: `address=/ads.example.com/0.0.0.0`.
pub fn dnsmasq_address() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new("dnsmasq", &format!(r"^address=/({DOMAIN})/."))
}

/// Time-restricted entry: `*.example.com @weekdays`. Wildcards allowed,
/// the label keeps its leading `@`.
pub fn time_restricted() -> Result<PatternRecognizer, regex::Error> {
    PatternRecognizer::new("time-restricted", r"^([*a-z0-9.-]+)\s*(@\S+)?$")
        .map(|r| r.with_label_group(2))
}

/// Ordered set of recognizers; the first match wins.
pub struct Dialect {
    name: &'static str,
    recognizers: Vec<Box<dyn LineRecognizer>>,
}

impl Dialect {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            recognizers: Vec::new(),
        }
    }

    /// Append a recognizer at the lowest priority.
    pub fn push(&mut self, recognizer: impl LineRecognizer + 'static) -> &mut Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    /// All six third-party block list syntaxes, in priority order.
    pub fn blocklist() -> Result<Self, regex::Error> {
        let mut dialect = Self::new("blocklist");
        dialect
            .push(adblock()?)
            .push(bare_domain()?)
            .push(hosts()?)
            .push(quoted_csv()?)
            .push(dated_csv()?)
            .push(dnsmasq_address()?);
        Ok(dialect)
    }

    /// Names with optional restriction labels. Also used, labels dropped,
    /// for trusted local files.
    pub fn time_restricted() -> Result<Self, regex::Error> {
        let mut dialect = Self::new("time-restricted");
        dialect.push(time_restricted()?);
        Ok(dialect)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }

    pub fn extract(&self, line: &str) -> Option<Extracted> {
        self.recognizers.iter().find_map(|r| r.extract(line))
    }
}

impl std::fmt::Debug for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.recognizers.iter().map(|r| r.name()).collect();
        f.debug_struct("Dialect")
            .field("name", &self.name)
            .field("recognizers", &names)
            .finish()
    }
}
