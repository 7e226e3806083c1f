use std::fs;
use std::path::Path;

use log::warn;
use regex::Regex;

const SCHEME: &str = r"^[a-z0-9]+:";

/// Source references from a config file: one per line, blank lines and
/// `#` comments skipped.
pub fn parse_source_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn read_source_list(path: &str) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    Ok(parse_source_list(&content))
}

/// Whether a reference starts with a scheme such as `https:` or `file:`.
fn has_scheme(reference: &str) -> Result<bool, String> {
    let scheme = Regex::new(SCHEME).map_err(|e| format!("Invalid scheme pattern: {}", e))?;
    Ok(scheme.is_match(reference))
}

/// Turn a whitelist or time-restricted argument into a loadable reference.
///
/// Scheme-qualified references pass through. A local path becomes a
/// `file:` reference; a missing one disables the feature with a warning.
pub fn resolve_reference(kind: &str, reference: &str) -> Result<Option<String>, String> {
    if reference.is_empty() {
        return Ok(None);
    }

    if has_scheme(reference)? {
        return Ok(Some(reference.to_string()));
    }

    if Path::new(reference).exists() {
        Ok(Some(format!("file:{}", reference)))
    } else {
        warn!("{} file '{}' does not exist", kind, reference);
        Ok(None)
    }
}

/// The previous output, loaded as a trusted source when present.
pub fn self_reference(output_file: &str) -> Option<String> {
    Path::new(output_file)
        .exists()
        .then(|| format!("file:{}", output_file))
}
