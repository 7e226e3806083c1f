//! Suffix coverage for domain names
//!
//! Blocking `example.com` implicitly blocks every name below it, so a
//! candidate is "covered" by a reference set when one of its strict parent
//! domains is a member of that set. The candidate's own spelling is never
//! checked here; callers test exact membership separately.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashSet;
//! use bm_core::suffix::has_suffix;
//!
//! let names: HashSet<String> = ["example.com".to_string()].into_iter().collect();
//! assert!(has_suffix(&names, "ads.example.com"));
//! assert!(!has_suffix(&names, "example.com"));
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

// =============================================================================
// Lookup
// =============================================================================

/// Exact-membership lookup over a set of names.
pub trait NameLookup {
    fn contains_name(&self, name: &str) -> bool;
}

impl NameLookup for HashSet<String> {
    #[inline]
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl NameLookup for BTreeSet<String> {
    #[inline]
    fn contains_name(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<T: NameLookup + ?Sized> NameLookup for &T {
    #[inline]
    fn contains_name(&self, name: &str) -> bool {
        (**self).contains_name(name)
    }
}

// =============================================================================
// Parent walking
// =============================================================================

/// Get the parent domain (strip leftmost label).
pub fn get_parent_domain(host: &str) -> Option<&str> {
    match host.find('.') {
        Some(idx) if idx < host.len() - 1 => Some(&host[idx + 1..]),
        _ => None,
    }
}

/// Iterator over the strict parent domains of a host, nearest first.
///
/// `a.b.example.com` yields `b.example.com`, `example.com`, `com`.
pub struct ParentDomains<'a> {
    current: &'a str,
}

impl<'a> Iterator for ParentDomains<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let parent = get_parent_domain(self.current)?;
        self.current = parent;
        Some(parent)
    }
}

/// Walk the strict parents of `host` without allocating.
pub fn parent_domains(host: &str) -> ParentDomains<'_> {
    ParentDomains { current: host }
}

/// Check whether any strict parent domain of `name` is in `names`.
///
/// Always false for a single-label name.
pub fn has_suffix<L: NameLookup + ?Sized>(names: &L, name: &str) -> bool {
    parent_domains(name).any(|parent| names.contains_name(parent))
}

// =============================================================================
// Ordering
// =============================================================================

/// Sort key with the label order reversed (`a.example.com` -> `com.example.a`).
pub fn name_sort_key(name: &str) -> String {
    name.rsplit('.').collect::<Vec<_>>().join(".")
}

/// Compare two names by their reversed-label keys.
///
/// Groups a domain with its sub-domains, parent first.
pub fn cmp_names(a: &str, b: &str) -> Ordering {
    name_sort_key(a).cmp(&name_sort_key(b))
}
