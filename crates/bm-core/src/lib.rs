//! blockmerge Core Library
//!
//! Domain name primitives shared by the list compiler and the CLI.
//!
//! # Modules
//!
//! - `suffix`: parent-domain walking, suffix coverage and the reversed-label ordering
//! - `types`: Shared type definitions

pub mod suffix;
pub mod types;

// Re-export commonly used types
pub use suffix::{cmp_names, get_parent_domain, has_suffix, name_sort_key, parent_domains, NameLookup};
pub use types::{NameSet, Source};
