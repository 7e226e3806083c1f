//! blockmerge List Compiler
//!
//! This crate turns heterogeneous third-party block lists into a single,
//! deduplicated blacklist that honors a whitelist and a time-restricted list.

pub mod normalize;
pub mod recognizer;
pub mod parser;
pub mod loader;
pub mod aggregator;
pub mod pipeline;
pub mod report;

pub use aggregator::{merge_sources, AggregateState, Disposition, SourceReport};
pub use loader::{ContentLoader, LoadedContent, RetrievalError};
pub use parser::{ListParser, TimeRestrictedList};
pub use pipeline::{build_blacklist, BuildError, BuildOptions, BuildOutput, RunSummary};
pub use report::{render_blacklist, render_source_block, render_time_restricted};
