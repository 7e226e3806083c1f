//! Content loading seam.
//!
//! The compiler never touches the network or filesystem itself; it asks a
//! [`ContentLoader`] for the text behind a source reference.

/// Raw text of a source plus its trust flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedContent {
    pub text: String,
    /// Loaded from a local origin.
    pub trusted: bool,
}

impl LoadedContent {
    /// Decode bytes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(bytes: &[u8], trusted: bool) -> Self {
        Self {
            text: String::from_utf8_lossy(bytes).into_owned(),
            trusted,
        }
    }
}

/// Error type for source retrieval.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("[{reference}] could not be loaded: {source}")]
    Io {
        reference: String,
        #[source]
        source: std::io::Error,
    },
    #[error("[{reference}] could not be loaded: {message}")]
    Transport { reference: String, message: String },
    #[error("[{reference}] returned HTTP code {status}")]
    HttpStatus { reference: String, status: u16 },
}

impl RetrievalError {
    /// The source reference that failed.
    pub fn reference(&self) -> &str {
        match self {
            Self::Io { reference, .. }
            | Self::Transport { reference, .. }
            | Self::HttpStatus { reference, .. } => reference,
        }
    }
}

/// Fetches the text behind a source reference (URL or `file:` path).
pub trait ContentLoader {
    fn load(&self, reference: &str) -> Result<LoadedContent, RetrievalError>;
}

impl<L: ContentLoader + ?Sized> ContentLoader for &L {
    fn load(&self, reference: &str) -> Result<LoadedContent, RetrievalError> {
        (**self).load(reference)
    }
}

/// Local path of a `file:` reference. Accepts `file:path` and `file://path`.
pub fn file_reference_path(reference: &str) -> Option<&str> {
    let rest = reference.strip_prefix("file:")?;
    Some(rest.strip_prefix("//").unwrap_or(rest))
}
