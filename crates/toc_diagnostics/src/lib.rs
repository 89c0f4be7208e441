use parking_lot::Mutex;
use std::fmt;
use toc_model::SourceLocation;
use toc_path::FilePath;

/// The diagnostic kinds the loader itself can emit (§7).
///
/// `CircularReference` is unusual among these: it also aborts the branch of
/// the load that produced it (the caller receives it as an `Err`, not just a
/// sink entry), but it is still routed through the sink for host visibility,
/// consistent with every other kind in this table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    CircularReference {
        file: FilePath,
        stack: Vec<FilePath>,
    },
    InvalidTocHref {
        href: String,
    },
    InvalidTopicHref {
        href: String,
    },
    FileNotFound {
        href: String,
    },
    MissingAttribute {
        attribute: &'static str,
    },
    /// A passthrough error surfaced verbatim by a link/xref-resolution collaborator.
    Collaborator {
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::CircularReference { file, stack } => write!(
                f,
                "circular TOC reference at {file}: {}",
                stack
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ")
            ),
            Diagnostic::InvalidTocHref { href } => write!(f, "invalid tocHref: {href}"),
            Diagnostic::InvalidTopicHref { href } => write!(f, "invalid topicHref: {href}"),
            Diagnostic::FileNotFound { href } => write!(f, "file not found: {href}"),
            Diagnostic::MissingAttribute { attribute } => {
                write!(f, "missing required attribute: {attribute}")
            }
            Diagnostic::Collaborator { message } => write!(f, "{message}"),
        }
    }
}

/// A diagnostic with the location it was raised at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEntry {
    pub diagnostic: Diagnostic,
    pub source: SourceLocation,
}

/// The external error sink collaborator (§6).
///
/// Implementations must be safe to share across the parallel workers
/// described in §5 ("External collaborators ... must be thread-safe").
pub trait ErrorSink: Send + Sync {
    fn report(&self, entry: DiagnosticEntry);
}

impl<T: ErrorSink + ?Sized> ErrorSink for &T {
    fn report(&self, entry: DiagnosticEntry) {
        (**self).report(entry);
    }
}

/// A simple in-memory [`ErrorSink`], useful for tests and for CLI hosts that
/// want to inspect diagnostics once a load completes (mirrors the teacher
/// workspace's `VecLogger`).
#[derive(Default)]
pub struct VecErrorSink {
    entries: Mutex<Vec<DiagnosticEntry>>,
}

impl VecErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<DiagnosticEntry> {
        self.entries.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl ErrorSink for VecErrorSink {
    fn report(&self, entry: DiagnosticEntry) {
        self.entries.lock().push(entry);
    }
}
