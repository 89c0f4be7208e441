use path_clean::PathClean;
use path_slash::PathExt;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifies a TOC (or any other) file within the doc set.
///
/// Two `FilePath`s are equal only if both their normalized string form and their
/// `is_git_commit` discriminator match, so a working-tree file and a historical
/// git revision of that same path are distinct cache keys (§3, §4.6).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath {
    normalized: String,
    is_git_commit: bool,
}

impl Default for FilePath {
    /// An empty working-tree path, used as a placeholder `SourceLocation.file`
    /// until a real location is attached.
    fn default() -> Self {
        FilePath::working_tree("")
    }
}

impl FilePath {
    /// A path as it exists in the working tree.
    pub fn working_tree(path: impl AsRef<Path>) -> Self {
        Self {
            normalized: normalize(path.as_ref()),
            is_git_commit: false,
        }
    }

    /// A path as it existed at some historical git revision.
    pub fn git_commit(path: impl AsRef<Path>) -> Self {
        Self {
            normalized: normalize(path.as_ref()),
            is_git_commit: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn is_git_commit(&self) -> bool {
        self.is_git_commit
    }

    /// Resolves `href` relative to this file's containing directory, preserving
    /// the git-commit discriminator (the sibling is read from the same revision).
    pub fn resolve_sibling(&self, href: &str) -> FilePath {
        let mut dir = PathBuf::from(&self.normalized);
        dir.pop();
        Self {
            normalized: normalize(&dir.join(href)),
            is_git_commit: self.is_git_commit,
        }
    }

    pub fn parent(&self) -> Option<FilePath> {
        let mut dir = PathBuf::from(&self.normalized);
        if !dir.pop() || dir.as_os_str().is_empty() {
            return None;
        }
        Some(Self {
            normalized: normalize(&dir),
            is_git_commit: self.is_git_commit,
        })
    }

    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.normalized)
            .file_name()
            .and_then(|n| n.to_str())
    }
}

impl fmt::Display for FilePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_git_commit {
            write!(f, "{}@git", self.normalized)
        } else {
            write!(f, "{}", self.normalized)
        }
    }
}

fn normalize(path: &Path) -> String {
    let cleaned = path.to_path_buf().clean();
    cleaned
        .to_slash()
        .map(|s| s.to_string())
        .unwrap_or_else(|| cleaned.to_string_lossy().to_string())
}
