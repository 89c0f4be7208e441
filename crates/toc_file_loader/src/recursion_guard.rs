use toc_diagnostics::Diagnostic;
use toc_path::FilePath;

/// A per-call-chain stack of files currently being expanded (§4.4).
///
/// Cloning produces an independent snapshot: a parallel worker pushes/pops
/// onto its own clone without being able to see or affect a sibling
/// worker's branch, while still detecting cycles along its own ancestor path.
#[derive(Debug, Clone, Default)]
pub struct RecursionGuard {
    stack: Vec<FilePath>,
}

impl RecursionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `file` onto the stack, failing with `CircularReference` if it
    /// is already present.
    pub fn push(&mut self, file: FilePath) -> Result<(), Diagnostic> {
        if self.stack.contains(&file) {
            let mut stack = self.stack.clone();
            stack.push(file.clone());
            return Err(Diagnostic::CircularReference { file, stack });
        }
        self.stack.push(file);
        Ok(())
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// An independent copy for a parallel sub-worker to push/pop onto.
    pub fn snapshot(&self) -> RecursionGuard {
        self.clone()
    }
}
