mod file_loader;
mod node_resolver;
mod recursion_guard;

pub use file_loader::{load_toc_file, load_toc_nodes};
pub use recursion_guard::RecursionGuard;

use thiserror::Error;
use toc_collaborators::ParseError;
use toc_diagnostics::Diagnostic;

/// Fatal failure of a load chain: either a cycle (§4.4) or an unrecoverable
/// parse failure from the external parser. Every other error kind (§7) is
/// recoverable and goes to the error sink instead of here.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("{0}")]
    Circular(Diagnostic),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
