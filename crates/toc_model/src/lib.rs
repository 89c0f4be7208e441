mod document;
mod href_kind;
mod join_config;
mod moniker;
mod node;

pub use document::{ContentType, Document};
pub use href_kind::{TocHrefKind, UrlKind, RESERVED_TOC_NAMES};
pub use join_config::{JoinConfig, JoinEntry};
pub use moniker::MonikerList;
pub use node::{PreOrderMut, SourceLocation, TocNode};

pub use toc_path::FilePath;
